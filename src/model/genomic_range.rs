//! `GenomicRange`: a closed interval `[start, end]` on a chromosome.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenomicRange {
    pub chromosome: String,
    pub start: i64,
    pub end: i64,
}

impl GenomicRange {
    pub fn new(chromosome: impl Into<String>, start: i64, end: i64) -> Result<Self> {
        if start > end {
            return Err(Error::MalformedInput(format!(
                "genomic range start ({start}) > end ({end})"
            )));
        }
        Ok(GenomicRange {
            chromosome: chromosome.into(),
            start,
            end,
        })
    }

    pub fn id(&self) -> String {
        format!("{}:{}-{}", self.chromosome, self.start, self.end)
    }

    /// Whether `[start, end]` on `chromosome` overlaps this range.
    pub fn overlaps(&self, chromosome: &str, start: i64, end: i64) -> bool {
        chromosome == self.chromosome && start <= self.end && end >= self.start
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_inverted_range() {
        assert!(GenomicRange::new("chr1", 100, 50).is_err());
    }

    #[test]
    fn overlap_checks_chromosome_and_bounds() {
        let r = GenomicRange::new("chr1", 100, 200).unwrap();
        assert!(r.overlaps("chr1", 150, 160));
        assert!(r.overlaps("chr1", 50, 100));
        assert!(!r.overlaps("chr1", 201, 300));
        assert!(!r.overlaps("chr2", 150, 160));
    }

    #[test]
    fn id_is_chromosome_start_end() {
        let r = GenomicRange::new("chr1", 100, 200).unwrap();
        assert_eq!(r.id(), "chr1:100-200");
    }
}
