//! `GenomicRangesList`: `GenomicRange` records grouped by chromosome.

use std::collections::HashMap;

use super::genomic_range::GenomicRange;

#[derive(Debug, Clone, Default)]
pub struct GenomicRangesList {
    /// key = chromosome, value = ranges on that chromosome.
    pub genomic_ranges_map: HashMap<String, Vec<GenomicRange>>,
    /// key = GenomicRange id, value = (chromosome, index into the vec above).
    index: HashMap<String, (String, usize)>,
}

impl GenomicRangesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_genomic_range(&mut self, genomic_range: GenomicRange) {
        let id = genomic_range.id();
        let chromosome = genomic_range.chromosome.clone();
        let bucket = self.genomic_ranges_map.entry(chromosome.clone()).or_default();
        let idx = bucket.len();
        bucket.push(genomic_range);
        self.index.insert(id, (chromosome, idx));
    }

    pub fn num_genomic_regions(&self) -> usize {
        self.genomic_ranges_map.values().map(|v| v.len()).sum()
    }

    pub fn get_genomic_range(&self, id: &str) -> Option<&GenomicRange> {
        let (chromosome, idx) = self.index.get(id)?;
        self.genomic_ranges_map.get(chromosome)?.get(*idx)
    }

    /// Linear scan for ranges on `chromosome` overlapping `[start, end]`.
    /// Used by small region lists; the spatial index (`crate::index`) is
    /// used instead for the padded queries the set-algebra engine issues.
    pub fn find_overlaps(&self, chromosome: &str, start: i64, end: i64) -> Vec<&GenomicRange> {
        self.genomic_ranges_map
            .get(chromosome)
            .map(|ranges| {
                ranges
                    .iter()
                    .filter(|r| r.overlaps(chromosome, start, end))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn groups_ranges_by_chromosome_and_looks_up_by_id() {
        let mut list = GenomicRangesList::new();
        list.add_genomic_range(GenomicRange::new("chr1", 100, 200).unwrap());
        list.add_genomic_range(GenomicRange::new("chr2", 300, 400).unwrap());
        assert_eq!(list.num_genomic_regions(), 2);
        assert_eq!(
            list.get_genomic_range("chr1:100-200").unwrap().chromosome,
            "chr1"
        );
        assert_eq!(list.find_overlaps("chr1", 150, 160).len(), 1);
        assert_eq!(list.find_overlaps("chr2", 1, 2).len(), 0);
    }
}
