//! Per-chromosome spatial index over `VariantCall` breakpoints or
//! `GenomicRange` bounds (spec.md §4.2).
//!
//! Grounded on `varfish-org-varfish-server-worker`'s
//! `sv/query/bgdbs.rs`: one `ArrayBackedIntervalTree` per chromosome,
//! collected into a `Vec` addressed through a chromosome→slot map, built
//! once and queried many times.

use std::collections::HashMap;

use bio::data_structures::interval_tree::ArrayBackedIntervalTree;

/// Which breakpoint(s) of a `VariantCall` are indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Position1,
    Position2,
    Both,
}

/// One half-open interval to be indexed, tagged with the ID of the
/// record it came from.
pub struct IndexEntry {
    pub chromosome: String,
    pub start: i64,
    pub end: i64,
    pub record_id: u32,
}

/// A built spatial index: one interval tree per chromosome, addressed
/// by a chromosome→slot map so lookups against an absent chromosome
/// are a plain `HashMap::get` miss rather than an empty-tree query.
pub struct SpatialIndex {
    chromosome_slots: HashMap<String, usize>,
    trees: Vec<ArrayBackedIntervalTree<i64, u32>>,
    len: usize,
}

impl SpatialIndex {
    /// Build an index over `entries`. Insertion order is preserved
    /// within each chromosome's tree, so the build is deterministic
    /// given identical input order (spec.md §4.2).
    pub fn build(entries: impl IntoIterator<Item = IndexEntry>) -> Self {
        let mut chromosome_slots: HashMap<String, usize> = HashMap::new();
        let mut trees: Vec<ArrayBackedIntervalTree<i64, u32>> = Vec::new();
        let mut len = 0usize;

        for entry in entries {
            let slot = *chromosome_slots
                .entry(entry.chromosome)
                .or_insert_with(|| {
                    trees.push(ArrayBackedIntervalTree::new());
                    trees.len() - 1
                });
            trees[slot].insert(entry.start..entry.end + 1, entry.record_id);
            len += 1;
        }
        for tree in &mut trees {
            tree.index();
        }
        SpatialIndex {
            chromosome_slots,
            trees,
            len,
        }
    }

    /// Record IDs whose indexed interval overlaps `[start, end]` on
    /// `chromosome`. An absent chromosome yields an empty result, not
    /// an error.
    pub fn query(&self, chromosome: &str, start: i64, end: i64) -> Vec<u32> {
        let Some(&slot) = self.chromosome_slots.get(chromosome) else {
            return Vec::new();
        };
        self.trees[slot]
            .find(start..end + 1)
            .into_iter()
            .map(|entry| *entry.data())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Build a [`SpatialIndex`] over a `VariantCall` collection's
/// breakpoint(s), per `anchor`. `records` is `(chromosome_1, position_1,
/// chromosome_2, position_2, record_id)` so callers can index any
/// record type that carries a genomic call locus without this module
/// depending on `crate::model`.
pub fn build_call_index<'a>(
    records: impl IntoIterator<Item = (&'a str, i64, &'a str, i64, u32)>,
    anchor: Anchor,
) -> SpatialIndex {
    let mut entries = Vec::new();
    for (chrom_1, pos_1, chrom_2, pos_2, id) in records {
        match anchor {
            Anchor::Position1 => entries.push(IndexEntry {
                chromosome: chrom_1.to_string(),
                start: pos_1,
                end: pos_1,
                record_id: id,
            }),
            Anchor::Position2 => entries.push(IndexEntry {
                chromosome: chrom_2.to_string(),
                start: pos_2,
                end: pos_2,
                record_id: id,
            }),
            Anchor::Both => {
                entries.push(IndexEntry {
                    chromosome: chrom_1.to_string(),
                    start: pos_1,
                    end: pos_1,
                    record_id: id,
                });
                entries.push(IndexEntry {
                    chromosome: chrom_2.to_string(),
                    start: pos_2,
                    end: pos_2,
                    record_id: id,
                });
            }
        }
    }
    SpatialIndex::build(entries)
}

/// Build a [`SpatialIndex`] over `GenomicRange` bounds, for
/// range-vs-point queries (spec.md §4.2, overlap).
pub fn build_range_index<'a>(
    ranges: impl IntoIterator<Item = (&'a str, i64, i64, u32)>,
) -> SpatialIndex {
    let entries = ranges
        .into_iter()
        .map(|(chromosome, start, end, id)| IndexEntry {
            chromosome: chromosome.to_string(),
            start,
            end,
            record_id: id,
        });
    SpatialIndex::build(entries)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn queries_absent_chromosome_return_empty() {
        let index = SpatialIndex::build(vec![IndexEntry {
            chromosome: "chr1".into(),
            start: 100,
            end: 100,
            record_id: 0,
        }]);
        assert!(index.query("chr2", 0, 1000).is_empty());
    }

    #[test]
    fn queries_find_overlapping_point_entries() {
        let index = SpatialIndex::build(vec![
            IndexEntry {
                chromosome: "chr1".into(),
                start: 100,
                end: 100,
                record_id: 0,
            },
            IndexEntry {
                chromosome: "chr1".into(),
                start: 500,
                end: 500,
                record_id: 1,
            },
        ]);
        let mut hits = index.query("chr1", 90, 110);
        hits.sort();
        assert_eq!(hits, vec![0]);
        assert!(index.query("chr1", 0, 1000).len() == 2);
    }

    #[test]
    fn build_call_index_respects_anchor() {
        let records = vec![("chr1", 100, "chr2", 200, 0u32)];
        let by_1 = build_call_index(records.clone(), Anchor::Position1);
        assert_eq!(by_1.query("chr1", 100, 100), vec![0]);
        assert!(by_1.query("chr2", 200, 200).is_empty());

        let by_2 = build_call_index(records.clone(), Anchor::Position2);
        assert_eq!(by_2.query("chr2", 200, 200), vec![0]);

        let by_both = build_call_index(records, Anchor::Both);
        assert_eq!(by_both.query("chr1", 100, 100), vec![0]);
        assert_eq!(by_both.query("chr2", 200, 200), vec![0]);
    }

    #[test]
    fn build_range_index_queries_full_interval() {
        let ranges = vec![("chr1", 100, 200, 0u32)];
        let index = build_range_index(ranges);
        assert_eq!(index.query("chr1", 150, 160), vec![0]);
        assert!(index.query("chr1", 201, 300).is_empty());
    }
}
