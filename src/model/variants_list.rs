//! `VariantsList`: an ordered sequence of `Variant` records.

use std::collections::HashMap;

use super::variant::Variant;

#[derive(Debug, Clone, Default)]
pub struct VariantsList {
    pub variants: Vec<Variant>,
    /// key = variant ID, value = index into `variants`.
    variants_dict: HashMap<String, usize>,
}

impl VariantsList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_variants(variants: Vec<Variant>) -> Self {
        let mut list = VariantsList {
            variants,
            variants_dict: HashMap::new(),
        };
        list.reindex();
        list
    }

    fn reindex(&mut self) {
        self.variants_dict.clear();
        for (i, variant) in self.variants.iter().enumerate() {
            self.variants_dict.insert(variant.id.clone(), i);
        }
    }

    pub fn size(&self) -> usize {
        self.variants.len()
    }

    pub fn add_variant(&mut self, variant: Variant) {
        self.variants_dict
            .insert(variant.id.clone(), self.variants.len());
        self.variants.push(variant);
    }

    pub fn get_variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants_dict
            .get(variant_id)
            .and_then(|&i| self.variants.get(i))
    }

    pub fn variant_ids(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.id.as_str()).collect()
    }

    pub fn variant_call_ids(&self) -> Vec<&str> {
        self.variants
            .iter()
            .flat_map(|v| v.variant_calls.iter().map(|c| c.id.as_str()))
            .collect()
    }

    /// Number of `VariantCall` records across all variants.
    pub fn num_variant_calls(&self) -> usize {
        self.variants.iter().map(|v| v.num_variant_calls()).sum()
    }

    /// Sort variants by their smallest member's locus, per spec.md §4.4.8.
    /// Variants lists built by a single caller-provided input (rather than
    /// by a merge) may have no calls at all; those sort last and stably
    /// among themselves.
    pub fn sort_by_locus(&mut self) {
        self.variants.sort_by(|a, b| a.min_locus_key().cmp(&b.min_locus_key()));
        self.reindex();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::variant_call::{VariantCall, VariantType};

    fn variant(id: &str, chrom: &str, pos: i64) -> Variant {
        let call = VariantCall::new(
            format!("{id}_call"),
            "s1",
            chrom,
            pos,
            chrom,
            pos,
            VariantType::SNV,
            "C",
            "A",
        )
        .unwrap();
        Variant::with_calls(id, vec![call])
    }

    #[test]
    fn sorts_by_smallest_member_locus() {
        let mut list = VariantsList::new();
        list.add_variant(variant("v2", "chr1", 200));
        list.add_variant(variant("v1", "chr1", 100));
        list.sort_by_locus();
        assert_eq!(list.variant_ids(), vec!["v1", "v2"]);
    }

    #[test]
    fn looks_up_variant_by_id() {
        let mut list = VariantsList::new();
        list.add_variant(variant("v1", "chr1", 100));
        assert!(list.get_variant("v1").is_some());
        assert!(list.get_variant("missing").is_none());
    }
}
