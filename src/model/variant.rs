//! The `Variant`: a cluster of `VariantCall` records denoting one event.

use crate::error::{Error, Result};

use super::variant_call::VariantCall;

/// A cluster of `VariantCall` records representing one biological event.
/// All contained calls must share `chromosome_1` and `chromosome_2`.
#[derive(Debug, Clone, Default)]
pub struct Variant {
    pub id: String,
    pub variant_calls: Vec<VariantCall>,
}

impl Variant {
    pub fn new(id: impl Into<String>) -> Self {
        Variant {
            id: id.into(),
            variant_calls: Vec::new(),
        }
    }

    pub fn with_calls(id: impl Into<String>, mut variant_calls: Vec<VariantCall>) -> Self {
        variant_calls.sort();
        Variant {
            id: id.into(),
            variant_calls,
        }
    }

    /// Add a `VariantCall`, keeping `variant_calls` sorted by locus and
    /// enforcing that its chromosomes match the calls already present.
    pub fn add_variant_call(&mut self, variant_call: VariantCall) -> Result<()> {
        if let Some(first) = self.variant_calls.first() {
            if variant_call.chromosome_1 != first.chromosome_1
                || variant_call.chromosome_2 != first.chromosome_2
            {
                return Err(Error::MalformedInput(format!(
                    "variant call {} chromosomes ({}, {}) do not match variant {} chromosomes ({}, {})",
                    variant_call.id,
                    variant_call.chromosome_1,
                    variant_call.chromosome_2,
                    self.id,
                    first.chromosome_1,
                    first.chromosome_2
                )));
            }
        }
        let pos = self
            .variant_calls
            .binary_search(&variant_call)
            .unwrap_or_else(|p| p);
        self.variant_calls.insert(pos, variant_call);
        Ok(())
    }

    pub fn num_variant_calls(&self) -> usize {
        self.variant_calls.len()
    }

    pub fn variant_call_ids(&self) -> Vec<&str> {
        self.variant_calls.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn chromosome_1(&self) -> Option<&str> {
        self.variant_calls.first().map(|c| c.chromosome_1.as_str())
    }

    pub fn chromosome_2(&self) -> Option<&str> {
        self.variant_calls.first().map(|c| c.chromosome_2.as_str())
    }

    /// Locus key of the smallest member, used to sort output variants
    /// (spec.md §4.4.8).
    pub fn min_locus_key(&self) -> Option<(&str, i64, &str, i64)> {
        self.variant_calls.first().map(|c| c.locus_key())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::variant_call::VariantType;

    fn call(id: &str, pos: i64) -> VariantCall {
        VariantCall::new(id, "s1", "chr1", pos, "chr1", pos, VariantType::SNV, "C", "A").unwrap()
    }

    #[test]
    fn keeps_calls_sorted_on_insert() {
        let mut v = Variant::new("v1");
        v.add_variant_call(call("c2", 200)).unwrap();
        v.add_variant_call(call("c1", 100)).unwrap();
        assert_eq!(v.variant_call_ids(), vec!["c1", "c2"]);
    }

    #[test]
    fn rejects_mismatched_chromosomes() {
        let mut v = Variant::new("v1");
        v.add_variant_call(call("c1", 100)).unwrap();
        let mut other = call("c2", 100);
        other.chromosome_1 = "chr2".to_string();
        assert!(v.add_variant_call(other).is_err());
    }
}
