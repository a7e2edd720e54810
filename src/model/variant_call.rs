//! The `VariantCall` record: one caller-reported breakpoint event.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::annotation::VariantCallAnnotation;
use super::attribute::AttributeValue;
use crate::error::{Error, Result};

/// Variant classification. Grouped into equivalence classes by the match
/// oracle: `{SNV}`, `{MNV}`, `{INS, DUP}`, `{DEL}`, `{BND, INV, TRA}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum VariantType {
    SNV,
    MNV,
    INS,
    DEL,
    DUP,
    INV,
    TRA,
    BND,
}

impl VariantType {
    /// The match-oracle equivalence class this type belongs to (spec.md §4.3 step 2).
    pub fn match_class(&self) -> u8 {
        match self {
            VariantType::SNV => 0,
            VariantType::MNV => 1,
            VariantType::INS | VariantType::DUP => 2,
            VariantType::DEL => 3,
            VariantType::BND | VariantType::INV | VariantType::TRA => 4,
        }
    }
}

/// The locus key that orders `VariantCall` records and underlies equality:
/// `(chromosome_1, position_1, chromosome_2, position_2)`.
pub type LocusKey<'a> = (&'a str, i64, &'a str, i64);

/// A single caller-reported breakpoint event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantCall {
    // Identity
    pub id: String,
    pub sample_id: String,

    // Locus
    pub chromosome_1: String,
    pub position_1: i64,
    pub chromosome_2: String,
    pub position_2: i64,

    // Classification
    pub variant_type: VariantType,
    pub variant_subtype: String,
    pub variant_size: i64,

    // Alleles
    pub reference_allele: String,
    pub alternate_allele: String,

    // Evidence
    pub reference_allele_read_count: i64,
    pub alternate_allele_read_count: i64,
    pub total_read_count: i64,
    pub alternate_allele_fraction: f64,
    pub alternate_allele_read_ids: BTreeSet<String>,
    pub variant_sequences: BTreeSet<String>,
    pub quality_score: f64,
    pub filter: String,
    pub precise: Option<bool>,

    // Provenance
    pub source_id: String,
    pub clone_id: String,
    pub phase_block_id: String,
    pub nucleic_acid: String,
    pub sequencing_platform: String,
    pub variant_calling_method: String,

    // Free-form attributes
    pub attributes: IndexMap<String, AttributeValue>,

    // Tags
    pub tags: BTreeSet<String>,

    // Alignment-score enrichment
    pub average_alignment_score_window: i64,
    pub position_1_average_alignment_score: f64,
    pub position_2_average_alignment_score: f64,

    // Annotations
    pub position_1_annotations: Vec<VariantCallAnnotation>,
    pub position_2_annotations: Vec<VariantCallAnnotation>,
}

/// Sentinel used for evidence fields that have not been set.
pub const MISSING_FRACTION: f64 = -1.0;

impl VariantCall {
    /// Construct a minimal `VariantCall` from its mandatory fields,
    /// with every optional field at its engine default. Validates the
    /// locus ordering and alternate-allele-fraction invariants.
    pub fn new(
        id: impl Into<String>,
        sample_id: impl Into<String>,
        chromosome_1: impl Into<String>,
        position_1: i64,
        chromosome_2: impl Into<String>,
        position_2: i64,
        variant_type: VariantType,
        reference_allele: impl Into<String>,
        alternate_allele: impl Into<String>,
    ) -> Result<Self> {
        let chromosome_1 = chromosome_1.into();
        let chromosome_2 = chromosome_2.into();
        if chromosome_1 == chromosome_2
            && position_1 > position_2
            && matches!(
                variant_type,
                VariantType::INS | VariantType::DEL | VariantType::DUP | VariantType::INV
            )
        {
            return Err(Error::MalformedInput(format!(
                "locus inversion: position_1 ({position_1}) > position_2 ({position_2}) for {variant_type}"
            )));
        }
        Ok(VariantCall {
            id: id.into(),
            sample_id: sample_id.into(),
            chromosome_1,
            position_1,
            chromosome_2,
            position_2,
            variant_type,
            variant_subtype: String::new(),
            variant_size: -1,
            reference_allele: reference_allele.into(),
            alternate_allele: alternate_allele.into(),
            reference_allele_read_count: -1,
            alternate_allele_read_count: -1,
            total_read_count: -1,
            alternate_allele_fraction: MISSING_FRACTION,
            alternate_allele_read_ids: BTreeSet::new(),
            variant_sequences: BTreeSet::new(),
            quality_score: -1.0,
            filter: String::new(),
            precise: None,
            source_id: String::new(),
            clone_id: String::new(),
            phase_block_id: String::new(),
            nucleic_acid: String::new(),
            sequencing_platform: String::new(),
            variant_calling_method: String::new(),
            attributes: IndexMap::new(),
            tags: BTreeSet::new(),
            average_alignment_score_window: -1,
            position_1_average_alignment_score: -1.0,
            position_2_average_alignment_score: -1.0,
            position_1_annotations: Vec::new(),
            position_2_annotations: Vec::new(),
        })
    }

    /// Validate that `alternate_allele_fraction` is within `[0, 1]`
    /// whenever it is not the missing sentinel.
    pub fn validate(&self) -> Result<()> {
        if self.alternate_allele_fraction != MISSING_FRACTION
            && !(0.0..=1.0).contains(&self.alternate_allele_fraction)
        {
            return Err(Error::MalformedInput(format!(
                "alternate_allele_fraction out of range [0,1] for variant call {}: {}",
                self.id, self.alternate_allele_fraction
            )));
        }
        Ok(())
    }

    pub fn locus_key(&self) -> LocusKey<'_> {
        (
            &self.chromosome_1,
            self.position_1,
            &self.chromosome_2,
            self.position_2,
        )
    }

    /// Insertion size, with the BND/TRA derivation rule of spec.md §3:
    /// when both breakpoints are on the same chromosome, the size is the
    /// absolute distance between them; otherwise it is unknown.
    pub fn effective_size(&self) -> Option<i64> {
        if self.variant_size >= 0 {
            return Some(self.variant_size);
        }
        match self.variant_type {
            VariantType::BND | VariantType::TRA if self.chromosome_1 == self.chromosome_2 => {
                Some((self.position_2 - self.position_1).abs())
            }
            _ => None,
        }
    }

    pub fn add_position_1_annotation(&mut self, annotation: VariantCallAnnotation) {
        self.position_1_annotations.push(annotation);
    }

    pub fn add_position_2_annotation(&mut self, annotation: VariantCallAnnotation) {
        self.position_2_annotations.push(annotation);
    }
}

impl PartialEq for VariantCall {
    /// Equality by locus, matching the Python `@total_ordering` dataclass.
    fn eq(&self, other: &Self) -> bool {
        self.locus_key() == other.locus_key()
    }
}
impl Eq for VariantCall {}

impl PartialOrd for VariantCall {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for VariantCall {
    fn cmp(&self, other: &Self) -> Ordering {
        self.locus_key().cmp(&other.locus_key())
    }
}

/// Hashed by ID rather than by locus: two distinct calls at the same
/// locus (e.g. from different samples) must not collide as a single key
/// in an ID-keyed map even though they compare equal by locus.
impl Hash for VariantCall {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
