//! Per-breakpoint gene/region annotation, attached to a `VariantCall`
//! by the (out-of-core-scope) annotation enrichment step.

use serde::{Deserialize, Serialize};

/// One gene/region annotation for a single breakpoint of a `VariantCall`.
/// Grounded in `vstolib/variant_call_annotation.py`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantCallAnnotation {
    pub annotator: String,
    pub annotator_version: String,
    pub region: String,
    pub species: String,
    pub gene_id: String,
    pub gene_id_stable: String,
    pub gene_name: String,
    pub gene_strand: String,
    pub gene_type: String,
    pub gene_version: String,
    pub transcript_id: String,
    pub transcript_id_stable: String,
    pub transcript_name: String,
    pub transcript_strand: String,
    pub transcript_type: String,
    pub transcript_version: String,
    pub exon_id: String,
    pub exon_id_stable: String,
}
