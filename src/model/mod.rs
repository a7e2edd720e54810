//! Canonical in-memory representation of variant calls, variants, and
//! genomic ranges (spec.md §3/§4.1).

pub mod annotation;
pub mod attribute;
pub mod genomic_range;
pub mod genomic_ranges_list;
pub mod variant;
pub mod variant_call;
pub mod variants_list;

pub use annotation::VariantCallAnnotation;
pub use attribute::{AttributeType, AttributeValue};
pub use genomic_range::GenomicRange;
pub use genomic_ranges_list::GenomicRangesList;
pub use variant::Variant;
pub use variant_call::{VariantCall, VariantType};
pub use variants_list::VariantsList;
