//! Match oracle: decides whether two `VariantCall` records denote the
//! same event under a parameter bundle (spec.md §4.3).

use crate::defaults;
use crate::model::VariantCall;

/// Parameters governing the oracle's decision. Grounded on
/// `vstolib/default.py`'s matching knobs, carried into Rust as an
/// explicit struct rather than free function arguments so every set
/// operation shares one definition of "same event".
#[derive(Debug, Clone, Copy)]
pub struct MatchParams {
    pub max_neighbor_distance: i64,
    pub match_all_breakpoints: bool,
    pub match_variant_types: bool,
    pub min_ins_size_overlap: f64,
    pub min_del_size_overlap: f64,
}

impl Default for MatchParams {
    fn default() -> Self {
        MatchParams {
            max_neighbor_distance: defaults::MAX_NEIGHBOR_DISTANCE,
            match_all_breakpoints: defaults::MATCH_ALL_BREAKPOINTS,
            match_variant_types: defaults::MATCH_VARIANT_TYPES,
            min_ins_size_overlap: defaults::MIN_INS_SIZE_OVERLAP,
            min_del_size_overlap: defaults::MIN_DEL_SIZE_OVERLAP,
        }
    }
}

/// Decide whether `a` and `b` represent the same event. See spec.md
/// §4.3 for the four-step decision procedure this mirrors exactly.
pub fn is_match(a: &VariantCall, b: &VariantCall, params: &MatchParams) -> bool {
    if !chromosome_pairs_match(a, b) {
        return false;
    }
    if params.match_variant_types && a.variant_type.match_class() != b.variant_type.match_class() {
        return false;
    }
    if !breakpoints_match(a, b, params) {
        return false;
    }
    size_reciprocity_ok(a, b, params)
}

/// Step 1: the unordered pair `{chr1, chr2}` must match as multisets,
/// allowing the 1/2 orientation to be swapped.
fn chromosome_pairs_match(a: &VariantCall, b: &VariantCall) -> bool {
    (a.chromosome_1 == b.chromosome_1 && a.chromosome_2 == b.chromosome_2)
        || (a.chromosome_1 == b.chromosome_2 && a.chromosome_2 == b.chromosome_1)
}

/// Step 3: try the direct and swapped breakpoint alignments; a match
/// is declared if either feasible alignment satisfies the distance
/// rule.
fn breakpoints_match(a: &VariantCall, b: &VariantCall, params: &MatchParams) -> bool {
    let direct = (a.chromosome_1 == b.chromosome_1 && a.chromosome_2 == b.chromosome_2).then(
        || {
            (
                (a.position_1 - b.position_1).abs(),
                (a.position_2 - b.position_2).abs(),
            )
        },
    );
    let swapped = (a.chromosome_1 == b.chromosome_2 && a.chromosome_2 == b.chromosome_1).then(
        || {
            (
                (a.position_1 - b.position_2).abs(),
                (a.position_2 - b.position_1).abs(),
            )
        },
    );

    [direct, swapped].into_iter().flatten().any(|(d1, d2)| {
        if params.match_all_breakpoints {
            d1.max(d2) <= params.max_neighbor_distance
        } else {
            d1.min(d2) <= params.max_neighbor_distance
        }
    })
}

/// Step 4: reciprocal size overlap for the `{INS, DUP}` and `{DEL}`
/// classes, applied only when `a` and `b` fall in the *same* class (this
/// still holds when `match_variant_types` is false, since step 2 is then
/// skipped and a differently-classed pair must not be forced through
/// either threshold). Unknown or zero size yields a ratio of zero, so
/// such calls only match when the configured minimum overlap is also
/// zero.
fn size_reciprocity_ok(a: &VariantCall, b: &VariantCall, params: &MatchParams) -> bool {
    let class = a.variant_type.match_class();
    if class != b.variant_type.match_class() {
        return true;
    }
    let threshold = match class {
        2 => params.min_ins_size_overlap,
        3 => params.min_del_size_overlap,
        _ => return true,
    };
    let ratio = size_overlap_ratio(a, b);
    ratio >= threshold
}

fn size_overlap_ratio(a: &VariantCall, b: &VariantCall) -> f64 {
    let (Some(sa), Some(sb)) = (a.effective_size(), b.effective_size()) else {
        return 0.0;
    };
    if sa <= 0 || sb <= 0 {
        return 0.0;
    }
    let (sa, sb) = (sa as f64, sb as f64);
    sa.min(sb) / sa.max(sb)
}
