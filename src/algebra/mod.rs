//! Set-algebra engine: merge, intersect, subtract, compare and overlap
//! over `VariantsList`s, built on the match oracle (spec.md §4.4).

mod cluster;
mod union_find;

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::defaults;
use crate::index::{build_call_index, build_range_index, Anchor};
use crate::model::{GenomicRange, GenomicRangesList, Variant, VariantCall, VariantsList};
use crate::oracle::{is_match, MatchParams};

use cluster::{cluster, Component};

/// Sort a component's members by locus and assign it a deterministic,
/// dense component ID, per spec.md §4.4.8: output variants are sorted
/// by their smallest member's locus, and IDs are assigned after
/// sorting.
fn components_to_variants(mut components: Vec<Component>) -> VariantsList {
    for component in &mut components {
        component.members.sort_by(|a, b| a.call.cmp(&b.call));
    }
    components.sort_by(|a, b| {
        a.members[0]
            .call
            .locus_key()
            .cmp(&b.members[0].call.locus_key())
    });
    let variants = components
        .into_iter()
        .enumerate()
        .map(|(i, component)| {
            Variant::with_calls(
                i.to_string(),
                component.members.into_iter().map(|t| t.call).collect(),
            )
        })
        .collect();
    VariantsList::from_variants(variants)
}

fn list_calls(list: &VariantsList) -> Vec<VariantCall> {
    list.variants
        .iter()
        .flat_map(|v| v.variant_calls.iter().cloned())
        .collect()
}

/// `merge`: connected components of the match relation across all
/// inputs. Every input call appears in exactly one output variant.
pub fn merge(
    lists: &[VariantsList],
    params: &MatchParams,
    num_threads: usize,
) -> VariantsList {
    let flat: Vec<Vec<VariantCall>> = lists.iter().map(list_calls).collect();
    let components = cluster(&flat, params, num_threads);
    components_to_variants(components)
}

/// `intersect`: components of the merge that touch every input list at
/// least once.
pub fn intersect(
    lists: &[VariantsList],
    params: &MatchParams,
    num_threads: usize,
) -> VariantsList {
    let flat: Vec<Vec<VariantCall>> = lists.iter().map(list_calls).collect();
    let n = lists.len();
    let components = cluster(&flat, params, num_threads)
        .into_iter()
        .filter(|c| {
            let sources: HashSet<usize> = c.members.iter().map(|m| m.list_index).collect();
            sources.len() == n
        })
        .collect();
    components_to_variants(components)
}

/// `subtract`: calls in `target` with no match in `query` under the
/// oracle. Surviving calls are re-attached under their original
/// `Variant` ID; variants with zero surviving calls are dropped.
pub fn subtract(target: &VariantsList, query: &VariantsList, params: &MatchParams) -> VariantsList {
    let query_calls = list_calls(query);
    let index = build_call_index(
        query_calls.iter().enumerate().map(|(i, c)| {
            (
                c.chromosome_1.as_str(),
                c.position_1,
                c.chromosome_2.as_str(),
                c.position_2,
                i as u32,
            )
        }),
        Anchor::Both,
    );
    let d = params.max_neighbor_distance;

    let variants: Vec<Variant> = target
        .variants
        .iter()
        .filter_map(|variant| {
            let surviving: Vec<VariantCall> = variant
                .variant_calls
                .iter()
                .filter(|call| {
                    let mut candidates = index.query(
                        &call.chromosome_1,
                        call.position_1 - d,
                        call.position_1 + d,
                    );
                    candidates.extend(index.query(
                        &call.chromosome_2,
                        call.position_2 - d,
                        call.position_2 + d,
                    ));
                    !candidates
                        .into_iter()
                        .any(|i| is_match(call, &query_calls[i as usize], params))
                })
                .cloned()
                .collect();
            (!surviving.is_empty())
                .then(|| Variant::with_calls(variant.id.clone(), surviving))
        })
        .collect();
    VariantsList::from_variants(variants)
}

/// Left fold of pairwise `subtract` over multiple queries.
pub fn subtract_many(target: &VariantsList, queries: &[VariantsList], params: &MatchParams) -> VariantsList {
    queries
        .iter()
        .fold(target.clone(), |acc, query| subtract(&acc, query, params))
}

/// `compare` (three-way): `shared` holds components spanning both `a`
/// and `b`; `a_only`/`b_only` retain calls participating only in
/// single-source components, grouped under their original Variant IDs.
pub struct CompareResult {
    pub shared: VariantsList,
    pub a_only: VariantsList,
    pub b_only: VariantsList,
}

pub fn compare(a: &VariantsList, b: &VariantsList, params: &MatchParams, num_threads: usize) -> CompareResult {
    let flat = vec![list_calls(a), list_calls(b)];
    let components = cluster(&flat, params, num_threads);

    let mut shared = Vec::new();
    let mut a_only: HashMap<String, Vec<VariantCall>> = HashMap::new();
    let mut b_only: HashMap<String, Vec<VariantCall>> = HashMap::new();

    for component in components {
        let sources: HashSet<usize> = component.members.iter().map(|m| m.list_index).collect();
        if sources.len() == 2 {
            shared.push(component);
            continue;
        }
        for member in component.members {
            let bucket = if member.list_index == 0 {
                &mut a_only
            } else {
                &mut b_only
            };
            let variant_id = find_owning_variant_id(
                if member.list_index == 0 { a } else { b },
                &member.call.id,
            );
            bucket.entry(variant_id).or_default().push(member.call);
        }
    }

    let a_only = VariantsList::from_variants(
        a_only
            .into_iter()
            .map(|(id, calls)| Variant::with_calls(id, calls))
            .collect(),
    );
    let b_only = VariantsList::from_variants(
        b_only
            .into_iter()
            .map(|(id, calls)| Variant::with_calls(id, calls))
            .collect(),
    );

    CompareResult {
        shared: components_to_variants(shared),
        a_only,
        b_only,
    }
}

fn find_owning_variant_id(list: &VariantsList, call_id: &str) -> String {
    list.variants
        .iter()
        .find(|v| v.variant_calls.iter().any(|c| c.id == call_id))
        .map(|v| v.id.clone())
        .unwrap_or_else(|| call_id.to_string())
}

/// `overlap` (against regions): for each call in `variants`, the
/// regions in `regions` whose `[start-padding, end+padding]` contains
/// `position_1` or `position_2` on the matching chromosome. Both
/// chromosomes and both positions are tested independently; a call is
/// reported once per distinct overlapping range.
pub fn overlap(
    variants: &VariantsList,
    regions: &GenomicRangesList,
    padding: i64,
    num_threads: usize,
) -> HashMap<String, Vec<GenomicRange>> {
    let flat_regions: Vec<&GenomicRange> = regions.genomic_ranges_map.values().flatten().collect();
    let index = build_range_index(
        flat_regions
            .iter()
            .enumerate()
            .map(|(i, r)| (r.chromosome.as_str(), r.start, r.end, i as u32)),
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads.max(1))
        .build()
        .expect("building a scoped rayon thread pool");

    let calls: Vec<&VariantCall> = variants.variants.iter().flat_map(|v| &v.variant_calls).collect();

    pool.install(|| {
        calls
            .par_iter()
            .map(|call| {
                let mut hits: HashSet<usize> = HashSet::new();
                for (chromosome, position) in [
                    (&call.chromosome_1, call.position_1),
                    (&call.chromosome_2, call.position_2),
                ] {
                    for id in index.query(chromosome, position - padding, position + padding) {
                        hits.insert(id as usize);
                    }
                }
                let mut regions: Vec<GenomicRange> =
                    hits.into_iter().map(|i| flat_regions[i].clone()).collect();
                regions.sort();
                (call.id.clone(), regions)
            })
            .filter(|(_, regions)| !regions.is_empty())
            .collect()
    })
}

pub fn default_num_threads() -> usize {
    defaults::NUM_THREADS
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::VariantType;

    fn call(id: &str, pos: i64) -> VariantCall {
        VariantCall::new(id, "s1", "chr1", pos, "chr1", pos, VariantType::SNV, "C", "A").unwrap()
    }

    fn list(id: &str, calls: Vec<VariantCall>) -> VariantsList {
        VariantsList::from_variants(vec![Variant::with_calls(id, calls)])
    }

    #[test]
    fn merge_places_every_input_call_in_exactly_one_variant() {
        let a = list("va", vec![call("a1", 100)]);
        let b = list("vb", vec![call("b1", 105), call("b2", 100_000)]);
        let merged = merge(&[a, b], &MatchParams::default(), 2);
        assert_eq!(merged.num_variant_calls(), 3);
        assert_eq!(merged.size(), 2);
    }

    #[test]
    fn intersect_keeps_only_components_touching_every_input() {
        let a = list("va", vec![call("a1", 100)]);
        let b = list("vb", vec![call("b1", 105), call("b2", 100_000)]);
        let intersected = intersect(&[a, b], &MatchParams::default(), 2);
        assert_eq!(intersected.num_variant_calls(), 2);
    }

    #[test]
    fn subtract_drops_calls_matched_in_the_query_and_empty_variants() {
        let target = list("vt", vec![call("t1", 100), call("t2", 100_000)]);
        let query = list("vq", vec![call("q1", 105)]);
        let result = subtract(&target, &query, &MatchParams::default());
        assert_eq!(result.num_variant_calls(), 1);
        assert_eq!(result.variant_call_ids(), vec!["t2"]);
    }

    #[test]
    fn compare_partitions_shared_and_source_only_calls() {
        let a = list("va", vec![call("a1", 100), call("a2", 100_000)]);
        let b = list("vb", vec![call("b1", 105)]);
        let result = compare(&a, &b, &MatchParams::default(), 2);
        assert_eq!(result.shared.num_variant_calls(), 2);
        assert_eq!(result.a_only.variant_call_ids(), vec!["a2"]);
        assert_eq!(result.b_only.num_variant_calls(), 0);
    }

    #[test]
    fn overlap_reports_each_call_once_per_distinct_region() {
        let mut regions = GenomicRangesList::new();
        regions.add_genomic_range(GenomicRange::new("chr1", 90, 110).unwrap());
        regions.add_genomic_range(GenomicRange::new("chr1", 95, 105).unwrap());
        let variants = list("v", vec![call("c1", 100)]);
        let hits = overlap(&variants, &regions, 0, 2);
        assert_eq!(hits.get("c1").unwrap().len(), 2);
    }
}
