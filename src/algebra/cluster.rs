//! Common clustering machinery shared by `merge`, `intersect` and
//! `compare` (spec.md §4.4.1): build a symmetric "same event" relation
//! over the union of all input calls using the spatial index and the
//! match oracle, then compute its connected components.

use rayon::prelude::*;

use crate::index::{build_call_index, Anchor};
use crate::model::VariantCall;
use crate::oracle::{is_match, MatchParams};

use super::union_find::UnionFind;

/// One call tagged with which input `VariantsList` it came from, so
/// downstream operations (`intersect`, `compare`) can test component
/// membership by source.
#[derive(Clone)]
pub struct TaggedCall {
    pub list_index: usize,
    pub call: VariantCall,
}

/// One connected component of the match relation: its member calls,
/// each still tagged with its source list.
pub struct Component {
    pub members: Vec<TaggedCall>,
}

/// Flatten `lists` in input order and compute connected components of
/// the oracle's match relation across the union.
///
/// Edge discovery anchors on `position_1`/`chromosome_1` always, and
/// additionally on `position_2`/`chromosome_2` when
/// `params.match_all_breakpoints` is false, per spec.md §4.4.1.
/// Candidates are confirmed by the oracle before a union-find edge is
/// recorded, so the index's padding never by itself causes a false
/// match. The outer loop over calls is partitioned across `num_threads`
/// rayon workers; the union-find is shared through a mutex, so the
/// final components do not depend on thread count.
pub fn cluster(
    lists: &[Vec<VariantCall>],
    params: &MatchParams,
    num_threads: usize,
) -> Vec<Component> {
    let flat: Vec<TaggedCall> = lists
        .iter()
        .enumerate()
        .flat_map(|(list_index, calls)| {
            calls
                .iter()
                .cloned()
                .map(move |call| TaggedCall { list_index, call })
        })
        .collect();

    if flat.is_empty() {
        return Vec::new();
    }

    let position_1_index = build_call_index(
        flat.iter().enumerate().map(|(i, t)| {
            (
                t.call.chromosome_1.as_str(),
                t.call.position_1,
                t.call.chromosome_2.as_str(),
                t.call.position_2,
                i as u32,
            )
        }),
        Anchor::Position1,
    );
    let position_2_index = (!params.match_all_breakpoints).then(|| {
        build_call_index(
            flat.iter().enumerate().map(|(i, t)| {
                (
                    t.call.chromosome_1.as_str(),
                    t.call.position_1,
                    t.call.chromosome_2.as_str(),
                    t.call.position_2,
                    i as u32,
                )
            }),
            Anchor::Position2,
        )
    });

    let union_find = UnionFind::new(flat.len());
    let d = params.max_neighbor_distance;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads.max(1))
        .build()
        .expect("building a scoped rayon thread pool");

    pool.install(|| {
        flat.par_iter().enumerate().for_each(|(i, a)| {
            let mut candidates: Vec<u32> = position_1_index.query(
                &a.call.chromosome_1,
                a.call.position_1 - d,
                a.call.position_1 + d,
            );
            candidates.extend(position_1_index.query(
                &a.call.chromosome_2,
                a.call.position_2 - d,
                a.call.position_2 + d,
            ));
            if let Some(index) = &position_2_index {
                candidates.extend(index.query(
                    &a.call.chromosome_1,
                    a.call.position_1 - d,
                    a.call.position_1 + d,
                ));
                candidates.extend(index.query(
                    &a.call.chromosome_2,
                    a.call.position_2 - d,
                    a.call.position_2 + d,
                ));
            }
            for j in candidates {
                let j = j as usize;
                if j <= i {
                    continue;
                }
                if is_match(&a.call, &flat[j].call, params) {
                    union_find.union(i, j);
                }
            }
        });
    });

    let roots = union_find.into_roots();
    let mut by_root: std::collections::HashMap<usize, Vec<TaggedCall>> =
        std::collections::HashMap::new();
    for (i, tagged) in flat.into_iter().enumerate() {
        by_root.entry(roots[i]).or_default().push(tagged);
    }
    by_root
        .into_values()
        .map(|members| Component { members })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::VariantType;

    fn call(id: &str, pos: i64) -> VariantCall {
        VariantCall::new(id, "s1", "chr1", pos, "chr1", pos, VariantType::SNV, "C", "A").unwrap()
    }

    #[test]
    fn clusters_nearby_calls_across_lists() {
        let a = vec![call("a1", 100)];
        let b = vec![call("b1", 105), call("b2", 100_000)];
        let components = cluster(&[a, b], &MatchParams::default(), 2);
        assert_eq!(components.len(), 2);
        let sizes: Vec<usize> = {
            let mut s: Vec<usize> = components.iter().map(|c| c.members.len()).collect();
            s.sort();
            s
        };
        assert_eq!(sizes, vec![1, 2]);
    }
}
