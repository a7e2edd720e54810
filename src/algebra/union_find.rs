//! A small union-find (disjoint-set) structure keyed by dense `usize`
//! indices, used to compute the connected components that back every
//! set-algebra operation (spec.md §4.4.1).

use std::sync::Mutex;

pub struct UnionFind {
    parent: Mutex<Vec<usize>>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: Mutex::new((0..n).collect()),
        }
    }

    fn find_locked(parent: &mut [usize], x: usize) -> usize {
        let mut root = x;
        while parent[root] != root {
            root = parent[root];
        }
        let mut cur = x;
        while parent[cur] != root {
            let next = parent[cur];
            parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Union the components containing `a` and `b`. Thread-safe: callers
    /// discovering edges in parallel may call this concurrently; the
    /// final partition is independent of call order or thread count.
    pub fn union(&self, a: usize, b: usize) {
        let mut parent = self.parent.lock().unwrap();
        let ra = Self::find_locked(&mut parent, a);
        let rb = Self::find_locked(&mut parent, b);
        if ra != rb {
            // Lower index wins as root so the resulting partition
            // (which component ID maps to which members) does not
            // depend on union order.
            if ra < rb {
                parent[rb] = ra;
            } else {
                parent[ra] = rb;
            }
        }
    }

    /// Consume the structure, returning each index's final root.
    pub fn into_roots(self) -> Vec<usize> {
        let mut parent = self.parent.into_inner().unwrap();
        (0..parent.len())
            .map(|i| Self::find_locked(&mut parent, i))
            .collect()
    }
}
