use serde::Serialize;

use crate::encoding::VisualEncoding;

/// Records beyond this many are left out of the pairwise scan. Matches the
/// per-category fetch limit.
pub const MAX_GRAPH_RECORDS: usize = 50;

/// Unordered pair of record indices, `a < b`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionGraph {
    pub edges: Vec<Edge>,
    /// How many leading items were scanned.
    pub considered: usize,
    /// Set when the input had more items than were scanned.
    pub truncated: bool,
}

impl ConnectionGraph {
    /// Tests every pair `i < j` among the first `limit` items.
    pub fn from_predicate<T>(items: &[T], limit: usize, connects: impl Fn(&T, &T) -> bool) -> Self {
        let considered = items.len().min(limit);
        let scan = &items[..considered];
        let mut edges = Vec::new();
        for (i, a) in scan.iter().enumerate() {
            for (j, b) in scan.iter().enumerate().skip(i + 1) {
                if connects(a, b) {
                    edges.push(Edge { a: i, b: j });
                }
            }
        }
        Self {
            edges,
            considered,
            truncated: items.len() > considered,
        }
    }

    pub fn build<R: VisualEncoding>(records: &[R]) -> Self {
        Self::from_predicate(records, MAX_GRAPH_RECORDS, R::connects)
    }

    /// Number of edges touching item `index`.
    pub fn degree(&self, index: usize) -> usize {
        self.edges
            .iter()
            .filter(|e| e.a == index || e.b == index)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
