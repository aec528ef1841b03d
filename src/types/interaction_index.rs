use std::collections::HashMap;

use super::Clause;

/// Per-clause adjacency over the union of every relation kind.
///
/// Built once during compilation from already-validated clauses. Neighbour
/// lists keep relation order (`interacts_with` first, `requires` last) and
/// declaration order within a kind; the first occurrence of a target wins.
#[derive(Debug, Clone, Default)]
pub(crate) struct InteractionIndex {
    neighbors: Vec<Vec<usize>>,
}

impl InteractionIndex {
    /// Build the index. Every relation target must be present in `index`.
    pub(crate) fn build(clauses: &[Clause], index: &HashMap<String, usize>) -> Self {
        let neighbors = clauses
            .iter()
            .map(|clause| {
                let mut out: Vec<usize> = Vec::new();
                for (_, target) in clause.relations.iter() {
                    if let Some(&idx) = index.get(target) {
                        if !out.contains(&idx) {
                            out.push(idx);
                        }
                    }
                }
                out
            })
            .collect();
        Self { neighbors }
    }

    /// Neighbour indices of a clause, in index order.
    pub(crate) fn neighbors(&self, idx: usize) -> &[usize] {
        self.neighbors.get(idx).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of directed entries across all clauses.
    pub(crate) fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }

    pub(crate) fn len(&self) -> usize {
        self.neighbors.len()
    }
}
