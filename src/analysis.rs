use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use crate::types::PolicyGraph;

/// Structural overview of the interaction graph, treating every relation as
/// an undirected edge.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSummary {
    pub clauses: usize,
    /// Distinct unordered pairs of related clauses. Self-relations are not counted.
    pub edges: usize,
    /// Connected components, each listed in insertion order.
    pub components: Vec<Vec<String>>,
    /// Clauses with no relation in either direction.
    pub isolated: Vec<String>,
    pub average_degree: f64,
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} clauses, {} edges, {} components, {} isolated, average degree {:.2}",
            self.clauses,
            self.edges,
            self.components.len(),
            self.isolated.len(),
            self.average_degree,
        )
    }
}

impl PolicyGraph {
    /// Summarize the shape of the interaction graph.
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        let n = self.len();
        let mut pairs: BTreeSet<(usize, usize)> = BTreeSet::new();
        for a in 0..n {
            for &b in self.interactions.neighbors(a) {
                if a != b {
                    pairs.insert((a.min(b), a.max(b)));
                }
            }
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &(a, b) in &pairs {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }

        let mut component_of: Vec<Option<usize>> = vec![None; n];
        let mut components: Vec<Vec<usize>> = Vec::new();
        for start in 0..n {
            if component_of[start].is_some() {
                continue;
            }
            let id = components.len();
            let mut members = Vec::new();
            let mut queue = VecDeque::from([start]);
            component_of[start] = Some(id);
            while let Some(node) = queue.pop_front() {
                members.push(node);
                for &next in &adjacency[node] {
                    if component_of[next].is_none() {
                        component_of[next] = Some(id);
                        queue.push_back(next);
                    }
                }
            }
            members.sort_unstable();
            components.push(members);
        }

        let name = |idx: usize| self.id_at(idx).to_owned();

        #[allow(clippy::cast_precision_loss)]
        let average_degree = if n == 0 {
            0.0
        } else {
            (2 * pairs.len()) as f64 / n as f64
        };

        GraphSummary {
            clauses: n,
            edges: pairs.len(),
            components: components
                .into_iter()
                .map(|members| members.into_iter().map(name).collect())
                .collect(),
            isolated: (0..n)
                .filter(|&i| adjacency[i].is_empty())
                .map(name)
                .collect(),
            average_degree,
        }
    }
}
