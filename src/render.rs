use std::fmt;

use crate::types::{Clause, PolicyGraph};

/// Plain-text policy document: clauses grouped by category, without any
/// relation, precedence or condition metadata.
///
/// Categories appear in order of first appearance; clauses within a
/// category are sorted by id.
#[derive(Debug, Clone, Copy)]
pub struct PolicyDocument<'a> {
    graph: &'a PolicyGraph,
}

impl<'a> PolicyDocument<'a> {
    fn categories(&self) -> Vec<(&'a str, Vec<&'a Clause>)> {
        let mut groups: Vec<(&str, Vec<&Clause>)> = Vec::new();
        for clause in self.graph.clauses() {
            match groups.iter_mut().find(|(name, _)| *name == clause.category) {
                Some((_, members)) => members.push(clause),
                None => groups.push((clause.category.as_str(), vec![clause])),
            }
        }
        for (_, members) in &mut groups {
            members.sort_by(|a, b| a.id.cmp(&b.id));
        }
        groups
    }
}

impl fmt::Display for PolicyDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (category, members)) in self.categories().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f)?;
            writeln!(f, "{category}")?;
            write!(f, "{}", "=".repeat(category.chars().count()))?;
            for clause in members {
                write!(f, "\n\n[{}] {}", clause.id, clause.title)?;
                write!(f, "\nRule: {}", clause.rule_text)?;
            }
        }
        Ok(())
    }
}

impl PolicyGraph {
    /// A displayable view of the policy text.
    #[must_use]
    pub fn document(&self) -> PolicyDocument<'_> {
        PolicyDocument { graph: self }
    }

    /// Render the policy text, for use as prompt material.
    #[must_use]
    pub fn render(&self) -> String {
        self.document().to_string()
    }
}
