use std::fmt;

use super::Condition;

/// Precedence assigned to clauses that do not declare one.
pub const DEFAULT_PRECEDENCE: i32 = 5;

/// The kinds of typed relation a clause can declare towards another clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    InteractsWith,
    Modifies,
    ModifiedBy,
    Overrides,
    OverriddenBy,
    Requires,
}

impl RelationKind {
    /// All kinds, in the order their targets enter the interaction index.
    pub const ALL: [RelationKind; 6] = [
        RelationKind::InteractsWith,
        RelationKind::Modifies,
        RelationKind::ModifiedBy,
        RelationKind::Overrides,
        RelationKind::OverriddenBy,
        RelationKind::Requires,
    ];

    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            RelationKind::InteractsWith => "interacts_with",
            RelationKind::Modifies => "modifies",
            RelationKind::ModifiedBy => "modified_by",
            RelationKind::Overrides => "overrides",
            RelationKind::OverriddenBy => "overridden_by",
            RelationKind::Requires => "requires",
        }
    }

    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == keyword)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Relation lists of a clause, one per [`RelationKind`].
///
/// Only `overrides` takes part in conflict resolution. Every list feeds the
/// interaction index used for reachability queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Relations {
    pub interacts_with: Vec<String>,
    pub modifies: Vec<String>,
    pub modified_by: Vec<String>,
    pub overrides: Vec<String>,
    pub overridden_by: Vec<String>,
    pub requires: Vec<String>,
}

impl Relations {
    #[must_use]
    pub fn get(&self, kind: RelationKind) -> &[String] {
        match kind {
            RelationKind::InteractsWith => &self.interacts_with,
            RelationKind::Modifies => &self.modifies,
            RelationKind::ModifiedBy => &self.modified_by,
            RelationKind::Overrides => &self.overrides,
            RelationKind::OverriddenBy => &self.overridden_by,
            RelationKind::Requires => &self.requires,
        }
    }

    pub fn get_mut(&mut self, kind: RelationKind) -> &mut Vec<String> {
        match kind {
            RelationKind::InteractsWith => &mut self.interacts_with,
            RelationKind::Modifies => &mut self.modifies,
            RelationKind::ModifiedBy => &mut self.modified_by,
            RelationKind::Overrides => &mut self.overrides,
            RelationKind::OverriddenBy => &mut self.overridden_by,
            RelationKind::Requires => &mut self.requires,
        }
    }

    /// Every `(kind, target)` pair in index order.
    pub fn iter(&self) -> impl Iterator<Item = (RelationKind, &str)> {
        RelationKind::ALL
            .into_iter()
            .flat_map(move |kind| self.get(kind).iter().map(move |t| (kind, t.as_str())))
    }
}

/// A single policy rule.
///
/// Clauses are immutable once a [`PolicyGraph`](super::PolicyGraph) has been
/// built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rule_text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    #[cfg_attr(feature = "serde", serde(default = "default_precedence"))]
    pub precedence: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<Condition>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub relations: Relations,
}

#[cfg(feature = "serde")]
fn default_precedence() -> i32 {
    DEFAULT_PRECEDENCE
}

impl Clause {
    /// A clause with the given id, default precedence and nothing else.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            rule_text: String::new(),
            category: String::new(),
            precedence: DEFAULT_PRECEDENCE,
            conditions: Vec::new(),
            relations: Relations::default(),
        }
    }

    /// Whether this clause lists `id` in its `overrides`.
    #[must_use]
    pub fn overrides(&self, id: &str) -> bool {
        self.relations.overrides.iter().any(|o| o == id)
    }
}

/// A clause whose `overrides` targets have been resolved to arena indices.
///
/// Produced by compilation and stored inside a [`PolicyGraph`](super::PolicyGraph).
#[derive(Debug, Clone)]
pub(crate) struct CompiledClause {
    pub(crate) clause: Clause,
    pub(crate) overrides: Vec<usize>,
}

/// Builder passed to the clause definition closure of
/// [`PolicyGraphBuilder::clause()`](super::PolicyGraphBuilder::clause).
#[derive(Debug)]
pub struct ClauseBuilder {
    clause: Clause,
}

impl ClauseBuilder {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            clause: Clause::new(id),
        }
    }

    pub(crate) fn finish(self) -> Clause {
        self.clause
    }

    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        title.clone_into(&mut self.clause.title);
        self
    }

    #[must_use]
    pub fn rule(mut self, rule_text: &str) -> Self {
        rule_text.clone_into(&mut self.clause.rule_text);
        self
    }

    #[must_use]
    pub fn category(mut self, category: &str) -> Self {
        category.clone_into(&mut self.clause.category);
        self
    }

    /// Lower values carry more authority.
    #[must_use]
    pub fn precedence(mut self, precedence: i32) -> Self {
        self.clause.precedence = precedence;
        self
    }

    /// Add an applicability condition. All conditions must hold.
    #[must_use]
    pub fn when(mut self, condition: impl Into<Condition>) -> Self {
        self.clause.conditions.push(condition.into());
        self
    }

    #[must_use]
    pub fn relate(mut self, kind: RelationKind, target: &str) -> Self {
        self.clause.relations.get_mut(kind).push(target.to_owned());
        self
    }

    #[must_use]
    pub fn interacts_with(self, target: &str) -> Self {
        self.relate(RelationKind::InteractsWith, target)
    }

    #[must_use]
    pub fn modifies(self, target: &str) -> Self {
        self.relate(RelationKind::Modifies, target)
    }

    #[must_use]
    pub fn modified_by(self, target: &str) -> Self {
        self.relate(RelationKind::ModifiedBy, target)
    }

    /// When both clauses are eligible, `target` is suppressed.
    #[must_use]
    pub fn overrides(self, target: &str) -> Self {
        self.relate(RelationKind::Overrides, target)
    }

    #[must_use]
    pub fn overridden_by(self, target: &str) -> Self {
        self.relate(RelationKind::OverriddenBy, target)
    }

    #[must_use]
    pub fn requires(self, target: &str) -> Self {
        self.relate(RelationKind::Requires, target)
    }
}
