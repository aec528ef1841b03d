use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::clause::{Clause, ClauseBuilder, CompiledClause};
use super::condition;
use super::context::Context;
use super::error::{ConfigurationError, QueryError};
use super::interaction_index::InteractionIndex;
use super::report::ResolutionReport;

/// Hop limit used when callers do not pick one.
pub const DEFAULT_MAX_HOPS: usize = 3;

/// Builder for assembling a [`PolicyGraph`].
///
/// Adding a clause whose id is already present replaces the earlier
/// definition in place, so the replaced clause keeps its original position
/// for rendering.
///
/// # Example
///
/// ```
/// use policygraph::{Context, PolicyGraphBuilder};
///
/// let graph = PolicyGraphBuilder::new()
///     .clause("RETURN-001", |c| c.precedence(3).when("within_return_window"))
///     .clause("RETURN-002", |c| c.precedence(4).overridden_by("RETURN-004"))
///     .clause("RETURN-004", |c| {
///         c.precedence(1)
///             .overrides("RETURN-002")
///             .when("within_return_window")
///     })
///     .build()
///     .unwrap();
///
/// let ctx = Context::new().set("days_since_purchase", 10_i64);
/// let active = graph
///     .resolve(&["RETURN-001", "RETURN-002", "RETURN-004"], &ctx)
///     .unwrap();
/// assert_eq!(active, vec!["RETURN-004", "RETURN-001"]);
/// ```
#[derive(Debug, Default)]
pub struct PolicyGraphBuilder {
    clauses: Vec<Clause>,
    positions: HashMap<String, usize>,
    strict_conditions: bool,
}

impl PolicyGraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a clause through a closure over a [`ClauseBuilder`].
    #[must_use]
    pub fn clause(mut self, id: &str, f: impl FnOnce(ClauseBuilder) -> ClauseBuilder) -> Self {
        self.add_clause(f(ClauseBuilder::new(id)).finish());
        self
    }

    /// Insert a clause, or replace the clause with the same id.
    pub fn add_clause(&mut self, clause: Clause) {
        if let Some(&pos) = self.positions.get(&clause.id) {
            self.clauses[pos] = clause;
        } else {
            self.positions.insert(clause.id.clone(), self.clauses.len());
            self.clauses.push(clause);
        }
    }

    /// Owned-chaining form of [`add_clause`](Self::add_clause).
    #[must_use]
    pub fn with_clause(mut self, clause: Clause) -> Self {
        self.add_clause(clause);
        self
    }

    /// Reject condition names outside the recognized vocabulary at build time.
    #[must_use]
    pub fn strict_conditions(mut self) -> Self {
        self.strict_conditions = true;
        self
    }

    /// Validate every relation and compile the graph.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for an empty id, a relation naming an
    /// unknown clause, or (in strict mode) an unrecognized condition.
    pub fn build(self) -> Result<PolicyGraph, ConfigurationError> {
        crate::compile::compile(self.clauses, self.strict_conditions)
    }
}

/// A compiled, immutable policy clause graph. Thread-safe and designed to
/// live behind `Arc`.
#[derive(Debug)]
pub struct PolicyGraph {
    pub(crate) clauses: Vec<CompiledClause>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) interactions: InteractionIndex,
}

impl PolicyGraph {
    /// Parse a policy DSL document and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyGraphError`](crate::PolicyGraphError) on parse or
    /// configuration failure.
    pub fn from_dsl(input: &str) -> Result<Self, crate::PolicyGraphError> {
        let parsed = crate::parse::parse(input)?;
        let graph = crate::compile::compile(parsed.clauses, false)?;
        Ok(graph)
    }

    /// Read a policy DSL file and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyGraphError`](crate::PolicyGraphError) on I/O, parse,
    /// or configuration failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::PolicyGraphError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_dsl(&input)
    }

    /// Write the graph back out as policy DSL, in insertion order.
    ///
    /// The builder accepts ids and condition names the DSL cannot spell, so
    /// only graphs whose names follow the DSL's lexical rules can be written.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`](crate::parse::WriteError) naming the first id or
    /// condition that cannot be written.
    pub fn to_dsl(&self) -> Result<String, crate::parse::WriteError> {
        crate::parse::to_dsl(self.clauses())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a clause by id.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if no clause has this id.
    pub fn clause(&self, id: &str) -> Result<&Clause, QueryError> {
        self.position(id).map(|idx| &self.clauses[idx].clause)
    }

    /// All clauses in insertion order.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().map(|c| &c.clause)
    }

    /// Every clause id this clause relates to, across all relation kinds.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if no clause has this id.
    pub fn interaction_set(&self, id: &str) -> Result<BTreeSet<&str>, QueryError> {
        let idx = self.position(id)?;
        Ok(self
            .interactions
            .neighbors(idx)
            .iter()
            .map(|&n| self.id_at(n))
            .collect())
    }

    /// Clauses reachable from `id` within `max_hops`, in breadth-first order,
    /// excluding `id` itself.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if no clause has this id.
    pub fn related(&self, id: &str, max_hops: usize) -> Result<Vec<&str>, QueryError> {
        let start = self.position(id)?;
        let reached = crate::traverse::breadth_first(&self.interactions, start, max_hops);
        tracing::trace!(clause = id, max_hops, reached = reached.len(), "expanded related clauses");
        Ok(reached.into_iter().map(|idx| self.id_at(idx)).collect())
    }

    /// Whether every condition of the clause holds in `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if no clause has this id.
    pub fn check_conditions(&self, id: &str, ctx: &Context) -> Result<bool, QueryError> {
        let clause = self.clause(id)?;
        Ok(condition::check_conditions(&clause.conditions, ctx))
    }

    /// Reduce a candidate set to the clauses simultaneously active under `ctx`.
    ///
    /// Candidates are evaluated by ascending precedence (ties broken by id);
    /// an active clause suppresses every other clause it overrides. Duplicate
    /// ids are considered once.
    ///
    /// No two distinct active clauses override one another. A clause listing
    /// itself in `overrides` is not suppressed by that entry.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if a candidate id is unknown.
    pub fn resolve(&self, candidate_ids: &[&str], ctx: &Context) -> Result<Vec<&str>, QueryError> {
        let order = self.evaluation_order(candidate_ids)?;
        let active = crate::resolve::resolve(&self.clauses, &order, ctx);
        tracing::debug!(
            candidates = order.len(),
            active = active.len(),
            "resolved candidate set"
        );
        Ok(active.into_iter().map(|idx| self.id_at(idx)).collect())
    }

    /// Like [`resolve`](Self::resolve), but records why each candidate is or
    /// is not active.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if a candidate id is unknown.
    pub fn resolve_detailed(
        &self,
        candidate_ids: &[&str],
        ctx: &Context,
    ) -> Result<ResolutionReport, QueryError> {
        let order = self.evaluation_order(candidate_ids)?;
        Ok(crate::resolve::resolve_detailed(&self.clauses, &order, ctx))
    }

    /// Resolve a primary clause together with everything related to it
    /// within `max_hops`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if `primary` is unknown.
    pub fn applicable(
        &self,
        primary: &str,
        ctx: &Context,
        max_hops: usize,
    ) -> Result<Vec<&str>, QueryError> {
        let mut candidates = vec![self.clause(primary)?.id.as_str()];
        candidates.extend(self.related(primary, max_hops)?);
        self.resolve(&candidates, ctx)
    }

    /// Pairs of clauses that each list the other in `overrides`.
    ///
    /// When both sides share a precedence, which one survives depends only on
    /// the id tie-break.
    #[must_use]
    pub fn mutual_overrides(&self) -> Vec<(&str, &str)> {
        crate::compile::mutual_overrides(&self.clauses)
            .into_iter()
            .map(|(a, b)| (self.id_at(a), self.id_at(b)))
            .collect()
    }

    fn position(&self, id: &str) -> Result<usize, QueryError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| QueryError::not_found(id))
    }

    pub(crate) fn id_at(&self, idx: usize) -> &str {
        &self.clauses[idx].clause.id
    }

    /// Map candidate ids to indices, drop repeats, and sort by
    /// `(precedence, id)`.
    fn evaluation_order(&self, candidate_ids: &[&str]) -> Result<Vec<usize>, QueryError> {
        let mut order: Vec<usize> = Vec::with_capacity(candidate_ids.len());
        for id in candidate_ids {
            let idx = self.position(id)?;
            if !order.contains(&idx) {
                order.push(idx);
            }
        }
        order.sort_by(|&a, &b| {
            let (ca, cb) = (&self.clauses[a].clause, &self.clauses[b].clause);
            ca.precedence
                .cmp(&cb.precedence)
                .then_with(|| ca.id.cmp(&cb.id))
        });
        Ok(order)
    }
}

impl fmt::Display for PolicyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let categories: BTreeSet<&str> = self.clauses().map(|c| c.category.as_str()).collect();
        write!(
            f,
            "PolicyGraph({} clauses, {} relations, {} categories)",
            self.clauses.len(),
            self.interactions.edge_count(),
            categories.len(),
        )
    }
}
