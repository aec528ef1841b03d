use std::collections::{HashMap, HashSet};

use super::context::Context;
use super::error::{ConfigurationError, QueryError};
use super::graph::PolicyGraph;
use super::value::{CompareOp, Value};

/// How involved a scenario's policy reasoning is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

/// A constraint a case context must meet to fit a scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FactRequirement {
    /// Numeric fact within `[low, high]`, inclusive.
    Between(i64, i64),
    Equals(Value),
}

impl FactRequirement {
    #[must_use]
    pub fn is_met_by(&self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            FactRequirement::Between(low, high) => {
                value.compare(CompareOp::Gte, &Value::Int(*low)) == Some(true)
                    && value.compare(CompareOp::Lte, &Value::Int(*high)) == Some(true)
            }
            FactRequirement::Equals(expected) => {
                value.compare(CompareOp::Eq, expected) == Some(true)
            }
        }
    }
}

/// A customer-support situation anchored on one primary clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub primary_clause: String,
    pub expected_outcome: String,
    pub complexity: Complexity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Vec<(String, FactRequirement)>,
}

impl ScenarioTemplate {
    #[must_use]
    pub fn new(id: &str, name: &str, primary_clause: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            description: String::new(),
            primary_clause: primary_clause.to_owned(),
            expected_outcome: "unknown".to_owned(),
            complexity: Complexity::Simple,
            requirements: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.description);
        self
    }

    #[must_use]
    pub fn expect(mut self, outcome: &str) -> Self {
        outcome.clone_into(&mut self.expected_outcome);
        self
    }

    #[must_use]
    pub fn complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    #[must_use]
    pub fn require(mut self, fact: &str, requirement: FactRequirement) -> Self {
        self.requirements.push((fact.to_owned(), requirement));
        self
    }

    /// Whether every fact requirement holds in `ctx`. Missing facts fail.
    #[must_use]
    pub fn requirements_met(&self, ctx: &Context) -> bool {
        self.requirements
            .iter()
            .all(|(fact, requirement)| requirement.is_met_by(ctx.get(fact)))
    }

    /// The clauses in force for this scenario under `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if the graph lacks the primary clause.
    pub fn applicable_clauses<'g>(
        &self,
        graph: &'g PolicyGraph,
        ctx: &Context,
        max_hops: usize,
    ) -> Result<Vec<&'g str>, QueryError> {
        graph.applicable(&self.primary_clause, ctx, max_hops)
    }
}

/// Builder for a [`ScenarioCatalog`].
#[derive(Debug)]
pub struct ScenarioCatalogBuilder {
    default_query_type: String,
    groups: Vec<(String, Vec<ScenarioTemplate>)>,
}

impl ScenarioCatalogBuilder {
    #[must_use]
    pub fn template(mut self, query_type: &str, template: ScenarioTemplate) -> Self {
        match self.groups.iter_mut().find(|(q, _)| q == query_type) {
            Some((_, templates)) => templates.push(template),
            None => self.groups.push((query_type.to_owned(), vec![template])),
        }
        self
    }

    /// Check the templates against `graph` and freeze the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if two templates share an id or a
    /// template's primary clause is not in `graph`.
    pub fn build(self, graph: &PolicyGraph) -> Result<ScenarioCatalog, ConfigurationError> {
        let mut seen = HashSet::new();
        for template in self.groups.iter().flat_map(|(_, t)| t) {
            if !seen.insert(template.id.as_str()) {
                return Err(ConfigurationError::DuplicateScenario {
                    id: template.id.clone(),
                });
            }
            if !graph.contains(&template.primary_clause) {
                return Err(ConfigurationError::UnknownPrimaryClause {
                    scenario: template.id.clone(),
                    clause: template.primary_clause.clone(),
                });
            }
        }
        let order = self.groups.iter().map(|(q, _)| q.clone()).collect();
        Ok(ScenarioCatalog {
            default_query_type: self.default_query_type,
            order,
            templates: self.groups.into_iter().collect(),
        })
    }
}

/// Immutable table of scenario templates keyed by query type.
///
/// Passed explicitly to whatever needs it; there is no global instance.
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    default_query_type: String,
    order: Vec<String>,
    templates: HashMap<String, Vec<ScenarioTemplate>>,
}

impl ScenarioCatalog {
    /// Start a catalog. Lookups for unknown query types fall back to
    /// `default_query_type`.
    #[must_use]
    pub fn builder(default_query_type: &str) -> ScenarioCatalogBuilder {
        ScenarioCatalogBuilder {
            default_query_type: default_query_type.to_owned(),
            groups: Vec::new(),
        }
    }

    /// Templates for a query type, or for the default query type when this
    /// one has none.
    #[must_use]
    pub fn templates_for(&self, query_type: &str) -> &[ScenarioTemplate] {
        self.templates
            .get(query_type)
            .or_else(|| self.templates.get(&self.default_query_type))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Query types in the order they were first added.
    pub fn query_types(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, scenario_id: &str) -> Option<&ScenarioTemplate> {
        self.templates
            .values()
            .flatten()
            .find(|t| t.id == scenario_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
