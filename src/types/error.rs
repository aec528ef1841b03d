use thiserror::Error;

use super::RelationKind;

/// Rejections raised while assembling a [`PolicyGraph`](super::PolicyGraph)
/// or a [`ScenarioCatalog`](super::ScenarioCatalog).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("clause '{clause}' {relation} unknown clause '{target}'")]
    DanglingReference {
        clause: String,
        relation: RelationKind,
        target: String,
    },

    #[error("duplicate clause id '{id}'")]
    DuplicateClause { id: String },

    #[error("clause id must not be empty")]
    EmptyClauseId,

    #[error("unknown condition '{condition}' in clause '{clause}'")]
    UnknownCondition { clause: String, condition: String },

    #[error("scenario '{scenario}' starts from unknown clause '{clause}'")]
    UnknownPrimaryClause { scenario: String, clause: String },

    #[error("duplicate scenario id '{id}'")]
    DuplicateScenario { id: String },
}

/// Failures of read-only queries against a built graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("clause '{id}' not found")]
    NotFound { id: String },
}

impl QueryError {
    pub(crate) fn not_found(id: &str) -> Self {
        QueryError::NotFound { id: id.to_owned() }
    }
}
