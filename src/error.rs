use thiserror::Error;

use crate::parse::{ParseError, WriteError};
use crate::{ConfigurationError, QueryError};

/// Unified error type covering parsing, writing, graph validation, lookups
/// and I/O.
///
/// Returned by convenience methods like
/// [`PolicyGraph::from_dsl()`](crate::PolicyGraph::from_dsl) and
/// [`PolicyGraph::from_file()`](crate::PolicyGraph::from_file).
#[derive(Debug, Error)]
pub enum PolicyGraphError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
