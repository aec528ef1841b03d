mod analysis;
mod compile;
mod error;
pub mod parse;
pub mod presets;
mod render;
mod resolve;
mod traverse;
mod types;

pub use analysis::GraphSummary;
pub use error::PolicyGraphError;
pub use render::PolicyDocument;
pub use types::condition;
pub use types::{
    check_conditions, Clause, ClauseBuilder, CompareOp, Complexity, Condition, ConfigurationError,
    Context, FactRequirement, OrderStatus, Outcome, PolicyGraph, PolicyGraphBuilder, QueryError,
    RelationKind, Relations, ResolutionReport, ScenarioCatalog, ScenarioCatalogBuilder,
    ScenarioTemplate, Value, DEFAULT_MAX_HOPS, DEFAULT_PRECEDENCE,
};
