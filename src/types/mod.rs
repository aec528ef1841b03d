mod clause;
pub mod condition;
mod context;
mod error;
mod graph;
mod interaction_index;
mod report;
mod scenario;
mod value;

pub(crate) use clause::CompiledClause;
pub use clause::{Clause, ClauseBuilder, RelationKind, Relations, DEFAULT_PRECEDENCE};
pub use condition::{check_conditions, first_failing, Condition};
pub use context::{Context, OrderStatus};
pub use error::{ConfigurationError, QueryError};
pub use graph::{PolicyGraph, PolicyGraphBuilder, DEFAULT_MAX_HOPS};
pub(crate) use interaction_index::InteractionIndex;
pub use report::{Outcome, ResolutionReport};
pub use scenario::{
    Complexity, FactRequirement, ScenarioCatalog, ScenarioCatalogBuilder, ScenarioTemplate,
};
pub use value::{CompareOp, Value};
