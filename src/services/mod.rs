//! Schema-constrained requesters and the parallel trip orchestration built on them

pub mod budget;
pub mod nearby;
pub mod orchestrator;
pub mod parser;
pub mod plan;
pub mod prompts;

pub use budget::BudgetRequester;
pub use nearby::{NearbyRequester, normalize_sources};
pub use orchestrator::{FullTrip, generate_full_trip};
pub use parser::ResponseParser;
pub use plan::PlanRequester;
