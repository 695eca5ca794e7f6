//! Service layer for business logic.

pub mod intake;
pub mod stats;

pub use intake::{BatchOutcome, IntakePipeline, PageRef, Translation};
pub use stats::StatsService;
