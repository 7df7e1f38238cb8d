//! Projection engine for yearly balance projections

mod engine;
mod yearly;

pub use engine::{project, ProjectionEngine};
pub use yearly::{ProjectionResult, ProjectionSummary, YearlyProjection};
