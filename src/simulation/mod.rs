//! Pure projection engine: cadence normalisation, aggregation, and the
//! monthly net worth simulation. Nothing here performs I/O or holds state
//! between calls.

pub mod aggregator;
pub mod normalizer;
pub mod projection;

pub use aggregator::{by_category, sum_monthly, CategoryBreakdown, MonthlyAggregate};
pub use normalizer::{to_monthly, to_monthly_str};
pub use projection::{
    future_value, parse_years, project, MonthlySimulation, ProjectionInputs, ProjectionPoint,
    ProjectionSettings, ProjectionStep, MAX_PROJECTION_YEARS,
};
