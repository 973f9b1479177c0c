//! Forecasting helpers that feed state aggregates into the projection engine.

use tracing::debug;

use crate::domain::FinanceState;
use crate::simulation::{project, ProjectionInputs, ProjectionPoint, ProjectionSettings};

use super::{ServiceResult, SummaryService};

pub struct ForecastService;

impl ForecastService {
    /// Aggregates `state` and projects it forward under `settings`.
    pub fn run(
        state: &FinanceState,
        settings: &ProjectionSettings,
    ) -> ServiceResult<Vec<ProjectionPoint>> {
        settings.validate()?;
        let summary = SummaryService::monthly_summary(state);
        let inputs = ProjectionInputs::from_parts(&summary, settings);
        debug!(
            years = inputs.years,
            monthly_income = inputs.monthly_income,
            monthly_expenses = inputs.monthly_expenses,
            monthly_investments = inputs.monthly_investments,
            "running net worth projection"
        );
        Ok(project(&inputs))
    }

    /// The final point of a run, if any.
    pub fn horizon(points: &[ProjectionPoint]) -> Option<&ProjectionPoint> {
        points.last()
    }
}
