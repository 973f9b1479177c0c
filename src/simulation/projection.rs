//! Month-by-month net worth and portfolio simulation.
//!
//! The simulation is discrete: each month grows income and expenses,
//! caps the investment contribution at that month's free cash flow,
//! compounds the portfolio, and adds free cash flow to net worth. Net
//! worth and portfolio evolve independently; portfolio returns never
//! feed back into net worth.

use serde::{Deserialize, Serialize};

use super::aggregator::MonthlyAggregate;
use super::normalizer::to_monthly;
use crate::domain::{parse_amount, Frequency};
use crate::errors::{FinanceError, Result};

const MONTHS_PER_YEAR: u64 = 12;

/// Longest horizon accepted from settings or text input, in years.
pub const MAX_PROJECTION_YEARS: u32 = 200;

/// User-supplied assumptions for a projection run. Rates are annual
/// percentages (`7.0` means 7%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionSettings {
    pub current_net_worth: f64,
    pub years_to_project: u32,
    pub investment_return_rate: f64,
    pub income_growth_rate: f64,
    pub inflation_rate: f64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            current_net_worth: 0.0,
            years_to_project: 10,
            investment_return_rate: 7.0,
            income_growth_rate: 3.0,
            inflation_rate: 2.5,
        }
    }
}

impl ProjectionSettings {
    /// Rejects non-finite values and horizons past [`MAX_PROJECTION_YEARS`]
    /// before they reach the engine.
    pub fn validate(&self) -> Result<()> {
        if self.years_to_project > MAX_PROJECTION_YEARS {
            return Err(FinanceError::InvalidInput(format!(
                "years to project must be at most {MAX_PROJECTION_YEARS}"
            )));
        }
        let fields = [
            ("current net worth", self.current_net_worth),
            ("investment return rate", self.investment_return_rate),
            ("income growth rate", self.income_growth_rate),
            ("inflation rate", self.inflation_rate),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(FinanceError::InvalidInput(format!(
                    "{name} must be a finite number"
                )));
            }
        }
        Ok(())
    }
}

/// Parses a "years to project" field: non-numeric text becomes 0,
/// fractions are floored, negatives clamp to 0 and anything past
/// [`MAX_PROJECTION_YEARS`] clamps to it.
pub fn parse_years(raw: &str) -> u32 {
    let value = parse_amount(raw).floor();
    if value <= 0.0 {
        0
    } else if value >= f64::from(MAX_PROJECTION_YEARS) {
        MAX_PROJECTION_YEARS
    } else {
        value as u32
    }
}

/// The full argument set of a projection run, monthly figures included.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectionInputs {
    pub current_net_worth: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_investments: f64,
    pub investment_return_rate: f64,
    pub income_growth_rate: f64,
    pub inflation_rate: f64,
    pub years: u32,
}

impl ProjectionInputs {
    pub fn from_parts(aggregate: &MonthlyAggregate, settings: &ProjectionSettings) -> Self {
        Self {
            current_net_worth: settings.current_net_worth,
            monthly_income: aggregate.total_income,
            monthly_expenses: aggregate.total_expenses,
            monthly_investments: aggregate.total_investments,
            investment_return_rate: settings.investment_return_rate,
            income_growth_rate: settings.income_growth_rate,
            inflation_rate: settings.inflation_rate,
            years: settings.years_to_project,
        }
    }

    fn total_months(&self) -> u64 {
        u64::from(self.years) * MONTHS_PER_YEAR
    }
}

/// One emitted sample of the projection series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    pub net_worth: f64,
    pub investment_portfolio: f64,
}

/// A single simulated month. `opening_*` hold the values before the
/// month's update; the remaining fields are the values after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionStep {
    pub month: u64,
    pub opening_net_worth: f64,
    pub opening_portfolio: f64,
    pub income: f64,
    pub expenses: f64,
    pub free_cash_flow: f64,
    pub investment: f64,
    pub portfolio: f64,
    pub net_worth: f64,
}

impl ProjectionStep {
    pub fn is_year_boundary(&self) -> bool {
        self.month % MONTHS_PER_YEAR == 0
    }

    fn opening_point(&self) -> ProjectionPoint {
        ProjectionPoint {
            year: (self.month / MONTHS_PER_YEAR) as u32,
            net_worth: self.opening_net_worth,
            investment_portfolio: self.opening_portfolio,
        }
    }
}

/// Iterator over months `0..=years*12` of a projection run.
#[derive(Debug, Clone)]
pub struct MonthlySimulation {
    monthly_return: f64,
    monthly_income_growth: f64,
    monthly_inflation: f64,
    net_worth: f64,
    income: f64,
    expenses: f64,
    investments: f64,
    portfolio: f64,
    month: u64,
    last_month: u64,
}

impl MonthlySimulation {
    pub fn new(inputs: &ProjectionInputs) -> Self {
        Self {
            monthly_return: monthly_rate(inputs.investment_return_rate),
            monthly_income_growth: monthly_rate(inputs.income_growth_rate),
            monthly_inflation: monthly_rate(inputs.inflation_rate),
            net_worth: inputs.current_net_worth,
            income: inputs.monthly_income,
            expenses: inputs.monthly_expenses,
            investments: inputs.monthly_investments,
            portfolio: 0.0,
            month: 0,
            last_month: inputs.total_months(),
        }
    }
}

impl Iterator for MonthlySimulation {
    type Item = ProjectionStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.month > self.last_month {
            return None;
        }
        let opening_net_worth = self.net_worth;
        let opening_portfolio = self.portfolio;

        self.income *= 1.0 + self.monthly_income_growth;
        self.expenses *= 1.0 + self.monthly_inflation;
        let free_cash_flow = self.income - self.expenses;
        self.investments = self.investments.min(free_cash_flow);
        self.portfolio = self.portfolio * (1.0 + self.monthly_return) + self.investments;
        self.net_worth += free_cash_flow;

        let step = ProjectionStep {
            month: self.month,
            opening_net_worth,
            opening_portfolio,
            income: self.income,
            expenses: self.expenses,
            free_cash_flow,
            investment: self.investments,
            portfolio: self.portfolio,
            net_worth: self.net_worth,
        };
        self.month += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last_month + 1).saturating_sub(self.month);
        match usize::try_from(remaining) {
            Ok(len) => (len, Some(len)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Runs the simulation and returns one point per whole year, `0..=years`.
pub fn project(inputs: &ProjectionInputs) -> Vec<ProjectionPoint> {
    let capacity = inputs.years.min(MAX_PROJECTION_YEARS) as usize + 1;
    let mut points = Vec::with_capacity(capacity);
    points.extend(
        MonthlySimulation::new(inputs)
            .filter(ProjectionStep::is_year_boundary)
            .map(|step| step.opening_point()),
    );
    points
}

/// Compounds `principal` monthly for `years` with a recurring contribution
/// normalised to its monthly equivalent.
pub fn future_value(
    principal: f64,
    annual_rate_pct: f64,
    years: u32,
    contribution: f64,
    contribution_frequency: &Frequency,
) -> f64 {
    let rate = monthly_rate(annual_rate_pct);
    let monthly_contribution = to_monthly(contribution, contribution_frequency);
    let months = u64::from(years) * MONTHS_PER_YEAR;
    (0..months).fold(principal, |value, _| {
        value * (1.0 + rate) + monthly_contribution
    })
}

fn monthly_rate(annual_pct: f64) -> f64 {
    annual_pct / 100.0 / 12.0
}
