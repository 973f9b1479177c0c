//! Reductions from entry lists to monthly totals and category breakdowns.

use std::collections::HashMap;

use serde::Serialize;

use super::normalizer::to_monthly;
use crate::domain::{Amounted, BelongsToCategory, FinanceState, Recurring};

/// Monthly totals derived from a [`FinanceState`]. Never stored; rebuild it
/// whenever an entry list changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAggregate {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_investments: f64,
    pub free_cash_flow: f64,
}

impl MonthlyAggregate {
    pub fn new(total_income: f64, total_expenses: f64, total_investments: f64) -> Self {
        Self {
            total_income,
            total_expenses,
            total_investments,
            free_cash_flow: total_income - total_expenses - total_investments,
        }
    }

    pub fn from_state(state: &FinanceState) -> Self {
        Self::new(
            sum_monthly(&state.income),
            sum_monthly(&state.expenses),
            sum_monthly(&state.investments),
        )
    }
}

/// Sums the monthly-equivalent value of every entry.
pub fn sum_monthly<R: Recurring>(entries: &[R]) -> f64 {
    entries
        .iter()
        .map(|entry| to_monthly(entry.amount(), entry.frequency()))
        .sum()
}

/// Category totals in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    totals: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.index.get(category).map(|&idx| self.totals[idx].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals
            .iter()
            .map(|(category, total)| (category.as_str(), *total))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.totals.iter().map(|(category, _)| category.as_str())
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.totals.iter().map(|(_, total)| total).sum()
    }

    fn add(&mut self, category: &str, amount: f64) {
        match self.index.get(category) {
            Some(&idx) => self.totals[idx].1 += amount,
            None => {
                self.index.insert(category.to_string(), self.totals.len());
                self.totals.push((category.to_string(), amount));
            }
        }
    }
}

/// Groups entries by exact category string and sums their raw amounts.
///
/// Cadence is ignored on purpose: this reports the nominal share of
/// spend per category, not the monthly-equivalent share.
pub fn by_category<C>(entries: &[C]) -> CategoryBreakdown
where
    C: BelongsToCategory + Amounted,
{
    let mut breakdown = CategoryBreakdown::default();
    for entry in entries {
        breakdown.add(entry.category(), entry.amount());
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseEntry, Frequency, IncomeEntry, InvestmentEntry};

    #[test]
    fn empty_lists_sum_to_zero() {
        let entries: Vec<IncomeEntry> = Vec::new();
        assert_eq!(sum_monthly(&entries), 0.0);
    }

    #[test]
    fn single_monthly_entry_sums_to_its_amount() {
        let entries = vec![IncomeEntry::new("Job", 100.0, Frequency::Monthly)];
        assert_eq!(sum_monthly(&entries), 100.0);
    }

    #[test]
    fn mixed_cadences_are_normalised() {
        let entries = vec![
            ExpenseEntry::new("Insurance", 1200.0, Frequency::Annually),
            ExpenseEntry::new("Groceries", 100.0, Frequency::Weekly),
            ExpenseEntry::new("Water", 90.0, Frequency::Quarterly),
        ];
        let total = sum_monthly(&entries);
        assert!((total - (100.0 + 433.0 + 30.0)).abs() < 1e-9);
    }

    #[test]
    fn by_category_sums_raw_amounts_ignoring_cadence() {
        let entries = vec![
            ExpenseEntry::new("Food", 50.0, Frequency::Weekly),
            ExpenseEntry::new("Rent", 900.0, Frequency::Monthly),
            ExpenseEntry::new("Food", 30.0, Frequency::Annually),
        ];
        let breakdown = by_category(&entries);
        assert_eq!(breakdown.get("Food"), Some(80.0));
        assert_eq!(breakdown.get("Rent"), Some(900.0));
        assert_eq!(breakdown.get("Travel"), None);
        let order: Vec<&str> = breakdown.categories().collect();
        assert_eq!(order, vec!["Food", "Rent"]);
    }

    #[test]
    fn by_category_is_case_sensitive_and_empty_for_no_input() {
        let entries: Vec<ExpenseEntry> = Vec::new();
        assert!(by_category(&entries).is_empty());

        let entries = vec![
            ExpenseEntry::new("food", 1.0, Frequency::Monthly),
            ExpenseEntry::new("Food", 2.0, Frequency::Monthly),
        ];
        assert_eq!(by_category(&entries).len(), 2);
    }

    #[test]
    fn aggregate_free_cash_flow_subtracts_expenses_and_investments() {
        let state = FinanceState {
            income: vec![IncomeEntry::new("Job", 5000.0, Frequency::Monthly)],
            expenses: vec![ExpenseEntry::new("Rent", 24000.0, Frequency::Annually)],
            investments: vec![InvestmentEntry::new("ETF", 500.0, Frequency::Monthly)],
            transactions: Vec::new(),
        };
        let aggregate = MonthlyAggregate::from_state(&state);
        assert_eq!(aggregate.total_income, 5000.0);
        assert_eq!(aggregate.total_expenses, 2000.0);
        assert_eq!(aggregate.total_investments, 500.0);
        assert_eq!(aggregate.free_cash_flow, 2500.0);
    }
}
