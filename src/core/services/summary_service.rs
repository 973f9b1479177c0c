use std::collections::HashSet;

use tracing::warn;

use crate::domain::{FinanceState, Recurring, Transaction};
use crate::simulation::{by_category, CategoryBreakdown, MonthlyAggregate};

/// A labelled bar of the monthly cash flow overview.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowRow {
    pub name: &'static str,
    pub amount: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Recomputes monthly totals from the current entry lists.
    pub fn monthly_summary(state: &FinanceState) -> MonthlyAggregate {
        Self::warn_unrecognized("income", &state.income);
        Self::warn_unrecognized("expense", &state.expenses);
        Self::warn_unrecognized("investment", &state.investments);
        MonthlyAggregate::from_state(state)
    }

    pub fn expenses_by_category(state: &FinanceState) -> CategoryBreakdown {
        by_category(&state.expenses)
    }

    pub fn cash_flow_rows(summary: &MonthlyAggregate) -> Vec<CashFlowRow> {
        vec![
            CashFlowRow {
                name: "Income",
                amount: summary.total_income,
            },
            CashFlowRow {
                name: "Expenses",
                amount: summary.total_expenses,
            },
            CashFlowRow {
                name: "Investments",
                amount: summary.total_investments,
            },
            CashFlowRow {
                name: "Free Cash",
                amount: summary.free_cash_flow,
            },
        ]
    }

    /// Newest transactions first; equal dates keep their recorded order.
    pub fn recent_transactions(state: &FinanceState, limit: usize) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = state.transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(limit);
        sorted
    }

    /// Distinct expense categories in first-seen order.
    pub fn transaction_categories(state: &FinanceState) -> Vec<&str> {
        let mut seen = HashSet::new();
        state
            .expenses
            .iter()
            .map(|entry| entry.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    fn warn_unrecognized<R: Recurring>(kind: &str, entries: &[R]) {
        for entry in entries {
            if !entry.frequency().is_recognized() {
                warn!(
                    kind,
                    frequency = entry.frequency().as_str(),
                    "unrecognized frequency treated as monthly"
                );
            }
        }
    }
}
