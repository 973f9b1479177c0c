//! Aggregate finance state and the actions that transform it.

use serde::{Deserialize, Serialize};

use super::common::Identifiable;
use super::{ExpenseEntry, IncomeEntry, InvestmentEntry, Transaction};

/// Everything the host persists: three recurring lists plus the
/// transaction log. Serialized in the same camelCase shape as the
/// browser-stored blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceState {
    #[serde(default)]
    pub income: Vec<IncomeEntry>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    #[serde(default)]
    pub investments: Vec<InvestmentEntry>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// A state transition. Updates carry the full replacement record;
/// deletes carry the id.
#[derive(Debug, Clone, PartialEq)]
pub enum FinanceAction {
    AddIncome(IncomeEntry),
    UpdateIncome(IncomeEntry),
    DeleteIncome(String),
    AddExpense(ExpenseEntry),
    UpdateExpense(ExpenseEntry),
    DeleteExpense(String),
    AddInvestment(InvestmentEntry),
    UpdateInvestment(InvestmentEntry),
    DeleteInvestment(String),
    AddTransaction(Transaction),
    UpdateTransaction(Transaction),
    DeleteTransaction(String),
}

/// The four collections held by [`FinanceState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Income,
    Expense,
    Investment,
    Transaction,
}

impl EntryKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(EntryKind::Income),
            "expense" | "expenses" => Some(EntryKind::Expense),
            "investment" | "investments" => Some(EntryKind::Investment),
            "transaction" | "transactions" => Some(EntryKind::Transaction),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
            EntryKind::Investment => "investment",
            EntryKind::Transaction => "transaction",
        }
    }
}

impl FinanceAction {
    pub fn kind(&self) -> EntryKind {
        match self {
            FinanceAction::AddIncome(_)
            | FinanceAction::UpdateIncome(_)
            | FinanceAction::DeleteIncome(_) => EntryKind::Income,
            FinanceAction::AddExpense(_)
            | FinanceAction::UpdateExpense(_)
            | FinanceAction::DeleteExpense(_) => EntryKind::Expense,
            FinanceAction::AddInvestment(_)
            | FinanceAction::UpdateInvestment(_)
            | FinanceAction::DeleteInvestment(_) => EntryKind::Investment,
            FinanceAction::AddTransaction(_)
            | FinanceAction::UpdateTransaction(_)
            | FinanceAction::DeleteTransaction(_) => EntryKind::Transaction,
        }
    }

    /// Builds the delete action for `kind`.
    pub fn delete(kind: EntryKind, id: impl Into<String>) -> Self {
        let id = id.into();
        match kind {
            EntryKind::Income => FinanceAction::DeleteIncome(id),
            EntryKind::Expense => FinanceAction::DeleteExpense(id),
            EntryKind::Investment => FinanceAction::DeleteInvestment(id),
            EntryKind::Transaction => FinanceAction::DeleteTransaction(id),
        }
    }
}

impl FinanceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action` and reports whether any collection changed.
    ///
    /// Updates replace every record sharing the payload's id; deletes
    /// drop every record with the id. Unknown ids leave the state as is.
    pub fn apply(&mut self, action: FinanceAction) -> bool {
        match action {
            FinanceAction::AddIncome(entry) => push(&mut self.income, entry),
            FinanceAction::UpdateIncome(entry) => replace_by_id(&mut self.income, entry),
            FinanceAction::DeleteIncome(id) => remove_by_id(&mut self.income, &id),
            FinanceAction::AddExpense(entry) => push(&mut self.expenses, entry),
            FinanceAction::UpdateExpense(entry) => replace_by_id(&mut self.expenses, entry),
            FinanceAction::DeleteExpense(id) => remove_by_id(&mut self.expenses, &id),
            FinanceAction::AddInvestment(entry) => push(&mut self.investments, entry),
            FinanceAction::UpdateInvestment(entry) => replace_by_id(&mut self.investments, entry),
            FinanceAction::DeleteInvestment(id) => remove_by_id(&mut self.investments, &id),
            FinanceAction::AddTransaction(txn) => push(&mut self.transactions, txn),
            FinanceAction::UpdateTransaction(txn) => replace_by_id(&mut self.transactions, txn),
            FinanceAction::DeleteTransaction(id) => remove_by_id(&mut self.transactions, &id),
        }
    }

    /// Returns whether a record of `kind` with `id` exists.
    pub fn contains(&self, kind: EntryKind, id: &str) -> bool {
        match kind {
            EntryKind::Income => self.income.iter().any(|e| e.id() == id),
            EntryKind::Expense => self.expenses.iter().any(|e| e.id() == id),
            EntryKind::Investment => self.investments.iter().any(|e| e.id() == id),
            EntryKind::Transaction => self.transactions.iter().any(|t| t.id() == id),
        }
    }

    pub fn len(&self, kind: EntryKind) -> usize {
        match kind {
            EntryKind::Income => self.income.len(),
            EntryKind::Expense => self.expenses.len(),
            EntryKind::Investment => self.investments.len(),
            EntryKind::Transaction => self.transactions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty()
            && self.expenses.is_empty()
            && self.investments.is_empty()
            && self.transactions.is_empty()
    }
}

fn push<T>(items: &mut Vec<T>, item: T) -> bool {
    items.push(item);
    true
}

fn replace_by_id<T: Identifiable + Clone>(items: &mut [T], replacement: T) -> bool {
    let mut changed = false;
    for item in items.iter_mut().filter(|item| item.id() == replacement.id()) {
        *item = replacement.clone();
        changed = true;
    }
    changed
}

fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}
