//! Validated create/update/delete helpers over [`FinanceState`].

use crate::domain::{
    generate_id, Amounted, EntryKind, ExpenseEntry, FinanceAction, FinanceState, Identifiable,
    IncomeEntry, InvestmentEntry, Transaction,
};

use super::{ServiceError, ServiceResult};

/// Ties an entry type to its collection and actions in [`FinanceState`].
pub trait StateEntry: Identifiable + Amounted + Clone {
    const KIND: EntryKind;

    fn label(&self) -> &str;
    fn assign_id(&mut self, id: String);
    fn add_action(self) -> FinanceAction;
    fn update_action(self) -> FinanceAction;
    fn collection(state: &FinanceState) -> &[Self];
}

macro_rules! state_entry {
    ($ty:ty, $kind:expr, $label:ident, $field:ident, $add:ident, $update:ident) => {
        impl StateEntry for $ty {
            const KIND: EntryKind = $kind;

            fn label(&self) -> &str {
                &self.$label
            }

            fn assign_id(&mut self, id: String) {
                self.id = id;
            }

            fn add_action(self) -> FinanceAction {
                FinanceAction::$add(self)
            }

            fn update_action(self) -> FinanceAction {
                FinanceAction::$update(self)
            }

            fn collection(state: &FinanceState) -> &[Self] {
                &state.$field
            }
        }
    };
}

state_entry!(IncomeEntry, EntryKind::Income, source, income, AddIncome, UpdateIncome);
state_entry!(ExpenseEntry, EntryKind::Expense, category, expenses, AddExpense, UpdateExpense);
state_entry!(
    InvestmentEntry,
    EntryKind::Investment,
    kind,
    investments,
    AddInvestment,
    UpdateInvestment
);
state_entry!(
    Transaction,
    EntryKind::Transaction,
    category,
    transactions,
    AddTransaction,
    UpdateTransaction
);

pub struct EntryService;

impl EntryService {
    /// Validates and appends `entry`, minting an id when it has none.
    pub fn add<E: StateEntry>(state: &mut FinanceState, mut entry: E) -> ServiceResult<String> {
        Self::validate(&entry)?;
        if entry.id().trim().is_empty() {
            entry.assign_id(generate_id());
        }
        if state.contains(E::KIND, entry.id()) {
            return Err(ServiceError::Invalid(format!(
                "{} `{}` already exists",
                E::KIND.as_str(),
                entry.id()
            )));
        }
        let id = entry.id().to_string();
        state.apply(entry.add_action());
        Ok(id)
    }

    /// Replaces the stored entry that shares `entry`'s id.
    pub fn update<E: StateEntry>(state: &mut FinanceState, entry: E) -> ServiceResult<()> {
        Self::validate(&entry)?;
        if !state.contains(E::KIND, entry.id()) {
            return Err(Self::not_found(E::KIND, entry.id()));
        }
        state.apply(entry.update_action());
        Ok(())
    }

    pub fn remove(state: &mut FinanceState, kind: EntryKind, id: &str) -> ServiceResult<()> {
        if state.apply(FinanceAction::delete(kind, id)) {
            Ok(())
        } else {
            Err(Self::not_found(kind, id))
        }
    }

    pub fn get<'a, E: StateEntry>(state: &'a FinanceState, id: &str) -> Option<&'a E> {
        E::collection(state).iter().find(|entry| entry.id() == id)
    }

    pub fn list<E: StateEntry>(state: &FinanceState) -> &[E] {
        E::collection(state)
    }

    fn validate<E: StateEntry>(entry: &E) -> ServiceResult<()> {
        if entry.label().trim().is_empty() {
            return Err(ServiceError::Invalid(format!(
                "{} label must not be empty",
                E::KIND.as_str()
            )));
        }
        let amount = entry.amount();
        if !amount.is_finite() || amount < 0.0 {
            return Err(ServiceError::Invalid(format!(
                "{} amount must be a non-negative number",
                E::KIND.as_str()
            )));
        }
        Ok(())
    }

    fn not_found(kind: EntryKind, id: &str) -> ServiceError {
        ServiceError::NotFound(format!("{} `{}`", kind.as_str(), id))
    }
}
