//! Finance entries, cadences, and the state container that owns them.

pub mod common;
pub mod entry;
pub mod frequency;
pub mod state;
pub mod transaction;

pub use common::{
    generate_id, parse_amount, parse_date, Amounted, BelongsToCategory, Displayable,
    Identifiable, Recurring,
};
pub use entry::{ExpenseEntry, IncomeEntry, InvestmentEntry};
pub use frequency::Frequency;
pub use state::{EntryKind, FinanceAction, FinanceState};
pub use transaction::Transaction;
