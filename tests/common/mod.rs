#![allow(dead_code)]

use finance_core::{
    config::ConfigManager,
    core::FinanceManager,
    domain::{ExpenseEntry, FinanceState, Frequency, IncomeEntry, InvestmentEntry, Transaction},
    storage::JsonStorage,
    utils::storage_dir_in,
};
use chrono::NaiveDate;
use tempfile::TempDir;

pub const SLOT: &str = "financeData";

/// Creates isolated managers backed by a fresh directory. Keep the
/// returned guard alive for the duration of the test.
pub fn setup_test_env() -> (FinanceManager, ConfigManager, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();

    let storage = JsonStorage::new(storage_dir_in(&base), Some(3)).expect("create json storage");
    let manager = FinanceManager::open(Box::new(storage), SLOT).expect("open finance manager");
    let config_manager = ConfigManager::with_base_dir(base).expect("create config manager");

    (manager, config_manager, temp)
}

/// A household with one of each entry kind and a few transactions.
pub fn household_state() -> FinanceState {
    let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).expect("valid date");
    FinanceState {
        income: vec![
            IncomeEntry::new("Salary", 4000.0, Frequency::Monthly),
            IncomeEntry::new("Dividends", 600.0, Frequency::Quarterly),
        ],
        expenses: vec![
            ExpenseEntry::new("Rent", 1500.0, Frequency::Monthly),
            ExpenseEntry::new("Groceries", 100.0, Frequency::Weekly),
            ExpenseEntry::new("Insurance", 1200.0, Frequency::Annually),
        ],
        investments: vec![InvestmentEntry::new("Index Fund", 500.0, Frequency::Monthly)],
        transactions: vec![
            Transaction::new(date(5, 2), "Groceries", "Market", 82.5),
            Transaction::new(date(5, 1), "Rent", "May rent", 1500.0),
            Transaction::new(date(4, 28), "Groceries", "Bakery", 12.0),
        ],
    }
}
