pub mod json_backend;

use std::path::Path;

use crate::{domain::FinanceState, errors::FinanceError};

pub type Result<T> = std::result::Result<T, FinanceError>;

/// Abstraction over persistence backends that keep finance state in named slots.
pub trait StorageBackend: Send + Sync {
    /// Returns `None` when nothing has been saved under `slot` yet.
    fn load(&self, slot: &str) -> Result<Option<FinanceState>>;
    fn save(&self, slot: &str, state: &FinanceState) -> Result<()>;
    fn backup(&self, slot: &str, state: &FinanceState, note: Option<&str>) -> Result<String>;
    /// Backup names for `slot`, newest first.
    fn list_backups(&self, slot: &str) -> Result<Vec<String>>;
    fn restore(&self, slot: &str, backup_name: &str) -> Result<FinanceState>;

    /// Ad-hoc export outside the managed slots.
    fn save_to_path(&self, state: &FinanceState, path: &Path) -> Result<()> {
        json_backend::save_state_to_path(state, path)
    }

    /// Ad-hoc import, e.g. a blob exported from the browser dashboard.
    fn load_from_path(&self, path: &Path) -> Result<FinanceState> {
        json_backend::load_state_from_path(path)
    }
}

pub use json_backend::JsonStorage;
