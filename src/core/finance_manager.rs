use std::path::Path;

use tracing::info;

use crate::core::services::{EntryService, ForecastService, StateEntry, SummaryService};
use crate::domain::{EntryKind, FinanceAction, FinanceState};
use crate::errors::FinanceError;
use crate::simulation::{MonthlyAggregate, ProjectionPoint, ProjectionSettings};
use crate::storage::StorageBackend;

/// Owns the working [`FinanceState`] for one storage slot.
///
/// Mutations only touch memory; nothing reaches the backend until
/// [`FinanceManager::save`] is called.
pub struct FinanceManager {
    state: FinanceState,
    slot: String,
    storage: Box<dyn StorageBackend>,
    dirty: bool,
}

impl FinanceManager {
    /// Starts with an empty state bound to `slot` without touching storage.
    pub fn new(storage: Box<dyn StorageBackend>, slot: impl Into<String>) -> Self {
        Self {
            state: FinanceState::default(),
            slot: slot.into(),
            storage,
            dirty: false,
        }
    }

    /// Loads `slot` from storage, falling back to an empty state.
    pub fn open(
        storage: Box<dyn StorageBackend>,
        slot: impl Into<String>,
    ) -> Result<Self, FinanceError> {
        let mut manager = Self::new(storage, slot);
        manager.reload()?;
        Ok(manager)
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn state(&self) -> &FinanceState {
        &self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Discards in-memory changes and re-reads the slot.
    pub fn reload(&mut self) -> Result<(), FinanceError> {
        self.state = self.storage.load(&self.slot)?.unwrap_or_default();
        self.dirty = false;
        Ok(())
    }

    /// Applies `action`; returns whether the state changed.
    pub fn dispatch(&mut self, action: FinanceAction) -> bool {
        let changed = self.state.apply(action);
        self.dirty |= changed;
        changed
    }

    pub fn add<E: StateEntry>(&mut self, entry: E) -> Result<String, FinanceError> {
        let id = EntryService::add(&mut self.state, entry)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update<E: StateEntry>(&mut self, entry: E) -> Result<(), FinanceError> {
        EntryService::update(&mut self.state, entry)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove(&mut self, kind: EntryKind, id: &str) -> Result<(), FinanceError> {
        EntryService::remove(&mut self.state, kind, id)?;
        self.dirty = true;
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), FinanceError> {
        self.storage.save(&self.slot, &self.state)?;
        self.dirty = false;
        info!(slot = self.slot.as_str(), "finance state persisted");
        Ok(())
    }

    pub fn summary(&self) -> MonthlyAggregate {
        SummaryService::monthly_summary(&self.state)
    }

    pub fn project(
        &self,
        settings: &ProjectionSettings,
    ) -> Result<Vec<ProjectionPoint>, FinanceError> {
        Ok(ForecastService::run(&self.state, settings)?)
    }

    pub fn backup(&self, note: Option<&str>) -> Result<String, FinanceError> {
        self.storage.backup(&self.slot, &self.state, note)
    }

    pub fn list_backups(&self) -> Result<Vec<String>, FinanceError> {
        self.storage.list_backups(&self.slot)
    }

    /// Replaces the slot and the in-memory state with a backup.
    pub fn restore(&mut self, backup_name: &str) -> Result<(), FinanceError> {
        self.state = self.storage.restore(&self.slot, backup_name)?;
        self.dirty = false;
        Ok(())
    }

    /// Replaces the working state with a JSON blob on disk. The slot is
    /// left untouched until the next save.
    pub fn import(&mut self, path: &Path) -> Result<(), FinanceError> {
        self.state = self.storage.load_from_path(path)?;
        self.dirty = true;
        info!(path = %path.display(), "imported finance state");
        Ok(())
    }

    pub fn export(&self, path: &Path) -> Result<(), FinanceError> {
        self.storage.save_to_path(&self.state, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseEntry, Frequency, IncomeEntry};
    use crate::storage::JsonStorage;
    use tempfile::tempdir;

    fn manager_in(dir: &Path) -> FinanceManager {
        let store = JsonStorage::new(dir.to_path_buf(), Some(3)).unwrap();
        FinanceManager::open(Box::new(store), "financeData").unwrap()
    }

    #[test]
    fn changes_are_only_persisted_on_save() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        assert!(!manager.is_dirty());

        manager
            .add(IncomeEntry::new("Salary", 5000.0, Frequency::Monthly))
            .unwrap();
        assert!(manager.is_dirty());
        assert!(manager_in(temp.path()).state().income.is_empty());

        manager.save().unwrap();
        assert!(!manager.is_dirty());
        assert_eq!(manager_in(temp.path()).state().income.len(), 1);
    }

    #[test]
    fn dispatch_of_unknown_delete_leaves_state_clean() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        assert!(!manager.dispatch(FinanceAction::DeleteExpense("missing".into())));
        assert!(!manager.is_dirty());
    }

    #[test]
    fn summary_reflects_latest_state() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        manager
            .add(IncomeEntry::new("Salary", 3000.0, Frequency::Monthly))
            .unwrap();
        let id = manager
            .add(ExpenseEntry::new("Rent", 1200.0, Frequency::Monthly))
            .unwrap();
        assert_eq!(manager.summary().free_cash_flow, 1800.0);

        manager.remove(EntryKind::Expense, &id).unwrap();
        assert_eq!(manager.summary().free_cash_flow, 3000.0);
    }

    #[test]
    fn restore_replaces_working_state() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        manager
            .add(IncomeEntry::new("Salary", 3000.0, Frequency::Monthly))
            .unwrap();
        let backup = manager.backup(Some("before wipe")).unwrap();

        manager.dispatch(FinanceAction::DeleteIncome(
            manager.state().income[0].id.clone(),
        ));
        assert!(manager.state().income.is_empty());

        manager.restore(&backup).unwrap();
        assert_eq!(manager.state().income.len(), 1);
        assert!(!manager.is_dirty());
    }

    #[test]
    fn export_then_import_restores_entries() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        manager
            .add(ExpenseEntry::new("Groceries", 90.0, Frequency::Weekly))
            .unwrap();
        let path = temp.path().join("export.json");
        manager.export(&path).unwrap();

        let mut other = manager_in(&temp.path().join("other"));
        other.import(&path).unwrap();
        assert!(other.is_dirty());
        assert_eq!(other.state(), manager.state());
    }
}
