mod common;

use std::fs;
use std::path::{Path, PathBuf};

use finance_core::{
    domain::FinanceState,
    storage::{JsonStorage, StorageBackend},
};
use tempfile::tempdir;

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let store = JsonStorage::new(temp.path().to_path_buf(), Some(2)).unwrap();
    let state = common::household_state();
    store.save(common::SLOT, &state).expect("initial save");

    let path = store.slot_path(common::SLOT);
    let original = fs::read_to_string(&path).expect("read original file");

    // A directory squatting on the temp name makes File::create fail.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();

    let result = store.save(common::SLOT, &FinanceState::default());
    assert!(result.is_err(), "save should fail when temp path is a directory");
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn persisted_blob_uses_browser_field_names() {
    let temp = tempdir().unwrap();
    let store = JsonStorage::new(temp.path().to_path_buf(), None).unwrap();
    store.save(common::SLOT, &common::household_state()).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.slot_path(common::SLOT)).unwrap()).unwrap();
    assert_eq!(json["income"][0]["source"], "Salary");
    assert_eq!(json["expenses"][1]["frequency"], "weekly");
    assert_eq!(json["investments"][0]["type"], "Index Fund");
    assert_eq!(json["transactions"][0]["date"], "2024-05-02");
}

#[test]
fn backups_list_newest_first_and_restore() {
    let (mut manager, _config, _guard) = common::setup_test_env();
    for action in common::household_state()
        .income
        .into_iter()
        .map(finance_core::domain::FinanceAction::AddIncome)
    {
        manager.dispatch(action);
    }
    manager.save().unwrap();

    let first = manager.backup(Some("alpha")).unwrap();
    let second = manager.backup(Some("beta")).unwrap();
    let listed = manager.list_backups().unwrap();
    assert_eq!(listed, vec![second.clone(), first.clone()]);

    let wiped = manager.state().income[0].id.clone();
    manager.remove(finance_core::domain::EntryKind::Income, &wiped).unwrap();
    manager.restore(&first).unwrap();
    assert_eq!(manager.state().income.len(), 2);
}

#[test]
fn rapid_saves_retain_the_most_recent_snapshots() {
    let temp = tempdir().unwrap();
    let store = JsonStorage::new(temp.path().to_path_buf(), Some(3)).unwrap();
    let mut state = common::household_state();
    for amount in 1..=6 {
        state.income[0].amount = f64::from(amount);
        store.save(common::SLOT, &state).unwrap();
    }

    // Saves 1..=5 were snapshotted before being overwritten; only 3 survive.
    let listed = store.list_backups(common::SLOT).unwrap();
    assert_eq!(listed.len(), 3);
    let amounts: Vec<f64> = listed
        .iter()
        .map(|name| {
            let path = store.backup_path(common::SLOT, name);
            store.load_from_path(&path).unwrap().income[0].amount
        })
        .collect();
    assert_eq!(amounts, vec![5.0, 4.0, 3.0]);

    let newest = store
        .backup(common::SLOT, &state, Some("aaa"))
        .expect("manual backup");
    let listed = store.list_backups(common::SLOT).unwrap();
    assert_eq!(listed[0], newest);
    assert_eq!(listed.len(), 3);
}

#[test]
fn corrupt_slot_surfaces_storage_error() {
    let temp = tempdir().unwrap();
    let store = JsonStorage::new(temp.path().to_path_buf(), None).unwrap();
    fs::write(store.slot_path(common::SLOT), "{ broken").unwrap();
    let err = store.load(common::SLOT).expect_err("corrupt json");
    assert!(err.to_string().starts_with("Persistence error"));
}

#[test]
fn import_accepts_lenient_amounts() {
    let (mut manager, _config, guard) = common::setup_test_env();
    let path = guard.path().join("export.json");
    fs::write(
        &path,
        r#"{"income":[{"id":"a","source":"Gift","amount":"n/a","frequency":"one-time"}]}"#,
    )
    .unwrap();
    manager.import(&path).unwrap();
    assert_eq!(manager.state().income[0].amount, 0.0);
    assert!(manager.state().expenses.is_empty());
}
