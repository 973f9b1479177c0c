use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{domain::FinanceState, errors::FinanceError};

use super::{Result, StorageBackend};

const STATE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const BACKUP_SEQUENCE_WIDTH: usize = 3;
const TMP_SUFFIX: &str = "tmp";
const SLOTS_DIR: &str = "slots";
const BACKUPS_DIR: &str = "backups";
const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed JSON persistence: one file per slot plus rotating backups.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    slots_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: PathBuf, retention: Option<usize>) -> Result<Self> {
        let slots_dir = root.join(SLOTS_DIR);
        let backups_dir = root.join(BACKUPS_DIR);
        fs::create_dir_all(&slots_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            slots_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.slots_dir
            .join(format!("{}.{}", canonical_name(slot), STATE_EXTENSION))
    }

    pub fn backup_path(&self, slot: &str, backup_name: &str) -> PathBuf {
        self.backup_dir(slot).join(backup_name)
    }

    fn backup_dir(&self, slot: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(slot))
    }

    /// Backup names are `{slot}_{YYYYmmdd}_{HHMMSS}_{seq}[_{note}].json`.
    /// `seq` counts up within one second so `(stamp, seq)` orders creation.
    fn write_backup(&self, slot: &str, json: &str, note: Option<&str>) -> Result<String> {
        let dir = self.backup_dir(slot);
        fs::create_dir_all(&dir)?;
        let now = Utc::now();
        let stamp = now.format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let second = parse_stamp(&stamp);
        let mut sequence = self
            .backup_keys(slot)?
            .into_iter()
            .filter(|key| Some(key.created) == second)
            .map(|key| key.sequence)
            .max()
            .unwrap_or(0)
            + 1;
        let label = sanitize_note(note);
        let name = loop {
            let mut stem = format!(
                "{}_{}_{:0width$}",
                canonical_name(slot),
                stamp,
                sequence,
                width = BACKUP_SEQUENCE_WIDTH
            );
            if let Some(label) = &label {
                stem.push('_');
                stem.push_str(label);
            }
            let candidate = format!("{}.{}", stem, STATE_EXTENSION);
            if !dir.join(&candidate).exists() {
                break candidate;
            }
            sequence += 1;
        };
        write_atomic(&dir.join(&name), json)?;
        self.prune_backups(slot, &name)?;
        Ok(name)
    }

    fn backup_keys(&self, slot: &str) -> Result<Vec<BackupKey>> {
        Ok(self
            .list_backups(slot)?
            .iter()
            .filter_map(|name| parse_backup_key(name))
            .collect())
    }

    fn prune_backups(&self, slot: &str, keep: &str) -> Result<()> {
        let backups = self.list_backups(slot)?;
        let stale = backups
            .iter()
            .filter(|name| name.as_str() != keep)
            .skip(self.retention.saturating_sub(1));
        for name in stale {
            debug!(slot, backup = name.as_str(), "pruning backup");
            let _ = fs::remove_file(self.backup_path(slot, name));
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self, slot: &str) -> Result<Option<FinanceState>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            debug!(slot, "no saved state, starting empty");
            return Ok(None);
        }
        let state = load_state_from_path(&path)?;
        info!(slot, path = %path.display(), "loaded finance state");
        Ok(Some(state))
    }

    fn save(&self, slot: &str, state: &FinanceState) -> Result<()> {
        let path = self.slot_path(slot);
        if path.exists() {
            let previous = fs::read_to_string(&path)?;
            self.write_backup(slot, &previous, None)?;
        }
        save_state_to_path(state, &path)?;
        info!(slot, path = %path.display(), "saved finance state");
        Ok(())
    }

    fn backup(&self, slot: &str, state: &FinanceState, note: Option<&str>) -> Result<String> {
        let json = serde_json::to_string_pretty(state)?;
        let name = self.write_backup(slot, &json, note)?;
        info!(slot, backup = name.as_str(), "created backup");
        Ok(name)
    }

    fn list_backups(&self, slot: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(slot);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(STATE_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        // Newest creation key first; names without one go last.
        entries.sort_by_cached_key(|name| Reverse((parse_backup_key(name), name.clone())));
        Ok(entries)
    }

    fn restore(&self, slot: &str, backup_name: &str) -> Result<FinanceState> {
        check_backup_name(backup_name)?;
        let backup_path = self.backup_path(slot, backup_name);
        if !backup_path.exists() {
            return Err(FinanceError::NotFound(format!(
                "backup `{}`",
                backup_name
            )));
        }
        let state = load_state_from_path(&backup_path)?;
        save_state_to_path(&state, &self.slot_path(slot))?;
        info!(slot, backup = backup_name, "restored backup");
        Ok(state)
    }
}

pub fn save_state_to_path(state: &FinanceState, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_state_from_path(path: &Path) -> Result<FinanceState> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "finance".into()
    } else {
        sanitized
    }
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut pending_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !sanitized.is_empty() {
                sanitized.push('-');
            }
            sanitized.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else if ch.is_whitespace() || matches!(ch, '-' | '.' | '_') {
            pending_dash = true;
        }
    }
    (!sanitized.is_empty()).then_some(sanitized)
}

/// Rejects anything that could resolve outside the slot's backup directory.
fn check_backup_name(name: &str) -> Result<()> {
    let plain_file = Path::new(name).file_name().and_then(|file| file.to_str()) == Some(name);
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") || !plain_file {
        return Err(FinanceError::InvalidInput(format!(
            "backup name `{name}` must be a plain file name"
        )));
    }
    Ok(())
}

/// Creation order of a backup: second-resolution stamp, then the
/// per-second sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct BackupKey {
    created: DateTime<Utc>,
    sequence: u32,
}

/// Finds the `YYYYmmdd_HHMMSS_seq` run that follows the slot prefix. Notes
/// never contain `_`, so the run is the last or second-to-last triple.
fn parse_backup_key(name: &str) -> Option<BackupKey> {
    let stem = name.strip_suffix(&format!(".{}", STATE_EXTENSION))?;
    let parts: Vec<&str> = stem.split('_').collect();
    parts.windows(3).rev().take(2).find_map(|run| {
        let (date, time, sequence) = (run[0], run[1], run[2]);
        if date.len() != 8 || time.len() != 6 || sequence.is_empty() || !is_digits(sequence) {
            return None;
        }
        Some(BackupKey {
            created: parse_stamp(&format!("{date}_{time}"))?,
            sequence: sequence.parse().ok()?,
        })
    })
}

fn parse_stamp(stamp: &str) -> Option<DateTime<Utc>> {
    if !is_digits(&stamp.replace('_', "")) {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Frequency, IncomeEntry};
    use tempfile::TempDir;

    fn storage_with_temp_dir(retention: usize) -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage =
            JsonStorage::new(temp.path().to_path_buf(), Some(retention)).expect("json storage");
        (storage, temp)
    }

    fn sample_state(amount: f64) -> FinanceState {
        FinanceState {
            income: vec![IncomeEntry::new("Salary", amount, Frequency::Monthly)],
            ..FinanceState::default()
        }
    }

    #[test]
    fn missing_slot_loads_as_none() {
        let (storage, _guard) = storage_with_temp_dir(3);
        assert!(storage.load("financeData").unwrap().is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir(3);
        let state = sample_state(4100.0);
        storage.save("financeData", &state).expect("save state");
        let loaded = storage.load("financeData").expect("load state");
        assert_eq!(loaded, Some(state));
    }

    #[test]
    fn overwriting_a_slot_snapshots_previous_contents() {
        let (storage, _guard) = storage_with_temp_dir(3);
        storage.save("household", &sample_state(1.0)).unwrap();
        storage.save("household", &sample_state(2.0)).unwrap();
        let backups = storage.list_backups("household").unwrap();
        assert_eq!(backups.len(), 1);
        let restored = storage.restore("household", &backups[0]).unwrap();
        assert_eq!(restored.income[0].amount, 1.0);
        let current = storage.load("household").unwrap().unwrap();
        assert_eq!(current.income[0].amount, 1.0);
    }

    #[test]
    fn backups_are_pruned_to_retention() {
        let (storage, _guard) = storage_with_temp_dir(2);
        let state = sample_state(10.0);
        for note in ["one", "two", "three"] {
            storage.backup("slot", &state, Some(note)).unwrap();
        }
        assert_eq!(storage.list_backups("slot").unwrap().len(), 2);
    }

    #[test]
    fn backup_names_carry_slot_and_note() {
        let (storage, _guard) = storage_with_temp_dir(3);
        let name = storage
            .backup("Finance Data", &sample_state(5.0), Some("Quarter Close"))
            .unwrap();
        assert!(name.starts_with("finance_data_"), "unexpected name {name}");
        assert!(name.ends_with("_001_quarter-close.json"), "unexpected name {name}");
        assert_eq!(parse_backup_key(&name).map(|key| key.sequence), Some(1));
    }

    #[test]
    fn quick_successive_backups_keep_the_newest() {
        let (storage, _guard) = storage_with_temp_dir(1);
        let first = storage.backup("slot", &sample_state(1.0), None).unwrap();
        let second = storage.backup("slot", &sample_state(2.0), None).unwrap();
        assert_ne!(first, second);
        assert_eq!(storage.list_backups("slot").unwrap(), vec![second.clone()]);
        assert!(storage.backup_path("slot", &second).exists());
        assert!(!storage.backup_path("slot", &first).exists());
        let restored = storage.restore("slot", &second).unwrap();
        assert_eq!(restored.income[0].amount, 2.0);
    }

    #[test]
    fn note_text_does_not_affect_backup_order() {
        let (storage, _guard) = storage_with_temp_dir(2);
        let zeta = storage.backup("slot", &sample_state(1.0), Some("zeta")).unwrap();
        let alpha = storage.backup("slot", &sample_state(2.0), Some("alpha")).unwrap();
        assert_eq!(storage.list_backups("slot").unwrap(), vec![alpha.clone(), zeta]);

        let (storage, _guard) = storage_with_temp_dir(1);
        storage.backup("slot", &sample_state(1.0), Some("zeta")).unwrap();
        let alpha = storage.backup("slot", &sample_state(2.0), Some("alpha")).unwrap();
        assert_eq!(storage.list_backups("slot").unwrap(), vec![alpha]);
    }

    #[test]
    fn backup_keys_order_by_stamp_then_sequence() {
        let early = parse_backup_key("slot_20261015_183149_002_zeta.json").unwrap();
        let later = parse_backup_key("slot_20261015_183149_010_alpha.json").unwrap();
        let next_second = parse_backup_key("slot_20261015_183150_001.json").unwrap();
        assert!(early < later);
        assert!(later < next_second);
        assert!(parse_backup_key("slot_notes.json").is_none());
        assert!(parse_backup_key("slot_20261015_183149_001.txt").is_none());
    }

    #[test]
    fn restore_rejects_names_outside_backup_dir() {
        let (storage, guard) = storage_with_temp_dir(3);
        storage.save("slot", &sample_state(1.0)).unwrap();
        let outside = guard.path().join("outside.json");
        save_state_to_path(&sample_state(99.0), &outside).unwrap();
        for name in ["../../outside.json", "../outside.json", "sub/x.json", "a\\b.json", ".."] {
            let err = storage.restore("slot", name).unwrap_err();
            assert!(matches!(err, FinanceError::InvalidInput(_)), "{name}: {err}");
        }
        let current = storage.load("slot").unwrap().unwrap();
        assert_eq!(current.income[0].amount, 1.0);
    }

    #[test]
    fn restore_unknown_backup_fails() {
        let (storage, _guard) = storage_with_temp_dir(3);
        let err = storage.restore("slot", "nope.json").unwrap_err();
        assert!(matches!(err, FinanceError::NotFound(_)));
    }

    #[test]
    fn canonical_name_replaces_symbols() {
        assert_eq!(canonical_name("financeData"), "financedata");
        assert_eq!(canonical_name("  ***  "), "finance");
    }
}
