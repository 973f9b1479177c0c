use std::path::PathBuf;

use chrono::NaiveDate;

use crate::{
    config::{Config, ConfigManager},
    core::{finance_manager::FinanceManager, services::ServiceError},
    errors::{CliError, FinanceError},
    storage::JsonStorage,
    utils::storage_dir_in,
};

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] FinanceError),
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
            other => CommandError::Core(other.into()),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::InvalidArguments(message) => CliError::Input(message),
            CommandError::Core(inner) => CliError::Core(inner),
        }
    }
}

/// Everything a command handler can touch: loaded config plus the
/// manager bound to the configured slot.
pub struct CliContext {
    pub config: Config,
    pub manager: FinanceManager,
}

impl CliContext {
    pub fn open(base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(
            storage_dir_in(config_manager.base_dir()),
            Some(config.backup_retention),
        )?;
        let manager = FinanceManager::open(Box::new(storage), config.storage_slot.clone())?;
        Ok(Self { config, manager })
    }

    pub fn currency(&self) -> &str {
        &self.config.currency
    }
}

pub(crate) fn require<'a>(
    args: &[&'a str],
    idx: usize,
    usage: &str,
) -> Result<&'a str, CommandError> {
    args.get(idx)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))
}

pub(crate) fn parse_amount_arg(input: &str) -> Result<f64, CommandError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("invalid amount `{input}`")))
}

pub(crate) fn parse_date_arg(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{input}` (use YYYY-MM-DD)"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_args_are_strict() {
        assert_eq!(parse_amount_arg(" 12.5 ").unwrap(), 12.5);
        assert!(parse_amount_arg("abc").is_err());
        assert!(parse_amount_arg("inf").is_err());
    }

    #[test]
    fn date_args_use_iso_format() {
        assert!(parse_date_arg("2024-02-29").is_ok());
        assert!(parse_date_arg("29/02/2024").is_err());
    }

    #[test]
    fn missing_positional_reports_usage() {
        let err = require(&["income"], 1, "add <kind> <label> <amount>").unwrap_err();
        assert_eq!(err.to_string(), "usage: add <kind> <label> <amount>");
    }

    #[test]
    fn open_starts_with_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = CliContext::open(temp.path().to_path_buf()).unwrap();
        assert_eq!(ctx.currency(), "USD");
        assert!(ctx.manager.state().is_empty());
    }
}
