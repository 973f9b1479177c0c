pub mod commands;
pub mod context;
pub mod output;
pub mod registry;

use std::{env, path::PathBuf};

use crate::{errors::CliError, utils::app_data_dir};

pub use context::{CliContext, CommandError, CommandResult};
use output::{print_table, Align};
use registry::CommandRegistry;

/// Entry point for the `finance_core_cli` binary.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    run_with_args(&args, app_data_dir())
}

/// Runs a single command against the data directory at `base`.
pub fn run_with_args(args: &[String], base: PathBuf) -> Result<(), CliError> {
    let mut registry = CommandRegistry::new();
    commands::register_all(&mut registry);

    let Some((name, rest)) = args.split_first() else {
        print_help(&registry);
        return Ok(());
    };
    if matches!(name.as_str(), "help" | "--help" | "-h") {
        print_help(&registry);
        return Ok(());
    }

    let Some(entry) = registry.get(name) else {
        let mut message = format!("unknown command `{name}`");
        if let Some(best) = registry.suggest(name) {
            message.push_str(&format!(", did you mean `{best}`?"));
        }
        return Err(CliError::Command(message));
    };

    let mut ctx = CliContext::open(base)?;
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    (entry.handler)(&mut ctx, &rest).map_err(CliError::from)
}

fn print_help(registry: &CommandRegistry) {
    output::section("finance_core_cli");
    let rows: Vec<Vec<String>> = registry
        .list()
        .into_iter()
        .map(|entry| vec![entry.usage.to_string(), entry.description.to_string()])
        .collect();
    print_table(&[("Command", Align::Left), ("Description", Align::Left)], &rows);
}
