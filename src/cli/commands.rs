//! Handlers behind each CLI command.

use tracing::debug;

use crate::{
    core::services::{EntryService, ForecastService, SummaryService},
    currency::{format_currency, format_date, format_percentage, group_by_month},
    domain::{
        parse_amount, Amounted, Displayable, EntryKind, ExpenseEntry, Frequency, Identifiable,
        IncomeEntry, InvestmentEntry, Recurring, Transaction,
    },
    simulation::{parse_years, to_monthly},
    utils::build_info,
};

use super::context::{
    parse_amount_arg, parse_date_arg, require, CliContext, CommandError, CommandResult,
};
use super::output::{self, print_table, Align};
use super::registry::{CommandEntry, CommandRegistry};

const DEFAULT_RECENT_LIMIT: usize = 10;

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "summary",
        "Monthly income, expenses, investments and free cash flow",
        "summary",
        cmd_summary,
    ));
    registry.register(CommandEntry::new(
        "categories",
        "Expense totals per category",
        "categories",
        cmd_categories,
    ));
    registry.register(CommandEntry::new(
        "transactions",
        "Most recent transactions grouped by month",
        "transactions [limit]",
        cmd_transactions,
    ));
    registry.register(CommandEntry::new(
        "project",
        "Project net worth and portfolio year by year",
        "project [years] [return%] [growth%] [inflation%] [net_worth]",
        cmd_project,
    ));
    registry.register(CommandEntry::new(
        "add",
        "Add a recurring income, expense or investment",
        "add <income|expense|investment> <label> <amount> [frequency]",
        cmd_add,
    ));
    registry.register(CommandEntry::new(
        "record",
        "Record a dated transaction",
        "record <YYYY-MM-DD> <category> <amount> <description...>",
        cmd_record,
    ));
    registry.register(CommandEntry::new(
        "remove",
        "Delete an entry by id",
        "remove <income|expense|investment|transaction> <id>",
        cmd_remove,
    ));
    registry.register(CommandEntry::new(
        "list",
        "List entries of one kind",
        "list <income|expense|investment|transaction>",
        cmd_list,
    ));
    registry.register(CommandEntry::new(
        "backup",
        "Snapshot the current state",
        "backup [note...]",
        cmd_backup,
    ));
    registry.register(CommandEntry::new(
        "backups",
        "List available backups, newest first",
        "backups",
        cmd_backups,
    ));
    registry.register(CommandEntry::new(
        "restore",
        "Restore a backup into the active slot",
        "restore <backup>",
        cmd_restore,
    ));
    registry.register(CommandEntry::new(
        "import",
        "Replace the state with a JSON export",
        "import <path>",
        cmd_import,
    ));
    registry.register(CommandEntry::new(
        "export",
        "Write the state to a JSON file",
        "export <path>",
        cmd_export,
    ));
    registry.register(CommandEntry::new(
        "version",
        "Show build information",
        "version",
        cmd_version,
    ));
}

fn cmd_summary(ctx: &mut CliContext, _args: &[&str]) -> CommandResult {
    let summary = ctx.manager.summary();
    output::section("Monthly Summary");
    let rows: Vec<Vec<String>> = SummaryService::cash_flow_rows(&summary)
        .into_iter()
        .map(|row| vec![row.name.to_string(), format_currency(row.amount, ctx.currency())])
        .collect();
    print_table(&[("", Align::Left), ("Monthly", Align::Right)], &rows);
    Ok(())
}

fn cmd_categories(ctx: &mut CliContext, _args: &[&str]) -> CommandResult {
    let breakdown = SummaryService::expenses_by_category(ctx.manager.state());
    if breakdown.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    output::section("Expenses by Category");
    let mut rows: Vec<Vec<String>> = breakdown
        .iter()
        .map(|(category, total)| vec![category.to_string(), format_currency(total, ctx.currency())])
        .collect();
    rows.push(vec![
        "Total".to_string(),
        format_currency(breakdown.total(), ctx.currency()),
    ]);
    print_table(&[("Category", Align::Left), ("Amount", Align::Right)], &rows);
    Ok(())
}

fn cmd_transactions(ctx: &mut CliContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid limit `{raw}`"))
        })?,
        None => DEFAULT_RECENT_LIMIT,
    };
    let recent: Vec<Transaction> = SummaryService::recent_transactions(ctx.manager.state(), limit)
        .into_iter()
        .cloned()
        .collect();
    if recent.is_empty() {
        output::info("No transactions recorded.");
        return Ok(());
    }
    for (month, transactions) in group_by_month(&recent) {
        output::section(month);
        let rows: Vec<Vec<String>> = transactions
            .iter()
            .map(|txn| {
                vec![
                    format_date(txn.date),
                    txn.category.clone(),
                    txn.description.clone(),
                    format_currency(txn.amount, ctx.currency()),
                ]
            })
            .collect();
        print_table(
            &[
                ("Date", Align::Left),
                ("Category", Align::Left),
                ("Description", Align::Left),
                ("Amount", Align::Right),
            ],
            &rows,
        );
    }
    Ok(())
}

fn cmd_project(ctx: &mut CliContext, args: &[&str]) -> CommandResult {
    let mut settings = ctx.config.projection.clone();
    if let Some(raw) = args.first() {
        settings.years_to_project = parse_years(raw);
    }
    if let Some(raw) = args.get(1) {
        settings.investment_return_rate = parse_amount(raw);
    }
    if let Some(raw) = args.get(2) {
        settings.income_growth_rate = parse_amount(raw);
    }
    if let Some(raw) = args.get(3) {
        settings.inflation_rate = parse_amount(raw);
    }
    if let Some(raw) = args.get(4) {
        settings.current_net_worth = parse_amount(raw);
    }
    debug!(?settings, "projection requested");

    let points = ctx.manager.project(&settings)?;
    output::section(format!(
        "Projection over {} years (return {}, growth {}, inflation {})",
        settings.years_to_project,
        format_percentage(settings.investment_return_rate),
        format_percentage(settings.income_growth_rate),
        format_percentage(settings.inflation_rate),
    ));
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|point| {
            vec![
                point.year.to_string(),
                format_currency(point.net_worth, ctx.currency()),
                format_currency(point.investment_portfolio, ctx.currency()),
            ]
        })
        .collect();
    print_table(
        &[
            ("Year", Align::Left),
            ("Net Worth", Align::Right),
            ("Portfolio", Align::Right),
        ],
        &rows,
    );
    if let Some(last) = ForecastService::horizon(&points) {
        output::info(format!(
            "After {} years: net worth {}, portfolio {}",
            last.year,
            format_currency(last.net_worth, ctx.currency()),
            format_currency(last.investment_portfolio, ctx.currency()),
        ));
    }
    Ok(())
}

fn cmd_add(ctx: &mut CliContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "add <income|expense|investment> <label> <amount> [frequency]";
    let kind = parse_kind(require(args, 0, USAGE)?)?;
    let label = require(args, 1, USAGE)?;
    let amount = parse_amount_arg(require(args, 2, USAGE)?)?;
    let frequency = args.get(3).map(|raw| Frequency::parse(raw)).unwrap_or_default();
    if !frequency.is_recognized() {
        output::warning(format!(
            "Unrecognized frequency `{}` will be treated as monthly.",
            frequency
        ));
    }

    let id = match kind {
        EntryKind::Income => ctx.manager.add(IncomeEntry::new(label, amount, frequency))?,
        EntryKind::Expense => ctx.manager.add(ExpenseEntry::new(label, amount, frequency))?,
        EntryKind::Investment => ctx
            .manager
            .add(InvestmentEntry::new(label, amount, frequency))?,
        EntryKind::Transaction => {
            return Err(CommandError::InvalidArguments(
                "use `record` to add transactions".into(),
            ))
        }
    };
    ctx.manager.save()?;
    output::success(format!("Added {} `{}` ({}).", kind.as_str(), label, id));
    Ok(())
}

fn cmd_record(ctx: &mut CliContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "record <YYYY-MM-DD> <category> <amount> <description...>";
    let date = parse_date_arg(require(args, 0, USAGE)?)?;
    let category = require(args, 1, USAGE)?;
    let amount = parse_amount_arg(require(args, 2, USAGE)?)?;
    let description = args.get(3..).map(|rest| rest.join(" ")).unwrap_or_default();

    let id = ctx
        .manager
        .add(Transaction::new(date, category, description, amount))?;
    ctx.manager.save()?;
    output::success(format!("Recorded transaction ({id})."));
    Ok(())
}

fn cmd_remove(ctx: &mut CliContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "remove <income|expense|investment|transaction> <id>";
    let kind = parse_kind(require(args, 0, USAGE)?)?;
    let id = require(args, 1, USAGE)?;
    ctx.manager.remove(kind, id)?;
    ctx.manager.save()?;
    output::success(format!("Removed {} `{}`.", kind.as_str(), id));
    Ok(())
}

fn cmd_list(ctx: &mut CliContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(require(args, 0, "list <income|expense|investment|transaction>")?)?;
    let state = ctx.manager.state();
    let count = state.len(kind);
    if count == 0 {
        output::info(format!("No {} entries.", kind.as_str()));
        return Ok(());
    }
    let currency = ctx.config.currency.as_str();
    let rows: Vec<Vec<String>> = match kind {
        EntryKind::Income => recurring_rows(EntryService::list::<IncomeEntry>(state), currency),
        EntryKind::Expense => recurring_rows(EntryService::list::<ExpenseEntry>(state), currency),
        EntryKind::Investment => {
            recurring_rows(EntryService::list::<InvestmentEntry>(state), currency)
        }
        EntryKind::Transaction => EntryService::list::<Transaction>(state)
            .iter()
            .map(|txn| {
                vec![
                    txn.id.clone(),
                    txn.display_label(),
                    format_currency(txn.amount, currency),
                    String::new(),
                ]
            })
            .collect(),
    };
    output::section(format!("{} entries ({count})", kind.as_str()));
    print_table(
        &[
            ("Id", Align::Left),
            ("Entry", Align::Left),
            ("Amount", Align::Right),
            ("Monthly", Align::Right),
        ],
        &rows,
    );
    Ok(())
}

fn recurring_rows<R>(entries: &[R], currency: &str) -> Vec<Vec<String>>
where
    R: Identifiable + Recurring + Displayable,
{
    entries
        .iter()
        .map(|entry| {
            vec![
                entry.id().to_string(),
                entry.display_label(),
                format_currency(entry.amount(), currency),
                format_currency(to_monthly(entry.amount(), entry.frequency()), currency),
            ]
        })
        .collect()
}

fn cmd_backup(ctx: &mut CliContext, args: &[&str]) -> CommandResult {
    let note = (!args.is_empty()).then(|| args.join(" "));
    let name = ctx.manager.backup(note.as_deref())?;
    output::success(format!("Backup created: {name}"));
    Ok(())
}

fn cmd_backups(ctx: &mut CliContext, _args: &[&str]) -> CommandResult {
    let backups = ctx.manager.list_backups()?;
    if backups.is_empty() {
        output::info("No backups yet.");
        return Ok(());
    }
    for name in backups {
        println!("{name}");
    }
    Ok(())
}

fn cmd_restore(ctx: &mut CliContext, args: &[&str]) -> CommandResult {
    let name = require(args, 0, "restore <backup>")?;
    ctx.manager.restore(name)?;
    output::success(format!("Restored `{name}`."));
    Ok(())
}

fn cmd_import(ctx: &mut CliContext, args: &[&str]) -> CommandResult {
    let path = require(args, 0, "import <path>")?;
    ctx.manager.import(std::path::Path::new(path))?;
    ctx.manager.save()?;
    output::success(format!("Imported `{path}`."));
    Ok(())
}

fn cmd_export(ctx: &mut CliContext, args: &[&str]) -> CommandResult {
    let path = require(args, 0, "export <path>")?;
    ctx.manager.export(std::path::Path::new(path))?;
    output::success(format!("Exported to `{path}`."));
    Ok(())
}

fn cmd_version(_ctx: &mut CliContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    println!("{}", meta.summary());
    println!("rustc: {}", meta.rustc);
    Ok(())
}

fn parse_kind(raw: &str) -> Result<EntryKind, CommandError> {
    EntryKind::parse(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown kind `{raw}` (expected income, expense, investment or transaction)"
        ))
    })
}
