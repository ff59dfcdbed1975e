use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::core::services::SummaryService;
use crate::currency;
use crate::ledger::Month;

use super::help;
use super::output::{info, section, success, warning};
use super::registry::{CommandEntry, CommandRegistry};
use super::shell_context::ShellContext;
use super::{CommandError, CommandResult};

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in definitions() {
        registry.register(entry);
    }
}

fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("status", "Show the current selection", "status", cmd_status),
        CommandEntry::new("months", "List the twelve months", "months", cmd_months),
        CommandEntry::new("month", "Select a month", "month <name>", cmd_month),
        CommandEntry::new("year", "Select a year", "year <yyyy>", cmd_year),
        CommandEntry::new("income", "List income rows", "income", cmd_income),
        CommandEntry::new("expenses", "List expense rows", "expenses", cmd_expenses),
        CommandEntry::new(
            "add-income",
            "Append an income row",
            "add-income [description]",
            cmd_add_income,
        ),
        CommandEntry::new(
            "add-expense",
            "Append an expense row",
            "add-expense [description]",
            cmd_add_expense,
        ),
        CommandEntry::new(
            "set-income",
            "Edit an income row",
            "set-income <row> desc|amount <value>",
            cmd_set_income,
        ),
        CommandEntry::new(
            "set-expense",
            "Edit an expense row",
            "set-expense <row> desc|amount|pct <value>",
            cmd_set_expense,
        ),
        CommandEntry::new(
            "del-income",
            "Delete an income row",
            "del-income <row>",
            cmd_del_income,
        ),
        CommandEntry::new(
            "del-expense",
            "Delete an expense row",
            "del-expense <row>",
            cmd_del_expense,
        ),
        CommandEntry::new("summary", "Month totals", "summary", cmd_summary),
        CommandEntry::new(
            "year-summary",
            "Totals over the selected year",
            "year-summary",
            cmd_year_summary,
        ),
        CommandEntry::new(
            "compare",
            "Compare the selected year with the previous one",
            "compare",
            cmd_compare,
        ),
        CommandEntry::new(
            "carry-forward",
            "Seed next month from this month's descriptions",
            "carry-forward",
            cmd_carry_forward,
        ),
        CommandEntry::new(
            "export",
            "Write a backup document",
            "export [path]",
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Restore the store from a backup document",
            "import <path>",
            cmd_import,
        ),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => help::print_overview(&context.registry),
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => warning(format!("No such command `{name}`.")),
        },
    }
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let manager = &context.manager;
    let totals = SummaryService::month_totals(manager.current_ledger());
    section("Status");
    info(format!("  Year:    {}", manager.selected_year()));
    info(format!("  Month:   {}", manager.current_month()));
    info(format!(
        "  Balance: {}",
        currency::format_display(&context.style, totals.balance)
    ));
    Ok(())
}

fn cmd_months(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let manager = &context.manager;
    section(format!("Months of {}", manager.selected_year()));
    for month in Month::ALL {
        let marker = if month == manager.current_month() {
            "*"
        } else {
            " "
        };
        let rows = manager
            .book()
            .month(manager.selected_year(), month)
            .map(|ledger| ledger.income.len() + ledger.expenses.len())
            .unwrap_or(0);
        info(format!("  {marker} {:<12} {rows} rows", month.label()));
    }
    Ok(())
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.first().ok_or(CommandError::Usage("month <name>"))?;
    let month: Month = name
        .parse()
        .map_err(|err: String| CommandError::Failed(err))?;
    context.manager.select_month(month);
    success(format!("Selected {month}."));
    Ok(())
}

fn cmd_year(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args.first().ok_or(CommandError::Usage("year <yyyy>"))?;
    let year: i32 = raw
        .parse()
        .map_err(|_| CommandError::Failed(format!("`{raw}` is not a year")))?;
    context.manager.select_year(year)?;
    success(format!("Selected year {year}."));
    Ok(())
}

fn cmd_income(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.manager.current_ledger();
    section(format!(
        "Income — {} {}",
        context.manager.current_month(),
        context.manager.selected_year()
    ));
    if ledger.income.is_empty() {
        info("  (no rows)");
        return Ok(());
    }
    for (position, item) in ledger.income.iter().enumerate() {
        info(format!(
            "  {:>3}  {:<24} {:>14}",
            position + 1,
            item.description,
            currency::format_display(&context.style, item.amount)
        ));
    }
    Ok(())
}

fn cmd_expenses(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.manager.current_ledger();
    section(format!(
        "Expenses — {} {}",
        context.manager.current_month(),
        context.manager.selected_year()
    ));
    if ledger.expenses.is_empty() {
        info("  (no rows)");
        return Ok(());
    }
    for (position, item) in ledger.expenses.iter().enumerate() {
        info(format!(
            "  {:>3}  {:<24} {:>14} {:>6.1}% = {}",
            position + 1,
            item.description,
            currency::format_display(&context.style, item.amount),
            item.percentage,
            currency::format_display(&context.style, item.second_floor())
        ));
    }
    Ok(())
}

fn cmd_add_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = context.manager.add_income()?;
    if !args.is_empty() {
        context.manager.rename_income(id, &args.join(" "))?;
    }
    let rows = context.manager.current_ledger().income.len();
    success(format!("Added income row {rows}."));
    Ok(())
}

fn cmd_add_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = context.manager.add_expense()?;
    if !args.is_empty() {
        context.manager.rename_expense(id, &args.join(" "))?;
    }
    let rows = context.manager.current_ledger().expenses.len();
    success(format!("Added expense row {rows}."));
    Ok(())
}

fn income_id(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let position: usize = raw
        .parse()
        .map_err(|_| CommandError::Failed(format!("`{raw}` is not a row number")))?;
    context
        .manager
        .current_ledger()
        .income_id_at(position)
        .ok_or_else(|| CommandError::Failed(format!("no income row {position}")))
}

fn expense_id(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let position: usize = raw
        .parse()
        .map_err(|_| CommandError::Failed(format!("`{raw}` is not a row number")))?;
    context
        .manager
        .current_ledger()
        .expense_id_at(position)
        .ok_or_else(|| CommandError::Failed(format!("no expense row {position}")))
}

fn cmd_set_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "set-income <row> desc|amount <value>";
    if args.len() < 3 {
        return Err(CommandError::Usage(USAGE));
    }
    let id = income_id(context, args[0])?;
    let value = args[2..].join(" ");
    match args[1] {
        "desc" => context.manager.rename_income(id, &value)?,
        "amount" => context
            .manager
            .set_income_amount(id, currency::parse(&value))?,
        _ => return Err(CommandError::Usage(USAGE)),
    }
    success(format!("Updated income row {}.", args[0]));
    Ok(())
}

fn cmd_set_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "set-expense <row> desc|amount|pct <value>";
    if args.len() < 3 {
        return Err(CommandError::Usage(USAGE));
    }
    let id = expense_id(context, args[0])?;
    let value = args[2..].join(" ");
    match args[1] {
        "desc" => context.manager.rename_expense(id, &value)?,
        "amount" => context
            .manager
            .set_expense_amount(id, currency::parse(&value))?,
        "pct" => {
            let percentage: f64 = value
                .parse()
                .map_err(|_| CommandError::Failed(format!("`{value}` is not a percentage")))?;
            context.manager.set_expense_percentage(id, percentage)?;
        }
        _ => return Err(CommandError::Usage(USAGE)),
    }
    success(format!("Updated expense row {}.", args[0]));
    Ok(())
}

fn cmd_del_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args.first().ok_or(CommandError::Usage("del-income <row>"))?;
    let id = income_id(context, raw)?;
    let removed = context.manager.delete_income(id)?;
    success(format!("Deleted income `{}`.", removed.description));
    Ok(())
}

fn cmd_del_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or(CommandError::Usage("del-expense <row>"))?;
    let id = expense_id(context, raw)?;
    let removed = context.manager.delete_expense(id)?;
    success(format!("Deleted expense `{}`.", removed.description));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = SummaryService::month_totals(context.manager.current_ledger());
    let style = &context.style;
    section(format!(
        "Summary — {} {}",
        context.manager.current_month(),
        context.manager.selected_year()
    ));
    info(format!(
        "  Income:       {}",
        currency::format_display(style, totals.total_income)
    ));
    info(format!(
        "  Expenses:     {}",
        currency::format_display(style, totals.total_expenses)
    ));
    info(format!(
        "  Second floor: {}",
        currency::format_display(style, totals.total_second_floor)
    ));
    info(format!(
        "  Balance:      {}",
        currency::format_display(style, totals.balance)
    ));
    Ok(())
}

fn cmd_year_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let year = context.manager.selected_year();
    let totals = SummaryService::year_totals(context.manager.book(), year);
    let style = &context.style;
    section(format!("Year {year}"));
    info(format!("  Months with data: {}", totals.months_with_data));
    info(format!(
        "  Total profit:     {}",
        currency::format_display(style, totals.total_profit)
    ));
    info(format!(
        "  Average profit:   {}",
        currency::format_display(style, totals.avg_profit)
    ));
    info(format!(
        "  Average income:   {}",
        currency::format_display(style, totals.avg_income)
    ));
    Ok(())
}

fn cmd_compare(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let year = context.manager.selected_year();
    let comparison = SummaryService::year_comparison(context.manager.book(), year);
    let style = &context.style;
    section(format!("{} vs {}", year, year - 1));
    info(format!(
        "  Profit: {} vs {} ({:+.1}%)",
        currency::format_display(style, comparison.current.total_profit),
        currency::format_display(style, comparison.previous.total_profit),
        comparison.profit_variation
    ));
    info(format!(
        "  Income: {} vs {} ({:+.1}%)",
        currency::format_display(style, comparison.current.avg_income),
        currency::format_display(style, comparison.previous.avg_income),
        comparison.income_variation
    ));
    Ok(())
}

fn cmd_carry_forward(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let next = context.manager.carry_forward()?;
    let rows = context.manager.current_ledger().income.len()
        + context.manager.current_ledger().expenses.len();
    success(format!("Carried {rows} descriptions into {next}."));
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args.first().map(Path::new);
    let written: PathBuf = context.manager.export_backup(path)?;
    success(format!("Backup written to {}.", written.display()));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args.first().ok_or(CommandError::Usage("import <path>"))?;
    context.manager.import_backup(Path::new(raw))?;
    success(format!(
        "Store restored; now on {} {}.",
        context.manager.current_month(),
        context.manager.selected_year()
    ));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
