use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rust_decimal::Decimal;
use std::fs::File;
use std::path::PathBuf;

use household_ledger::{
    available_months, available_years, filter_by_owner, filter_months, parse_date,
    summarize_period, total_sum, write_expenses_csv, write_incomes_csv, Category, LedgerConfig,
    LedgerStore, MonthKey, MonthlySummaryRow, Owner, OwnerFilter, PeriodSummary,
};

#[derive(Parser)]
#[command(name = "household-ledger", version, about = "Household expenses and salaries ledger")]
struct Cli {
    #[command(flatten)]
    config: LedgerConfig,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a new expense
    AddExpense {
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        owner: Owner,
        #[arg(long)]
        amount: Decimal,
        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Record a new salary
    AddIncome {
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        owner: Owner,
        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List expenses, newest first
    ListExpenses {
        /// Owner name or "Todos"
        #[arg(long, default_value = "Todos")]
        owner: OwnerFilter,
    },

    /// List salaries, newest first
    ListIncomes {
        #[arg(long, default_value = "Todos")]
        owner: OwnerFilter,
    },

    /// Financial summary for one month
    Summary {
        /// Defaults to the most recent year with expenses
        #[arg(long)]
        year: Option<i32>,
        /// Defaults to the first month with expenses in that year
        #[arg(long)]
        month: Option<u32>,
        #[arg(long, default_value = "Todos")]
        owner: OwnerFilter,
        /// Restrict the comparison table to these months (YYYY-MM)
        #[arg(long, num_args = 1..)]
        months: Vec<MonthKey>,
    },

    /// Write a listing as CSV
    Export {
        #[arg(value_enum)]
        what: ExportKind,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportKind {
    Expenses,
    Incomes,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut store = LedgerStore::open(&cli.config.db_path)
        .with_context(|| format!("Failed to open ledger at {}", cli.config.db_path.display()))?;

    run(&mut store, cli.command, cli.json)?;

    store.close().context("Failed to close ledger")?;
    Ok(())
}

fn run(store: &mut LedgerStore, command: Command, json: bool) -> Result<()> {
    match command {
        Command::AddExpense {
            description,
            category,
            owner,
            amount,
            date,
        } => {
            let date = date.unwrap_or_else(today);
            let id = store.add_expense(&description, category, owner, amount, date)?;
            println!("✅ Conta #{} cadastrada: {} R$ {:.2} ({})", id, description, amount, date);
        }

        Command::AddIncome { amount, owner, date } => {
            let date = date.unwrap_or_else(today);
            let id = store.add_income(amount, owner, date)?;
            println!("✅ Salário #{} cadastrado: {} R$ {:.2} ({})", id, owner, amount, date);
        }

        Command::ListExpenses { owner } => {
            let expenses = filter_by_owner(&store.list_expenses()?, &owner);
            if json {
                println!("{}", serde_json::to_string_pretty(&expenses)?);
                return Ok(());
            }

            println!("{:>5}  {:<10}  {:<24}  {:<10}  {:>12}  Descrição", "ID", "Data", "Categoria", "Resp.", "Valor");
            for e in &expenses {
                println!(
                    "{:>5}  {:<10}  {:<24}  {:<10}  {:>12}  {}",
                    e.id,
                    e.date,
                    e.category.label(),
                    e.owner.label(),
                    format!("R$ {:.2}", e.amount),
                    e.description
                );
            }
            println!("\n{} contas, total R$ {:.2}", expenses.len(), total_sum(&expenses));
        }

        Command::ListIncomes { owner } => {
            let incomes = filter_by_owner(&store.list_incomes()?, &owner);
            if json {
                println!("{}", serde_json::to_string_pretty(&incomes)?);
                return Ok(());
            }

            println!("{:>5}  {:<10}  {:<10}  {:>12}", "ID", "Data", "Usuário", "Valor");
            for i in &incomes {
                println!(
                    "{:>5}  {:<10}  {:<10}  {:>12}",
                    i.id,
                    i.date,
                    i.owner.label(),
                    format!("R$ {:.2}", i.amount)
                );
            }
            println!("\n{} salários, total R$ {:.2}", incomes.len(), total_sum(&incomes));
        }

        Command::Summary {
            year,
            month,
            owner,
            months,
        } => {
            let expenses = store.list_expenses()?;
            if expenses.is_empty() {
                println!("Nenhuma conta cadastrada ainda.");
                return Ok(());
            }
            let incomes = store.list_incomes()?;

            let year = match year {
                Some(y) => y,
                None => available_years(&expenses)[0],
            };
            let month = match month.or_else(|| available_months(&expenses, year).first().copied()) {
                Some(m) => m,
                None => anyhow::bail!("no expenses recorded in {}; pass --month", year),
            };
            let period = MonthKey::new(year, month)?;

            let mut summary = summarize_period(&expenses, &incomes, period, owner);
            if !months.is_empty() {
                summary.comparison = filter_months(&summary.comparison, &months);
            }
            info!("Summary for {} ({})", period, owner);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }

        Command::Export { what, out } => {
            let file = File::create(&out).with_context(|| format!("Failed to create {}", out.display()))?;
            let written = match what {
                ExportKind::Expenses => write_expenses_csv(file, &store.list_expenses()?)?,
                ExportKind::Incomes => write_incomes_csv(file, &store.list_incomes()?)?,
            };
            println!("✓ Exported {} rows to {}", written, out.display());
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_summary(summary: &PeriodSummary) {
    println!("📊 Resumo Financeiro {} ({})", summary.period, summary.owner);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("💸 Total Gasto:   R$ {:.2}", summary.total_spent);
    println!("💰 Total Salário: R$ {:.2}", summary.total_income);
    println!(
        "📈 Saldo Atual:   R$ {:.2} {}",
        summary.balance,
        if summary.is_negative() { "↓" } else { "↑" }
    );

    if summary.is_negative() {
        println!("🚨 Alerta: Seu saldo atual está negativo!");
    }

    println!("\nGastos por Responsável");
    for (owner, total) in &summary.by_owner {
        println!("  {:<26} R$ {:.2}", owner.label(), total);
    }

    println!("\nGastos por Categoria");
    for (category, total) in &summary.by_category {
        println!("  {:<26} R$ {:.2}", category.label(), total);
    }

    println!("\nTabela de Economia Mensal");
    println!("  {:<8} {:>14} {:>14} {:>12}", "Mês", "Salário", "Gastos", "% Economia");
    for row in &summary.comparison {
        print_comparison_row(row);
    }
}

fn print_comparison_row(row: &MonthlySummaryRow) {
    println!(
        "  {:<8} {:>14} {:>14} {:>12}",
        row.month.label(),
        format!("R$ {:.2}", row.income_total),
        format!("R$ {:.2}", row.expense_total),
        format!("{:.2}% {}", row.savings_pct, if row.is_deficit() { "↓" } else { "↑" })
    );
}
