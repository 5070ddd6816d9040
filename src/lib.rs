// Household Ledger - Core Library
// Expense and salary ledger with period summaries, shared by the CLI and API server

pub mod error;
pub mod entities;
pub mod month;
pub mod db;             // Ledger Store (SQLite)
pub mod filter;         // Query/Filter Layer
pub mod aggregation;    // Aggregation Engine
pub mod reconciliation; // Income vs. expense per month
pub mod summary;        // Period summary ("Resumo")
pub mod export;
pub mod config;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::{LedgerError, LedgerResult};
pub use entities::{
    parse_date, Category, Entry, ExpenseEntry, IncomeEntry, Owner, OwnerFilter,
};
pub use month::MonthKey;
pub use db::LedgerStore;
pub use filter::{
    available_months, available_years, filter_by_owner, filter_by_period, filter_by_range,
    filter_months, owners_present,
};
pub use aggregation::{group_sum, sum_by_category, sum_by_month, sum_by_owner, total_sum};
pub use reconciliation::{reconcile_monthly, savings_pct, MonthlySummaryRow};
pub use summary::{summarize_period, PeriodSummary};
pub use export::{write_expenses_csv, write_incomes_csv};
pub use config::{LedgerConfig, ServerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
