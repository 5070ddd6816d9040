// ⚙️ Configuration - shared by the CLI and the API server
//
// Every option can come from a flag or the environment.

use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "contas_casa.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, Args)]
pub struct LedgerConfig {
    /// SQLite database file
    #[arg(long = "db", env = "LEDGER_DB", default_value = DEFAULT_DB_PATH, global = true)]
    pub db_path: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    #[command(flatten)]
    pub ledger: LedgerConfig,

    /// Address the HTTP API listens on
    #[arg(long = "bind", env = "LEDGER_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: String,
}
