// 🗄️ Ledger Store - SQLite persistence for expenses (`contas`) and salaries (`salarios`)
//
// The store is an explicit object: open -> use -> close. Writes go through
// `&mut self`, each inside its own SQLite transaction, so two adds can never
// interleave. Reads return whole tables ordered newest first.

use crate::aggregation::total_sum;
use crate::entities::{
    validate_amount, validate_date, validate_description, Category, ExpenseEntry, IncomeEntry, Owner,
    DATE_FORMAT,
};
use crate::error::{LedgerError, LedgerResult};
use chrono::NaiveDate;
use log::{debug, info, warn};
use rusqlite::{params, Connection};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

const EXPENSES_TABLE: &str = "contas";
const INCOMES_TABLE: &str = "salarios";

pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    /// Open (or create) a file-backed store
    pub fn open<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        setup_database(&conn)?;
        info!("Opened ledger store at {}", path.display());
        Ok(LedgerStore { conn })
    }

    /// Volatile store, used by tests and dry runs
    pub fn open_in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        debug!("Opened in-memory ledger store");
        Ok(LedgerStore { conn })
    }

    /// Explicit close; surfaces errors that a plain drop would swallow
    pub fn close(self) -> LedgerResult<()> {
        self.conn.close().map_err(|(_, e)| LedgerError::from(e))?;
        info!("Closed ledger store");
        Ok(())
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    pub fn add_expense(
        &mut self,
        description: &str,
        category: Category,
        owner: Owner,
        amount: Decimal,
        date: NaiveDate,
    ) -> LedgerResult<i64> {
        let valor = match validate_description(description)
            .and_then(|_| validate_date(date))
            .and_then(|_| amount_to_real(amount))
        {
            Ok(valor) => valor,
            Err(e) => {
                warn!("Rejected expense '{}' ({}): {}", description, amount, e);
                return Err(e);
            }
        };

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO contas (descricao, categoria, responsavel, valor, data)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                description,
                category.label(),
                owner.label(),
                valor,
                date.format(DATE_FORMAT).to_string(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!("Inserted expense #{} {} {} on {}", id, category, amount, date);
        Ok(id)
    }

    pub fn add_income(&mut self, amount: Decimal, owner: Owner, date: NaiveDate) -> LedgerResult<i64> {
        let valor = match validate_date(date).and_then(|_| amount_to_real(amount)) {
            Ok(valor) => valor,
            Err(e) => {
                warn!("Rejected income for {} ({}): {}", owner, amount, e);
                return Err(e);
            }
        };

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO salarios (valor, usuario, data) VALUES (?1, ?2, ?3)",
            params![valor, owner.label(), date.format(DATE_FORMAT).to_string()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!("Inserted income #{} for {} {} on {}", id, owner, amount, date);
        Ok(id)
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// All expenses, date descending, newest insert first on equal dates
    pub fn list_expenses(&self) -> LedgerResult<Vec<ExpenseEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, descricao, categoria, responsavel, valor, data
             FROM contas
             ORDER BY data DESC, id DESC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ExpenseRow {
                    id: row.get(0)?,
                    descricao: row.get(1)?,
                    categoria: row.get(2)?,
                    responsavel: row.get(3)?,
                    valor: row.get(4)?,
                    data: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(ExpenseEntry::try_from).collect()
    }

    /// All incomes, same ordering contract as `list_expenses`
    pub fn list_incomes(&self) -> LedgerResult<Vec<IncomeEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, valor, usuario, data
             FROM salarios
             ORDER BY data DESC, id DESC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(IncomeRow {
                    id: row.get(0)?,
                    valor: row.get(1)?,
                    usuario: row.get(2)?,
                    data: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(IncomeEntry::try_from).collect()
    }

    /// Sum of every expense ever recorded; 0 when empty
    pub fn total_spent(&self) -> LedgerResult<Decimal> {
        Ok(total_sum(&self.list_expenses()?))
    }

    /// Sum of every salary ever recorded; 0 when empty
    pub fn total_income(&self) -> LedgerResult<Decimal> {
        Ok(total_sum(&self.list_incomes()?))
    }

    pub fn expense_count(&self) -> LedgerResult<i64> {
        count_rows(&self.conn, EXPENSES_TABLE)
    }

    pub fn income_count(&self) -> LedgerResult<i64> {
        count_rows(&self.conn, INCOMES_TABLE)
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

fn setup_database(conn: &Connection) -> LedgerResult<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS contas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            descricao TEXT NOT NULL,
            categoria TEXT,
            responsavel TEXT,
            valor REAL NOT NULL,
            data TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS salarios (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            valor REAL NOT NULL,
            usuario TEXT NOT NULL,
            data TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

fn count_rows(conn: &Connection, table: &'static str) -> LedgerResult<i64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
    Ok(count)
}

// ============================================================================
// ROW DECODING
// ============================================================================

struct ExpenseRow {
    id: i64,
    descricao: String,
    categoria: Option<String>,
    responsavel: Option<String>,
    valor: f64,
    data: String,
}

struct IncomeRow {
    id: i64,
    valor: f64,
    usuario: String,
    data: String,
}

impl TryFrom<ExpenseRow> for ExpenseEntry {
    type Error = LedgerError;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| LedgerError::CorruptRow {
            table: EXPENSES_TABLE,
            id: row.id,
            reason,
        };

        let owner = row
            .responsavel
            .as_deref()
            .ok_or_else(|| corrupt("missing responsavel".to_string()))?
            .parse::<Owner>()
            .map_err(|e| corrupt(e.to_string()))?;

        Ok(ExpenseEntry {
            id: row.id,
            category: row
                .categoria
                .as_deref()
                .map_or(Category::Other, Category::from_label_or_other),
            owner,
            amount: amount_from_real(row.valor).map_err(corrupt)?,
            date: NaiveDate::parse_from_str(&row.data, DATE_FORMAT)
                .map_err(|e| corrupt(format!("bad date '{}': {}", row.data, e)))?,
            description: row.descricao,
        })
    }
}

impl TryFrom<IncomeRow> for IncomeEntry {
    type Error = LedgerError;

    fn try_from(row: IncomeRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| LedgerError::CorruptRow {
            table: INCOMES_TABLE,
            id: row.id,
            reason,
        };

        Ok(IncomeEntry {
            id: row.id,
            amount: amount_from_real(row.valor).map_err(corrupt)?,
            owner: row.usuario.parse().map_err(|e: LedgerError| corrupt(e.to_string()))?,
            date: NaiveDate::parse_from_str(&row.data, DATE_FORMAT)
                .map_err(|e| corrupt(format!("bad date '{}': {}", row.data, e)))?,
        })
    }
}

// ============================================================================
// AMOUNT CONVERSION (REAL column <-> Decimal)
// ============================================================================

/// Validates the amount and converts it for the `valor` column.
/// Only amounts that read back unchanged are accepted.
fn amount_to_real(amount: Decimal) -> LedgerResult<f64> {
    validate_amount(amount)?;

    let valor = amount
        .to_f64()
        .ok_or_else(|| LedgerError::validation(format!("amount {} is not representable", amount)))?;

    match amount_from_real(valor) {
        Ok(stored) if stored == amount => Ok(valor),
        _ => Err(LedgerError::validation(format!(
            "amount {} has more precision than the ledger can store",
            amount
        ))),
    }
}

/// Uses the shortest round-trip text of the float so 0.1 reads back as exactly 0.1
fn amount_from_real(valor: f64) -> Result<Decimal, String> {
    if !valor.is_finite() {
        return Err(format!("non-finite valor {}", valor));
    }
    Decimal::from_str(&valor.to_string()).map_err(|e| format!("bad valor {}: {}", valor, e))
}
