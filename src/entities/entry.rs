// 🧾 Ledger Entries - Expense ("conta") and income ("salário") records
//
// Entries are immutable once persisted. The id is assigned by the store.

use super::{Category, Owner};
use crate::error::{LedgerError, LedgerResult};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO-8601 calendar date format used for the `data` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Amounts must stay below this (1e15); keeps every sum far from `Decimal` overflow
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

// ============================================================================
// ENTRY TRAIT
// ============================================================================

/// Common view over both transaction streams, used by filters and aggregation
pub trait Entry {
    fn id(&self) -> i64;
    fn owner(&self) -> Owner;
    fn amount(&self) -> Decimal;
    fn date(&self) -> NaiveDate;
}

// ============================================================================
// EXPENSE ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: i64,
    pub description: String,
    pub category: Category,
    pub owner: Owner,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Entry for ExpenseEntry {
    fn id(&self) -> i64 {
        self.id
    }

    fn owner(&self) -> Owner {
        self.owner
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

// ============================================================================
// INCOME ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: i64,
    pub amount: Decimal,
    pub owner: Owner,
    pub date: NaiveDate,
}

impl Entry for IncomeEntry {
    fn id(&self) -> i64 {
        self.id
    }

    fn owner(&self) -> Owner {
        self.owner
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

pub fn validate_amount(amount: Decimal) -> LedgerResult<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "amount must be greater than zero, got {}",
            amount
        )));
    }
    if amount >= MAX_AMOUNT {
        return Err(LedgerError::validation(format!(
            "amount {} exceeds the maximum of {}",
            amount, MAX_AMOUNT
        )));
    }
    Ok(())
}

/// Four-digit years only, so month labels keep sorting chronologically
pub fn validate_date(date: NaiveDate) -> LedgerResult<()> {
    if !(0..=9999).contains(&date.year()) {
        return Err(LedgerError::validation(format!(
            "date {} is outside years 0000-9999",
            date
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> LedgerResult<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::validation("description must not be empty"));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date, rejecting impossible calendar dates
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| LedgerError::validation(format!("invalid date '{}': {}", s, e)))?;
    validate_date(date)?;
    Ok(date)
}
