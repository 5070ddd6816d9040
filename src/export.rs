// 📤 CSV Export - Listings with the household's column headers

use crate::entities::{ExpenseEntry, IncomeEntry, DATE_FORMAT};
use crate::error::LedgerResult;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ExpenseRecord<'a> {
    #[serde(rename = "ID")]
    id: i64,

    #[serde(rename = "Descrição")]
    description: &'a str,

    #[serde(rename = "Categoria")]
    category: &'static str,

    #[serde(rename = "Responsável")]
    owner: &'static str,

    #[serde(rename = "Valor")]
    amount: String,

    #[serde(rename = "Data")]
    date: String,
}

#[derive(Serialize)]
struct IncomeRecord {
    #[serde(rename = "ID")]
    id: i64,

    #[serde(rename = "Valor")]
    amount: String,

    #[serde(rename = "Usuário")]
    owner: &'static str,

    #[serde(rename = "Data")]
    date: String,
}

pub fn write_expenses_csv<W: Write>(writer: W, entries: &[ExpenseEntry]) -> LedgerResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);

    for e in entries {
        wtr.serialize(ExpenseRecord {
            id: e.id,
            description: &e.description,
            category: e.category.label(),
            owner: e.owner.label(),
            amount: e.amount.to_string(),
            date: e.date.format(DATE_FORMAT).to_string(),
        })?;
    }

    wtr.flush()?;
    Ok(entries.len())
}

pub fn write_incomes_csv<W: Write>(writer: W, entries: &[IncomeEntry]) -> LedgerResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);

    for e in entries {
        wtr.serialize(IncomeRecord {
            id: e.id,
            amount: e.amount.to_string(),
            owner: e.owner.label(),
            date: e.date.format(DATE_FORMAT).to_string(),
        })?;
    }

    wtr.flush()?;
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Category, Owner};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_expenses_csv_layout() {
        let entries = vec![ExpenseEntry {
            id: 3,
            description: "Conta de luz, março".to_string(),
            category: Category::Housing,
            owner: Owner::Together,
            amount: Decimal::new(18990, 2),
            date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        }];

        let mut buf = Vec::new();
        let written = write_expenses_csv(&mut buf, &entries).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            text,
            "ID,Descrição,Categoria,Responsável,Valor,Data\n3,\"Conta de luz, março\",Moradia,Juntos,189.90,2024-03-12\n"
        );
    }

    #[test]
    fn test_incomes_csv_layout() {
        let entries = vec![IncomeEntry {
            id: 1,
            amount: Decimal::new(450000, 2),
            owner: Owner::Geovani,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        }];

        let mut buf = Vec::new();
        write_incomes_csv(&mut buf, &entries).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ID,Valor,Usuário,Data\n1,4500.00,Geovani,2024-03-05\n"
        );
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let mut buf = Vec::new();
        assert_eq!(write_incomes_csv(&mut buf, &[]).unwrap(), 0);
        assert!(buf.is_empty());
    }
}
