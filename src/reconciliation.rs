// ⚖️ Reconciliation - Income vs. expense per month
//
// Outer join of two monthly series on the month key:
//   missing side                 -> 0
//   balance                      = income - expense
//   savings_pct                  = balance / income * 100, or 0 when income is 0
//
// Nothing in here can fail.

use crate::month::MonthKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// MONTHLY SUMMARY ROW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummaryRow {
    pub month: MonthKey,
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub balance: Decimal,
    pub savings_pct: Decimal,
}

impl MonthlySummaryRow {
    pub fn new(month: MonthKey, income_total: Decimal, expense_total: Decimal) -> Self {
        let balance = income_total - expense_total;
        MonthlySummaryRow {
            month,
            income_total,
            expense_total,
            balance,
            savings_pct: savings_pct(balance, income_total),
        }
    }

    /// Spent more than earned this month
    pub fn is_deficit(&self) -> bool {
        self.balance < Decimal::ZERO
    }
}

/// `balance / income * 100`, 0 when income is 0 (or the quotient overflows)
pub fn savings_pct(balance: Decimal, income_total: Decimal) -> Decimal {
    if income_total.is_zero() {
        return Decimal::ZERO;
    }
    balance
        .checked_div(income_total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

// ============================================================================
// RECONCILE
// ============================================================================

/// Join both series on every month present in either, ascending by month
pub fn reconcile_monthly(
    expense_by_month: &BTreeMap<MonthKey, Decimal>,
    income_by_month: &BTreeMap<MonthKey, Decimal>,
) -> Vec<MonthlySummaryRow> {
    let months: BTreeSet<&MonthKey> = expense_by_month.keys().chain(income_by_month.keys()).collect();

    months
        .into_iter()
        .map(|month| {
            let income = income_by_month.get(month).copied().unwrap_or(Decimal::ZERO);
            let expense = expense_by_month.get(month).copied().unwrap_or(Decimal::ZERO);
            MonthlySummaryRow::new(*month, income, expense)
        })
        .collect()
}
