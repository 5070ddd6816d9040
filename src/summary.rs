// 📊 Period Summary - Everything the monthly "Resumo" view shows
//
// Expenses are narrowed by period and owner. Salaries are narrowed by
// period only: an expense owner filter never hides household income.

use crate::aggregation::{sum_by_category, sum_by_month, sum_by_owner, total_sum};
use crate::entities::{Category, ExpenseEntry, IncomeEntry, Owner, OwnerFilter};
use crate::filter::{filter_by_owner, filter_by_period};
use crate::month::MonthKey;
use crate::reconciliation::{reconcile_monthly, MonthlySummaryRow};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub period: MonthKey,
    pub owner: OwnerFilter,
    pub expense_count: usize,
    pub total_spent: Decimal,
    pub total_income: Decimal,
    pub balance: Decimal,
    pub by_owner: BTreeMap<Owner, Decimal>,
    pub by_category: BTreeMap<Category, Decimal>,
    pub by_month: BTreeMap<MonthKey, Decimal>,
    pub comparison: Vec<MonthlySummaryRow>,
}

impl PeriodSummary {
    /// Balance alert: spending exceeded income for the period
    pub fn is_negative(&self) -> bool {
        self.balance < Decimal::ZERO
    }
}

pub fn summarize_period(
    expenses: &[ExpenseEntry],
    incomes: &[IncomeEntry],
    period: MonthKey,
    owner: OwnerFilter,
) -> PeriodSummary {
    let period_expenses = filter_by_owner(
        &filter_by_period(expenses, period.year(), period.month()),
        &owner,
    );
    let period_incomes = filter_by_period(incomes, period.year(), period.month());

    let total_spent = total_sum(&period_expenses);
    let total_income = total_sum(&period_incomes);
    let by_month = sum_by_month(&period_expenses);
    let comparison = reconcile_monthly(&by_month, &sum_by_month(&period_incomes));

    PeriodSummary {
        period,
        owner,
        expense_count: period_expenses.len(),
        total_spent,
        total_income,
        balance: total_income - total_spent,
        by_owner: sum_by_owner(&period_expenses),
        by_category: sum_by_category(&period_expenses),
        by_month,
        comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: i64, category: Category, owner: Owner, amount: i64, date: NaiveDate) -> ExpenseEntry {
        ExpenseEntry {
            id,
            description: format!("Conta {}", id),
            category,
            owner,
            amount: Decimal::from(amount),
            date,
        }
    }

    fn income(id: i64, owner: Owner, amount: i64, date: NaiveDate) -> IncomeEntry {
        IncomeEntry { id, amount: Decimal::from(amount), owner, date }
    }

    fn fixtures() -> (Vec<ExpenseEntry>, Vec<IncomeEntry>) {
        let expenses = vec![
            expense(4, Category::Leisure, Owner::Geovani, 300, date(2024, 2, 20)),
            expense(3, Category::Housing, Owner::Together, 1500, date(2024, 2, 5)),
            expense(2, Category::Food, Owner::Amanda, 200, date(2024, 2, 3)),
            expense(1, Category::Food, Owner::Amanda, 999, date(2024, 1, 30)),
        ];
        let incomes = vec![
            income(2, Owner::Amanda, 2500, date(2024, 2, 5)),
            income(1, Owner::Geovani, 3000, date(2024, 1, 5)),
        ];
        (expenses, incomes)
    }

    #[test]
    fn test_summary_for_all_owners() {
        let (expenses, incomes) = fixtures();
        let summary = summarize_period(&expenses, &incomes, "2024-02".parse().unwrap(), OwnerFilter::All);

        assert_eq!(summary.expense_count, 3);
        assert_eq!(summary.total_spent, Decimal::from(2000));
        assert_eq!(summary.total_income, Decimal::from(2500));
        assert_eq!(summary.balance, Decimal::from(500));
        assert!(!summary.is_negative());

        assert_eq!(summary.by_category[&Category::Housing], Decimal::from(1500));
        assert_eq!(summary.by_owner.len(), 3);

        assert_eq!(summary.comparison.len(), 1);
        assert_eq!(summary.comparison[0].savings_pct, Decimal::from(20));
    }

    #[test]
    fn test_owner_filter_applies_to_expenses_only() {
        let (expenses, incomes) = fixtures();
        let summary = summarize_period(
            &expenses,
            &incomes,
            "2024-02".parse().unwrap(),
            OwnerFilter::Only(Owner::Geovani),
        );

        assert_eq!(summary.total_spent, Decimal::from(300));
        assert_eq!(summary.total_income, Decimal::from(2500));
        assert_eq!(summary.by_owner.keys().copied().collect::<Vec<_>>(), vec![Owner::Geovani]);
    }

    #[test]
    fn test_negative_balance_alert() {
        let (expenses, _) = fixtures();
        let summary = summarize_period(&expenses, &[], "2024-01".parse().unwrap(), OwnerFilter::All);

        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::from(-999));
        assert!(summary.is_negative());
        assert_eq!(summary.comparison[0].savings_pct, Decimal::ZERO);
    }

    #[test]
    fn test_empty_period_is_not_an_error() {
        let (expenses, incomes) = fixtures();
        let summary = summarize_period(&expenses, &incomes, "2023-06".parse().unwrap(), OwnerFilter::All);

        assert_eq!(summary.expense_count, 0);
        assert_eq!(summary.total_spent, Decimal::ZERO);
        assert!(summary.by_category.is_empty());
        assert!(summary.comparison.is_empty());
    }
}
