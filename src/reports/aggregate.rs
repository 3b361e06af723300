//! Spending aggregations
//!
//! Stateless functions deriving totals, breakdowns and shares from a list of
//! expenses (and budgets). None of them can fail: empty input yields zero,
//! division guards return zero instead of NaN.

use serde::Serialize;

use crate::models::{Budget, Category, Expense, Money, Period};

use super::breakdown::Breakdown;

/// Days used to spread a total into a daily average
pub const DAYS_PER_MONTH: i64 = 30;

/// Sum of all expense amounts
pub fn total_spent(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Amounts summed per category; categories without records are absent
pub fn category_breakdown(expenses: &[Expense]) -> Breakdown {
    expenses.iter().map(|e| (e.category, e.amount)).collect()
}

/// Mean amount per expense, rounded to the cent; zero for no expenses
pub fn average_per_record(expenses: &[Expense]) -> Money {
    total_spent(expenses).split_evenly(expenses.len())
}

/// `part` as a percentage of `total`, rounded to one decimal place
///
/// Zero when `total` is zero.
pub fn percentage_share(part: Money, total: Money) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    let share = part.cents() as f64 / total.cents() as f64 * 100.0;
    (share * 10.0).round() / 10.0
}

/// The category with the largest amount; the earliest-added wins a tie
pub fn max_category(breakdown: &Breakdown) -> Option<Category> {
    let mut best: Option<(Category, Money)> = None;
    for (category, amount) in breakdown.iter() {
        match best {
            Some((_, top)) if amount <= top => {}
            _ => best = Some((category, amount)),
        }
    }
    best.map(|(category, _)| category)
}

/// Sum of all budget caps
pub fn total_budget(budgets: &[Budget]) -> Money {
    budgets.iter().map(|b| b.amount).sum()
}

/// Number of categories with any spending
pub fn active_category_count(breakdown: &Breakdown) -> usize {
    breakdown.len()
}

/// Total spread over a 30-day month, rounded to whole currency units
pub fn average_daily(total: Money) -> Money {
    let per_day = total.split_evenly(DAYS_PER_MONTH as usize);
    Money::from_units(per_day.split_evenly(100).cents())
}

/// The `limit` most recent expenses, newest first
///
/// Expenses sharing a date keep their original relative order.
pub fn recent_expenses(expenses: &[Expense], limit: usize) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

/// Spending in one category within a period
pub fn spent_in(expenses: &[Expense], category: Category, period: &Period) -> Money {
    expenses
        .iter()
        .filter(|e| e.category == category && period.contains(e.date))
        .map(|e| e.amount)
        .sum()
}

/// Budget left per category for one month: caps minus that month's spending
///
/// Several budgets for the same category and month add up. Overspent
/// categories come out negative.
pub fn remaining_budget(budgets: &[Budget], expenses: &[Expense], year: i32, month: u32) -> Breakdown {
    let period = Period::monthly(year, month);
    let caps: Breakdown = budgets
        .iter()
        .filter(|b| b.applies_to(year, month))
        .map(|b| (b.category, b.amount))
        .collect();

    caps.iter()
        .map(|(category, cap)| (category, cap - spent_in(expenses, category, &period)))
        .collect()
}

/// A category row of the category-details table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: Category,
    pub value: Money,
    pub percentage: f64,
}

/// Each category's amount with its share of `total`
pub fn category_shares(breakdown: &Breakdown, total: Money) -> Vec<CategoryShare> {
    breakdown
        .iter()
        .map(|(category, amount)| CategoryShare {
            name: category,
            value: amount,
            percentage: percentage_share(amount, total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, ExpenseId};
    use chrono::NaiveDate;

    fn expense(category: Category, amount: i64, date: (i32, u32, u32)) -> Expense {
        Expense::new(
            ExpenseId::generate(),
            format!("{} purchase", category),
            category,
            Money::from_units(amount),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    fn scenario() -> Vec<Expense> {
        vec![
            expense(Category::Food, 1250, (2024, 4, 15)),
            expense(Category::Transport, 2000, (2024, 4, 14)),
            expense(Category::Food, 950, (2024, 4, 8)),
        ]
    }

    #[test]
    fn test_three_record_scenario() {
        let expenses = scenario();
        assert_eq!(total_spent(&expenses), Money::from_units(4200));

        let breakdown = category_breakdown(&expenses);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown.get(Category::Food), Some(Money::from_units(2200)));
        assert_eq!(breakdown.get(Category::Transport), Some(Money::from_units(2000)));
        assert_eq!(max_category(&breakdown), Some(Category::Food));
        assert_eq!(average_per_record(&expenses), Money::from_units(1400));
    }

    #[test]
    fn test_empty_scenario() {
        let breakdown = category_breakdown(&[]);
        assert_eq!(total_spent(&[]), Money::zero());
        assert!(breakdown.is_empty());
        assert_eq!(max_category(&breakdown), None);
        assert_eq!(average_per_record(&[]), Money::zero());
        assert_eq!(total_budget(&[]), Money::zero());
    }

    #[test]
    fn test_total_is_order_independent() {
        let mut expenses = scenario();
        let forward = total_spent(&expenses);
        expenses.reverse();
        assert_eq!(total_spent(&expenses), forward);
        expenses.rotate_left(1);
        assert_eq!(total_spent(&expenses), forward);
    }

    #[test]
    fn test_breakdown_partitions_total() {
        let mut expenses = scenario();
        expenses.push(expense(Category::Other, 3, (2024, 1, 1)));
        expenses.push(expense(Category::Healthcare, 650, (2024, 4, 11)));
        assert_eq!(category_breakdown(&expenses).total(), total_spent(&expenses));
    }

    #[test]
    fn test_percentage_share() {
        assert_eq!(percentage_share(Money::from_units(2200), Money::from_units(4200)), 52.4);
        assert_eq!(percentage_share(Money::from_units(1), Money::from_units(3)), 33.3);
        assert_eq!(percentage_share(Money::from_units(500), Money::zero()), 0.0);
        assert_eq!(percentage_share(Money::zero(), Money::zero()), 0.0);
    }

    #[test]
    fn test_max_category_tie_goes_to_first_seen() {
        let expenses = vec![
            expense(Category::Shopping, 100, (2024, 1, 1)),
            expense(Category::Education, 100, (2024, 1, 2)),
        ];
        let breakdown = category_breakdown(&expenses);
        assert_eq!(max_category(&breakdown), Some(Category::Shopping));
    }

    #[test]
    fn test_average_daily_rounds_to_units() {
        assert_eq!(average_daily(Money::from_units(12450)), Money::from_units(415));
        assert_eq!(average_daily(Money::from_units(100)), Money::from_units(3));
        assert_eq!(average_daily(Money::zero()), Money::zero());
    }

    #[test]
    fn test_recent_expenses_newest_first() {
        let recent = recent_expenses(&scenario(), 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].amount, Money::from_units(1250));
        assert_eq!(recent[1].amount, Money::from_units(2000));
    }

    #[test]
    fn test_remaining_budget_uses_same_month_only() {
        let budgets = vec![
            Budget::new(BudgetId::from(1), Category::Food, Money::from_units(3000), 4, 2024),
            Budget::new(BudgetId::from(2), Category::Transport, Money::from_units(1500), 4, 2024),
            Budget::new(BudgetId::from(3), Category::Food, Money::from_units(9999), 5, 2024),
        ];
        let mut expenses = scenario();
        expenses.push(expense(Category::Food, 400, (2024, 3, 31)));

        let remaining = remaining_budget(&budgets, &expenses, 2024, 4);
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining.get(Category::Food), Some(Money::from_units(800)));
        assert_eq!(remaining.get(Category::Transport), Some(Money::from_units(-500)));
    }

    #[test]
    fn test_duplicate_budgets_add_up() {
        let budgets = vec![
            Budget::new(BudgetId::from(1), Category::Food, Money::from_units(1000), 4, 2024),
            Budget::new(BudgetId::from(2), Category::Food, Money::from_units(500), 4, 2024),
        ];
        assert_eq!(total_budget(&budgets), Money::from_units(1500));
        let remaining = remaining_budget(&budgets, &[], 2024, 4);
        assert_eq!(remaining.get(Category::Food), Some(Money::from_units(1500)));
    }

    #[test]
    fn test_category_shares() {
        let expenses = scenario();
        let breakdown = category_breakdown(&expenses);
        let shares = category_shares(&breakdown, total_spent(&expenses));
        assert_eq!(shares[0].name, Category::Food);
        assert_eq!(shares[0].percentage, 52.4);
        assert_eq!(shares[1].percentage, 47.6);
    }
}
