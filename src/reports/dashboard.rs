//! Year dashboard
//!
//! Annualizes monthly items (x12) and adds non-monthly items at face value.
//! Month scopes are ignored here: every item of the year contributes.

use std::io::Write;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{BudgetItem, Category, TimeType};

const MONTHS_PER_YEAR: i64 = 12;

fn overflow(year: i32) -> PlannerError {
    PlannerError::Validation(format!(
        "Budget totals for {} exceed the supported amount range",
        year
    ))
}

/// Year-level income, expense and surplus totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub year: i32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_surplus: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub monthly_income: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub monthly_expense: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub non_monthly_income: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub non_monthly_expense: Decimal,
}

impl Dashboard {
    /// Fold year-filtered items into dashboard totals
    ///
    /// Fails with a validation error when a sum leaves the range `Decimal`
    /// can represent.
    pub fn calculate<'a, I>(year: i32, items: I) -> PlannerResult<Self>
    where
        I: IntoIterator<Item = &'a BudgetItem>,
    {
        let mut monthly_income = Decimal::ZERO;
        let mut monthly_expense = Decimal::ZERO;
        let mut non_monthly_income = Decimal::ZERO;
        let mut non_monthly_expense = Decimal::ZERO;

        for item in items {
            let bucket = match (item.time_type, item.category) {
                (TimeType::Monthly, Category::Income) => &mut monthly_income,
                (TimeType::Monthly, Category::Expense) => &mut monthly_expense,
                (TimeType::NonMonthly, Category::Income) => &mut non_monthly_income,
                (TimeType::NonMonthly, Category::Expense) => &mut non_monthly_expense,
            };
            *bucket = bucket
                .checked_add(item.amount)
                .ok_or_else(|| overflow(year))?;
        }

        let annual = |monthly: Decimal, non_monthly: Decimal| {
            monthly
                .checked_mul(Decimal::from(MONTHS_PER_YEAR))
                .and_then(|yearly| yearly.checked_add(non_monthly))
                .ok_or_else(|| overflow(year))
        };
        let total_income = annual(monthly_income, non_monthly_income)?;
        let total_expense = annual(monthly_expense, non_monthly_expense)?;
        let total_surplus = total_income
            .checked_sub(total_expense)
            .ok_or_else(|| overflow(year))?;

        Ok(Self {
            year,
            total_income: total_income.normalize(),
            total_expense: total_expense.normalize(),
            total_surplus: total_surplus.normalize(),
            monthly_income: monthly_income.normalize(),
            monthly_expense: monthly_expense.normalize(),
            non_monthly_income: non_monthly_income.normalize(),
            non_monthly_expense: non_monthly_expense.normalize(),
        })
    }

    /// Whether the year ends with more expense than income
    pub fn is_deficit(&self) -> bool {
        self.total_surplus.is_sign_negative() && !self.total_surplus.is_zero()
    }

    /// Format the dashboard for terminal output
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |amount: Decimal| format!("{}{:.2}", currency_symbol, amount);
        let mut output = String::new();

        output.push_str(&format!("Budget Dashboard {}\n", self.year));
        output.push_str(&"=".repeat(44));
        output.push('\n');
        output.push_str(&format!(
            "{:<26} {:>16}\n",
            "Monthly income",
            money(self.monthly_income)
        ));
        output.push_str(&format!(
            "{:<26} {:>16}\n",
            "Monthly expense",
            money(self.monthly_expense)
        ));
        output.push_str(&format!(
            "{:<26} {:>16}\n",
            "Non-monthly income",
            money(self.non_monthly_income)
        ));
        output.push_str(&format!(
            "{:<26} {:>16}\n",
            "Non-monthly expense",
            money(self.non_monthly_expense)
        ));
        output.push_str(&"-".repeat(44));
        output.push('\n');
        output.push_str(&format!(
            "{:<26} {:>16}\n",
            "Total income",
            money(self.total_income)
        ));
        output.push_str(&format!(
            "{:<26} {:>16}\n",
            "Total expense",
            money(self.total_expense)
        ));
        output.push_str(&format!(
            "{:<26} {:>16}\n",
            if self.is_deficit() {
                "Total deficit"
            } else {
                "Total surplus"
            },
            money(self.total_surplus)
        ));

        output
    }

    /// Export the dashboard as pretty JSON
    pub fn export_json<W: Write>(&self, writer: &mut W) -> PlannerResult<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemDraft, ItemId};
    use serde_json::json;

    fn item(name: &str, scope: &str, time_type: &str, category: &str, amount: i64) -> BudgetItem {
        let fields = ItemDraft::new(name, scope, time_type, category, amount)
            .validate()
            .unwrap();
        BudgetItem::new(ItemId::from(format!("id_{}", name)), fields)
    }

    fn scenario_items() -> Vec<BudgetItem> {
        vec![
            item("wage", "Permanent", "Monthly", "Income", 5000),
            item("rent", "Permanent", "Monthly", "Expense", 2000),
            item("trip", "2025-Dec", "NonMonthly", "Expense", 5000),
            item("bonus", "2025-Dec", "NonMonthly", "Income", 10000),
        ]
    }

    #[test]
    fn test_scenario_totals() {
        let dashboard = Dashboard::calculate(2025, &scenario_items()).unwrap();

        assert_eq!(dashboard.year, 2025);
        assert_eq!(dashboard.total_income, Decimal::from(70000));
        assert_eq!(dashboard.total_expense, Decimal::from(29000));
        assert_eq!(dashboard.total_surplus, Decimal::from(41000));
        assert_eq!(dashboard.monthly_income, Decimal::from(5000));
        assert_eq!(dashboard.monthly_expense, Decimal::from(2000));
        assert_eq!(dashboard.non_monthly_income, Decimal::from(10000));
        assert_eq!(dashboard.non_monthly_expense, Decimal::from(5000));
    }

    #[test]
    fn test_empty_year_is_zero() {
        let dashboard = Dashboard::calculate(2030, &[]).unwrap();
        assert_eq!(dashboard.total_income, Decimal::ZERO);
        assert_eq!(dashboard.total_surplus, Decimal::ZERO);
        assert!(!dashboard.is_deficit());
    }

    #[test]
    fn test_exact_decimal_sums() {
        let mut items = vec![
            item("a", "2025", "NonMonthly", "Income", 0),
            item("b", "2025", "NonMonthly", "Income", 0),
        ];
        items[0].amount = Decimal::new(1, 1); // 0.1
        items[1].amount = Decimal::new(2, 1); // 0.2

        let dashboard = Dashboard::calculate(2025, &items).unwrap();
        assert_eq!(dashboard.non_monthly_income, Decimal::new(3, 1));
    }

    #[test]
    fn test_union_is_field_wise_sum() {
        let all = scenario_items();
        let (a, b) = all.split_at(2);

        let whole = Dashboard::calculate(2025, &all).unwrap();
        let left = Dashboard::calculate(2025, a).unwrap();
        let right = Dashboard::calculate(2025, b).unwrap();

        assert_eq!(whole.total_income, left.total_income + right.total_income);
        assert_eq!(whole.total_expense, left.total_expense + right.total_expense);
        assert_eq!(whole.total_surplus, left.total_surplus + right.total_surplus);
        assert_eq!(
            whole.monthly_income,
            left.monthly_income + right.monthly_income
        );
        assert_eq!(
            whole.non_monthly_expense,
            left.non_monthly_expense + right.non_monthly_expense
        );
    }

    #[test]
    fn test_order_does_not_matter() {
        let items = scenario_items();
        let mut reversed = items.clone();
        reversed.reverse();
        assert_eq!(
            Dashboard::calculate(2025, &items).unwrap(),
            Dashboard::calculate(2025, &reversed).unwrap()
        );
    }

    #[test]
    fn test_annualizing_past_decimal_range_is_an_error() {
        let mut items = vec![item("huge", "2025", "Monthly", "Income", 0)];
        items[0].amount = Decimal::from_str_exact("7000000000000000000000000000").unwrap();

        let err = Dashboard::calculate(2025, &items).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("2025"));
    }

    #[test]
    fn test_summing_past_decimal_range_is_an_error() {
        let mut items = vec![
            item("a", "2025", "NonMonthly", "Expense", 0),
            item("b", "2025", "NonMonthly", "Expense", 0),
        ];
        items[0].amount = Decimal::MAX;
        items[1].amount = Decimal::ONE;

        assert!(Dashboard::calculate(2025, &items).is_err());
    }

    #[test]
    fn test_deficit_label() {
        let items = vec![item("rent", "Permanent", "Monthly", "Expense", 2000)];
        let dashboard = Dashboard::calculate(2025, &items).unwrap();

        assert!(dashboard.is_deficit());
        let output = dashboard.format_terminal("$");
        assert!(output.contains("Total deficit"));
        assert!(output.contains("$-24000.00"));
    }

    #[test]
    fn test_json_shape() {
        let dashboard = Dashboard::calculate(2025, &scenario_items()).unwrap();
        let value = serde_json::to_value(dashboard).unwrap();

        assert_eq!(value["year"], json!(2025));
        assert_eq!(value["total_income"], json!(70000));
        assert_eq!(value["total_surplus"], json!(41000));
    }

    #[test]
    fn test_export_json() {
        let dashboard = Dashboard::calculate(2025, &scenario_items()).unwrap();
        let mut buffer = Vec::new();
        dashboard.export_json(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"non_monthly_income\": 10000"));
    }
}
