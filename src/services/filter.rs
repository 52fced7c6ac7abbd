//! Year and month selection of budget items
//!
//! Year selection keeps items whose scope is permanent or bound to the
//! requested year. Month selection then applies only to non-monthly items
//! with an explicit month; monthly items recur in every month and are
//! always kept, as are non-monthly items without a month to test.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{BudgetItem, Category, TimeType};

/// Items visible for a year and month selection, split by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyItems {
    pub income_items: Vec<BudgetItem>,
    pub expense_items: Vec<BudgetItem>,
}

impl MonthlyItems {
    pub fn len(&self) -> usize {
        self.income_items.len() + self.expense_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keep items whose resolved scope is permanent or lies in `year`
pub fn items_for_year<I>(items: I, year: i32) -> Vec<BudgetItem>
where
    I: IntoIterator<Item = BudgetItem>,
{
    items
        .into_iter()
        .filter(|item| {
            if item.scope.is_fallback() {
                tracing::warn!(
                    item_id = %item.id,
                    scope = item.scope.as_str(),
                    "scope has no recognizable year, treating as permanent"
                );
            }
            item.applies_to_year(year)
        })
        .collect()
}

/// Distinct years named by year-only and year+month scopes, ascending
pub fn available_years(items: &[BudgetItem]) -> Vec<i32> {
    items
        .iter()
        .filter_map(|item| item.resolved_scope().year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether an item passes the month selection
///
/// `months == None` means no restriction.
pub fn includes_item(item: &BudgetItem, months: Option<&[u32]>) -> bool {
    match (item.time_type, months) {
        (TimeType::Monthly, _) | (TimeType::NonMonthly, None) => true,
        (TimeType::NonMonthly, Some(months)) => match item.resolved_scope().month() {
            Some(month) => months.contains(&month),
            None => true,
        },
    }
}

/// Apply the month selection to already year-filtered items
pub fn filter_by_months<I>(items: I, months: Option<&[u32]>) -> MonthlyItems
where
    I: IntoIterator<Item = BudgetItem>,
{
    let mut result = MonthlyItems::default();

    for item in items {
        if !includes_item(&item, months) {
            continue;
        }
        match item.category {
            Category::Income => result.income_items.push(item),
            Category::Expense => result.expense_items.push(item),
        }
    }

    result
}

/// Parse a month selection such as `"1,2,12"`
///
/// `"all"` or an empty string means no restriction. Every entry must be a
/// month number from 1 to 12.
pub fn parse_months(s: &str) -> PlannerResult<Option<Vec<u32>>> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let mut months = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        let month: u32 = part
            .parse()
            .map_err(|_| PlannerError::Validation(format!("Invalid month: {:?}", part)))?;
        if !(1..=12).contains(&month) {
            return Err(PlannerError::Validation(format!(
                "Month out of range (1-12): {}",
                month
            )));
        }
        if !months.contains(&month) {
            months.push(month);
        }
    }

    Ok(Some(months))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemDraft, ItemId};

    fn item(name: &str, scope: &str, time_type: &str, category: &str, amount: i64) -> BudgetItem {
        let fields = ItemDraft::new(name, scope, time_type, category, amount)
            .validate()
            .unwrap();
        BudgetItem::new(ItemId::from(format!("id_{}", name)), fields)
    }

    fn sample_items() -> Vec<BudgetItem> {
        vec![
            item("wage", "Permanent", "Monthly", "Income", 5000),
            item("rent", "Permanent", "Monthly", "Expense", 2000),
            item("trip", "2025-Dec", "NonMonthly", "Expense", 5000),
            item("bonus", "2025-Dec", "NonMonthly", "Income", 10000),
            item("dinner", "2025-Aug", "NonMonthly", "Expense", 200),
        ]
    }

    fn names(items: &[BudgetItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_items_for_year() {
        let mut items = sample_items();
        items.push(item("old", "2024-05", "NonMonthly", "Expense", 10));
        items.push(item("tax", "2026", "NonMonthly", "Expense", 10));

        let selected = items_for_year(items, 2025);
        assert_eq!(
            names(&selected),
            vec!["wage", "rent", "trip", "bonus", "dinner"]
        );
    }

    #[test]
    fn test_unparseable_scope_counts_for_every_year() {
        let items = vec![item("mystery", "someday", "NonMonthly", "Expense", 10)];
        assert_eq!(items_for_year(items.clone(), 1990).len(), 1);
        assert_eq!(items_for_year(items, 2025).len(), 1);
    }

    #[test]
    fn test_available_years_skip_permanent() {
        let mut items = sample_items();
        items.push(item("tax", "2026", "NonMonthly", "Expense", 10));
        items.push(item("old", "2024-05", "NonMonthly", "Expense", 10));

        assert_eq!(available_years(&items), vec![2024, 2025, 2026]);
        assert!(available_years(&items[..2]).is_empty());
    }

    #[test]
    fn test_month_filter_december() {
        let result = filter_by_months(sample_items(), Some(&[12][..]));
        assert_eq!(names(&result.income_items), vec!["wage", "bonus"]);
        assert_eq!(names(&result.expense_items), vec!["rent", "trip"]);
    }

    #[test]
    fn test_no_month_filter_returns_everything() {
        let result = filter_by_months(sample_items(), None);
        assert_eq!(result.len(), 5);
        assert_eq!(names(&result.expense_items), vec!["rent", "trip", "dinner"]);
    }

    #[test]
    fn test_monthly_items_survive_any_month_set() {
        let wage = item("wage", "2025-03", "Monthly", "Income", 5000);
        assert!(includes_item(&wage, Some(&[][..])));
        for month in 1..=12 {
            assert!(includes_item(&wage, Some(&[month][..])));
        }
    }

    #[test]
    fn test_monthly_items_survive_any_month_set_for_every_scope() {
        let scopes = ["Permanent", "2025", "2025-03", "2025-Dec", "someday", "2025-13"];
        let month_sets: Vec<Vec<u32>> = vec![
            vec![],
            vec![1],
            vec![12],
            vec![2, 7, 11],
            (1..=12).collect(),
        ];

        for scope in scopes {
            let wage = item("wage", scope, "Monthly", "Income", 5000);
            for months in &month_sets {
                assert!(
                    includes_item(&wage, Some(months.as_slice())),
                    "{} with {:?}",
                    scope,
                    months
                );
                let selected = filter_by_months(vec![wage.clone()], Some(months.as_slice()));
                assert_eq!(names(&selected.income_items), vec!["wage"]);
            }
        }
    }

    #[test]
    fn test_non_monthly_without_month_always_included() {
        let yearly = item("insurance", "2025", "NonMonthly", "Expense", 900);
        let unparsed = item("gift", "birthday", "NonMonthly", "Expense", 50);
        assert!(includes_item(&yearly, Some(&[][..])));
        assert!(includes_item(&unparsed, Some(&[4][..])));
    }

    #[test]
    fn test_parse_months() {
        assert_eq!(parse_months("all").unwrap(), None);
        assert_eq!(parse_months("").unwrap(), None);
        assert_eq!(parse_months("1, 2,12,2").unwrap(), Some(vec![1, 2, 12]));
        assert!(parse_months("13").unwrap_err().is_validation());
        assert!(parse_months("jan").unwrap_err().is_validation());
    }
}
