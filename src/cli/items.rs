//! Item CLI commands
//!
//! Listing, adding, updating and deleting budget items.

use serde_json::Value;
use tabled::{settings::Style, Table, Tabled};

use crate::error::PlannerResult;
use crate::models::{BudgetItem, ItemDraft, ItemPatch};
use crate::services::parse_months;

use super::CommandContext;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Type")]
    time_type: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn item_table(ctx: &CommandContext<'_>, items: &[BudgetItem]) -> String {
    let rows = items.iter().map(|item| ItemRow {
        id: item.id.to_string(),
        name: item.name.clone(),
        scope: item.scope.to_string(),
        time_type: item.time_type.to_string(),
        category: item.category.to_string(),
        amount: ctx.money(item.amount),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// `budget info [--year]`
pub fn handle_info(ctx: &CommandContext<'_>, year: Option<i32>) -> PlannerResult<bool> {
    let info = ctx.planner.get_user_budget_info(ctx.user, year)?;

    if ctx.json {
        ctx.print_json(&info)?;
        return Ok(true);
    }

    match year {
        Some(year) => println!("Budget items for {} in {}", ctx.user, year),
        None => println!("Budget items for {}", ctx.user),
    }

    if info.items.is_empty() {
        println!("No budget items found.");
        println!("Use 'budget add' to create one.");
    } else {
        println!("{}", item_table(ctx, &info.items));
    }

    if !info.available_years.is_empty() {
        let years: Vec<String> = info.available_years.iter().map(i32::to_string).collect();
        println!("Years: {}", years.join(", "));
    }

    Ok(true)
}

/// `budget add`
pub fn handle_add(
    ctx: &CommandContext<'_>,
    name: String,
    scope: String,
    time_type: String,
    category: String,
    amount: String,
) -> PlannerResult<bool> {
    let draft = ItemDraft::new(name, scope, time_type, category, Value::String(amount));
    let result = ctx.planner.add_budget_item(ctx.user, &draft)?;

    if ctx.json {
        ctx.print_json(&result)?;
    } else if let Some(id) = &result.item_id {
        println!("{}: {}", result.message, id);
    } else {
        println!("{}", result.message);
    }

    Ok(result.success)
}

/// `budget update <id>`
pub fn handle_update(
    ctx: &CommandContext<'_>,
    id: &str,
    name: Option<String>,
    scope: Option<String>,
    time_type: Option<String>,
    category: Option<String>,
    amount: Option<String>,
) -> PlannerResult<bool> {
    let patch = ItemPatch {
        name,
        scope,
        time_type,
        category,
        amount: amount.map(Value::String),
    };
    let result = ctx.planner.update_budget_item(ctx.user, id, &patch)?;

    if ctx.json {
        ctx.print_json(&result)?;
    } else {
        println!("{}", result.message);
        if let Some(item) = &result.item {
            println!("  {}", item);
        }
    }

    Ok(result.success)
}

/// `budget delete <id>`
pub fn handle_delete(ctx: &CommandContext<'_>, id: &str) -> PlannerResult<bool> {
    let result = ctx.planner.delete_budget_item(ctx.user, id)?;

    if ctx.json {
        ctx.print_json(&result)?;
    } else {
        println!("{}", result.message);
    }

    Ok(result.success)
}

/// `budget items --year [--months]`
pub fn handle_items(ctx: &CommandContext<'_>, year: i32, months: &str) -> PlannerResult<bool> {
    let months = parse_months(months)?;
    let selection = ctx
        .planner
        .get_items_by_month(ctx.user, year, months.as_deref())?;

    if ctx.json {
        ctx.print_json(&selection)?;
        return Ok(true);
    }

    let label = match &months {
        Some(months) => {
            let months: Vec<String> = months.iter().map(u32::to_string).collect();
            format!("{} (months {})", year, months.join(", "))
        }
        None => year.to_string(),
    };

    println!("Income for {}", label);
    if selection.income_items.is_empty() {
        println!("  (none)");
    } else {
        println!("{}", item_table(ctx, &selection.income_items));
    }

    println!();
    println!("Expenses for {}", label);
    if selection.expense_items.is_empty() {
        println!("  (none)");
    } else {
        println!("{}", item_table(ctx, &selection.expense_items));
    }

    Ok(true)
}
