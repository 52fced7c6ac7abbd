//! Report CLI commands
//!
//! The year dashboard and the audit trail.

use crate::error::PlannerResult;

use super::CommandContext;

/// `budget dashboard --year`
pub fn handle_dashboard(ctx: &CommandContext<'_>, year: i32) -> PlannerResult<bool> {
    let dashboard = ctx.planner.calculate_dashboard(ctx.user, year)?;

    if ctx.json {
        dashboard.export_json(&mut std::io::stdout().lock())?;
    } else {
        print!("{}", dashboard.format_terminal(&ctx.settings.currency_symbol));
    }

    Ok(true)
}

/// `budget audit [--count]`
pub fn handle_audit(ctx: &CommandContext<'_>, count: usize) -> PlannerResult<bool> {
    let entries = ctx.planner.audit_trail(ctx.user, count)?;

    if ctx.json {
        ctx.print_json(&entries)?;
        return Ok(true);
    }

    if entries.is_empty() {
        println!("No changes recorded for {}.", ctx.user);
        return Ok(true);
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(true)
}
