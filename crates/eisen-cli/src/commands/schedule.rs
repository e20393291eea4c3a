use anyhow::{anyhow, Result};
use chrono::Utc;
use eisen_core::promotion::PromotionEngine;
use eisen_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::cli::ScheduleCommand;
use crate::parser::parse_days_until;
use crate::util::resolve_task_id;

pub async fn schedule_task(
    repo: &impl Repository,
    engine: &PromotionEngine,
    command: ScheduleCommand,
) -> Result<()> {
    let now = Utc::now();
    let days = match (command.in_days, command.on.as_deref()) {
        (Some(days), _) => days,
        (None, Some(date)) => parse_days_until(date, now)?,
        (None, None) => return Err(anyhow!("Either --in or --on must be provided")),
    };

    let task_id = resolve_task_id(repo, &command.id).await?;
    let task = repo.schedule_task(task_id, days, command.target, now).await?;

    println!(
        "Scheduled '{}' into {} in {} days",
        task.title,
        command.target.label().bold(),
        days
    );
    let plan = engine.buffer_plan(days, command.target);
    if plan.has_buffer_stage() {
        println!(
            "  Shows up in {} after {} days, {} days before it is due",
            plan.buffer.label(),
            plan.days_until_buffer,
            plan.buffer_days
        );
    }
    println!("  Comes back every {} days once done", days);

    Ok(())
}
