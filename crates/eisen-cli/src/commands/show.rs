use anyhow::Result;
use chrono::Utc;
use eisen_core::promotion::PromotionEngine;
use eisen_core::repository::Repository;

use crate::cli::ShowCommand;
use crate::util::resolve_task;
use crate::views::table::display_task;

pub async fn show_task(
    repo: &impl Repository,
    engine: &PromotionEngine,
    command: ShowCommand,
) -> Result<()> {
    let now = Utc::now();
    repo.refresh_promotions(now).await?;

    let task = resolve_task(repo, &command.id).await?;
    display_task(&task, engine.buffer_start(&task), now);
    Ok(())
}
