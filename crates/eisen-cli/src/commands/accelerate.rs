use anyhow::Result;
use chrono::Utc;
use chrono_humanize::Humanize;
use eisen_core::promotion::PromotionDecision;
use eisen_core::repository::Repository;

use crate::cli::AccelerateCommand;
use crate::util::resolve_task_id;

pub async fn accelerate_task(repo: &impl Repository, command: AccelerateCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let (decision, task) = repo.accelerate_task(task_id, command.days, Utc::now()).await?;

    match decision {
        PromotionDecision::PromoteToTarget { target } => {
            println!("'{}' moved straight into {}", task.title, target.label());
        }
        PromotionDecision::PromoteToBuffer { buffer, .. } => {
            println!("'{}' moved into {} ahead of its due date", task.title, buffer.label());
        }
        PromotionDecision::Reschedule { due_date } => {
            println!("'{}' is now due {}", task.title, due_date.humanize());
        }
        PromotionDecision::NoChange => {
            println!("'{}' is unchanged", task.title);
        }
    }

    Ok(())
}
