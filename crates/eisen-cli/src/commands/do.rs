use anyhow::Result;
use chrono::Utc;
use chrono_humanize::Humanize;
use eisen_core::models::{StatusOutcome, TaskStatus};
use eisen_core::repository::Repository;

use crate::cli::DoCommand;
use crate::util::resolve_task_id;

pub async fn do_task(repo: &impl Repository, command: DoCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;

    match repo.advance_status(task_id, Utc::now()).await? {
        StatusOutcome::Advanced(task) if task.status == TaskStatus::Done => {
            println!("Completed task: '{}'", task.title);
        }
        StatusOutcome::Advanced(task) => {
            println!("Task '{}' is now {}", task.title, task.status);
        }
        StatusOutcome::Rearmed(task) => {
            println!("Completed task: '{}'", task.title);
            match task.schedule() {
                Some((due_date, target)) => println!(
                    "It comes back in {} {}",
                    target.label(),
                    due_date.humanize()
                ),
                None => println!("It comes back later"),
            }
        }
    }

    Ok(())
}
