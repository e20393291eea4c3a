use anyhow::Result;
use eisen_core::repository::Repository;

use crate::cli::PendingCommand;
use crate::util::resolve_task_id;

pub async fn send_to_pending(repo: &impl Repository, command: PendingCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let task = repo.send_to_pending(task_id).await?;
    println!("Sent '{}' to pending", task.title);
    Ok(())
}
