use anyhow::Result;
use eisen_core::repository::Repository;

use crate::cli::MoveCommand;
use crate::util::resolve_task_id;

pub async fn move_task(repo: &impl Repository, command: MoveCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let task = repo.move_task(task_id, command.quadrant).await?;
    println!("Moved '{}' to {}", task.title, command.quadrant.label());
    Ok(())
}
