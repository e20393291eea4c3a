use anyhow::Result;
use eisen_core::models::{TaskStatus, UpdateTaskData};
use eisen_core::repository::Repository;

use crate::cli::EditCommand;
use crate::util::resolve_task_id;

pub async fn edit_task(repo: &impl Repository, command: EditCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;

    let description = if command.description_clear {
        Some(None)
    } else {
        command.description.map(Some)
    };

    let recurrence_days = if command.recurrence_clear {
        Some(None)
    } else {
        command.recurrence.map(Some)
    };

    let update_data = UpdateTaskData {
        title: command.title,
        description,
        recurrence_days,
        status: command.status,
        ..Default::default()
    };

    if update_data.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    let completing = update_data.status == Some(TaskStatus::Done);
    let updated_task = repo.update_task(task_id, update_data).await?;
    println!("Updated task: '{}' ({})", updated_task.title, updated_task.short_id());
    if completing && updated_task.status != TaskStatus::Done {
        if let Some(target) = updated_task.target_quadrant {
            let days = updated_task.recurrence_days.unwrap_or_default();
            println!("It comes back in {} in {} days", target.label(), days);
        }
    }

    Ok(())
}
