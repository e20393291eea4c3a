use anyhow::Result;
use chrono::Utc;
use eisen_core::board::Board;
use eisen_core::models::Task;
use eisen_core::repository::Repository;

use crate::cli::ListCommand;
use crate::views::table::{display_board, BoardFilter};

pub async fn list_tasks(repo: &impl Repository, command: ListCommand) -> Result<()> {
    let now = Utc::now();
    repo.refresh_promotions(now).await?;

    let tasks: Vec<Task> = repo
        .load_tasks()
        .await?
        .into_iter()
        .filter(|task| command.status.map_or(true, |status| task.status == status))
        .collect();

    if command.json {
        let tasks: Vec<Task> = match command.quadrant {
            Some(quadrant) => Board::from_tasks(tasks).quadrant(quadrant).to_vec(),
            None => tasks,
        };
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    let board = Board::from_tasks(tasks);
    display_board(&board, BoardFilter { quadrant: command.quadrant }, now);

    Ok(())
}
