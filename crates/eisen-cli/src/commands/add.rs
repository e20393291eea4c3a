use anyhow::Result;
use eisen_core::models::NewTaskData;
use eisen_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;

pub async fn add_task(repo: &impl Repository, command: AddCommand) -> Result<()> {
    let new_task_data = NewTaskData {
        title: command.title,
        description: command.description,
        quadrant: command.quadrant,
        ..Default::default()
    };

    let added_task = repo.add_task(new_task_data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        added_task.title.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        added_task.short_id().yellow()
    );
    match command.quadrant {
        Some(quadrant) => println!("  {} In: {}", "→".style(info_style), quadrant.label()),
        None => println!("  {} In: pending", "→".style(info_style)),
    }

    Ok(())
}
