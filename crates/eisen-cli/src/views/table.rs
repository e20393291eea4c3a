use chrono::{DateTime, Utc};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use eisen_core::board::Board;
use eisen_core::models::{Quadrant, Task, TaskStatus};
use eisen_core::promotion::buffer_quadrant;
use owo_colors::OwoColorize;

/// Which sections of the board to print.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardFilter {
    pub quadrant: Option<Quadrant>,
}

pub fn quadrant_color(quadrant: Quadrant) -> Color {
    match quadrant {
        Quadrant::DoFirst => Color::Red,
        Quadrant::Schedule => Color::Blue,
        Quadrant::Delegate => Color::Yellow,
        Quadrant::Eliminate => Color::DarkGrey,
    }
}

fn status_cell(status: TaskStatus) -> Cell {
    let cell = Cell::new(status.as_str());
    match status {
        TaskStatus::Todo => cell,
        TaskStatus::InProgress => cell.fg(Color::Yellow),
        TaskStatus::Done => cell.fg(Color::Green),
    }
}

fn title_cell(task: &Task) -> Cell {
    let mut title = task.title.clone();
    if task.recurrence_days.is_some() {
        title.insert_str(0, "↻ ");
    }
    let cell = Cell::new(title);
    if task.status == TaskStatus::Done {
        cell.add_attribute(Attribute::CrossedOut).fg(Color::DarkGrey)
    } else {
        cell
    }
}

fn due_cell(due_date: DateTime<Utc>, now: DateTime<Utc>) -> Cell {
    let cell = Cell::new(due_date.humanize());
    if due_date < now {
        cell.fg(Color::Red)
    } else if due_date.date_naive() == now.date_naive() {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}

fn display_quadrant(quadrant: Quadrant, tasks: &[Task]) {
    println!("{} ({})", quadrant.label().bold(), tasks.len());
    if tasks.is_empty() {
        println!("  No tasks.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Status", "Lands in"]);
    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.short_id()).fg(quadrant_color(quadrant)));
        row.add_cell(title_cell(task));
        row.add_cell(status_cell(task.status));
        // Buffered tasks are still on their way to the target.
        row.add_cell(match task.schedule() {
            Some((due_date, target)) => {
                Cell::new(format!("{} {}", target.label(), due_date.humanize()))
                    .fg(quadrant_color(target))
            }
            None => Cell::new(""),
        });
        table.add_row(row);
    }
    println!("{table}");
}

fn display_scheduled(tasks: &[Task], now: DateTime<Utc>) {
    println!("{} ({})", "Scheduled".bold(), tasks.len());
    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Due", "Target", "Via"]);
    for task in tasks {
        let Some((due_date, target)) = task.schedule() else {
            continue;
        };
        let buffer = buffer_quadrant(target);
        let mut row = Row::new();
        row.add_cell(Cell::new(task.short_id()));
        row.add_cell(title_cell(task));
        row.add_cell(due_cell(due_date, now));
        row.add_cell(Cell::new(target.label()).fg(quadrant_color(target)));
        row.add_cell(if buffer == target {
            Cell::new("")
        } else {
            Cell::new(buffer.label()).fg(quadrant_color(buffer))
        });
        table.add_row(row);
    }
    println!("{table}");
}

fn display_plain(heading: &str, tasks: &[Task]) {
    println!("{} ({})", heading.bold(), tasks.len());
    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Status"]);
    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.short_id()));
        row.add_cell(title_cell(task));
        row.add_cell(status_cell(task.status));
        table.add_row(row);
    }
    println!("{table}");
}

pub fn display_board(board: &Board, filter: BoardFilter, now: DateTime<Utc>) {
    if board.is_empty() {
        println!("No tasks found.");
        return;
    }

    if let Some(quadrant) = filter.quadrant {
        display_quadrant(quadrant, board.quadrant(quadrant));
        return;
    }

    for quadrant in Quadrant::ALL {
        display_quadrant(quadrant, board.quadrant(quadrant));
        println!();
    }
    if !board.scheduled.is_empty() {
        display_scheduled(&board.scheduled, now);
        println!();
    }
    if !board.pending.is_empty() {
        display_plain("Pending", &board.pending);
        println!();
    }
    if !board.done.is_empty() {
        display_plain("Done", &board.done);
    }
}

/// `buffer_start` is the buffer quadrant and the moment the task enters it.
pub fn display_task(task: &Task, buffer_start: Option<(Quadrant, DateTime<Utc>)>, now: DateTime<Utc>) {
    let mut table = Table::new();
    table.add_row(vec![Cell::new("ID"), Cell::new(task.id)]);
    table.add_row(vec![Cell::new("Title").add_attribute(Attribute::Bold), title_cell(task)]);
    if let Some(description) = &task.description {
        table.add_row(vec![Cell::new("Description"), Cell::new(description)]);
    }
    table.add_row(vec![Cell::new("Status"), status_cell(task.status)]);

    let placement = if task.pending && task.is_scheduled() {
        Cell::new("Scheduled")
    } else if task.pending {
        Cell::new("Pending")
    } else {
        Cell::new(task.quadrant().label()).fg(quadrant_color(task.quadrant()))
    };
    table.add_row(vec![Cell::new("Placement"), placement]);

    if let Some((due_date, target)) = task.schedule() {
        table.add_row(vec![Cell::new("Due"), due_cell(due_date, now)]);
        table.add_row(vec![
            Cell::new("Target"),
            Cell::new(target.label()).fg(quadrant_color(target)),
        ]);
        if let Some((buffer, starts_at)) = buffer_start.filter(|(buffer, _)| *buffer != target) {
            table.add_row(vec![
                Cell::new("Buffer"),
                Cell::new(format!("{} from {}", buffer.label(), starts_at.humanize()))
                    .fg(quadrant_color(buffer)),
            ]);
        }
    }
    if let Some(days) = task.recurrence_days {
        let recurs = match task.recurrence_target {
            Some(quadrant) => format!("every {} days, into {}", days, quadrant.label()),
            None => format!("every {} days", days),
        };
        table.add_row(vec![Cell::new("Recurs"), Cell::new(recurs)]);
    }
    table.add_row(vec![Cell::new("Created"), Cell::new(task.created_at.humanize())]);
    table.add_row(vec![Cell::new("Updated"), Cell::new(task.updated_at.humanize())]);

    println!("{table}");
}
