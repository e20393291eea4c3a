use clap::{Parser, Subcommand};
use eisen_core::models::{Quadrant, TaskStatus};

/// An Eisenhower matrix for the terminal, with tasks that come back on their own
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// Show the matrix
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Advance a task's status (todo, in progress, done)
    Do(DoCommand),
    /// Place a task in a quadrant
    Move(MoveCommand),
    /// Send a task back to the pending bucket
    Pending(PendingCommand),
    /// Plan a task to come back into a quadrant later
    Schedule(ScheduleCommand),
    /// Bring a scheduled task's due date closer
    Accelerate(AccelerateCommand),
    /// Run quadrant promotions and report what moved
    Promote,
    /// Delete a task
    Delete(DeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The description of the task
    #[clap(short, long)]
    pub description: Option<String>,
    /// Quadrant to place the task in (defaults to the pending bucket)
    #[clap(short, long, value_parser = parse_quadrant)]
    pub quadrant: Option<Quadrant>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only show this quadrant
    #[clap(short, long, value_parser = parse_quadrant)]
    pub quadrant: Option<Quadrant>,
    /// Only show tasks with this status
    #[clap(short, long, value_parser = parse_status)]
    pub status: Option<TaskStatus>,
    /// Print tasks as JSON instead of tables
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task to show
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    /// Days until the task comes back after completion
    #[arg(long)]
    pub recurrence: Option<i64>,
    #[arg(long, conflicts_with = "recurrence")]
    pub recurrence_clear: bool,

    #[arg(long, value_parser = parse_status)]
    pub status: Option<TaskStatus>,
}

#[derive(Parser, Debug, Clone)]
pub struct DoCommand {
    /// The ID of the task to advance
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct MoveCommand {
    /// The ID of the task to move
    pub id: String,
    /// Destination quadrant (do_first, schedule, delegate, eliminate)
    #[clap(value_parser = parse_quadrant)]
    pub quadrant: Quadrant,
}

#[derive(Parser, Debug, Clone)]
pub struct PendingCommand {
    /// The ID of the task to send to pending
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ScheduleCommand {
    /// The ID of the task to schedule
    pub id: String,
    /// Number of days from now
    #[clap(long = "in", value_name = "DAYS", conflicts_with = "on", required_unless_present = "on")]
    pub in_days: Option<i64>,
    /// Date to come back on (e.g., '2025-08-20', 'next friday')
    #[clap(long, value_name = "DATE")]
    pub on: Option<String>,
    /// Quadrant the task lands in on its due date
    #[clap(short, long, value_parser = parse_quadrant)]
    pub target: Quadrant,
}

#[derive(Parser, Debug, Clone)]
pub struct AccelerateCommand {
    /// The ID of the scheduled task
    pub id: String,
    /// Days to bring the due date forward by
    pub days: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

fn parse_quadrant(s: &str) -> Result<Quadrant, String> {
    serde_plain::from_str(s)
        .or_else(|_| s.parse())
        .map_err(|e| format!("{} (expected do_first, schedule, delegate or eliminate)", e))
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    serde_plain::from_str(s)
        .or_else(|_| s.parse())
        .map_err(|e| format!("{} (expected todo, in_progress or done)", e))
}
