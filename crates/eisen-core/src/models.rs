use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Longest title the task store accepts.
pub const MAX_TITLE_LEN: usize = 200;

/// One of the four Eisenhower priority buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum Quadrant {
    /// Urgent and important.
    DoFirst,
    /// Important, not urgent.
    Schedule,
    /// Urgent, not important.
    Delegate,
    /// Neither urgent nor important.
    Eliminate,
}

impl Quadrant {
    /// Matrix order: top-left, top-right, bottom-left, bottom-right.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::DoFirst,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Eliminate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "do_first",
            Quadrant::Schedule => "schedule",
            Quadrant::Delegate => "delegate",
            Quadrant::Eliminate => "eliminate",
        }
    }

    /// Human label used by the board views.
    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "Do first",
            Quadrant::Schedule => "Schedule",
            Quadrant::Delegate => "Delegate",
            Quadrant::Eliminate => "Eliminate",
        }
    }

    pub fn flags(self) -> QuadrantFlags {
        quadrant_to_flags(self)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid quadrant: {0}")]
pub struct ParseQuadrantError(String);

impl FromStr for Quadrant {
    type Err = ParseQuadrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "do_first" | "do" => Ok(Quadrant::DoFirst),
            "schedule" => Ok(Quadrant::Schedule),
            "delegate" => Ok(Quadrant::Delegate),
            "eliminate" => Ok(Quadrant::Eliminate),
            _ => Err(ParseQuadrantError(s.to_string())),
        }
    }
}

/// The persisted pair of booleans a quadrant is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QuadrantFlags {
    pub urgent: bool,
    pub important: bool,
}

impl QuadrantFlags {
    pub fn new(urgent: bool, important: bool) -> Self {
        Self { urgent, important }
    }
}

/// Derives the quadrant a pair of flags places a task in.
pub fn get_quadrant(flags: QuadrantFlags) -> Quadrant {
    match (flags.urgent, flags.important) {
        (true, true) => Quadrant::DoFirst,
        (false, true) => Quadrant::Schedule,
        (true, false) => Quadrant::Delegate,
        (false, false) => Quadrant::Eliminate,
    }
}

/// Inverse of [`get_quadrant`].
pub fn quadrant_to_flags(quadrant: Quadrant) -> QuadrantFlags {
    match quadrant {
        Quadrant::DoFirst => QuadrantFlags::new(true, true),
        Quadrant::Schedule => QuadrantFlags::new(false, true),
        Quadrant::Delegate => QuadrantFlags::new(true, false),
        Quadrant::Eliminate => QuadrantFlags::new(false, false),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// The status a click on the status marker moves to.
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task status: {0}")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub urgent: bool,
    pub important: bool,
    pub status: TaskStatus,
    /// When set, the task is scheduled and waits for promotion into `target_quadrant`.
    pub due_date: Option<DateTime<Utc>>,
    /// Always set together with `due_date`.
    pub target_quadrant: Option<Quadrant>,
    /// Days until the task comes back after being completed.
    pub recurrence_days: Option<i64>,
    /// Quadrant a recurring task comes back into; survives manual moves.
    pub recurrence_target: Option<Quadrant>,
    /// Sits in the unassigned bucket instead of a quadrant.
    pub pending: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn flags(&self) -> QuadrantFlags {
        QuadrantFlags::new(self.urgent, self.important)
    }

    /// The quadrant the task is displayed in, derived from its flags.
    pub fn quadrant(&self) -> Quadrant {
        get_quadrant(self.flags())
    }

    /// Due date and target quadrant of a scheduled task.
    pub fn schedule(&self) -> Option<(DateTime<Utc>, Quadrant)> {
        match (self.due_date, self.target_quadrant) {
            (Some(due_date), Some(target)) => Some((due_date, target)),
            _ => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.due_date.is_some()
    }

    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

impl Default for Task {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: "".to_string(),
            description: None,
            urgent: false,
            important: false,
            status: TaskStatus::Todo,
            due_date: None,
            target_quadrant: None,
            recurrence_days: None,
            recurrence_target: None,
            pending: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: Option<String>,
    /// Quadrant to place the task in; `None` puts it in the pending bucket.
    pub quadrant: Option<Quadrant>,
    pub due_date: Option<DateTime<Utc>>,
    pub target_quadrant: Option<Quadrant>,
    pub recurrence_days: Option<i64>,
}

/// Partial update of a task. The outer `Option` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub urgent: Option<bool>,
    pub important: Option<bool>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub target_quadrant: Option<Option<Quadrant>>,
    pub recurrence_days: Option<Option<i64>>,
    pub recurrence_target: Option<Option<Quadrant>>,
    pub pending: Option<bool>,
}

impl UpdateTaskData {
    /// An update that writes both flags of `quadrant`.
    pub fn placing(quadrant: Quadrant) -> Self {
        let flags = quadrant_to_flags(quadrant);
        Self {
            urgent: Some(flags.urgent),
            important: Some(flags.important),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the set fields to `task` in place.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(urgent) = self.urgent {
            task.urgent = urgent;
        }
        if let Some(important) = self.important {
            task.important = important;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(target_quadrant) = self.target_quadrant {
            task.target_quadrant = target_quadrant;
        }
        if let Some(recurrence_days) = self.recurrence_days {
            task.recurrence_days = recurrence_days;
        }
        if let Some(recurrence_target) = self.recurrence_target {
            task.recurrence_target = recurrence_target;
        }
        if let Some(pending) = self.pending {
            task.pending = pending;
        }
    }

    /// Layers `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: UpdateTaskData) -> Self {
        Self {
            title: other.title.or(self.title),
            description: other.description.or(self.description),
            urgent: other.urgent.or(self.urgent),
            important: other.important.or(self.important),
            status: other.status.or(self.status),
            due_date: other.due_date.or(self.due_date),
            target_quadrant: other.target_quadrant.or(self.target_quadrant),
            recurrence_days: other.recurrence_days.or(self.recurrence_days),
            recurrence_target: other.recurrence_target.or(self.recurrence_target),
            pending: other.pending.or(self.pending),
        }
    }
}

/// Result of advancing a task's status.
#[derive(Debug)]
pub enum StatusOutcome {
    Advanced(Task),
    /// A recurring task was completed and came back as `todo` with a new due date.
    Rearmed(Task),
}

impl StatusOutcome {
    pub fn task(&self) -> &Task {
        match self {
            StatusOutcome::Advanced(task) | StatusOutcome::Rearmed(task) => task,
        }
    }
}
