use crate::models::{Quadrant, Task, TaskStatus};
use std::collections::HashMap;

/// A loaded task list split into the sections of the matrix.
#[derive(Debug, Default)]
pub struct Board {
    quadrants: HashMap<Quadrant, Vec<Task>>,
    /// Waiting for their due date, soonest first.
    pub scheduled: Vec<Task>,
    /// Unassigned and unscheduled.
    pub pending: Vec<Task>,
    pub done: Vec<Task>,
}

impl Board {
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut board = Board::default();

        for task in tasks {
            if task.pending {
                if task.is_scheduled() {
                    board.scheduled.push(task);
                } else {
                    board.pending.push(task);
                }
            } else if task.status == TaskStatus::Done {
                board.done.push(task);
            } else {
                board.quadrants.entry(task.quadrant()).or_default().push(task);
            }
        }

        board.scheduled.sort_by_key(|task| task.due_date);
        board
    }

    /// Active tasks shown in `quadrant`.
    pub fn quadrant(&self, quadrant: Quadrant) -> &[Task] {
        self.quadrants.get(&quadrant).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, quadrant: Quadrant) -> usize {
        self.quadrant(quadrant).len()
    }

    pub fn is_empty(&self) -> bool {
        self.quadrants.values().all(Vec::is_empty)
            && self.scheduled.is_empty()
            && self.pending.is_empty()
            && self.done.is_empty()
    }
}
