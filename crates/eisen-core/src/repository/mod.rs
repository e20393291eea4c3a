use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{NewTaskData, Quadrant, StatusOutcome, Task, UpdateTaskData};
use crate::promotion::{PromotionDecision, PromotionEngine};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub mod promotions;
pub mod tasks;

/// A decision taken for one task during [`PromotionRepository::refresh_promotions`].
#[derive(Debug, Clone, Serialize)]
pub struct PromotionOutcome {
    pub decision: PromotionDecision,
    /// The task after the decision was persisted.
    pub task: Task,
}

/// Storage of tasks: the `load_tasks`/`update_task` contract plus lookups.
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError>;
    /// All tasks, oldest first.
    async fn load_tasks(&self) -> Result<Vec<Task>, CoreError>;
    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Operations that move tasks between quadrants, pending and scheduled states.
#[async_trait]
pub trait PromotionRepository {
    /// Evaluates every scheduled task at `now` and persists the decisions that change something.
    async fn refresh_promotions(&self, now: DateTime<Utc>) -> Result<Vec<PromotionOutcome>, CoreError>;
    async fn schedule_task(&self, id: Uuid, days_from_now: i64, target: Quadrant, now: DateTime<Utc>) -> Result<Task, CoreError>;
    async fn accelerate_task(&self, id: Uuid, reduce_days: i64, now: DateTime<Utc>) -> Result<(PromotionDecision, Task), CoreError>;
    async fn move_task(&self, id: Uuid, quadrant: Quadrant) -> Result<Task, CoreError>;
    async fn send_to_pending(&self, id: Uuid) -> Result<Task, CoreError>;
    async fn advance_status(&self, id: Uuid, now: DateTime<Utc>) -> Result<StatusOutcome, CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: TaskRepository + PromotionRepository {}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
    engine: PromotionEngine,
}

impl SqliteRepository {
    pub fn new(pool: DbPool, engine: PromotionEngine) -> Self {
        Self { pool, engine }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn engine(&self) -> &PromotionEngine {
        &self.engine
    }
}

impl Repository for SqliteRepository {}
