use crate::error::CoreError;
use crate::models::{Quadrant, StatusOutcome, Task};
use crate::promotion::{self, PromotionDecision, StatusChange};
use crate::repository::{PromotionOutcome, SqliteRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

#[async_trait]
impl super::PromotionRepository for SqliteRepository {
    async fn refresh_promotions(&self, now: DateTime<Utc>) -> Result<Vec<PromotionOutcome>, CoreError> {
        let mut tx = self.pool().begin().await?;

        let scheduled: Vec<Task> = sqlx::query_as(
            "SELECT * FROM tasks WHERE due_date IS NOT NULL AND target_quadrant IS NOT NULL ORDER BY created_at",
        )
        .fetch_all(&mut *tx)
        .await?;

        let mut outcomes = Vec::new();
        for task in scheduled {
            let decision = self.engine().evaluate(&task, now);
            let Some(update) = decision.into_update() else {
                continue;
            };
            let task = Self::update_task_in_transaction(&mut tx, task.id, &update).await?;
            info!(task_id = %task.id, title = %task.title, ?decision, "task promoted");
            outcomes.push(PromotionOutcome { decision, task });
        }

        tx.commit().await?;
        debug!(promoted = outcomes.len(), "promotion refresh finished");
        Ok(outcomes)
    }

    async fn schedule_task(&self, id: Uuid, days_from_now: i64, target: Quadrant, now: DateTime<Utc>) -> Result<Task, CoreError> {
        let update = promotion::schedule(days_from_now, target, now)?;
        let mut tx = self.pool().begin().await?;
        let task = Self::update_task_in_transaction(&mut tx, id, &update).await?;
        tx.commit().await?;
        info!(task_id = %id, days_from_now, %target, "task scheduled");
        Ok(task)
    }

    async fn accelerate_task(&self, id: Uuid, reduce_days: i64, now: DateTime<Utc>) -> Result<(PromotionDecision, Task), CoreError> {
        let mut tx = self.pool().begin().await?;
        let task = Self::existing_task(&mut tx, id).await?;

        let current_days_left = promotion::days_left(&task, now).ok_or_else(|| {
            CoreError::InvalidInput(format!("Task '{}' is not scheduled", task.title))
        })?;
        let decision = self.engine().accelerate(&task, reduce_days, current_days_left)?;

        let task = match decision.into_update() {
            Some(update) => Self::update_task_in_transaction(&mut tx, id, &update).await?,
            None => task,
        };
        tx.commit().await?;

        info!(task_id = %id, reduce_days, ?decision, "task accelerated");
        Ok((decision, task))
    }

    async fn move_task(&self, id: Uuid, quadrant: Quadrant) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;
        let task = Self::existing_task(&mut tx, id).await?;
        let update = promotion::move_to_quadrant(&task, quadrant);
        let task = Self::update_task_in_transaction(&mut tx, id, &update).await?;
        tx.commit().await?;
        Ok(task)
    }

    async fn send_to_pending(&self, id: Uuid) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;
        let task = Self::update_task_in_transaction(&mut tx, id, &promotion::send_to_pending()).await?;
        tx.commit().await?;
        Ok(task)
    }

    async fn advance_status(&self, id: Uuid, now: DateTime<Utc>) -> Result<StatusOutcome, CoreError> {
        let mut tx = self.pool().begin().await?;
        let task = Self::existing_task(&mut tx, id).await?;

        let change = promotion::next_status(&task, now);
        let rearmed = matches!(change, StatusChange::Rearmed(_));
        let task = Self::update_task_in_transaction(&mut tx, id, &change.into_update()).await?;
        tx.commit().await?;

        if rearmed {
            info!(task_id = %id, due_date = ?task.due_date, "recurring task rearmed");
            Ok(StatusOutcome::Rearmed(task))
        } else {
            Ok(StatusOutcome::Advanced(task))
        }
    }
}

impl SqliteRepository {
    async fn existing_task<'a>(tx: &mut Transaction<'a, Sqlite>, id: Uuid) -> Result<Task, CoreError> {
        Self::find_task_by_id_in_transaction(tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }
}
