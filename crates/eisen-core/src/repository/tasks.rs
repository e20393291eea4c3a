use crate::error::CoreError;
use crate::models::{NewTaskData, Task, TaskStatus, UpdateTaskData, MAX_TITLE_LEN};
use crate::promotion::{self, MAX_SCHEDULE_DAYS};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, Transaction};
use tracing::debug;
use uuid::Uuid;

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let flags = data.quadrant.map(|q| q.flags()).unwrap_or_default();
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: data.title.trim().to_string(),
            description: data.description,
            urgent: flags.urgent,
            important: flags.important,
            status: TaskStatus::Todo,
            due_date: data.due_date,
            target_quadrant: data.target_quadrant,
            recurrence_days: data.recurrence_days,
            recurrence_target: data.recurrence_days.and(data.target_quadrant),
            pending: data.quadrant.is_none(),
            created_at: now,
            updated_at: now,
        };
        validate_task(&task)?;

        let mut tx = self.pool().begin().await?;
        Self::insert_task(&mut tx, &task).await?;
        tx.commit().await?;

        debug!(task_id = %task.id, pending = task.pending, "task added");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError> {
        // Ids are stored as blobs; match against their hex form.
        let mut pattern: String = short_id
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_lowercase();
        pattern.push('%');

        let tasks: Vec<Task> = sqlx::query_as("SELECT * FROM tasks WHERE lower(hex(id)) LIKE $1")
            .bind(pattern)
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn load_tasks(&self) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as("SELECT * FROM tasks ORDER BY created_at")
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;
        let task = Self::update_task_in_transaction(&mut tx, id, &data).await?;
        tx.commit().await?;
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        debug!(task_id = %id, "task deleted");
        Ok(())
    }
}

/// Checks the invariants every stored task satisfies.
pub(crate) fn validate_task(task: &Task) -> Result<(), CoreError> {
    if task.title.trim().is_empty() {
        return Err(CoreError::InvalidInput("Task title cannot be empty".to_string()));
    }
    if task.title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::InvalidInput(format!(
            "Task title cannot be longer than {} characters",
            MAX_TITLE_LEN
        )));
    }
    if task.due_date.is_some() != task.target_quadrant.is_some() {
        return Err(CoreError::InvalidInput(
            "A due date and a target quadrant must be set together".to_string(),
        ));
    }
    if let Some(days) = task.recurrence_days {
        if !(1..=MAX_SCHEDULE_DAYS).contains(&days) {
            return Err(CoreError::InvalidInput(format!(
                "Recurrence must be between 1 and {} days, got {}",
                MAX_SCHEDULE_DAYS, days
            )));
        }
    }
    if task.recurrence_target.is_some() && task.recurrence_days.is_none() {
        return Err(CoreError::InvalidInput(
            "A return quadrant needs a recurrence interval".to_string(),
        ));
    }
    Ok(())
}

impl SqliteRepository {
    pub(crate) async fn insert_task<'a>(
        tx: &mut Transaction<'a, Sqlite>,
        task: &Task,
    ) -> Result<(), CoreError> {
        sqlx::query(
            r#"INSERT INTO tasks (id, title, description, urgent, important, status, due_date, target_quadrant, recurrence_days, recurrence_target, pending, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.urgent)
        .bind(task.important)
        .bind(task.status)
        .bind(task.due_date)
        .bind(task.target_quadrant)
        .bind(task.recurrence_days)
        .bind(task.recurrence_target)
        .bind(task.pending)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Find a task by ID within an existing transaction
    pub(crate) async fn find_task_by_id_in_transaction<'a>(
        tx: &mut Transaction<'a, Sqlite>,
        id: Uuid,
    ) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(task)
    }

    /// Applies `data` to the stored task after checking the result stays valid.
    ///
    /// Completing a recurring task never stores it as `done`: the rearm
    /// update is layered on top, whichever path set the status.
    pub(crate) async fn update_task_in_transaction<'a>(
        tx: &mut Transaction<'a, Sqlite>,
        id: Uuid,
        data: &UpdateTaskData,
    ) -> Result<Task, CoreError> {
        let stored = Self::find_task_by_id_in_transaction(&mut *tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        if data.is_empty() {
            return Ok(stored);
        }

        let now = Utc::now();
        let mut task = stored.clone();
        data.apply_to(&mut task);

        let completes = data.status == Some(TaskStatus::Done) && stored.status != TaskStatus::Done;
        let rearm = if completes {
            promotion::complete_recurrence(&task, now)
        } else {
            None
        };
        let mut data = match rearm {
            Some(rearm) => {
                rearm.apply_to(&mut task);
                debug!(task_id = %id, "completion of recurring task turned into a rearm");
                data.clone().merge(rearm)
            }
            None => data.clone(),
        };
        if task.recurrence_days.is_none() && task.recurrence_target.is_some() {
            task.recurrence_target = None;
            data.recurrence_target = Some(None);
        }

        task.title = task.title.trim().to_string();
        validate_task(&task)?;
        task.updated_at = now;

        Self::update_task_fields(&mut *tx, id, &data, task.updated_at).await?;
        debug!(task_id = %id, ?data, "task updated");
        Ok(task)
    }

    /// Update task fields within an existing transaction
    async fn update_task_fields<'a>(
        tx: &mut Transaction<'a, Sqlite>,
        id: Uuid,
        data: &UpdateTaskData,
        updated_at: chrono::DateTime<Utc>,
    ) -> Result<(), CoreError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE tasks SET updated_at = ");
        qb.push_bind(updated_at);

        if let Some(title) = &data.title {
            qb.push(", title = ");
            qb.push_bind(title.trim().to_string());
        }

        if let Some(description) = &data.description {
            qb.push(", description = ");
            qb.push_bind(description.clone());
        }

        if let Some(urgent) = data.urgent {
            qb.push(", urgent = ");
            qb.push_bind(urgent);
        }

        if let Some(important) = data.important {
            qb.push(", important = ");
            qb.push_bind(important);
        }

        if let Some(status) = data.status {
            qb.push(", status = ");
            qb.push_bind(status);
        }

        if let Some(due_date) = data.due_date {
            qb.push(", due_date = ");
            qb.push_bind(due_date);
        }

        if let Some(target_quadrant) = data.target_quadrant {
            qb.push(", target_quadrant = ");
            qb.push_bind(target_quadrant);
        }

        if let Some(recurrence_days) = data.recurrence_days {
            qb.push(", recurrence_days = ");
            qb.push_bind(recurrence_days);
        }

        if let Some(recurrence_target) = data.recurrence_target {
            qb.push(", recurrence_target = ");
            qb.push_bind(recurrence_target);
        }

        if let Some(pending) = data.pending {
            qb.push(", pending = ");
            qb.push_bind(pending);
        }

        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.build().execute(&mut **tx).await?;

        Ok(())
    }
}
