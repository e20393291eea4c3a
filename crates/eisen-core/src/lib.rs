//! # Eisen Core Library
//!
//! Task storage and scheduling rules for an Eisenhower priority matrix.
//!
//! Tasks live in one of four quadrants derived from their `urgent` and
//! `important` flags. A task can also be *scheduled*: it waits outside the
//! matrix with a due date and a target quadrant, surfaces in a buffer
//! quadrant shortly before it is due, and lands in its target once the due
//! date arrives. Recurring tasks come back after completion.
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`promotion`]: Quadrant promotion, buffering and recurrence rules
//! - [`board`]: Splitting a task list into matrix sections
//! - [`repository`]: Data access layer with Repository pattern
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use eisen_core::{
//!     db, models::{NewTaskData, Quadrant},
//!     promotion::PromotionEngine,
//!     repository::{PromotionRepository, SqliteRepository, TaskRepository},
//! };
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("eisen.db").await?;
//!     let repo = SqliteRepository::new(pool, PromotionEngine::with_defaults());
//!
//!     let task = repo.add_task(NewTaskData {
//!         title: "File taxes".to_string(),
//!         ..Default::default()
//!     }).await?;
//!
//!     // Back in "do first" in 30 days, via "schedule" a week before.
//!     repo.schedule_task(task.id, 30, Quadrant::DoFirst, Utc::now()).await?;
//!
//!     for outcome in repo.refresh_promotions(Utc::now()).await? {
//!         println!("{}: {:?}", outcome.task.title, outcome.decision);
//!     }
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod db;
pub mod error;
pub mod models;
pub mod promotion;
pub mod repository;
