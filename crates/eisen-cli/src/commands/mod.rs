pub mod accelerate;
pub mod add;
pub mod delete;
pub mod r#do;
pub mod edit;
pub mod list;
pub mod r#move;
pub mod pending;
pub mod promote;
pub mod schedule;
pub mod show;
