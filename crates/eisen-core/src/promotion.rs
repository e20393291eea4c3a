//! Quadrant promotion engine.
//!
//! A scheduled task carries a `due_date` and a `target_quadrant`. While it
//! waits, the engine decides when it should surface:
//!
//! - shortly before the due date it is pre-staged into a *buffer* quadrant,
//!   which keeps the target's importance but strips its urgency;
//! - once the due date arrives it moves into the target quadrant and its
//!   scheduling fields are cleared.
//!
//! The buffer window grows with the task's total lead time (creation to due
//! date). Everything here is pure: callers pass `now` and persist the
//! [`UpdateTaskData`] a decision produces.

use crate::error::CoreError;
use crate::models::{Quadrant, Task, TaskStatus, UpdateTaskData};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Upper bound for "plan in time" requests, in days.
pub const MAX_SCHEDULE_DAYS: i64 = 730;

/// Whole days from `from` to `to`, rounding any partial day up.
pub fn days_until(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let millis = (to - from).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Days left until a scheduled task is due, `None` for unscheduled tasks.
pub fn days_left(task: &Task, now: DateTime<Utc>) -> Option<i64> {
    task.due_date.map(|due_date| days_until(now, due_date))
}

/// Length of the buffer window for a task with `total_lead_days` of lead time.
///
/// | lead time | buffer |
/// |-----------|--------|
/// | ≤ 5       | 1      |
/// | ≤ 10      | 2      |
/// | ≤ 20      | 3      |
/// | ≤ 60      | 7      |
/// | > 60      | 14     |
///
/// Zero and negative lead times fall into the first row.
pub fn buffer_lead_days(total_lead_days: i64) -> i64 {
    match total_lead_days {
        i64::MIN..=5 => 1,
        6..=10 => 2,
        11..=20 => 3,
        21..=60 => 7,
        _ => 14,
    }
}

/// Quadrant a task waits in before its target: importance kept, urgency dropped.
pub fn buffer_quadrant(target: Quadrant) -> Quadrant {
    match target {
        Quadrant::DoFirst => Quadrant::Schedule,
        Quadrant::Delegate => Quadrant::Eliminate,
        Quadrant::Schedule | Quadrant::Eliminate => target,
    }
}

/// One row of a [`BufferPolicy`]: lead times up to `up_to_days` get `buffer_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferTier {
    pub up_to_days: i64,
    pub buffer_days: i64,
}

/// Step function mapping lead time to buffer length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferPolicy {
    tiers: Vec<BufferTier>,
    max_days: i64,
}

impl BufferPolicy {
    /// Builds a policy, rejecting tables that would not be monotonic.
    pub fn new(tiers: Vec<BufferTier>, max_days: i64) -> Result<Self, CoreError> {
        let mut previous: Option<BufferTier> = None;
        for tier in &tiers {
            if tier.buffer_days < 1 {
                return Err(CoreError::InvalidInput(format!(
                    "Buffer tier up to {} days must buffer at least one day",
                    tier.up_to_days
                )));
            }
            if let Some(prev) = previous {
                if tier.up_to_days <= prev.up_to_days {
                    return Err(CoreError::InvalidInput(
                        "Buffer tiers must be listed in ascending order of lead time".to_string(),
                    ));
                }
                if tier.buffer_days < prev.buffer_days {
                    return Err(CoreError::InvalidInput(
                        "Buffer tiers cannot shrink as lead time grows".to_string(),
                    ));
                }
            }
            previous = Some(*tier);
        }

        let floor = previous.map_or(1, |tier| tier.buffer_days);
        if max_days < floor {
            return Err(CoreError::InvalidInput(format!(
                "Maximum buffer of {} days is smaller than the last tier ({} days)",
                max_days, floor
            )));
        }

        Ok(Self { tiers, max_days })
    }

    pub fn tiers(&self) -> &[BufferTier] {
        &self.tiers
    }

    pub fn max_days(&self) -> i64 {
        self.max_days
    }

    pub fn lead_days(&self, total_lead_days: i64) -> i64 {
        self.tiers
            .iter()
            .find(|tier| total_lead_days <= tier.up_to_days)
            .map_or(self.max_days, |tier| tier.buffer_days)
    }
}

impl Default for BufferPolicy {
    fn default() -> Self {
        Self {
            tiers: vec![
                BufferTier { up_to_days: 5, buffer_days: 1 },
                BufferTier { up_to_days: 10, buffer_days: 2 },
                BufferTier { up_to_days: 20, buffer_days: 3 },
                BufferTier { up_to_days: 60, buffer_days: 7 },
            ],
            max_days: 14,
        }
    }
}

/// What should happen to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PromotionDecision {
    NoChange,
    /// Due date reached: place in `target`, clear the scheduling fields.
    PromoteToTarget { target: Quadrant },
    /// Inside the buffer window: place in `buffer`, keep waiting for the target.
    /// `due_date` is set when the due date itself moved (acceleration).
    PromoteToBuffer {
        buffer: Quadrant,
        due_date: Option<DateTime<Utc>>,
    },
    /// Only the due date moves.
    Reschedule { due_date: DateTime<Utc> },
}

impl PromotionDecision {
    pub fn is_change(&self) -> bool {
        !matches!(self, PromotionDecision::NoChange)
    }

    /// The fields the caller must persist, `None` for [`PromotionDecision::NoChange`].
    pub fn into_update(self) -> Option<UpdateTaskData> {
        match self {
            PromotionDecision::NoChange => None,
            PromotionDecision::PromoteToTarget { target } => Some(UpdateTaskData {
                due_date: Some(None),
                target_quadrant: Some(None),
                pending: Some(false),
                ..UpdateTaskData::placing(target)
            }),
            PromotionDecision::PromoteToBuffer { buffer, due_date } => Some(UpdateTaskData {
                due_date: due_date.map(Some),
                pending: Some(false),
                ..UpdateTaskData::placing(buffer)
            }),
            PromotionDecision::Reschedule { due_date } => Some(UpdateTaskData {
                due_date: Some(Some(due_date)),
                ..Default::default()
            }),
        }
    }
}

/// Outcome of cycling a task's status.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    Advanced(TaskStatus),
    /// Completion of a recurring task: it comes back instead of staying done.
    Rearmed(UpdateTaskData),
}

impl StatusChange {
    pub fn into_update(self) -> UpdateTaskData {
        match self {
            StatusChange::Advanced(status) => UpdateTaskData {
                status: Some(status),
                ..Default::default()
            },
            StatusChange::Rearmed(update) => update,
        }
    }
}

/// Preview of the stages a task goes through when scheduled `days_from_now` ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferPlan {
    pub target: Quadrant,
    pub buffer: Quadrant,
    pub buffer_days: i64,
    /// Days until the task shows up in the buffer quadrant.
    pub days_until_buffer: i64,
}

impl BufferPlan {
    /// Whether the task visibly passes through a separate buffer quadrant.
    pub fn has_buffer_stage(&self) -> bool {
        self.buffer != self.target && self.days_until_buffer > 0
    }
}

/// Evaluates scheduled tasks against a [`BufferPolicy`].
#[derive(Debug, Clone, Default)]
pub struct PromotionEngine {
    policy: BufferPolicy,
}

impl PromotionEngine {
    pub fn new(policy: BufferPolicy) -> Self {
        Self { policy }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn policy(&self) -> &BufferPolicy {
        &self.policy
    }

    /// Decides whether `task` should move at `now`. Unscheduled tasks never do.
    pub fn evaluate(&self, task: &Task, now: DateTime<Utc>) -> PromotionDecision {
        let Some((due_date, target)) = task.schedule() else {
            return PromotionDecision::NoChange;
        };

        let days_left = days_until(now, due_date);
        if days_left <= 0 {
            return PromotionDecision::PromoteToTarget { target };
        }

        let total_lead_days = days_until(task.created_at, due_date);
        let buffer_days = self.policy.lead_days(total_lead_days);
        let buffer = buffer_quadrant(target);
        // A task still parked in pending has to surface even if its flags already match.
        if days_left <= buffer_days && (task.pending || task.quadrant() != buffer) {
            PromotionDecision::PromoteToBuffer { buffer, due_date: None }
        } else {
            PromotionDecision::NoChange
        }
    }

    /// Pulls a scheduled task's due date `reduce_days` closer.
    ///
    /// The buffer window is sized from the task's recurrence interval when it
    /// has one, otherwise from `current_days_left`.
    pub fn accelerate(
        &self,
        task: &Task,
        reduce_days: i64,
        current_days_left: i64,
    ) -> Result<PromotionDecision, CoreError> {
        let (due_date, target) = task.schedule().ok_or_else(|| {
            CoreError::InvalidInput(format!("Task '{}' is not scheduled", task.title))
        })?;
        if reduce_days < 1 || reduce_days > current_days_left {
            return Err(CoreError::InvalidInput(format!(
                "Can only bring the task forward by 1 to {} days, got {}",
                current_days_left.max(1),
                reduce_days
            )));
        }

        let new_days_left = current_days_left - reduce_days;
        if new_days_left <= 0 {
            return Ok(PromotionDecision::PromoteToTarget { target });
        }

        let new_due_date = due_date - Duration::days(reduce_days);
        let original_days = task.recurrence_days.unwrap_or(current_days_left);
        if new_days_left <= self.policy.lead_days(original_days) {
            Ok(PromotionDecision::PromoteToBuffer {
                buffer: buffer_quadrant(target),
                due_date: Some(new_due_date),
            })
        } else {
            Ok(PromotionDecision::Reschedule { due_date: new_due_date })
        }
    }

    /// The buffer quadrant of a scheduled task and the moment it enters it.
    pub fn buffer_start(&self, task: &Task) -> Option<(Quadrant, DateTime<Utc>)> {
        let (due_date, target) = task.schedule()?;
        let buffer_days = self.policy.lead_days(days_until(task.created_at, due_date));
        Some((buffer_quadrant(target), due_date - Duration::days(buffer_days)))
    }

    pub fn buffer_plan(&self, days_from_now: i64, target: Quadrant) -> BufferPlan {
        let buffer_days = self.policy.lead_days(days_from_now);
        BufferPlan {
            target,
            buffer: buffer_quadrant(target),
            buffer_days,
            days_until_buffer: days_from_now - buffer_days,
        }
    }
}

/// [`PromotionEngine::evaluate`] with the default buffer table.
pub fn evaluate(task: &Task, now: DateTime<Utc>) -> PromotionDecision {
    PromotionEngine::default().evaluate(task, now)
}

/// [`PromotionEngine::accelerate`] with the default buffer table.
pub fn accelerate(
    task: &Task,
    reduce_days: i64,
    current_days_left: i64,
) -> Result<PromotionDecision, CoreError> {
    PromotionEngine::default().accelerate(task, reduce_days, current_days_left)
}

/// Update that re-arms a completed recurring task, `None` if it does not recur.
///
/// The task comes back into its pending target, else the quadrant it was
/// scheduled for, else wherever it sits now. Intervals are clamped to
/// `1..=MAX_SCHEDULE_DAYS`.
pub fn complete_recurrence(task: &Task, now: DateTime<Utc>) -> Option<UpdateTaskData> {
    let days = task.recurrence_days?.clamp(1, MAX_SCHEDULE_DAYS);
    let target = task
        .target_quadrant
        .or(task.recurrence_target)
        .unwrap_or_else(|| task.quadrant());
    Some(UpdateTaskData {
        status: Some(TaskStatus::Todo),
        due_date: Some(Some(now + Duration::days(days))),
        target_quadrant: Some(Some(target)),
        recurrence_target: Some(Some(target)),
        urgent: Some(false),
        important: Some(false),
        pending: Some(true),
        ..Default::default()
    })
}

/// Next step of the status cycle, re-arming recurring tasks instead of finishing them.
pub fn next_status(task: &Task, now: DateTime<Utc>) -> StatusChange {
    let next = task.status.next();
    if next == TaskStatus::Done {
        if let Some(update) = complete_recurrence(task, now) {
            return StatusChange::Rearmed(update);
        }
    }
    StatusChange::Advanced(next)
}

/// "Plan in time": the task comes back into `target` after `days_from_now`
/// days, and again every `days_from_now` days once completed.
pub fn schedule(
    days_from_now: i64,
    target: Quadrant,
    now: DateTime<Utc>,
) -> Result<UpdateTaskData, CoreError> {
    if !(1..=MAX_SCHEDULE_DAYS).contains(&days_from_now) {
        return Err(CoreError::InvalidInput(format!(
            "Days must be between 1 and {}, got {}",
            MAX_SCHEDULE_DAYS, days_from_now
        )));
    }
    Ok(UpdateTaskData {
        due_date: Some(Some(now + Duration::days(days_from_now))),
        target_quadrant: Some(Some(target)),
        recurrence_days: Some(Some(days_from_now)),
        recurrence_target: Some(Some(target)),
        pending: Some(true),
        ..Default::default()
    })
}

/// Manual placement into `quadrant`. A scheduled task stops waiting; its
/// recurrence interval and return quadrant survive.
pub fn move_to_quadrant(task: &Task, quadrant: Quadrant) -> UpdateTaskData {
    let mut update = UpdateTaskData {
        pending: Some(false),
        ..UpdateTaskData::placing(quadrant)
    };
    if task.status == TaskStatus::Done {
        update.status = Some(TaskStatus::Todo);
    }
    if task.due_date.is_some() || task.target_quadrant.is_some() {
        update.due_date = Some(None);
        update.target_quadrant = Some(None);
    }
    update
}

/// Takes a task out of the matrix and back into the pending bucket.
pub fn send_to_pending() -> UpdateTaskData {
    UpdateTaskData {
        urgent: Some(false),
        important: Some(false),
        pending: Some(true),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{get_quadrant, quadrant_to_flags, QuadrantFlags};
    use proptest::prelude::*;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn scheduled_task(
        created_at: DateTime<Utc>,
        due_date: DateTime<Utc>,
        target: Quadrant,
    ) -> Task {
        Task {
            title: "Pay rent".to_string(),
            due_date: Some(due_date),
            target_quadrant: Some(target),
            created_at,
            updated_at: created_at,
            ..Default::default()
        }
    }

    fn apply(task: &mut Task, decision: PromotionDecision) {
        if let Some(update) = decision.into_update() {
            update.apply_to(task);
        }
    }

    mod days_until_tests {
        use super::*;

        #[test]
        fn test_partial_days_round_up() {
            let n = now();
            assert_eq!(days_until(n, n), 0);
            assert_eq!(days_until(n, n + Duration::hours(1)), 1);
            assert_eq!(days_until(n, n + Duration::days(1)), 1);
            assert_eq!(days_until(n, n + Duration::days(1) + Duration::milliseconds(1)), 2);
        }

        #[test]
        fn test_past_dates() {
            let n = now();
            assert_eq!(days_until(n, n - Duration::hours(1)), 0);
            assert_eq!(days_until(n, n - Duration::days(1)), -1);
            assert_eq!(days_until(n, n - Duration::hours(36)), -1);
        }
    }

    mod buffer_tests {
        use super::*;

        #[rstest]
        #[case(-3, 1)]
        #[case(0, 1)]
        #[case(5, 1)]
        #[case(6, 2)]
        #[case(10, 2)]
        #[case(11, 3)]
        #[case(20, 3)]
        #[case(21, 7)]
        #[case(60, 7)]
        #[case(61, 14)]
        #[case(365, 14)]
        fn test_buffer_lead_days_table(#[case] total: i64, #[case] expected: i64) {
            assert_eq!(buffer_lead_days(total), expected);
            assert_eq!(BufferPolicy::default().lead_days(total), expected);
        }

        #[rstest]
        #[case(Quadrant::DoFirst, Quadrant::Schedule)]
        #[case(Quadrant::Schedule, Quadrant::Schedule)]
        #[case(Quadrant::Delegate, Quadrant::Eliminate)]
        #[case(Quadrant::Eliminate, Quadrant::Eliminate)]
        fn test_buffer_quadrant_strips_urgency(#[case] target: Quadrant, #[case] expected: Quadrant) {
            let buffer = buffer_quadrant(target);
            assert_eq!(buffer, expected);
            assert!(!buffer.flags().urgent);
            assert_eq!(buffer.flags().important, target.flags().important);
        }

        #[test]
        fn test_custom_policy() {
            let policy = BufferPolicy::new(
                vec![
                    BufferTier { up_to_days: 3, buffer_days: 1 },
                    BufferTier { up_to_days: 30, buffer_days: 5 },
                ],
                10,
            )
            .unwrap();
            assert_eq!(policy.lead_days(2), 1);
            assert_eq!(policy.lead_days(4), 5);
            assert_eq!(policy.lead_days(31), 10);
        }

        #[test]
        fn test_policy_rejects_non_monotonic_tables() {
            let unordered = BufferPolicy::new(
                vec![
                    BufferTier { up_to_days: 10, buffer_days: 2 },
                    BufferTier { up_to_days: 5, buffer_days: 3 },
                ],
                14,
            );
            assert!(matches!(unordered, Err(CoreError::InvalidInput(_))));

            let shrinking = BufferPolicy::new(
                vec![
                    BufferTier { up_to_days: 5, buffer_days: 3 },
                    BufferTier { up_to_days: 10, buffer_days: 2 },
                ],
                14,
            );
            assert!(matches!(shrinking, Err(CoreError::InvalidInput(_))));

            let small_max = BufferPolicy::new(vec![BufferTier { up_to_days: 5, buffer_days: 3 }], 2);
            assert!(matches!(small_max, Err(CoreError::InvalidInput(_))));

            let zero = BufferPolicy::new(vec![BufferTier { up_to_days: 5, buffer_days: 0 }], 2);
            assert!(matches!(zero, Err(CoreError::InvalidInput(_))));
        }

        #[test]
        fn test_buffer_plan() {
            let engine = PromotionEngine::with_defaults();
            let plan = engine.buffer_plan(14, Quadrant::DoFirst);
            assert_eq!(plan.buffer, Quadrant::Schedule);
            assert_eq!(plan.buffer_days, 3);
            assert_eq!(plan.days_until_buffer, 11);
            assert!(plan.has_buffer_stage());

            assert!(!engine.buffer_plan(14, Quadrant::Schedule).has_buffer_stage());

            let n = now();
            let due = n + Duration::days(14);
            let task = scheduled_task(n, due, Quadrant::Delegate);
            assert_eq!(
                engine.buffer_start(&task),
                Some((Quadrant::Eliminate, due - Duration::days(3)))
            );
            assert_eq!(engine.buffer_start(&Task::default()), None);
            assert!(!engine.buffer_plan(1, Quadrant::DoFirst).has_buffer_stage());
        }
    }

    mod evaluate_tests {
        use super::*;

        #[test]
        fn test_unscheduled_task_never_moves() {
            let task = Task {
                title: "Loose end".to_string(),
                ..Default::default()
            };
            assert_eq!(evaluate(&task, now()), PromotionDecision::NoChange);
        }

        #[test]
        fn test_scenario_buffer_then_target() {
            let n = now();
            let due = n + Duration::days(3);
            let mut task = scheduled_task(n - Duration::days(4), due, Quadrant::DoFirst);

            // Lead time 7 days -> 2 day buffer.
            assert_eq!(evaluate(&task, n), PromotionDecision::NoChange);

            let buffer_time = due - Duration::days(2);
            let decision = evaluate(&task, buffer_time);
            assert_eq!(
                decision,
                PromotionDecision::PromoteToBuffer { buffer: Quadrant::Schedule, due_date: None }
            );
            apply(&mut task, decision);
            assert_eq!(task.quadrant(), Quadrant::Schedule);
            assert_eq!(task.due_date, Some(due));
            assert_eq!(task.target_quadrant, Some(Quadrant::DoFirst));
            assert!(!task.pending);

            let decision = evaluate(&task, due);
            assert_eq!(decision, PromotionDecision::PromoteToTarget { target: Quadrant::DoFirst });
            apply(&mut task, decision);
            assert!(task.urgent && task.important);
            assert_eq!(task.due_date, None);
            assert_eq!(task.target_quadrant, None);
            assert_eq!(evaluate(&task, due), PromotionDecision::NoChange);
        }

        #[test]
        fn test_overdue_task_goes_straight_to_target() {
            let n = now();
            let task = scheduled_task(n - Duration::days(30), n - Duration::days(2), Quadrant::Delegate);
            assert_eq!(
                evaluate(&task, n),
                PromotionDecision::PromoteToTarget { target: Quadrant::Delegate }
            );
        }

        #[test]
        fn test_schedule_target_only_fires_when_flags_differ() {
            let n = now();
            let due = n + Duration::days(1);
            let mut task = scheduled_task(n - Duration::days(2), due, Quadrant::Schedule);
            assert_eq!(buffer_quadrant(Quadrant::Schedule), Quadrant::Schedule);

            // Pending tasks carry eliminate flags, so the buffer is a visible move.
            assert_eq!(
                evaluate(&task, n),
                PromotionDecision::PromoteToBuffer { buffer: Quadrant::Schedule, due_date: None }
            );

            task.important = true;
            task.pending = false;
            assert_eq!(evaluate(&task, n), PromotionDecision::NoChange);
        }

        #[test]
        fn test_pending_task_surfaces_in_matching_buffer() {
            let n = now();
            let mut task = scheduled_task(n - Duration::days(2), n + Duration::days(1), Quadrant::Delegate);
            // Pending flags already read as eliminate, the delegate buffer.
            assert_eq!(task.quadrant(), Quadrant::Eliminate);
            let decision = evaluate(&task, n);
            assert_eq!(
                decision,
                PromotionDecision::PromoteToBuffer { buffer: Quadrant::Eliminate, due_date: None }
            );
            apply(&mut task, decision);
            assert!(!task.pending);
            assert_eq!(evaluate(&task, n), PromotionDecision::NoChange);
        }

        #[test]
        fn test_custom_policy_widens_window() {
            let n = now();
            let task = scheduled_task(n - Duration::days(4), n + Duration::days(3), Quadrant::DoFirst);
            let engine = PromotionEngine::new(
                BufferPolicy::new(vec![BufferTier { up_to_days: 10, buffer_days: 3 }], 5).unwrap(),
            );
            assert!(engine.evaluate(&task, n).is_change());
            assert!(!evaluate(&task, n).is_change());
        }
    }

    mod accelerate_tests {
        use super::*;

        #[test]
        fn test_reduce_to_zero_promotes_to_target() {
            let n = now();
            let task = scheduled_task(n, n + Duration::days(5), Quadrant::Delegate);
            assert_eq!(
                accelerate(&task, 5, 5).unwrap(),
                PromotionDecision::PromoteToTarget { target: Quadrant::Delegate }
            );
        }

        #[test]
        fn test_reduce_into_buffer_window() {
            let n = now();
            let due = n + Duration::days(10);
            let task = scheduled_task(n, due, Quadrant::DoFirst);
            // 10 days of lead -> 2 day buffer; 10 - 8 = 2 days left.
            let decision = accelerate(&task, 8, 10).unwrap();
            assert_eq!(
                decision,
                PromotionDecision::PromoteToBuffer {
                    buffer: Quadrant::Schedule,
                    due_date: Some(due - Duration::days(8)),
                }
            );
            let update = decision.into_update().unwrap();
            assert_eq!(update.urgent, Some(false));
            assert_eq!(update.important, Some(true));
            assert_eq!(update.due_date, Some(Some(due - Duration::days(8))));
            assert_eq!(update.target_quadrant, None);
        }

        #[test]
        fn test_reduce_outside_window_only_moves_due_date() {
            let n = now();
            let due = n + Duration::days(30);
            let task = scheduled_task(n, due, Quadrant::DoFirst);
            let decision = accelerate(&task, 10, 30).unwrap();
            assert_eq!(decision, PromotionDecision::Reschedule { due_date: due - Duration::days(10) });
            let update = decision.into_update().unwrap();
            assert_eq!(update.urgent, None);
            assert_eq!(update.pending, None);
        }

        #[test]
        fn test_recurrence_interval_sizes_window() {
            let n = now();
            let due = n + Duration::days(30);
            let mut task = scheduled_task(n, due, Quadrant::DoFirst);
            task.recurrence_days = Some(90);
            // 90 day interval -> 14 day buffer; 30 - 20 = 10 days left.
            assert!(matches!(
                accelerate(&task, 20, 30).unwrap(),
                PromotionDecision::PromoteToBuffer { .. }
            ));
        }

        #[rstest]
        #[case(0, 5)]
        #[case(6, 5)]
        #[case(-1, 5)]
        fn test_rejects_out_of_range_reduction(#[case] reduce: i64, #[case] left: i64) {
            let n = now();
            let task = scheduled_task(n, n + Duration::days(5), Quadrant::DoFirst);
            assert!(matches!(accelerate(&task, reduce, left), Err(CoreError::InvalidInput(_))));
        }

        #[test]
        fn test_rejects_unscheduled_task() {
            let task = Task::default();
            assert!(matches!(accelerate(&task, 1, 3), Err(CoreError::InvalidInput(_))));
        }
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn test_completed_recurring_task_is_rearmed() {
            let n = now();
            let task = Task {
                title: "Water plants".to_string(),
                urgent: true,
                important: true,
                status: TaskStatus::InProgress,
                recurrence_days: Some(14),
                target_quadrant: None,
                pending: false,
                ..Default::default()
            };

            let update = match next_status(&task, n) {
                StatusChange::Rearmed(update) => update,
                other => panic!("Expected rearm, got {:?}", other),
            };
            assert_eq!(update.status, Some(TaskStatus::Todo));
            assert_eq!(update.due_date, Some(Some(n + Duration::days(14))));
            assert_eq!(update.urgent, Some(false));
            assert_eq!(update.important, Some(false));
            assert_eq!(update.pending, Some(true));
            // No target left: falls back to where the task was.
            assert_eq!(update.target_quadrant, Some(Some(Quadrant::DoFirst)));
        }

        #[test]
        fn test_rearm_keeps_target_quadrant() {
            let mut task = Task {
                recurrence_days: Some(14),
                target_quadrant: Some(Quadrant::Delegate),
                due_date: Some(now()),
                ..Default::default()
            };
            let update = complete_recurrence(&task, now()).unwrap();
            assert_eq!(update.target_quadrant, Some(Some(Quadrant::Delegate)));

            task.recurrence_days = None;
            assert!(complete_recurrence(&task, now()).is_none());
        }

        #[test]
        fn test_rearm_clamps_oversized_interval() {
            let n = now();
            let task = Task {
                recurrence_days: Some(100_000_000),
                ..Default::default()
            };
            let update = complete_recurrence(&task, n).unwrap();
            assert_eq!(update.due_date, Some(Some(n + Duration::days(MAX_SCHEDULE_DAYS))));
        }

        #[test]
        fn test_plain_task_status_cycle() {
            let mut task = Task::default();
            for expected in [TaskStatus::InProgress, TaskStatus::Done, TaskStatus::Todo] {
                let change = next_status(&task, now());
                assert_eq!(change, StatusChange::Advanced(expected));
                change.into_update().apply_to(&mut task);
                assert_eq!(task.status, expected);
            }
        }

        #[test]
        fn test_schedule_sets_due_target_and_interval() {
            let n = now();
            let update = schedule(7, Quadrant::DoFirst, n).unwrap();
            assert_eq!(update.due_date, Some(Some(n + Duration::days(7))));
            assert_eq!(update.target_quadrant, Some(Some(Quadrant::DoFirst)));
            assert_eq!(update.recurrence_days, Some(Some(7)));
            assert_eq!(update.recurrence_target, Some(Some(Quadrant::DoFirst)));
            assert_eq!(update.pending, Some(true));

            assert!(schedule(0, Quadrant::DoFirst, n).is_err());
            assert!(schedule(MAX_SCHEDULE_DAYS + 1, Quadrant::DoFirst, n).is_err());
        }

        #[test]
        fn test_move_clears_schedule_but_keeps_interval() {
            let mut task = Task::default();
            schedule(3, Quadrant::DoFirst, now()).unwrap().apply_to(&mut task);
            task.status = TaskStatus::Done;

            move_to_quadrant(&task, Quadrant::Delegate).apply_to(&mut task);
            assert_eq!(task.quadrant(), Quadrant::Delegate);
            assert_eq!(task.status, TaskStatus::Todo);
            assert_eq!(task.due_date, None);
            assert_eq!(task.target_quadrant, None);
            assert_eq!(task.recurrence_days, Some(3));
            assert_eq!(task.recurrence_target, Some(Quadrant::DoFirst));
            assert!(!task.pending);

            // Completion after the move goes back to the scheduled quadrant.
            let update = complete_recurrence(&task, now()).unwrap();
            assert_eq!(update.target_quadrant, Some(Some(Quadrant::DoFirst)));
        }

        #[test]
        fn test_send_to_pending_resets_flags() {
            let mut task = Task {
                urgent: true,
                important: true,
                pending: false,
                ..Default::default()
            };
            send_to_pending().apply_to(&mut task);
            assert!(task.pending);
            assert_eq!(task.flags(), QuadrantFlags::default());
        }
    }

    fn any_quadrant() -> impl Strategy<Value = Quadrant> {
        prop_oneof![
            Just(Quadrant::DoFirst),
            Just(Quadrant::Schedule),
            Just(Quadrant::Delegate),
            Just(Quadrant::Eliminate),
        ]
    }

    proptest! {
        #[test]
        fn prop_buffer_lead_days_is_monotonic(a in -1000i64..1000, b in -1000i64..1000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(buffer_lead_days(lo) <= buffer_lead_days(hi));
        }

        #[test]
        fn prop_buffer_quadrant_is_idempotent(q in any_quadrant()) {
            prop_assert_eq!(buffer_quadrant(buffer_quadrant(q)), buffer_quadrant(q));
        }

        #[test]
        fn prop_flags_round_trip(urgent: bool, important: bool) {
            let flags = QuadrantFlags::new(urgent, important);
            prop_assert_eq!(quadrant_to_flags(get_quadrant(flags)), flags);
        }

        #[test]
        fn prop_evaluate_reaches_fixed_point(
            lead_hours in 1i64..(200 * 24),
            elapsed_hours in 0i64..(220 * 24),
            target in any_quadrant(),
            current in any_quadrant(),
        ) {
            let created = now();
            let due = created + Duration::hours(lead_hours);
            let at = created + Duration::hours(elapsed_hours);
            let mut task = scheduled_task(created, due, target);
            let flags = quadrant_to_flags(current);
            task.urgent = flags.urgent;
            task.important = flags.important;

            let first = evaluate(&task, at);
            prop_assert_eq!(first, evaluate(&task, at));
            apply(&mut task, first);
            prop_assert_eq!(evaluate(&task, at), PromotionDecision::NoChange);
        }
    }
}
