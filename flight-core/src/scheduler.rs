//! Cooperative scheduler for repeating and one-shot session tasks.
//!
//! The scheduler only decides *when* a task is due; the session decides
//! *what* a [`TaskAction`] does. It never reads the clock itself, callers
//! pass the current [`Instant`] in, which keeps it deterministic under test.
//!
//! # Example
//!
//! ```rust
//! use embassy_time::{Duration, Instant};
//! use flight_core::scheduler::{ScheduledTask, Scheduler, TaskAction, TaskKind};
//!
//! let start = Instant::from_millis(0);
//! let mut scheduler = Scheduler::new();
//! scheduler
//!     .register(
//!         ScheduledTask {
//!             name: "right_stick",
//!             kind: TaskKind::Repeating(Duration::from_millis(50)),
//!             action: TaskAction::RightStick,
//!         },
//!         start,
//!     )
//!     .unwrap();
//!
//! assert!(scheduler.poll(Instant::from_millis(49)).is_empty());
//! assert_eq!(scheduler.poll(Instant::from_millis(50)).as_slice(), &[TaskAction::RightStick]);
//! ```

use embassy_time::{Duration, Instant};
use heapless::Vec;

/// Maximum number of tasks a [`Scheduler`] holds.
pub const MAX_TASKS: usize = 8;

/// When a task runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskKind {
    /// Every `period`, first firing one period after registration.
    Repeating(Duration),
    /// Once, `delay` after registration.
    OneShot(Duration),
}

/// What a task does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskAction {
    /// Land regardless of stick state.
    SafetyLand,
    /// Report the latest telemetry snapshot.
    ReportTelemetry,
    /// Translate the right stick (pitch, roll).
    RightStick,
    /// Translate the left stick (vertical, yaw).
    LeftStick,
}

/// Task descriptor registered with the [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduledTask {
    /// Human-readable task name for logging.
    pub name: &'static str,
    pub kind: TaskKind,
    pub action: TaskAction,
}

/// Error type for scheduler operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// [`MAX_TASKS`] tasks are already registered.
    Full,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    task: ScheduledTask,
    /// `None` once a one-shot task has fired.
    next_due: Option<Instant>,
}

/// Fixed-capacity task table.
#[derive(Debug, Default)]
pub struct Scheduler {
    entries: Vec<Entry, MAX_TASKS>,
}

impl Scheduler {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register `task`, timing it from `now`.
    pub fn register(&mut self, task: ScheduledTask, now: Instant) -> Result<(), SchedulerError> {
        let delay = match task.kind {
            TaskKind::Repeating(period) => period,
            TaskKind::OneShot(delay) => delay,
        };
        self.entries
            .push(Entry {
                task,
                next_due: Some(now + delay),
            })
            .map_err(|_| SchedulerError::Full)?;
        debug!("Registered task {}", task.name);
        Ok(())
    }

    /// Number of registered tasks, including retired one-shots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every registered task.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Earliest instant at which any task is due, `None` if nothing is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().filter_map(|e| e.next_due).min()
    }

    /// Collect every action due at `now`, in registration order.
    ///
    /// A repeating task fires at most once per call. If `now` is more than one
    /// period past its deadline, the missed periods are skipped and the next
    /// deadline becomes the first period boundary after `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<TaskAction, MAX_TASKS> {
        let mut due = Vec::new();
        for entry in self.entries.iter_mut() {
            let Some(deadline) = entry.next_due else {
                continue;
            };
            if deadline > now {
                continue;
            }

            entry.next_due = match entry.task.kind {
                TaskKind::OneShot(_) => None,
                TaskKind::Repeating(period) => Some(next_boundary(deadline, period, now)),
            };

            // Capacity equals the task table size, so this cannot overflow.
            let _ = due.push(entry.task.action);
        }
        due
    }
}

/// First instant `deadline + k * period` (k >= 1) strictly after `now`.
fn next_boundary(deadline: Instant, period: Duration, now: Instant) -> Instant {
    let period_ticks = period.as_ticks();
    if period_ticks == 0 {
        return now;
    }
    let behind = now.as_ticks() - deadline.as_ticks();
    let skipped = behind / period_ticks + 1;
    deadline + Duration::from_ticks(skipped * period_ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &'static str, kind: TaskKind, action: TaskAction) -> ScheduledTask {
        ScheduledTask { name, kind, action }
    }

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn test_empty_scheduler() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_deadline(), None);
        assert!(scheduler.poll(ms(1_000)).is_empty());
    }

    #[test]
    fn test_repeating_first_fires_after_one_period() {
        let mut scheduler = Scheduler::new();
        let period = Duration::from_millis(50);
        scheduler
            .register(task("tick", TaskKind::Repeating(period), TaskAction::RightStick), ms(0))
            .unwrap();

        assert_eq!(scheduler.next_deadline(), Some(ms(50)));
        assert!(scheduler.poll(ms(0)).is_empty());
        assert!(scheduler.poll(ms(49)).is_empty());
        assert_eq!(scheduler.poll(ms(50)).as_slice(), &[TaskAction::RightStick]);
        assert_eq!(scheduler.next_deadline(), Some(ms(100)));
        assert!(scheduler.poll(ms(99)).is_empty());
        assert_eq!(scheduler.poll(ms(100)).as_slice(), &[TaskAction::RightStick]);
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut scheduler = Scheduler::new();
        scheduler
            .register(
                task("land", TaskKind::OneShot(Duration::from_secs(20)), TaskAction::SafetyLand),
                ms(0),
            )
            .unwrap();

        assert!(scheduler.poll(ms(19_999)).is_empty());
        assert_eq!(scheduler.poll(ms(20_000)).as_slice(), &[TaskAction::SafetyLand]);
        assert!(scheduler.poll(ms(40_000)).is_empty());
        assert_eq!(scheduler.next_deadline(), None);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_missed_periods_are_skipped() {
        let mut scheduler = Scheduler::new();
        scheduler
            .register(
                task("tick", TaskKind::Repeating(Duration::from_millis(50)), TaskAction::LeftStick),
                ms(0),
            )
            .unwrap();

        // 20 periods late: one firing, realigned to the 50 ms grid.
        assert_eq!(scheduler.poll(ms(1_020)).as_slice(), &[TaskAction::LeftStick]);
        assert_eq!(scheduler.next_deadline(), Some(ms(1_050)));
        assert!(scheduler.poll(ms(1_049)).is_empty());
    }

    #[test]
    fn test_due_actions_in_registration_order() {
        let mut scheduler = Scheduler::new();
        let second = Duration::from_secs(1);
        scheduler
            .register(task("land", TaskKind::OneShot(second), TaskAction::SafetyLand), ms(0))
            .unwrap();
        scheduler
            .register(task("report", TaskKind::Repeating(second), TaskAction::ReportTelemetry), ms(0))
            .unwrap();
        scheduler
            .register(
                task("right", TaskKind::Repeating(Duration::from_millis(50)), TaskAction::RightStick),
                ms(0),
            )
            .unwrap();

        assert_eq!(
            scheduler.poll(ms(1_000)).as_slice(),
            &[TaskAction::SafetyLand, TaskAction::ReportTelemetry, TaskAction::RightStick]
        );
    }

    #[test]
    fn test_stepped_simulation_counts() {
        let mut scheduler = Scheduler::new();
        scheduler
            .register(
                task("land", TaskKind::OneShot(Duration::from_secs(20)), TaskAction::SafetyLand),
                ms(0),
            )
            .unwrap();
        scheduler
            .register(
                task("report", TaskKind::Repeating(Duration::from_secs(1)), TaskAction::ReportTelemetry),
                ms(0),
            )
            .unwrap();
        scheduler
            .register(
                task("right", TaskKind::Repeating(Duration::from_millis(50)), TaskAction::RightStick),
                ms(0),
            )
            .unwrap();

        let (mut lands, mut reports, mut ticks) = (0, 0, 0);
        for step in 1..=400 {
            for action in scheduler.poll(ms(step * 50)) {
                match action {
                    TaskAction::SafetyLand => lands += 1,
                    TaskAction::ReportTelemetry => reports += 1,
                    TaskAction::RightStick => ticks += 1,
                    TaskAction::LeftStick => unreachable!(),
                }
            }
        }
        assert_eq!(lands, 1);
        assert_eq!(reports, 20);
        assert_eq!(ticks, 400);
    }

    #[test]
    fn test_register_full() {
        let mut scheduler = Scheduler::new();
        let t = task("tick", TaskKind::Repeating(Duration::from_millis(10)), TaskAction::LeftStick);
        for _ in 0..MAX_TASKS {
            scheduler.register(t, ms(0)).unwrap();
        }
        assert_eq!(scheduler.register(t, ms(0)), Err(SchedulerError::Full));
    }

    #[test]
    fn test_clear_drops_pending_tasks() {
        let mut scheduler = Scheduler::new();
        scheduler
            .register(task("land", TaskKind::OneShot(Duration::from_secs(1)), TaskAction::SafetyLand), ms(0))
            .unwrap();
        scheduler.clear();

        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_deadline(), None);
        assert!(scheduler.poll(ms(1_000)).is_empty());
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let mut scheduler = Scheduler::new();
        scheduler
            .register(task("a", TaskKind::OneShot(Duration::from_secs(20)), TaskAction::SafetyLand), ms(0))
            .unwrap();
        scheduler
            .register(task("b", TaskKind::Repeating(Duration::from_millis(50)), TaskAction::LeftStick), ms(0))
            .unwrap();
        assert_eq!(scheduler.next_deadline(), Some(ms(50)));
    }
}
