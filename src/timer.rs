//! Single-owner timer slots on a simulated session clock.
//!
//! A slot holds at most one scheduled task. Arming it revokes whatever it
//! held before, so two tasks of the same kind can never be live together.
//! Deadlines are `Duration`s since session start; nothing sleeps, the owner
//! polls the slot with the current time.

use std::time::Duration;

/// Identifies one arming of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledTask {
    handle: TimerHandle,
    deadline: Duration,
    period: Option<Duration>,
}

/// Holder for at most one live timer
#[derive(Debug, Default)]
pub struct TimerSlot {
    task: Option<ScheduledTask>,
    generation: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot task firing `delay` after `now`
    pub fn arm_once(&mut self, now: Duration, delay: Duration) -> TimerHandle {
        self.arm(now.saturating_add(delay), None)
    }

    /// Arm a repeating task first firing `period` after `now`
    ///
    /// A zero period is treated as one nanosecond so catch-up always ends.
    pub fn arm_repeating(&mut self, now: Duration, period: Duration) -> TimerHandle {
        let period = period.max(Duration::from_nanos(1));
        self.arm(now.saturating_add(period), Some(period))
    }

    fn arm(&mut self, deadline: Duration, period: Option<Duration>) -> TimerHandle {
        self.generation += 1;
        let handle = TimerHandle(self.generation);
        self.task = Some(ScheduledTask {
            handle,
            deadline,
            period,
        });
        handle
    }

    /// Revoke the live task, if any
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.task.take().map(|task| task.handle)
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// Deadline of the next firing
    pub fn deadline(&self) -> Option<Duration> {
        self.task.map(|task| task.deadline)
    }

    /// Consume one firing that is due at `now`
    ///
    /// Returns the deadline the firing was scheduled for. One-shot tasks are
    /// cleared; repeating tasks move their deadline forward by one period.
    /// Call repeatedly to catch up on several missed firings.
    pub fn take_due(&mut self, now: Duration) -> Option<Duration> {
        let task = self.task.as_mut()?;
        if task.deadline > now {
            return None;
        }

        let fired_at = task.deadline;
        match task.period {
            Some(period) => task.deadline = fired_at.saturating_add(period),
            None => self.task = None,
        }
        Some(fired_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_one_shot_fires_once_at_deadline() {
        let mut slot = TimerSlot::new();
        slot.arm_once(ms(100), ms(2000));

        assert_eq!(slot.take_due(ms(2099)), None);
        assert_eq!(slot.take_due(ms(2100)), Some(ms(2100)));
        assert_eq!(slot.take_due(ms(5000)), None);
        assert!(!slot.is_armed());
    }

    #[test]
    fn test_repeating_catches_up_missed_firings() {
        let mut slot = TimerSlot::new();
        slot.arm_repeating(ms(0), ms(2000));

        let mut fired = Vec::new();
        while let Some(at) = slot.take_due(ms(7000)) {
            fired.push(at);
        }

        assert_eq!(fired, vec![ms(2000), ms(4000), ms(6000)]);
        assert_eq!(slot.deadline(), Some(ms(8000)));
    }

    #[test]
    fn test_rearming_revokes_previous_task() {
        let mut slot = TimerSlot::new();
        let first = slot.arm_once(ms(0), ms(2000));
        let second = slot.arm_once(ms(1500), ms(2000));

        assert_ne!(first, second);
        assert_eq!(slot.deadline(), Some(ms(3500)));
        assert_eq!(slot.take_due(ms(2000)), None);
        assert_eq!(slot.take_due(ms(3500)), Some(ms(3500)));
    }

    #[test]
    fn test_cancel_returns_live_handle() {
        let mut slot = TimerSlot::new();
        assert_eq!(slot.cancel(), None);

        let handle = slot.arm_repeating(ms(0), ms(10));
        assert_eq!(slot.cancel(), Some(handle));
        assert_eq!(slot.take_due(ms(1000)), None);
    }

    #[test]
    fn test_zero_period_still_terminates() {
        let mut slot = TimerSlot::new();
        slot.arm_repeating(ms(0), Duration::ZERO);

        let mut count = 0;
        while slot.take_due(Duration::from_nanos(5)).is_some() {
            count += 1;
        }
        assert_eq!(count, 5);
    }
}
