//! Single-threaded timer queue driven by host clock ticks.
//!
//! The carousel never sleeps or spawns: hosts report the current time and the
//! queue hands back whatever came due, oldest first. Times are offsets from an
//! arbitrary host epoch.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle for cancelling a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    task: T,
    repeat: Option<Duration>,
}

/// One-shot and interval timers ordered by due time.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: BTreeMap<(Duration, TimerId), Entry<T>>,
    due_by_id: HashMap<TimerId, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }
}

impl<T: Clone> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, due: Duration, task: T, repeat: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert((due, id), Entry { task, repeat });
        self.due_by_id.insert(id, due);
        id
    }

    /// Run `task` once, `delay` after `now`.
    pub fn schedule_once(&mut self, now: Duration, delay: Duration, task: T) -> TimerId {
        self.insert(now + delay, task, None)
    }

    /// Run `task` every `period` starting one period after `now`.
    ///
    /// A zero period is bumped to 1 ms so polling always terminates.
    pub fn schedule_interval(&mut self, now: Duration, period: Duration, task: T) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.insert(now + period, task, Some(period))
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.due_by_id.remove(&id) {
            Some(due) => self.entries.remove(&(due, id)).is_some(),
            None => false,
        }
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// Interval timers are rescheduled one period after their due time.
    pub fn poll(&mut self, now: Duration) -> Option<(TimerId, T)> {
        let (&(due, id), _) = self.entries.first_key_value()?;
        if due > now {
            return None;
        }
        let entry = self.entries.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        if let Some(period) = entry.repeat {
            let next = due + period;
            self.entries.insert(
                (next, id),
                Entry {
                    task: entry.task.clone(),
                    repeat: Some(period),
                },
            );
            self.due_by_id.insert(id, next);
        }
        Some((id, entry.task))
    }

    /// Due time of the next pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    /// Whether a timer is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due_by_id.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.due_by_id.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_once_fires_when_due() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_once(ms(0), ms(300), "settle");
        assert!(queue.poll(ms(299)).is_none());
        assert_eq!(queue.poll(ms(300)), Some((id, "settle")));
        assert!(queue.poll(ms(1000)).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(ms(0), ms(300), "b");
        queue.schedule_once(ms(0), ms(100), "a");
        queue.schedule_once(ms(0), ms(300), "c");
        let order: Vec<&str> = std::iter::from_fn(|| queue.poll(ms(500)))
            .map(|(_, task)| task)
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_interval_repeats() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_interval(ms(0), ms(100), 7u8);
        let fired: Vec<_> = std::iter::from_fn(|| queue.poll(ms(350))).collect();
        assert_eq!(fired.len(), 3);
        assert!(queue.is_pending(id));
        assert_eq!(queue.next_due(), Some(ms(400)));
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_interval(ms(0), ms(100), ());
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(queue.poll(ms(1000)).is_none());
    }

    #[test]
    fn test_zero_period_terminates() {
        let mut queue = TimerQueue::new();
        queue.schedule_interval(ms(0), Duration::ZERO, ());
        let fired = std::iter::from_fn(|| queue.poll(ms(5))).count();
        assert_eq!(fired, 5);
    }

    #[test]
    fn test_clear() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(ms(0), ms(1), 1);
        queue.schedule_once(ms(0), ms(2), 2);
        queue.clear();
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.next_due(), None);
    }
}
