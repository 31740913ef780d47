//! Virtual-clock task scheduler.
//!
//! Delayed work (row animations, batch advance) is queued here instead of on
//! wall-clock timers. The host advances the clock explicitly: tests jump it
//! forward, the GUI feeds it elapsed frame time. Tasks fire in
//! (due time, insertion order) and can be cancelled by id before they fire.

use std::collections::{BTreeMap, HashMap};

/// Cancellation token for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// A queue of tasks ordered by virtual due time.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    queue: BTreeMap<(u64, TaskId), T>,
    due_by_id: HashMap<TaskId, u64>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            queue: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Queues `task` to fire `delay_ms` after the current virtual time.
    pub fn schedule_after(&mut self, delay_ms: u64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((due, id), task);
        self.due_by_id.insert(id, due);
        id
    }

    /// Removes a pending task. Returns the task if it had not fired yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let due = self.due_by_id.remove(&id)?;
        self.queue.remove(&(due, id))
    }

    /// Removes every pending task matching `predicate`.
    ///
    /// # Returns
    /// Number of tasks removed
    pub fn cancel_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let doomed: Vec<(u64, TaskId)> = self
            .queue
            .iter()
            .filter(|(_, task)| predicate(task))
            .map(|(key, _)| *key)
            .collect();
        for key in &doomed {
            self.queue.remove(key);
            self.due_by_id.remove(&key.1);
        }
        doomed.len()
    }

    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.due_by_id.clear();
    }

    /// Pops the earliest task due at or before `until_ms`, moving the clock to
    /// its due time.
    ///
    /// Tasks scheduled while handling a popped task are visible to the next
    /// call, so a single advance can run a whole chain of short delays.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TaskId, T)> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > until_ms {
            return None;
        }
        let task = self.queue.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        self.now_ms = self.now_ms.max(due);
        Some((id, task))
    }

    /// Moves the clock forward without firing anything. Never moves backwards.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler<&'static str>, until: u64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some((_, task)) = scheduler.pop_due(until) {
            fired.push(task);
        }
        scheduler.set_now(until);
        fired
    }

    #[test]
    fn test_fires_in_due_then_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(400, "late");
        scheduler.schedule_after(100, "first");
        scheduler.schedule_after(100, "second");

        assert_eq!(drain(&mut scheduler, 99), Vec::<&str>::new());
        assert_eq!(drain(&mut scheduler, 100), vec!["first", "second"]);
        assert_eq!(scheduler.now_ms(), 100);
        assert_eq!(drain(&mut scheduler, 1000), vec!["late"]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_after(10, "gone");
        scheduler.schedule_after(20, "kept");
        assert_eq!(scheduler.cancel(id), Some("gone"));
        assert_eq!(scheduler.cancel(id), None);
        assert_eq!(drain(&mut scheduler, 50), vec!["kept"]);
    }

    #[test]
    fn test_cancel_where() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(10, "row");
        scheduler.schedule_after(10, "batch");
        scheduler.schedule_after(30, "row");
        assert_eq!(scheduler.cancel_where(|t| *t == "row"), 2);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.next_due(), Some(10));
    }

    #[test]
    fn test_delays_are_relative_to_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.set_now(1_000);
        scheduler.schedule_after(500, "x");
        assert_eq!(scheduler.next_due(), Some(1_500));
        scheduler.set_now(10);
        assert_eq!(scheduler.now_ms(), 1_000);
    }
}
