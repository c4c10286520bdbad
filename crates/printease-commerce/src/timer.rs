//! Single-shot timers on a virtual clock.
//!
//! The storefront has three kinds of delayed work: notification dismissal,
//! simulated submission latency and the post-checkout redirect. All of them
//! go through a [`TimerQueue`], which never reads the wall clock. Callers
//! move time forward with [`TimerQueue::advance`]; the CLI does that after
//! sleeping, tests do it directly.

use std::time::Duration;

/// Handle for cancelling a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<E> {
    handle: TimerHandle,
    deadline: Duration,
    event: E,
}

/// Queue of pending timer events.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending<E>>,
}

impl<E> TimerQueue<E> {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to fire `delay` from now.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_seq);
        self.next_seq += 1;
        self.pending.push(Pending {
            handle,
            deadline: self.now.saturating_add(delay),
            event,
        });
        handle
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() < before
    }

    /// Check if a timer is still waiting to fire.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Time left until the earliest pending deadline.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(self.now))
    }

    /// Move time forward by `by` and return every event that became due.
    ///
    /// Events come out in deadline order; timers with equal deadlines fire
    /// in the order they were scheduled. Each event is returned exactly once.
    pub fn advance(&mut self, by: Duration) -> Vec<E> {
        self.now = self.now.saturating_add(by);
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.deadline <= now);
        self.pending = waiting;

        due.sort_by_key(|p| (p.deadline, p.handle));
        due.into_iter().map(|p| p.event).collect()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
