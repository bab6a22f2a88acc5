// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A host-agnostic timer queue.
//!
//! The engine never owns a clock. Hosts pass the current monotonic time (in
//! milliseconds) into every operation and drive due timers by calling
//! [`TooltipController::advance`](crate::TooltipController::advance); the
//! queue only owns deadlines. [`TimerQueue::next_deadline`] tells the host
//! when to wake up next.
//!
//! Every scheduled timer is identified by a [`TimerHandle`] so it can be
//! canceled explicitly when superseded; a canceled timer never fires.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_lifecycle::timers::TimerQueue;
//!
//! let mut timers: TimerQueue<&str> = TimerQueue::new();
//! let early = timers.schedule(100, "early");
//! let _late = timers.schedule(250, "late");
//!
//! assert_eq!(timers.next_deadline(), Some(100));
//! assert_eq!(timers.pop_due(150), Some((early, "early")));
//! assert_eq!(timers.pop_due(150), None); // "late" is not due yet
//! ```

use smallvec::SmallVec;

/// Identifies one scheduled timer. Stale handles (already fired or canceled)
/// are ignored by [`TimerQueue::cancel`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    handle: TimerHandle,
    deadline: u64,
    payload: T,
}

/// A small deadline-ordered timer queue.
///
/// Timers with equal deadlines fire in scheduling order (handles increase
/// monotonically and serve as the tie-break).
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    next_handle: u64,
    entries: SmallVec<[Entry<T>; 4]>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            entries: SmallVec::new(),
        }
    }

    /// Schedule a timer at an absolute deadline.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            deadline,
            payload,
        });
        handle
    }

    /// Cancel a scheduled timer. Returns `false` for stale handles.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Pop the earliest timer whose deadline is at or before `now`.
    ///
    /// Call in a loop to drain everything due; timers scheduled during the
    /// drain with an already-elapsed deadline are picked up by the same loop.
    pub fn pop_due(&mut self, now: u64) -> Option<(TimerHandle, T)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.deadline, e.handle.0))
            .filter(|(_, e)| e.deadline <= now)
            .map(|(index, _)| index)?;
        let entry = self.entries.remove(index);
        Some((entry.handle, entry.payload))
    }

    /// The earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Remove all pending timers.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
