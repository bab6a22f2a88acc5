// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subscriber registry for state-change notifications.
//!
//! Callbacks are invoked in registration order and receive a reference to
//! the freshly updated state (the Rust rendering of "call `state()`
//! yourself" — the controller is mutably borrowed while notifying, so the
//! snapshot comes with the call). Unsubscribing between notifications never
//! skips or double-invokes the remaining subscribers: entries keep their
//! registration order and are identified by id, not by index.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::state::TooltipState;

/// Identifies one subscription, for [`TooltipController::unsubscribe`](crate::TooltipController::unsubscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Callback<K, N> = Box<dyn FnMut(&TooltipState<K, N>)>;

pub(crate) struct Registry<K, N> {
    next_id: u64,
    entries: Vec<(u64, Callback<K, N>)>,
}

impl<K, N> Registry<K, N> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, callback: Callback<K, N>) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        Subscription(id)
    }

    pub(crate) fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        match self.entries.iter().position(|(id, _)| *id == subscription.0) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn notify(&mut self, state: &TooltipState<K, N>) {
        for (_, callback) in &mut self.entries {
            callback(state);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, N> fmt::Debug for Registry<K, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("subscribers", &self.len())
            .finish()
    }
}
