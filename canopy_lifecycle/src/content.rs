// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip content: the resolved variant stored in state, and the richer
//! source variant accepted from callers.
//!
//! Callers may hand over plain text, an opaque host node handle, or a thunk
//! that produces either lazily. The thunk is resolved exactly once, at show
//! time; state only ever holds the resolved form, so consumers never branch
//! on "is this still a closure".

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

/// Resolved tooltip content as held in [`TooltipState`](crate::TooltipState).
///
/// `N` is the host's opaque node handle type (a DOM node id, a widget key —
/// anything cloneable and comparable).
#[derive(Clone, Debug, PartialEq)]
pub enum Content<N> {
    /// Plain text.
    Text(String),
    /// An opaque host node to be mounted into the overlay.
    Node(N),
}

/// Content as supplied by callers, resolved once at show time.
///
/// Resolving an empty string yields no content at all, which turns the show
/// into a hide — an empty bubble is never displayed.
#[derive(Clone)]
pub enum ContentSource<N> {
    /// Plain text.
    Text(String),
    /// An opaque host node.
    Node(N),
    /// A thunk producing content on demand; invoked at show time.
    Thunk(Rc<dyn Fn() -> ContentSource<N>>),
}

/// Thunks may return thunks; resolution stops after this many hops and
/// treats the content as empty.
const MAX_THUNK_DEPTH: usize = 8;

impl<N: Clone> ContentSource<N> {
    /// Wrap a closure that produces content on demand.
    #[must_use]
    pub fn thunk(produce: impl Fn() -> Self + 'static) -> Self {
        Self::Thunk(Rc::new(produce))
    }

    /// Resolve to concrete content, invoking thunks as needed.
    ///
    /// Returns `None` for empty text (and for runaway thunk chains deeper
    /// than a small fixed depth); callers treat `None` as an implicit hide.
    #[must_use]
    pub fn resolve(&self) -> Option<Content<N>> {
        let mut current = self.clone();
        for _ in 0..MAX_THUNK_DEPTH {
            match current {
                Self::Text(text) => {
                    return (!text.is_empty()).then(|| Content::Text(text));
                }
                Self::Node(node) => return Some(Content::Node(node)),
                Self::Thunk(produce) => current = produce(),
            }
        }
        None
    }
}

impl<N: fmt::Debug> fmt::Debug for ContentSource<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Self::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}

impl<N> From<&str> for ContentSource<N> {
    fn from(text: &str) -> Self {
        Self::Text(String::from(text))
    }
}

impl<N> From<String> for ContentSource<N> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
