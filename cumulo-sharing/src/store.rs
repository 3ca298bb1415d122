// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single owner of the sharing state for embedding applications.
//!
//! The store holds the current [`SharingState`], applies confirmed events through
//! [`SharingStore::dispatch`] and hands the state each transition produced to every
//! subscriber. Mutations are serialized by the exclusive reference `dispatch` takes;
//! there is no interior mutability, no locking and no async.

use std::fmt;
use std::mem;

use tracing::debug;

use crate::state::{SharingEvent, SharingState};

/// Handle identifying one subscriber, returned by [`SharingStore::subscribe`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&SharingState)>;

/// Owns the sharing state and the subscribers observing it.
pub struct SharingStore {
    state: SharingState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl SharingStore {
    pub fn new() -> Self {
        Self {
            state: SharingState::new(),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// The current state. All queries go through this reference.
    pub fn state(&self) -> &SharingState {
        &self.state
    }

    /// Applies one confirmed event and notifies every subscriber with the new state.
    pub fn dispatch(&mut self, event: SharingEvent) {
        self.state = mem::take(&mut self.state).apply(event);
        for (_, notify) in self.subscribers.iter_mut() {
            notify(&self.state);
        }
    }

    /// Registers a callback invoked after every transition.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&SharingState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        debug!("subscribed observer {:?}", id);
        id
    }

    /// Removes one subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(known, _)| *known != id);
    }
}

impl Default for SharingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharingStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
