//! Stale-response guarding.
//!
//! A consumer that may start a new load before the previous one finished
//! takes a [`Ticket`] from a [`Generation`] for each load and only applies a
//! result if its ticket is still the latest one. Late results are dropped
//! instead of overwriting newer data.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::debug;

/// Identifies one load started from a [`Generation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// The generation number this ticket was issued for.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A monotonically increasing load counter.
#[derive(Debug, Default)]
pub struct Generation {
    current: AtomicU64,
}

impl Generation {
    /// Creates a counter with no tickets issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new load, invalidating every earlier ticket.
    pub fn issue(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True if no newer ticket has been issued since `ticket`.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}

/// Holds the most recent value applied under a current ticket.
#[derive(Debug)]
pub struct LatestView<T> {
    generation: Generation,
    value: Mutex<Option<T>>,
}

impl<T> Default for LatestView<T> {
    fn default() -> Self {
        Self {
            generation: Generation::new(),
            value: Mutex::new(None),
        }
    }
}

impl<T: Clone> LatestView<T> {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load and returns the ticket its result must present.
    pub fn begin(&self) -> Ticket {
        self.generation.issue()
    }

    /// Stores `value` if `ticket` is still current.
    ///
    /// Returns `false` and discards the value when a newer load has started.
    pub fn apply(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.value.lock();
        if !self.generation.is_current(ticket) {
            debug!(ticket = ticket.value(), "Discarding stale result");
            return false;
        }
        *slot = Some(value);
        true
    }

    /// Returns a copy of the current value.
    pub fn current(&self) -> Option<T> {
        self.value.lock().clone()
    }
}
