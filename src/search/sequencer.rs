//! Ordering of concurrent search responses.
//!
//! Callers take a ticket with [`SearchSequencer::begin`] before sending a
//! search, carry it with the request, and hand it back together with the
//! response to [`SearchSequencer::complete`]; [`SearchSequencer::current`]
//! then holds the results of the latest search only.

use log::debug;

/// Identifies one issued search
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Keeps the displayed results in step with the most recent search.
///
/// Every search takes a ticket before it starts. When a response arrives it
/// is applied only if its ticket is the newest one issued; responses from
/// superseded searches are dropped even if they arrive last.
#[derive(Debug)]
pub struct SearchSequencer<T> {
    issued: u64,
    applied: Option<u64>,
    current: Option<T>,
}

impl<T> Default for SearchSequencer<T> {
    fn default() -> Self {
        SearchSequencer {
            issued: 0,
            applied: None,
            current: None,
        }
    }
}

impl<T> SearchSequencer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new search, superseding every earlier one
    pub fn begin(&mut self) -> SearchTicket {
        self.issued += 1;
        SearchTicket(self.issued)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.issued && self.applied.map_or(true, |applied| applied < ticket.0)
    }

    /// Apply the result for `ticket`. Returns false (and drops `result`)
    /// when the ticket is stale.
    pub fn complete(&mut self, ticket: SearchTicket, result: T) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale search result #{} (latest is #{})",
                ticket.0, self.issued
            );
            return false;
        }
        self.applied = Some(ticket.0);
        self.current = Some(result);
        true
    }

    /// The most recently applied result
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Searches issued but not yet superseded or applied
    pub fn in_flight(&self) -> bool {
        self.applied.map_or(self.issued > 0, |applied| applied < self.issued)
    }
}
