//! Bounded event journal.
//!
//! Keeps the most recent `capacity` events in insertion order; when full,
//! the oldest is evicted to make room so memory stays predictable in a
//! long-running engine. The running total counts every event ever recorded.

use std::collections::VecDeque;

use rpsmatch_types::{EventKind, MatchEvent};

#[derive(Debug)]
pub struct EventJournal {
    /// Front = oldest.
    events: VecDeque<MatchEvent>,
    capacity: usize,
    total_recorded: u64,
}

impl EventJournal {
    /// # Panics
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "EventJournal capacity must be > 0");
        Self {
            events: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            total_recorded: 0,
        }
    }

    /// Append an event, evicting the oldest if at capacity.
    pub fn record(&mut self, kind: EventKind) -> &MatchEvent {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(MatchEvent::now(kind));
        self.total_recorded += 1;
        &self.events[self.events.len() - 1]
    }

    /// Retained events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&MatchEvent> {
        self.events.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded since creation, including evicted ones.
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }
}
