//! Delayed event queue
//!
//! Holds the resolution and advance window events until their due time on the
//! game clock. Events due at the same instant pop in the order they were
//! scheduled.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::session::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    due_ms: u64,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    event: Event,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-queue of events keyed by due time
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Pending>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Pending { due_ms, seq, event }));
    }

    /// Due time of the earliest pending event
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(p)| p.due_ms)
    }

    /// Pop the earliest event if it is due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Event> {
        if self.next_due()? > now_ms {
            return None;
        }
        self.queue.pop().map(|Reverse(p)| p.event)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
