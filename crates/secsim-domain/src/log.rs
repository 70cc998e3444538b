//! Newest-first logs with an optional size cap.

use crate::firewall::PacketDisposition;
use secsim_types::{SecurityEvent, TrafficLog};
use std::collections::VecDeque;
use time::OffsetDateTime;

/// The access-event log keeps only this many entries.
pub const ACCESS_EVENT_CAPACITY: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: Option<usize>,
}

impl<T> BoundedLog<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: Some(capacity),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: None,
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Prepend one entry, dropping the oldest beyond the cap.
    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.truncate();
    }

    /// Prepend a batch as a block; the batch keeps its own order at the top.
    pub fn push_batch(&mut self, batch: Vec<T>) {
        for entry in batch.into_iter().rev() {
            self.entries.push_front(entry);
        }
        self.truncate();
    }

    fn truncate(&mut self) {
        if let Some(cap) = self.capacity {
            self.entries.truncate(cap);
        }
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> BoundedLog<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

/// Access-control activity log, capped at [`ACCESS_EVENT_CAPACITY`].
pub type EventLog = BoundedLog<SecurityEvent>;

impl Default for BoundedLog<SecurityEvent> {
    fn default() -> Self {
        Self::with_capacity(ACCESS_EVENT_CAPACITY)
    }
}

/// Firewall traffic log. Assigns ids in append order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrafficLedger {
    log: BoundedLog<TrafficLog>,
    next_id: u32,
}

impl Default for TrafficLedger {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TrafficLedger {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            log: match capacity {
                Some(cap) => BoundedLog::with_capacity(cap),
                None => BoundedLog::unbounded(),
            },
            next_id: 1,
        }
    }

    pub fn record(&mut self, disposition: PacketDisposition, at: OffsetDateTime) -> TrafficLog {
        let entry = self.stamp(disposition, at);
        self.log.push(entry.clone());
        entry
    }

    pub fn record_batch(
        &mut self,
        batch: Vec<PacketDisposition>,
        at: OffsetDateTime,
    ) -> Vec<TrafficLog> {
        let entries: Vec<TrafficLog> = batch.into_iter().map(|d| self.stamp(d, at)).collect();
        self.log.push_batch(entries.clone());
        entries
    }

    fn stamp(&mut self, disposition: PacketDisposition, at: OffsetDateTime) -> TrafficLog {
        let id = self.next_id;
        self.next_id += 1;
        TrafficLog {
            id,
            timestamp: at,
            source: disposition.packet.source,
            destination: disposition.packet.destination,
            protocol: disposition.packet.protocol,
            port: disposition.packet.port,
            action: disposition.action,
            reason: disposition.reason,
        }
    }

    pub fn entries(&self) -> &BoundedLog<TrafficLog> {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
