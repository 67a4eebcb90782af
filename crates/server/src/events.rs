use crate::types::{EventCursor, ServerEvent};
use sim_core::Tick;

/// Events read from an [`EventBuffer`] in one call.
#[derive(Clone, Debug)]
pub struct EventBatch<E> {
    pub events: Vec<ServerEvent<E>>,
    /// Cursor to pass on the next read.
    pub cursor: EventCursor,
    /// Events overwritten before the reader got to them.
    pub dropped: u64,
}

/// A ring buffer for storing events with cursor-based retrieval.
///
/// Presentation layers poll at their own cadence; a slow reader loses the
/// oldest events and is told how many through [`EventBatch::dropped`].
pub struct EventBuffer<E> {
    buffer: Vec<Option<ServerEvent<E>>>,
    capacity: usize,
    next_sequence: u64,
}

impl<E: Clone> EventBuffer<E> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: (0..capacity).map(|_| None).collect(),
            capacity,
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, tick: Tick, event: E) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let index = (sequence as usize) % self.capacity;
        self.buffer[index] = Some(ServerEvent {
            sequence,
            tick,
            event,
        });
    }

    fn oldest_available(&self) -> u64 {
        self.next_sequence.saturating_sub(self.capacity as u64)
    }

    /// Read every retained event at or after `cursor`.
    pub fn read_from(&self, cursor: EventCursor) -> EventBatch<E> {
        let oldest = self.oldest_available();
        let start = cursor.0.max(oldest);
        let dropped = oldest.saturating_sub(cursor.0);

        let events = (start..self.next_sequence)
            .filter_map(|seq| {
                let index = (seq as usize) % self.capacity;
                self.buffer[index]
                    .as_ref()
                    .filter(|event| event.sequence == seq)
                    .cloned()
            })
            .collect();

        EventBatch {
            events,
            cursor: EventCursor(self.next_sequence.max(cursor.0)),
            dropped,
        }
    }

    /// Discard retained events. Sequence numbers keep counting up so existing
    /// cursors stay valid.
    pub fn clear(&mut self) {
        for slot in &mut self.buffer {
            *slot = None;
        }
    }

    pub fn current_sequence(&self) -> u64 {
        self.next_sequence
    }
}
