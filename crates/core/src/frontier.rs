//! Fixed-capacity FIFO of grid positions awaiting growth
//!
//! A circular buffer over a store allocated once at construction. The read and
//! write cursors advance modulo capacity, so a slot is reused only after its
//! entry has been popped. Pushing into a full queue is refused rather than
//! overwriting the oldest unread entry.
//!
//! # Generation boundaries
//! The engine snapshots [`FrontierQueue::write_cursor`] when a generation starts
//! and drains with [`FrontierQueue::pop_before`] until that snapshot is reached.
//! Entries pushed while draining sit past the boundary and wait for the next
//! generation.

use crate::error::{CapacityExceeded, SizingError};

/// Snapshot of the write position, used as a generation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Total pushes at the moment of the snapshot.
    pushed: u64,
}

/// Ring buffer of linear grid indices.
#[derive(Debug, Clone)]
pub struct FrontierQueue {
    slots: Box<[usize]>,
    read: usize,
    write: usize,
    len: usize,
    pushed: u64,
    popped: u64,
}

impl FrontierQueue {
    /// Empty queue holding at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_slots(vec![0; capacity].into_boxed_slice())
    }

    /// Like [`FrontierQueue::with_capacity`], reporting allocation failure.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, SizingError> {
        let bytes = capacity.saturating_mul(std::mem::size_of::<usize>());
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| SizingError::AllocationFailed { bytes })?;
        slots.resize(capacity, 0);
        Ok(Self::from_slots(slots.into_boxed_slice()))
    }

    fn from_slots(slots: Box<[usize]>) -> Self {
        Self {
            slots,
            read: 0,
            write: 0,
            len: 0,
            pushed: 0,
            popped: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Entries pushed but not yet popped.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    #[inline]
    fn advance(&self, slot: usize) -> usize {
        let next = slot + 1;
        if next == self.slots.len() {
            0
        } else {
            next
        }
    }

    /// Append `position` at the write cursor.
    pub fn push(&mut self, position: usize) -> Result<(), CapacityExceeded> {
        if self.is_full() {
            return Err(CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        self.slots[self.write] = position;
        self.write = self.advance(self.write);
        self.len += 1;
        self.pushed += 1;
        Ok(())
    }

    /// Remove the entry at the read cursor.
    pub fn pop(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let position = self.slots[self.read];
        self.read = self.advance(self.read);
        self.len -= 1;
        self.popped += 1;
        Some(position)
    }

    /// Entry the next [`FrontierQueue::pop`] would return.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.slots[self.read])
    }

    /// Current write position. Everything pushed so far lies before it.
    #[inline]
    #[must_use]
    pub fn write_cursor(&self) -> Cursor {
        Cursor {
            pushed: self.pushed,
        }
    }

    /// Pop only if the read cursor has not yet reached `boundary`.
    pub fn pop_before(&mut self, boundary: Cursor) -> Option<usize> {
        if self.popped >= boundary.pushed {
            return None;
        }
        self.pop()
    }

    /// Entries between the read cursor and `boundary`.
    #[must_use]
    pub fn pending_before(&self, boundary: Cursor) -> usize {
        boundary.pushed.saturating_sub(self.popped) as usize
    }

    /// Pending entries in FIFO order.
    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        let cap = self.slots.len();
        (0..self.len).map(move |i| self.slots[(self.read + i) % cap])
    }
}
