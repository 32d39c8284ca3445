//! Growth: rebuild into the smallest prime capacity at least twice as large.
//!
//! The check runs only when a write is about to fill a vacant slot, against
//! the anticipatory load factor `(len + 1) / capacity`. The replacement table
//! is built completely before it is swapped in, so a failure leaves the old
//! table as it was.

use crate::error::{Error, Result};
use crate::key::Digest;
use crate::prime::next_prime;
use crate::table_core::{TableCore, Write};

/// Smallest prime `>= 2 * capacity`.
pub(crate) fn grown_capacity(capacity: usize) -> Result<usize> {
    capacity
        .checked_mul(2)
        .and_then(next_prime)
        .ok_or(Error::CapacityOverflow { capacity })
}

impl<K: Digest + Clone> TableCore<K> {
    pub(crate) fn should_grow(&self) -> bool {
        self.load_factor() >= self.config.growth_threshold
    }

    /// Reinserts every entry, in slot order, into a grown table and swaps it
    /// in. Returns the collisions of the reinsertion pass.
    pub(crate) fn grow(&mut self) -> Result<u32> {
        let old_capacity = self.capacity();
        let new_capacity = grown_capacity(old_capacity)?;
        let mut grown = TableCore::new(self.config.with_capacity(new_capacity))?;

        let mut collisions = 0u32;
        for slot in self.slots.iter().flatten() {
            let report = grown.write(slot.key.clone(), Write::Set(slot.counter))?;
            collisions = collisions.saturating_add(report.collisions);
        }

        log::debug!(
            "Grew color table from {old_capacity} to {new_capacity} slots, reinserted {} entries with {collisions} collisions",
            grown.len
        );
        *self = grown;
        Ok(collisions)
    }
}
