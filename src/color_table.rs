//! ColorTable: public surface over `TableCore` with the debug exclusivity
//! guard and bulk counting.

use crate::config::TableConfig;
use crate::error::Result;
use crate::exclusive::DebugExclusive;
use crate::key::Digest;
use crate::probe::ProbeStrategy;
use crate::report::{CountStats, OpReport};
use crate::table_core::{Slot, TableCore, Write};

/// Open-addressing table counting occurrences of keys.
///
/// Every mutating or probing call returns an [`OpReport`] with the resulting
/// counter, the collisions the call ran into and whether it grew the table or
/// updated an existing entry.
pub struct ColorTable<K> {
    core: TableCore<K>,
    exclusive: DebugExclusive,
}

/// Iterator over occupied slots in physical order: `(index, key, counter)`.
pub struct Iter<'a, K> {
    slots: core::iter::Enumerate<core::slice::Iter<'a, Option<Slot<K>>>>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (usize, &'a K, u64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|(index, slot)| {
            slot.as_ref().map(|slot| (index, &slot.key, slot.counter))
        })
    }
}

impl<K> ColorTable<K> {
    /// Current number of slots, including vacant ones.
    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    /// Load factor the *next* insertion would produce: `(len + 1) / capacity`.
    ///
    /// Growth compares this value against the threshold, so a table grows
    /// before an insertion would take it past the threshold.
    pub fn load_factor(&self) -> f64 {
        self.core.load_factor()
    }

    pub fn len(&self) -> usize {
        self.core.len
    }

    pub fn is_empty(&self) -> bool {
        self.core.len == 0
    }

    pub fn strategy(&self) -> ProbeStrategy {
        self.core.config.strategy
    }

    pub fn growth_threshold(&self) -> f64 {
        self.core.config.growth_threshold
    }

    pub fn bits_per_pixel(&self) -> u8 {
        self.core.config.bits_per_pixel
    }

    /// Configuration in effect; `capacity` reflects any growth.
    pub fn config(&self) -> TableConfig {
        self.core.config
    }

    /// Key stored at `index`, `None` for a vacant slot.
    ///
    /// Fails with `IndexOutOfRange` outside `[0, capacity)`.
    pub fn key_at(&self, index: usize) -> Result<Option<&K>> {
        self.core.key_at(index)
    }

    /// Counter stored at `index`, `None` for a vacant slot (distinct from a
    /// zero counter).
    ///
    /// Fails with `IndexOutOfRange` outside `[0, capacity)`.
    pub fn value_at(&self, index: usize) -> Result<Option<u64>> {
        self.core.value_at(index)
    }

    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            slots: self.core.slots.iter().enumerate(),
        }
    }
}

impl<K: Digest + Clone> ColorTable<K> {
    /// Creates an empty table; fails on an invalid configuration before
    /// allocating any slot.
    pub fn new(config: TableConfig) -> Result<Self> {
        let core = TableCore::new(config)?;
        log::trace!(
            "Created color table with {} slots, {}, growth threshold {}",
            config.capacity,
            config.strategy,
            config.growth_threshold
        );
        Ok(Self {
            core,
            exclusive: DebugExclusive::new(),
        })
    }

    /// Sets the counter of `key` to `value`, inserting it if absent.
    ///
    /// Only an insertion can grow the table.
    pub fn put(&mut self, key: K, value: u64) -> Result<OpReport> {
        let _g = self.exclusive.enter("put");
        self.core.write(key, Write::Set(value))
    }

    /// Adds one to the counter of `key`, inserting it with 1 if absent.
    pub fn increment(&mut self, key: K) -> Result<OpReport> {
        let _g = self.exclusive.enter("increment");
        self.core.write(key, Write::Increment)
    }

    /// Counter of `key`; fails with `KeyNotFound` if absent.
    pub fn get(&self, key: &K) -> Result<OpReport> {
        let _g = self.exclusive.enter("get");
        self.core.get(key)
    }

    /// Counter of `key`, 0 if absent.
    pub fn count_of(&self, key: &K) -> u64 {
        let _g = self.exclusive.enter("count_of");
        self.core.count_of(key)
    }

    /// Increments every key in order and sums the reports.
    ///
    /// Stops at the first failing increment; keys counted before it stay
    /// counted.
    pub fn increment_all<I>(&mut self, keys: I) -> Result<CountStats>
    where
        I: IntoIterator<Item = K>,
    {
        let mut stats = CountStats::default();
        for key in keys {
            let report = self.increment(key)?;
            stats.record(&report);
        }
        log::trace!(
            "Counted {} keys into {} entries over {} slots ({} collisions, {} growths)",
            stats.keys,
            self.len(),
            self.capacity(),
            stats.collisions,
            stats.growths
        );
        Ok(stats)
    }
}

impl<'a, K> IntoIterator for &'a ColorTable<K> {
    type Item = (usize, &'a K, u64);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
