//! TableCore: the fixed slot array and the shared probing pass.
//!
//! Every operation runs one probe to a *landing*: the vacant slot where the
//! key would go, the slot already holding it, or nothing within `capacity`
//! attempts. Reads stop there; writes apply a [`Write`] to an occupied landing
//! or insert at a vacant one after the growth check in `growth.rs`.

use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::key::Digest;
use crate::probe::Probe;
use crate::report::OpReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot<K> {
    pub(crate) key: K,
    pub(crate) counter: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Landing {
    Vacant(usize),
    Occupied { index: usize, counter: u64 },
    Exhausted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Probed {
    pub(crate) landing: Landing,
    pub(crate) collisions: u32,
}

/// Counter update applied by a write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Write {
    Set(u64),
    Increment,
}

impl Write {
    fn seed(self) -> u64 {
        match self {
            Self::Set(value) => value,
            Self::Increment => 1,
        }
    }

    fn apply(self, current: u64) -> u64 {
        match self {
            Self::Set(value) => value,
            Self::Increment => current.saturating_add(1),
        }
    }
}

pub(crate) struct TableCore<K> {
    // `None` marks a vacant slot; entries are stored inline.
    pub(crate) slots: Box<[Option<Slot<K>>]>,
    pub(crate) config: TableConfig,
    pub(crate) len: usize,
}

impl<K> TableCore<K> {
    pub(crate) fn new(config: TableConfig) -> Result<Self> {
        config.validate()?;
        let slots = std::iter::repeat_with(|| None)
            .take(config.capacity)
            .collect();
        Ok(Self {
            slots,
            config,
            len: 0,
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// `(len + 1) / capacity`: the load after one more insertion.
    pub(crate) fn load_factor(&self) -> f64 {
        (self.len as f64 + 1.0) / self.capacity() as f64
    }

    fn slot_at(&self, index: usize) -> Result<Option<&Slot<K>>> {
        self.slots
            .get(index)
            .map(Option::as_ref)
            .ok_or(Error::IndexOutOfRange {
                index,
                capacity: self.capacity(),
            })
    }

    pub(crate) fn key_at(&self, index: usize) -> Result<Option<&K>> {
        Ok(self.slot_at(index)?.map(|slot| &slot.key))
    }

    pub(crate) fn value_at(&self, index: usize) -> Result<Option<u64>> {
        Ok(self.slot_at(index)?.map(|slot| slot.counter))
    }
}

impl<K: Digest> TableCore<K> {
    pub(crate) fn probe(&self, key: &K) -> Probed {
        let mut collisions = 0u32;
        for index in Probe::new(self.config.strategy, key.digest(), self.capacity()) {
            match &self.slots[index] {
                None => {
                    return Probed {
                        landing: Landing::Vacant(index),
                        collisions,
                    }
                }
                Some(slot) if slot.key == *key => {
                    return Probed {
                        landing: Landing::Occupied {
                            index,
                            counter: slot.counter,
                        },
                        collisions,
                    }
                }
                Some(_) => collisions = collisions.saturating_add(1),
            }
        }
        Probed {
            landing: Landing::Exhausted,
            collisions,
        }
    }

    pub(crate) fn get(&self, key: &K) -> Result<OpReport> {
        let Probed {
            landing,
            collisions,
        } = self.probe(key);
        match landing {
            Landing::Occupied { counter, .. } => Ok(OpReport::found(counter, collisions)),
            Landing::Vacant(_) | Landing::Exhausted => Err(Error::KeyNotFound),
        }
    }

    pub(crate) fn count_of(&self, key: &K) -> u64 {
        match self.probe(key).landing {
            Landing::Occupied { counter, .. } => counter,
            Landing::Vacant(_) | Landing::Exhausted => 0,
        }
    }
}

impl<K: Digest + Clone> TableCore<K> {
    /// Shared path of `put`, `increment` and growth reinsertion.
    pub(crate) fn write(&mut self, key: K, write: Write) -> Result<OpReport> {
        let Probed {
            landing,
            mut collisions,
        } = self.probe(&key);

        let mut target = match landing {
            Landing::Occupied { index, .. } => match &mut self.slots[index] {
                Some(slot) => {
                    slot.counter = write.apply(slot.counter);
                    return Ok(OpReport::updated(slot.counter, collisions));
                }
                None => Some(index),
            },
            Landing::Vacant(index) => Some(index),
            Landing::Exhausted => None,
        };

        let mut did_grow = false;
        if target.is_none() || self.should_grow() {
            collisions = collisions.saturating_add(self.grow()?);
            let reprobe = self.probe(&key);
            collisions = collisions.saturating_add(reprobe.collisions);
            target = match reprobe.landing {
                Landing::Vacant(index) => Some(index),
                Landing::Occupied { .. } | Landing::Exhausted => None,
            };
            did_grow = true;
        }

        let Some(index) = target else {
            return Err(Error::ProbeExhausted {
                capacity: self.capacity(),
            });
        };
        let counter = write.seed();
        self.slots[index] = Some(Slot { key, counter });
        self.len += 1;
        Ok(OpReport::inserted(counter, collisions, did_grow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeStrategy;
    use test_log::test;

    fn core(capacity: usize, strategy: ProbeStrategy, threshold: f64) -> TableCore<u32> {
        TableCore::new(
            TableConfig::new(capacity)
                .strategy(strategy)
                .growth_threshold(threshold),
        )
        .unwrap()
    }

    /// Invariant: `len` equals the number of occupied slots.
    #[test]
    fn len_tracks_occupied_slots() {
        let mut t = core(11, ProbeStrategy::Linear, 0.9);
        for k in [1u32, 12, 23, 2, 1, 12] {
            t.write(k, Write::Increment).unwrap();
        }
        let occupied = t.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(t.len, occupied);
        assert_eq!(t.len, 4);
    }

    /// A probe lands on the slot holding the key or the first vacancy.
    #[test]
    fn probe_landings() {
        let mut t = core(7, ProbeStrategy::Linear, 0.9);
        t.write(3, Write::Set(9)).unwrap();
        assert_eq!(
            t.probe(&3),
            Probed {
                landing: Landing::Occupied {
                    index: 3,
                    counter: 9
                },
                collisions: 0
            }
        );
        assert_eq!(
            t.probe(&10),
            Probed {
                landing: Landing::Vacant(4),
                collisions: 1
            }
        );
    }

    /// A quadratic probe over a non-prime capacity can miss every vacancy.
    #[test]
    fn quadratic_probe_can_exhaust_on_composite_capacity() {
        // k*k mod 8 only reaches offsets 0, 1 and 4.
        let mut t = core(8, ProbeStrategy::Quadratic, 0.49);
        t.slots[0] = Some(Slot { key: 0, counter: 1 });
        t.slots[1] = Some(Slot { key: 1, counter: 1 });
        t.slots[4] = Some(Slot { key: 4, counter: 1 });
        t.len = 3;
        let probed = t.probe(&16);
        assert_eq!(probed.landing, Landing::Exhausted);
        assert_eq!(probed.collisions, 8);
        assert_eq!(t.count_of(&16), 0);
        assert_eq!(t.get(&16), Err(Error::KeyNotFound));
    }

    /// An exhausted insert grows the table and then succeeds.
    #[test]
    fn exhausted_insert_grows_first() {
        let mut t = core(8, ProbeStrategy::Quadratic, 0.49);
        t.slots[0] = Some(Slot { key: 0, counter: 1 });
        t.slots[1] = Some(Slot { key: 1, counter: 1 });
        t.slots[4] = Some(Slot { key: 4, counter: 1 });
        t.len = 3;
        let report = t.write(16, Write::Increment).unwrap();
        assert!(report.did_grow);
        assert_eq!(t.capacity(), 17);
        assert_eq!(t.len, 4);
        for k in [0u32, 1, 4, 16] {
            assert_eq!(t.count_of(&k), 1);
        }
    }

    #[test]
    fn write_seeds_and_applies() {
        assert_eq!(Write::Increment.seed(), 1);
        assert_eq!(Write::Increment.apply(41), 42);
        assert_eq!(Write::Increment.apply(u64::MAX), u64::MAX);
        assert_eq!(Write::Set(7).seed(), 7);
        assert_eq!(Write::Set(7).apply(100), 7);
    }

    #[test]
    fn positional_access_checks_bounds() {
        let mut t = core(5, ProbeStrategy::Linear, 0.9);
        t.write(2, Write::Set(0)).unwrap();
        assert_eq!(t.key_at(2), Ok(Some(&2)));
        assert_eq!(t.value_at(2), Ok(Some(0)));
        assert_eq!(t.value_at(3), Ok(None));
        assert_eq!(
            t.key_at(5),
            Err(Error::IndexOutOfRange {
                index: 5,
                capacity: 5
            })
        );
    }
}
