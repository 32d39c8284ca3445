//! color-hash: a single-threaded, open-addressing table that counts
//! quantized pixel colors, reporting the probing work of every call.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: count color occurrences for histogram comparison while exposing
//!   exactly how much probing each call cost, so linear and quadratic
//!   probing can be compared on real images.
//! - Layers:
//!   - Probe (`probe`): bounded sequence of candidate indices for one key
//!     under `ProbeStrategy::Linear` or `ProbeStrategy::Quadratic`.
//!   - TableCore (`table_core`): fixed boxed slice of `Option<Slot>`; one
//!     probing pass shared by every operation, then read, update or insert.
//!   - Growth (`growth`): anticipatory load check and rebuild into the
//!     smallest prime capacity at least twice as large.
//!   - ColorTable (`color_table`): public API; adds the debug exclusivity
//!     guard and bulk counting.
//!   - FeatureVector (`feature_vector`): dense histogram read back through
//!     the table's positional accessors.
//!
//! Constraints
//! - Single-threaded: `ColorTable` is `!Send`/`!Sync` (no atomics, no locks).
//! - No deletion: entries only ever get inserted or updated.
//! - No per-entry heap allocations; entries live inline in the slot array.
//! - Counters are `u64`; `increment` saturates at `u64::MAX`.
//!
//! Probing and collision accounting
//! - A collision is one probed slot holding a different key. The count of a
//!   call includes the initial probe and, when the call grew the table, the
//!   collisions of reinserting every old entry plus the reprobe of the key.
//! - Quadratic attempt `k` targets `(k * k + digest) mod capacity`, measured
//!   from the base position every time. Probes stop after `capacity`
//!   attempts; an insert that finds no vacancy grows first.
//!
//! Growth policy
//! - Only an insert into a vacant slot checks for growth, and it checks the
//!   load factor the insert *would* produce, `(len + 1) / capacity`. The
//!   table therefore never exceeds its threshold, even transiently.
//! - Old entries are reinserted in slot order, not insertion order, which
//!   makes collision counts reproducible.
//! - The grown table is built before it replaces the old one; errors leave
//!   the table unchanged.
//!
//! Configuration
//! - `TableConfig` is validated before any allocation: positive capacity,
//!   a supported bit depth, and a growth threshold in (0, 1) for linear or
//!   (0, 0.5) for quadratic probing.
//!
//! Notes and non-goals
//! - Keys supply their own digest through `Digest`; there is no `BuildHasher`.
//! - No persistence and no image decoding; callers feed `ColorKey`s.

mod color_table;
mod color_table_proptest;
mod config;
mod error;
mod exclusive;
mod feature_vector;
mod growth;
mod key;
mod prime;
mod probe;
mod report;
mod table_core;

// Public surface
pub use color_table::{ColorTable, Iter};
pub use config::TableConfig;
pub use error::{ConfigError, Error, Result};
pub use feature_vector::FeatureVector;
pub use key::{ColorKey, Digest, SUPPORTED_BITS_PER_PIXEL};
pub use prime::{is_prime, next_prime};
pub use probe::ProbeStrategy;
pub use report::{CountStats, OpReport};
