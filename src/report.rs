//! Per-call outcome of table operations.

/// What a single `put`, `increment` or `get` did.
///
/// Returned by value and never retained by the table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OpReport {
    /// Counter stored for the key after the call
    pub value: u64,

    /// Occupied slots holding other keys that were probed past, including
    /// every collision of the reinsertion pass when the call grew the table
    pub collisions: u32,

    /// The call grew the table
    pub did_grow: bool,

    /// The call changed the counter of an existing entry
    pub did_update: bool,
}

impl OpReport {
    pub(crate) fn found(value: u64, collisions: u32) -> Self {
        Self {
            value,
            collisions,
            did_grow: false,
            did_update: false,
        }
    }

    pub(crate) fn updated(value: u64, collisions: u32) -> Self {
        Self {
            did_update: true,
            ..Self::found(value, collisions)
        }
    }

    pub(crate) fn inserted(value: u64, collisions: u32, did_grow: bool) -> Self {
        Self {
            did_grow,
            ..Self::found(value, collisions)
        }
    }
}

/// Totals of a bulk [`increment_all`](crate::ColorTable::increment_all).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CountStats {
    /// Keys counted
    pub keys: u64,

    /// Sum of the collisions reported by every increment
    pub collisions: u64,

    /// Number of increments that grew the table
    pub growths: u32,
}

impl CountStats {
    pub(crate) fn record(&mut self, report: &OpReport) {
        self.keys += 1;
        self.collisions += u64::from(report.collisions);
        self.growths += u32::from(report.did_grow);
    }
}
