//! Paint cans and tint identifiers.
//!
//! A [`PaintCan`] is the order: a fixed-length list of requested tints,
//! padded with empty entries, plus the contents the mixing staff member
//! dispenses into it in place. Orders carry no identifier; submission and
//! pickup are matched on `Arc` identity, so the same allocation travels
//! customer → intake queue → staff → ready rack → customer.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// A 1-based tint identifier naming one dispensing station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tint(NonZeroUsize);

impl Tint {
    /// Creates a tint id. Returns `None` for 0, the "no tint" sentinel.
    #[must_use]
    pub fn new(id: usize) -> Option<Self> {
        NonZeroUsize::new(id).map(Self)
    }

    /// The numeric tint id.
    #[must_use]
    pub const fn id(self) -> usize {
        self.0.get()
    }

    /// Index of this tint's station in the shop's lock set.
    pub(crate) const fn station_index(self) -> usize {
        self.0.get() - 1
    }
}

impl std::fmt::Display for Tint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tint {}", self.0)
    }
}

/// One customer's order: requested tints and the paint mixed so far.
#[derive(Debug)]
pub struct PaintCan {
    /// Requested tints, length fixed at the shop's paint complexity.
    /// `None` entries are unused slots.
    requested: Vec<Option<Tint>>,
    /// Tints dispensed into the can, in dispense order. Written by exactly
    /// one staff member while that staff member holds the matching station
    /// locks.
    contents: Mutex<Vec<Tint>>,
}

impl PaintCan {
    /// Builds an empty can requesting `tints`, padded to `complexity`
    /// entries.
    ///
    /// # Panics
    /// Panics if more tints are requested than the can has slots for.
    #[must_use]
    pub fn new(tints: &[Tint], complexity: usize) -> Arc<Self> {
        assert!(
            tints.len() <= complexity,
            "order requests {} tints but cans hold at most {complexity}",
            tints.len()
        );
        let mut requested: Vec<Option<Tint>> = tints.iter().copied().map(Some).collect();
        requested.resize(complexity, None);
        Arc::new(Self {
            requested,
            contents: Mutex::new(Vec::with_capacity(tints.len())),
        })
    }

    /// The requested tint slots, including empty ones.
    #[must_use]
    pub fn requested(&self) -> &[Option<Tint>] {
        &self.requested
    }

    /// The requested tints in request order, skipping empty slots.
    pub fn requested_tints(&self) -> impl Iterator<Item = Tint> + '_ {
        self.requested.iter().copied().flatten()
    }

    /// The distinct stations this order needs, sorted by id.
    ///
    /// Duplicate tints in one order still need their station only once.
    #[must_use]
    pub fn distinct_tints(&self) -> Vec<Tint> {
        let mut tints: Vec<Tint> = self.requested_tints().collect();
        tints.sort_unstable();
        tints.dedup();
        tints
    }

    /// Dispenses one measure of `tint` into the can.
    pub fn dispense(&self, tint: Tint) {
        self.contents.lock().expect("can contents lock poisoned").push(tint);
    }

    /// Snapshot of the tints dispensed so far.
    #[must_use]
    pub fn contents(&self) -> Vec<Tint> {
        self.contents.lock().expect("can contents lock poisoned").clone()
    }

    /// True once the contents match the requested tints, as a multiset.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        let mut wanted: Vec<Tint> = self.requested_tints().collect();
        let mut got = self.contents();
        wanted.sort_unstable();
        got.sort_unstable();
        wanted == got
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{init_test_logging, tints};

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn can_pads_unused_slots() {
        init_test("can_pads_unused_slots");
        let can = PaintCan::new(&tints(&[2, 5]), 4);
        let len = can.requested().len();
        crate::assert_with_log!(len == 4, "padded length", 4usize, len);
        let empty = can.requested()[2..].iter().all(Option::is_none);
        crate::assert_with_log!(empty, "tail slots empty", true, empty);
        crate::test_complete!("can_pads_unused_slots");
    }

    #[test]
    fn distinct_tints_sorted_and_deduped() {
        init_test("distinct_tints_sorted_and_deduped");
        let can = PaintCan::new(&tints(&[5, 2, 5]), 3);
        let distinct = can.distinct_tints();
        let expected = tints(&[2, 5]);
        crate::assert_with_log!(distinct == expected, "distinct set", &expected, &distinct);
        crate::test_complete!("distinct_tints_sorted_and_deduped");
    }

    #[test]
    fn dispensing_fills_the_can() {
        init_test("dispensing_fills_the_can");
        let can = PaintCan::new(&tints(&[1, 3, 1]), 3);
        crate::assert_with_log!(!can.is_filled(), "starts unfilled", false, can.is_filled());
        for tint in can.requested_tints() {
            can.dispense(tint);
        }
        crate::assert_with_log!(can.is_filled(), "filled after dispensing", true, can.is_filled());
        crate::test_complete!("dispensing_fills_the_can");
    }

    #[test]
    fn identity_is_per_allocation() {
        init_test("identity_is_per_allocation");
        let a = PaintCan::new(&tints(&[1]), 3);
        let b = PaintCan::new(&tints(&[1]), 3);
        let same = Arc::ptr_eq(&a, &b);
        crate::assert_with_log!(!same, "equal requests, distinct orders", false, same);
        crate::test_complete!("identity_is_per_allocation");
    }

    #[test]
    fn zero_is_the_no_tint_sentinel() {
        init_test("zero_is_the_no_tint_sentinel");
        let none = Tint::new(0);
        crate::assert_with_log!(none.is_none(), "tint 0 rejected", true, none.is_none());
        crate::test_complete!("zero_is_the_no_tint_sentinel");
    }

    #[test]
    #[should_panic(expected = "cans hold at most")]
    fn oversized_order_panics() {
        let _ = PaintCan::new(&tints(&[1, 2, 3, 4]), 3);
    }
}
