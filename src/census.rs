//! Customer census: the shop's "still open" signal.

use std::sync::Mutex;

/// Count of customers not yet departed. Strictly decreasing; reaching 0
/// is the sole termination signal staff act on.
#[derive(Debug)]
pub(crate) struct CustomerCensus {
    remaining: Mutex<usize>,
}

impl CustomerCensus {
    pub(crate) fn new(customers: usize) -> Self {
        Self {
            remaining: Mutex::new(customers),
        }
    }

    /// Records one customer leaving. The decrement always happens under
    /// the census lock so staff never read a torn count.
    ///
    /// # Panics
    /// Panics if more departures are recorded than customers were
    /// configured.
    pub(crate) fn depart(&self) {
        let mut remaining = self.remaining.lock().expect("census lock poisoned");
        assert!(*remaining > 0, "customer census underflow: departure without a remaining customer");
        *remaining -= 1;
    }

    pub(crate) fn remaining(&self) -> usize {
        *self.remaining.lock().expect("census lock poisoned")
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
