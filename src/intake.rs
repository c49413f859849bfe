//! Order intake queue: bounded FIFO of submitted, not-yet-taken orders.

use std::sync::Arc;

use crossbeam_queue::ArrayQueue;

use crate::order::PaintCan;

/// Pending orders, capacity bounded by the maximum simultaneous customers.
///
/// FIFO order determines fairness only; any staff member may take any
/// pending order.
#[derive(Debug)]
pub(crate) struct IntakeQueue {
    slots: ArrayQueue<Arc<PaintCan>>,
}

impl IntakeQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        // ArrayQueue rejects zero capacity; a zero-customer shop never
        // submits, so one slot keeps the invariants intact.
        Self {
            slots: ArrayQueue::new(capacity.max(1)),
        }
    }

    /// Appends an order.
    ///
    /// # Panics
    /// Panics if the queue is full: more simultaneous orders than
    /// configured customers is a contract violation.
    pub(crate) fn submit(&self, can: Arc<PaintCan>) {
        assert!(
            self.slots.push(can).is_ok(),
            "intake queue overflow: more outstanding orders than configured customers"
        );
    }

    /// Removes and returns the oldest pending order, if any.
    pub(crate) fn take(&self) -> Option<Arc<PaintCan>> {
        self.slots.pop()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
