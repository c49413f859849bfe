//! Ready rack: fixed slots through which staff hand finished orders back.
//!
//! Staff publish into the first empty slot without knowing which customer
//! is waiting; customers recognize their own order by identity alone.

use std::sync::{Arc, Mutex};

use crate::order::PaintCan;

#[derive(Debug)]
pub(crate) struct ReadyRack {
    slots: Mutex<Box<[Option<Arc<PaintCan>>]>>,
}

impl ReadyRack {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(vec![None; capacity].into_boxed_slice()),
        }
    }

    /// Places a finished order into the first empty slot.
    ///
    /// # Panics
    /// Panics if every slot is occupied. The rack has one slot per
    /// configured customer, so a full rack means more outstanding
    /// completed orders than customers — a contract violation.
    pub(crate) fn publish(&self, can: Arc<PaintCan>) {
        let mut slots = self.slots.lock().expect("ready rack lock poisoned");
        let empty = slots
            .iter_mut()
            .find(|slot| slot.is_none())
            .unwrap_or_else(|| {
                panic!("ready rack overflow: more completed orders than configured customers")
            });
        *empty = Some(can);
    }

    /// Claims the slot holding exactly `can`, freeing it for reuse.
    ///
    /// Returns false if the order is not on the rack yet; the caller is
    /// expected to yield and poll again.
    pub(crate) fn claim(&self, can: &Arc<PaintCan>) -> bool {
        let mut slots = self.slots.lock().expect("ready rack lock poisoned");
        for slot in slots.iter_mut() {
            let matches = slot.as_ref().is_some_and(|held| Arc::ptr_eq(held, can));
            if matches {
                *slot = None;
                return true;
            }
        }
        false
    }

    /// Number of completed-but-unclaimed orders currently racked.
    pub(crate) fn occupied(&self) -> usize {
        self.slots
            .lock()
            .expect("ready rack lock poisoned")
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}
