//! Tint stations and the mixing protocol.
//!
//! Each tint has one exclusive dispensing station. An order may touch
//! several stations, which is where deadlock lives: two staff members
//! acquiring overlapping station sets in different orders can wait on each
//! other forever. The deck removes that risk with a single coarse
//! *planning* lock: deciding which stations to take is serialized, so a
//! staff member either acquires its whole set or queues behind whoever
//! got to plan first — no circular wait can form.
//!
//! Mixing itself runs outside the planning lock, holding only the
//! stations the order references, so other staff plan their own
//! acquisitions concurrently. A second *inspection* lock wraps the
//! release loop: the finished can passes through a single checking step
//! that must not overlap between staff members.

use std::sync::{Mutex, MutexGuard};

use crate::order::PaintCan;

/// Station indices reserved beyond the palette.
pub const RESERVED_STATIONS: usize = 3;

/// The externally supplied mixing operation, possibly slow.
///
/// `mix` is called while the staff member holds every station lock the
/// order references, and nothing else. Implementations dispense into the
/// can in place.
pub trait Mixer: Send + Sync {
    /// Mixes one order.
    fn mix(&self, can: &PaintCan);
}

/// Default mixer: dispenses every requested tint into the can.
#[derive(Debug, Default)]
pub struct StandardMixer;

impl Mixer for StandardMixer {
    fn mix(&self, can: &PaintCan) {
        for tint in can.requested_tints() {
            can.dispense(tint);
        }
    }
}

#[derive(Debug, Default)]
struct Station {
    jobs: u64,
}

/// The station lock set plus the two protocol locks.
#[derive(Debug)]
pub(crate) struct MixDeck {
    stations: Vec<Mutex<Station>>,
    planning: Mutex<()>,
    inspection: Mutex<()>,
}

impl MixDeck {
    pub(crate) fn new(station_count: usize) -> Self {
        let stations = (0..station_count).map(|_| Mutex::default()).collect();
        Self {
            stations,
            planning: Mutex::new(()),
            inspection: Mutex::new(()),
        }
    }

    /// Mixes `can` with exclusive access to every station it references.
    ///
    /// Protocol: planning lock → acquire each distinct referenced station
    /// → release planning → mix → inspection lock → release stations →
    /// release inspection. The planning lock is strictly first-acquired
    /// relative to the station set, which is the circular-wait-freedom
    /// argument.
    pub(crate) fn fill(&self, can: &PaintCan, mixer: &dyn Mixer) {
        let wanted = can.distinct_tints();
        let mut held: Vec<MutexGuard<'_, Station>> = Vec::with_capacity(wanted.len());
        {
            let _planning = self.planning.lock().expect("planning lock poisoned");
            tracing::trace!(stations = wanted.len(), "planning station acquisition");
            for tint in &wanted {
                let index = tint.station_index();
                assert!(
                    index < self.stations.len(),
                    "{tint} is outside the shop's station set"
                );
                held.push(self.stations[index].lock().expect("station lock poisoned"));
            }
        }

        mixer.mix(can);

        for station in &mut held {
            station.jobs += 1;
        }

        let _inspection = self.inspection.lock().expect("inspection lock poisoned");
        tracing::trace!(stations = held.len(), "inspecting and releasing stations");
        drop(held);
    }

    /// Jobs completed per station, palette order then reserved indices.
    pub(crate) fn station_jobs(&self) -> Vec<u64> {
        self.stations
            .iter()
            .map(|station| station.lock().expect("station lock poisoned").jobs)
            .collect()
    }
}
