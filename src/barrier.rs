//! Staff exit barrier: single-use N-way rendezvous.
//!
//! The barrier trips when every configured staff member has arrived.
//! Exactly one arrival observes `is_leader = true`. Unlike a cyclic
//! barrier there are no generations: staff exit once, and the tripped
//! barrier is what licenses `close`.

use std::sync::{Condvar, Mutex};

#[derive(Debug)]
struct BarrierState {
    arrived: usize,
    tripped: bool,
}

/// Rendezvous ensuring no staff member exits until all have decided to.
#[derive(Debug)]
pub(crate) struct ExitBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    cvar: Condvar,
}

/// What a staff member learns when released from the barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExitConsensus {
    is_leader: bool,
}

impl ExitConsensus {
    /// True for exactly one staff member: the last to arrive.
    pub(crate) const fn is_leader(self) -> bool {
        self.is_leader
    }
}

impl ExitBarrier {
    /// Creates a barrier that trips when `parties` staff have arrived.
    ///
    /// # Panics
    /// Panics if `parties == 0`.
    pub(crate) fn new(parties: usize) -> Self {
        assert!(parties > 0, "exit barrier requires at least 1 party");
        Self {
            parties,
            state: Mutex::new(BarrierState {
                arrived: 0,
                tripped: false,
            }),
            cvar: Condvar::new(),
        }
    }

    /// Arrives at the barrier and blocks until all staff have arrived.
    ///
    /// # Panics
    /// Panics on arrival after the barrier has tripped: that would mean
    /// more staff threads than the shop was configured for.
    pub(crate) fn wait(&self) -> ExitConsensus {
        let mut state = self.state.lock().expect("exit barrier lock poisoned");
        assert!(
            !state.tripped,
            "exit barrier re-entered after consensus: staff count exceeds configuration"
        );
        state.arrived += 1;

        if state.arrived == self.parties {
            state.tripped = true;
            self.cvar.notify_all();
            return ExitConsensus { is_leader: true };
        }

        while !state.tripped {
            state = self
                .cvar
                .wait(state)
                .expect("exit barrier lock poisoned");
        }
        ExitConsensus { is_leader: false }
    }

    /// True once every staff member has arrived.
    pub(crate) fn is_complete(&self) -> bool {
        self.state
            .lock()
            .expect("exit barrier lock poisoned")
            .tripped
    }

    /// Staff members that have arrived so far.
    pub(crate) fn arrived(&self) -> usize {
        self.state
            .lock()
            .expect("exit barrier lock poisoned")
            .arrived
    }

    pub(crate) const fn parties(&self) -> usize {
        self.parties
    }
}
