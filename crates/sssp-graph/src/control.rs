//! Cooperative suspend/cancel signal shared by the generator and both
//! solvers. The UI/animation surface that drives this signal is an external
//! collaborator; this module only defines the contract the core honors.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};

use thiserror::Error;

const RUNNING: u8 = 0;
const PAUSED: u8 = 1;
const CANCELLED: u8 = 2;

/// Raised when a component observes cancellation at a `hesitate`/
/// `check_pause_or_cancel` hook point.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("solve was cancelled")]
pub struct Cancelled;

/// The out-of-band suspension/cancellation signal consumed by the
/// generator and both solvers.
///
/// Exposes a `register`/`unregister`/`hesitate` coordination interface plus
/// the non-blocking `check_pause_or_cancel` hook solver threads poll between
/// units of work. Built directly on `std::sync::{Mutex, Condvar}` rather than a crate,
/// matching how the teacher reaches for `std::sync::Mutex` directly in
/// `graph_builder`'s adjacency list rather than pulling in `parking_lot`
/// for single-purpose locks.
#[derive(Debug, Default)]
pub struct SolveControl {
    state: AtomicU8,
    participants: AtomicUsize,
    gate: Mutex<()>,
    condvar: Condvar,
}

impl SolveControl {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(RUNNING),
            participants: AtomicUsize::new(0),
            gate: Mutex::new(()),
            condvar: Condvar::new(),
        }
    }

    /// Registers a component (a solver thread) as an active participant.
    pub fn register(&self) {
        self.participants.fetch_add(1, Ordering::AcqRel);
    }

    /// Unregisters a previously registered participant.
    pub fn unregister(&self) {
        self.participants.fetch_sub(1, Ordering::AcqRel);
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.load(Ordering::Acquire)
    }

    pub fn request_pause(&self) {
        let _ = self
            .state
            .compare_exchange(RUNNING, PAUSED, Ordering::AcqRel, Ordering::Acquire);
    }

    pub fn resume(&self) {
        if self
            .state
            .compare_exchange(PAUSED, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let _guard = self.gate.lock().unwrap_or_else(|poison| poison.into_inner());
            self.condvar.notify_all();
        }
    }

    pub fn cancel(&self) {
        self.state.store(CANCELLED, Ordering::Release);
        let _guard = self.gate.lock().unwrap_or_else(|poison| poison.into_inner());
        self.condvar.notify_all();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::Acquire) == CANCELLED
    }

    /// Non-blocking check: returns immediately, raising [`Cancelled`] if the
    /// solve has been cancelled. Never blocks on a pause request — that is
    /// `hesitate`'s job.
    pub fn check_pause_or_cancel(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Blocks the caller while the solve is paused. Returns immediately if
    /// running, and returns [`Cancelled`] immediately (or upon resume-from-
    /// cancel) if the solve has been cancelled.
    pub fn hesitate(&self) -> Result<(), Cancelled> {
        loop {
            match self.state.load(Ordering::Acquire) {
                CANCELLED => return Err(Cancelled),
                PAUSED => {
                    let guard = self.gate.lock().unwrap_or_else(|poison| poison.into_inner());
                    let _guard = self
                        .condvar
                        .wait_while(guard, |()| self.state.load(Ordering::Acquire) == PAUSED)
                        .unwrap_or_else(|poison| poison.into_inner());
                }
                _ => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn cancel_is_observed_without_blocking() {
        let control = SolveControl::new();
        assert!(control.check_pause_or_cancel().is_ok());
        control.cancel();
        assert_eq!(control.check_pause_or_cancel(), Err(Cancelled));
        assert_eq!(control.hesitate(), Err(Cancelled));
    }

    #[test]
    fn pause_blocks_hesitate_until_resumed() {
        let control = Arc::new(SolveControl::new());
        control.request_pause();

        let waiter = {
            let control = Arc::clone(&control);
            thread::spawn(move || control.hesitate())
        };

        thread::sleep(Duration::from_millis(20));
        control.resume();

        assert_eq!(waiter.join().unwrap(), Ok(()));
    }

    #[test]
    fn cancel_wakes_a_paused_waiter() {
        let control = Arc::new(SolveControl::new());
        control.request_pause();

        let waiter = {
            let control = Arc::clone(&control);
            thread::spawn(move || control.hesitate())
        };

        thread::sleep(Duration::from_millis(20));
        control.cancel();

        assert_eq!(waiter.join().unwrap(), Err(Cancelled));
    }
}
