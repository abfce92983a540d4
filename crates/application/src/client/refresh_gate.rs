//! Single-flight coordination of access-token refreshes.
//!
//! The first request to hit a 401 becomes the leader and performs the
//! refresh. Requests that hit a 401 while the refresh is in flight park
//! on a oneshot channel and are released in arrival order once the leader
//! settles.
//!
//! A request whose 401 arrives after a refresh already settled must not
//! start another one. Callers snapshot [`RefreshGate::generation`] before
//! sending and pass it to [`RefreshGate::enter`]; a newer generation hands
//! back the settled outcome instead of a leader role.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::ApiError;

/// Result of a refresh: the new access token, or the failure every
/// waiter is rejected with.
pub type RefreshOutcome = Result<String, ApiError>;

struct Waiter {
    ticket: u64,
    tx: oneshot::Sender<RefreshOutcome>,
}

#[derive(Default)]
struct GateState {
    refreshing: bool,
    next_ticket: u64,
    waiters: VecDeque<Waiter>,
    /// Number of settled refreshes.
    generation: u64,
    last_outcome: Option<RefreshOutcome>,
}

/// Guards the "refresh in progress" flag and the queue of waiters.
///
/// The lock is never held across an await point.
#[derive(Default)]
pub struct RefreshGate {
    state: Mutex<GateState>,
}

/// Role assigned to a request entering the gate.
pub enum Entry<'a> {
    /// No refresh was in flight; the caller must perform it.
    Leader(RefreshGuard<'a>),
    /// A refresh is in flight; the caller waits for its outcome.
    Follower(Follower),
    /// A refresh settled after the caller's snapshot; this is its outcome.
    Settled(RefreshOutcome),
}

impl RefreshGate {
    /// Creates an idle gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of refreshes settled so far.
    ///
    /// Snapshot this before sending a request and hand it to
    /// [`enter`](Self::enter) if the request comes back 401.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Enters the gate with the generation observed before sending.
    ///
    /// Joins an in-flight refresh as a follower, reuses the outcome of a
    /// refresh settled since `seen`, or otherwise becomes the leader.
    pub fn enter(&self, seen: u64) -> Entry<'_> {
        let mut state = self.state.lock();
        if state.refreshing {
            state.next_ticket += 1;
            let ticket = state.next_ticket;
            let (tx, rx) = oneshot::channel();
            state.waiters.push_back(Waiter { ticket, tx });
            return Entry::Follower(Follower { ticket, rx });
        }
        if state.generation != seen
            && let Some(outcome) = &state.last_outcome
        {
            return Entry::Settled(outcome.clone());
        }
        state.refreshing = true;
        Entry::Leader(RefreshGuard {
            gate: self,
            settled: false,
        })
    }

    /// Returns true while a refresh is in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().refreshing
    }

    /// Returns the number of parked waiters.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.lock().waiters.len()
    }

    /// Clears the flag, records the outcome if any and takes the queue in
    /// one step.
    fn finish(&self, outcome: Option<&RefreshOutcome>) -> VecDeque<Waiter> {
        let mut state = self.state.lock();
        state.refreshing = false;
        if let Some(outcome) = outcome {
            state.generation += 1;
            state.last_outcome = Some(outcome.clone());
        }
        std::mem::take(&mut state.waiters)
    }
}

/// Held by the leader for the duration of the refresh.
///
/// Dropping the guard without settling (the leader's future was
/// cancelled) resets the gate and rejects every waiter.
pub struct RefreshGuard<'a> {
    gate: &'a RefreshGate,
    settled: bool,
}

impl RefreshGuard<'_> {
    /// Releases every waiter with `outcome`, oldest first, and resets the
    /// gate. Returns the tickets of the released waiters in release order.
    pub fn settle(mut self, outcome: &RefreshOutcome) -> Vec<u64> {
        self.settled = true;
        self.gate
            .finish(Some(outcome))
            .into_iter()
            .map(|waiter| {
                // A waiter whose caller went away has nothing to receive.
                let _ = waiter.tx.send(outcome.clone());
                waiter.ticket
            })
            .collect()
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        for waiter in self.gate.finish(None) {
            let _ = waiter.tx.send(Err(ApiError::refresh_aborted()));
        }
    }
}

/// A request parked behind an in-flight refresh.
pub struct Follower {
    ticket: u64,
    rx: oneshot::Receiver<RefreshOutcome>,
}

impl Follower {
    /// Position in the queue; lower tickets are released first.
    #[must_use]
    pub const fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Waits for the leader's outcome.
    pub async fn wait(self) -> RefreshOutcome {
        self.rx
            .await
            .unwrap_or_else(|_| Err(ApiError::refresh_aborted()))
    }
}
