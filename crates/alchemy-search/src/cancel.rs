//! Tri-state cancellation shared by concurrent search branches.

use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a multi-solution search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Branches may keep working.
    Running,
    /// Enough solutions were collected.
    QuotaReached,
    /// The caller gave up on the search.
    Aborted,
}

const RUNNING: u8 = 0;
const QUOTA_REACHED: u8 = 1;
const ABORTED: u8 = 2;

/// Cancellation signal checked by every branch before it blocks or sends.
///
/// The state leaves `Running` at most once; whichever of
/// [`reach_quota`](Self::reach_quota) and [`abort`](Self::abort) gets there
/// first wins and later calls are no-ops. Branches already past a check may
/// finish, their results are then discarded by the collector.
///
/// # Example
///
/// ```rust
/// use alchemy_search::{CancelToken, SearchState};
///
/// let token = CancelToken::new();
/// assert!(token.is_running());
/// assert!(token.reach_quota());
/// assert!(!token.abort());
/// assert_eq!(token.state(), SearchState::QuotaReached);
/// ```
#[derive(Debug, Default)]
pub struct CancelToken {
    state: AtomicU8,
}

impl CancelToken {
    /// Creates a token in the `Running` state.
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(RUNNING),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> SearchState {
        match self.state.load(Ordering::Acquire) {
            RUNNING => SearchState::Running,
            QUOTA_REACHED => SearchState::QuotaReached,
            _ => SearchState::Aborted,
        }
    }

    /// Returns true while branches may keep working.
    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::Acquire) == RUNNING
    }

    /// Marks the quota as reached.
    ///
    /// Returns true if this call stopped the search.
    pub fn reach_quota(&self) -> bool {
        self.transition(QUOTA_REACHED)
    }

    /// Aborts the search.
    ///
    /// Returns true if this call stopped the search.
    pub fn abort(&self) -> bool {
        self.transition(ABORTED)
    }

    fn transition(&self, to: u8) -> bool {
        self.state
            .compare_exchange(RUNNING, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
