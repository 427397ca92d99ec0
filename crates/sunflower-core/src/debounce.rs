#![forbid(unsafe_code)]

//! Resize debouncing.
//!
//! [`ResizeDebouncer`] coalesces a burst of resize notifications into one
//! rebuild that fires after a quiet period with no further notifications.
//! Time is supplied by the host as a monotonic [`Duration`] since an
//! arbitrary origin, so the same sequence of calls always yields the same
//! decisions.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use sunflower_core::debounce::{DebounceAction, ResizeDebouncer};
//!
//! let mut debouncer = ResizeDebouncer::new(Duration::from_millis(250));
//! let ms = Duration::from_millis;
//!
//! debouncer.notify(ms(0));
//! debouncer.notify(ms(100)); // resets the quiet period
//! assert_eq!(debouncer.poll(ms(300)), DebounceAction::Wait(ms(50)));
//! assert_eq!(debouncer.poll(ms(350)), DebounceAction::Fire { coalesced: 2 });
//! assert_eq!(debouncer.poll(ms(400)), DebounceAction::Idle);
//! ```
//!
//! # Invariants
//!
//! - At most one `Fire` per burst: firing clears the pending state.
//! - `Fire` is only returned once `quiet` has elapsed since the latest notify.
//! - A zero quiet period fires on the first poll after a notify.

use std::time::Duration;

/// Decision returned by [`ResizeDebouncer::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceAction {
    /// Nothing pending.
    Idle,
    /// Pending; poll again after the given remaining time.
    Wait(Duration),
    /// Quiet period elapsed; rebuild now.
    Fire {
        /// Notifications folded into this rebuild.
        coalesced: u32,
    },
}

/// Trailing-edge debouncer driven by host-supplied monotonic time.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    quiet: Duration,
    deadline: Option<Duration>,
    pending: u32,
    fired: u64,
}

impl ResizeDebouncer {
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
            pending: 0,
            fired: 0,
        }
    }

    /// Record a resize at `now` and restart the quiet period.
    ///
    /// Returns the delay the host should arm its timer with.
    pub fn notify(&mut self, now: Duration) -> Duration {
        self.deadline = Some(now.saturating_add(self.quiet));
        self.pending = self.pending.saturating_add(1);
        crate::trace!(pending = self.pending, "resize notified");
        self.quiet
    }

    /// Whether a rebuild is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time at which the pending rebuild becomes due.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Number of bursts that have fired.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// Decide what to do at `now`.
    pub fn poll(&mut self, now: Duration) -> DebounceAction {
        let Some(deadline) = self.deadline else {
            return DebounceAction::Idle;
        };
        if now < deadline {
            return DebounceAction::Wait(deadline - now);
        }
        let coalesced = self.pending;
        self.deadline = None;
        self.pending = 0;
        self.fired += 1;
        crate::trace!(coalesced, "resize burst settled");
        DebounceAction::Fire { coalesced }
    }

    /// Drop any pending rebuild. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.deadline.take().is_some();
        self.pending = 0;
        was_pending
    }
}
