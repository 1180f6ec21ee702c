//! Activation session: the shared flag for a currently firing alarm.
//!
//! At most one alarm rings at a time. The flag is shared between the
//! ringing loop and whatever input path completes the wake challenge, so
//! it is a clone-to-share atomic rather than a field on the store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ActivationSession {
    active: Arc<AtomicBool>,
}

impl ActivationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an alarm as ringing. Returns false when one already is; the
    /// caller must not start a second ring.
    pub fn start(&self) -> bool {
        !self.active.swap(true, Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Clear the ringing flag. Returns true when this call did the
    /// clearing, false when nothing was ringing.
    pub fn dismiss(&self) -> bool {
        self.active.swap(false, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_start_is_rejected_while_active() {
        let session = ActivationSession::new();
        assert!(session.start());
        assert!(!session.start());
        assert!(session.is_active());
    }

    #[test]
    fn dismiss_clears_and_reports_the_transition() {
        let session = ActivationSession::new();
        assert!(!session.dismiss());
        session.start();
        assert!(session.dismiss());
        assert!(!session.is_active());
        assert!(session.start());
    }

    #[test]
    fn clones_share_the_flag() {
        let session = ActivationSession::new();
        let handle = session.clone();
        session.start();
        assert!(handle.is_active());
        handle.dismiss();
        assert!(!session.is_active());
    }
}
