//! Single-Key Disambiguation State
//!
//! A lone button press is ambiguous: it may be a complete single-key
//! action, or the first button of a chord that has not finished arriving.
//! The listener defers the single-key action by a fixed delay and records
//! it here; any newer event or chord match cancels the record before the
//! deadline fires. At most one record is ever in flight.

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// The one outstanding deferred single-key action, plus its timer handle.
#[derive(Debug)]
pub struct PendingSingleKey {
    key_type: String,
    action: String,
    scheduled_at: Instant,
    generation: u64,
    cancel: CancellationToken,
}

impl PendingSingleKey {
    /// Create a pending record for a deferred single-key action
    pub(crate) fn new(key_type: String, action: String, scheduled_at: Instant, generation: u64) -> Self {
        Self {
            key_type,
            action,
            scheduled_at,
            generation,
            cancel: CancellationToken::new(),
        }
    }

    /// Button identity the deferred action belongs to
    pub fn key_type(&self) -> &str {
        &self.key_type
    }

    /// Shortcut string scheduled for execution
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Time the deferral was scheduled
    pub fn scheduled_at(&self) -> Instant {
        self.scheduled_at
    }

    /// Generation stamp distinguishing this record from later ones
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Token the deferred timer task waits on
    pub(crate) fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel the deferred timer.
    ///
    /// Race-free by construction: canceling after the deadline has fired
    /// is a benign no-op, canceling before it prevents the timer callback
    /// from executing the action.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_trips_token() {
        let pending = PendingSingleKey::new(
            "button_2".to_string(),
            "ctrl+c".to_string(),
            Instant::now(),
            1,
        );
        let token = pending.token();
        assert!(!token.is_cancelled());

        pending.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let pending = PendingSingleKey::new(
            "button_2".to_string(),
            "ctrl+c".to_string(),
            Instant::now(),
            1,
        );
        pending.cancel();
        pending.cancel();
        assert!(pending.token().is_cancelled());
    }

    #[test]
    fn test_accessors() {
        let at = Instant::now();
        let pending = PendingSingleKey::new("button_4".to_string(), "f5".to_string(), at, 7);
        assert_eq!(pending.key_type(), "button_4");
        assert_eq!(pending.action(), "f5");
        assert_eq!(pending.scheduled_at(), at);
        assert_eq!(pending.generation(), 7);
    }
}
