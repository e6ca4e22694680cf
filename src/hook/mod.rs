//! OS Input Hook Seam
//!
//! The platform mouse hook lives outside this crate; it delivers button
//! events through the callback-style [`EventSink`] handle obtained from
//! the listener. Events are forwarded over an unbounded channel so the
//! hook callback never blocks, and processing stays serialized in the
//! listener's subscription loop.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

/// Physical mouse button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
    /// Wheel button
    Middle,
    /// First side button (back)
    Back,
    /// Second side button (forward)
    Forward,
    /// Any other button, by platform number
    Other(u8),
}

impl MouseButton {
    /// Build a button identity from a platform button number
    pub fn from_number(number: u8) -> Self {
        match number {
            0 => MouseButton::Left,
            1 => MouseButton::Right,
            2 => MouseButton::Middle,
            3 => MouseButton::Back,
            4 => MouseButton::Forward,
            n => MouseButton::Other(n),
        }
    }

    /// Platform button number
    pub fn number(&self) -> u8 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(n) => *n,
        }
    }

    /// Stable key identity used by mapping records (e.g. `button_3`)
    pub fn key_type(&self) -> String {
        format!("button_{}", self.number())
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_type())
    }
}

/// One mouse button event as delivered by the platform hook
#[derive(Debug, Clone)]
pub struct ButtonEvent {
    /// Pointer x position at event time
    pub x: f64,
    /// Pointer y position at event time
    pub y: f64,
    /// Button identity
    pub button: MouseButton,
    /// True on press, false on release
    pub pressed: bool,
}

/// Slot the listener installs its channel sender into while running
#[derive(Debug, Default)]
pub(crate) struct SinkShared {
    pub(crate) tx: Mutex<Option<UnboundedSender<ButtonEvent>>>,
}

/// Clonable callback handle the platform hook invokes per button event.
///
/// Safe to call from any thread. Events delivered while the listener is
/// stopped are dropped.
#[derive(Debug, Clone)]
pub struct EventSink {
    shared: Arc<SinkShared>,
}

impl EventSink {
    pub(crate) fn new(shared: Arc<SinkShared>) -> Self {
        Self { shared }
    }

    /// Deliver a button event from the platform hook.
    ///
    /// Signature mirrors the hook callback: pointer position, button
    /// identity, and press/release flag.
    pub fn on_click(&self, x: f64, y: f64, button: MouseButton, pressed: bool) {
        let guard = self.shared.tx.lock();
        match guard.as_ref() {
            Some(tx) => {
                // Send failure means the subscription loop is shutting down
                let _ = tx.send(ButtonEvent {
                    x,
                    y,
                    button,
                    pressed,
                });
            }
            None => trace!(%button, pressed, "listener stopped, dropping button event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_number_round_trip() {
        for n in 0..=6u8 {
            assert_eq!(MouseButton::from_number(n).number(), n);
        }
    }

    #[test]
    fn test_key_type_format() {
        assert_eq!(MouseButton::Left.key_type(), "button_0");
        assert_eq!(MouseButton::Back.key_type(), "button_3");
        assert_eq!(MouseButton::Other(9).key_type(), "button_9");
    }

    #[test]
    fn test_sink_drops_events_when_stopped() {
        let shared = Arc::new(SinkShared::default());
        let sink = EventSink::new(Arc::clone(&shared));
        // No sender installed: must not panic
        sink.on_click(0.0, 0.0, MouseButton::Back, false);
    }

    #[tokio::test]
    async fn test_sink_forwards_when_running() {
        let shared = Arc::new(SinkShared::default());
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        *shared.tx.lock() = Some(tx);

        let sink = EventSink::new(shared);
        sink.on_click(10.0, 20.0, MouseButton::Forward, false);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.button, MouseButton::Forward);
        assert!(!event.pressed);
    }
}
