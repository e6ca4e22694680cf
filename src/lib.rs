//! # mousebind
//!
//! Maps mouse buttons and multi-button chords to keyboard shortcuts.
//!
//! A secondary input device's buttons drive arbitrary shortcuts on the
//! host: single-button mappings fire one shortcut, ordered button
//! sequences ("chords") fire another, and the engine disambiguates
//! between the two without misfiring when chords share a prefix.
//!
//! # Architecture
//!
//! ```text
//! mousebind
//!   ├─> Hook Seam        (EventSink callback from the platform mouse hook)
//!   ├─> Mapping Engine   (history window, chord matcher, single-key deferral)
//!   ├─> Shortcut Executor (parse + press/release through a KeyInjector)
//!   ├─> Mapping Store    (file-backed ordered mapping records)
//!   └─> Control Surface  (start/stop/status/reload payloads)
//! ```
//!
//! # Data Flow
//!
//! **Event Path:** hook → EventSink → subscription loop → history window
//! → chord matcher → (match, or deferred single key) → executor →
//! key injection
//!
//! **Control Path:** API layer → MouseListener start/stop/reload/status

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Control surface payload types
pub mod api;

/// Daemon configuration
pub mod config;

/// Event-to-action mapping engine
pub mod engine;

/// OS input hook seam
pub mod hook;

/// File-backed mapping record store
pub mod mappings;

pub use engine::{KeyInjector, KeyToken, MouseListener};
pub use hook::{ButtonEvent, EventSink, MouseButton};
