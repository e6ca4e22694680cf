//! Event-to-Action Mapping Engine
//!
//! Classifies a stream of button-release events into chord matches,
//! deferred single-key actions, or no-ops, and executes the resolved
//! keyboard shortcuts.
//!
//! # Architecture
//!
//! ```text
//! Platform hook             MouseListener                 Key injection
//! ━━━━━━━━━━━━━             ━━━━━━━━━━━━━                 ━━━━━━━━━━━━━
//!
//! button release ─────────> HistoryWindow (append + prune)
//!                                 │
//!                                 ├─> MappingTable::match_sequence
//!                                 │     chord match ──> ShortcutExecutor ──> press/release
//!                                 │
//!                                 └─> single-key map hit
//!                                       └─> PendingSingleKey (deferred)
//!                                             deadline ──> ShortcutExecutor ──> press/release
//! ```
//!
//! The deferral exists because a lone press is ambiguous: it may be a
//! complete single-key action or the first button of a chord still
//! arriving. Delaying by a fixed window trades a small fixed latency for
//! disambiguation without lookahead.

pub mod error;
pub mod executor;
pub mod history;
pub mod listener;
pub mod matcher;
pub mod pending;
pub mod shortcut;

pub use error::{ExecutionError, InjectionError, ShortcutError};
pub use executor::{KeyInjector, ShortcutExecutor, TracingInjector};
pub use history::{HistoryEntry, HistoryWindow};
pub use listener::MouseListener;
pub use matcher::{MappingTable, SequenceMapping, SequenceMatch};
pub use pending::PendingSingleKey;
pub use shortcut::{KeyToken, Modifier, NamedKey, ParsedShortcut, ShortcutParser};
