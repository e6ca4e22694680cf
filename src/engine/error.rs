//! Mapping Engine Error Types
//!
//! Error handling for shortcut parsing and shortcut execution.

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, ExecutionError>;

/// Shortcut string parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    /// Token is not a modifier, named key, function key, or single character
    #[error("unknown key token: {0:?}")]
    UnknownToken(String),

    /// Function key number outside the supported f1-f20 range
    #[error("invalid function key: {0:?} (supported: f1-f20)")]
    InvalidFunctionKey(String),

    /// Shortcut string produced no key tokens
    #[error("empty shortcut: {0:?}")]
    Empty(String),
}

/// Key press/release primitive failure
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct InjectionError(pub String);

/// Shortcut execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// Shortcut string failed to parse
    #[error("invalid shortcut: {0}")]
    Shortcut(#[from] ShortcutError),

    /// Key press primitive failed
    #[error("failed to press {key}: {source}")]
    Press {
        /// Key that failed to press
        key: String,
        /// Underlying injection failure
        source: InjectionError,
    },

    /// Key release primitive failed
    #[error("failed to release {key}: {source}")]
    Release {
        /// Key that failed to release
        key: String,
        /// Underlying injection failure
        source: InjectionError,
    },
}
