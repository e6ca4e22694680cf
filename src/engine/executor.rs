//! Shortcut Execution
//!
//! Resolves a shortcut string through the memoizing parser, then presses
//! every key token in list order and releases them in exactly reversed
//! order. Reverse release guarantees no modifier is let go before the
//! keys it modifies.

use crate::engine::error::{ExecutionError, InjectionError, Result};
use crate::engine::shortcut::{KeyToken, ShortcutParser};
use tracing::{info, trace};

/// OS key press/release primitive.
///
/// This is the seam to the platform key-injection layer. The primitive is
/// assumed synchronous and fast; the executor performs no retries because
/// replaying a keystroke could double-fire user-visible effects.
pub trait KeyInjector: Send + Sync {
    /// Press a key
    fn press(&self, key: &KeyToken) -> std::result::Result<(), InjectionError>;

    /// Release a key
    fn release(&self, key: &KeyToken) -> std::result::Result<(), InjectionError>;
}

/// Injector that only logs press/release calls.
///
/// Used for dry runs and development when no platform injection backend
/// is wired in.
#[derive(Debug, Default)]
pub struct TracingInjector;

impl KeyInjector for TracingInjector {
    fn press(&self, key: &KeyToken) -> std::result::Result<(), InjectionError> {
        info!(key = %key, "press");
        Ok(())
    }

    fn release(&self, key: &KeyToken) -> std::result::Result<(), InjectionError> {
        info!(key = %key, "release");
        Ok(())
    }
}

/// Executes shortcut strings against a key injector
pub struct ShortcutExecutor<I> {
    parser: ShortcutParser,
    injector: I,
}

impl<I: KeyInjector> ShortcutExecutor<I> {
    /// Create an executor around the given injector
    pub fn new(injector: I) -> Self {
        Self {
            parser: ShortcutParser::new(),
            injector,
        }
    }

    /// Execute a shortcut with audit logging
    pub fn execute(&self, shortcut: &str) -> Result<()> {
        info!(%shortcut, "executing shortcut");
        self.run(shortcut)?;
        info!(%shortcut, "shortcut executed");
        Ok(())
    }

    /// Execute a shortcut without audit logging.
    ///
    /// Identical press/release semantics to [`execute`](Self::execute);
    /// failure is reported as a flag for latency-sensitive call sites.
    pub fn execute_fast(&self, shortcut: &str) -> bool {
        self.run(shortcut).is_ok()
    }

    fn run(&self, shortcut: &str) -> Result<()> {
        let tokens = self.parser.parse(shortcut)?;

        let mut pressed: Vec<KeyToken> = Vec::with_capacity(tokens.len());
        for token in tokens.iter() {
            if let Err(source) = self.injector.press(token) {
                // Best-effort unwind so a failed combo does not leave
                // modifiers stuck down, then surface the original error.
                for held in pressed.iter().rev() {
                    let _ = self.injector.release(held);
                }
                return Err(ExecutionError::Press {
                    key: token.to_string(),
                    source,
                });
            }
            pressed.push(*token);
        }

        let mut first_failure = None;
        for token in tokens.iter().rev() {
            trace!(key = %token, "release");
            if let Err(source) = self.injector.release(token) {
                // Keep releasing the remaining keys before reporting
                first_failure.get_or_insert(ExecutionError::Release {
                    key: token.to_string(),
                    source,
                });
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Records every press/release call for assertion
    #[derive(Default, Clone)]
    struct RecordingInjector {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingInjector {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    impl KeyInjector for RecordingInjector {
        fn press(&self, key: &KeyToken) -> std::result::Result<(), InjectionError> {
            self.calls.lock().push(format!("press {}", key));
            Ok(())
        }

        fn release(&self, key: &KeyToken) -> std::result::Result<(), InjectionError> {
            self.calls.lock().push(format!("release {}", key));
            Ok(())
        }
    }

    /// Fails the press of one specific key
    struct FailingInjector {
        fail_on: String,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl KeyInjector for FailingInjector {
        fn press(&self, key: &KeyToken) -> std::result::Result<(), InjectionError> {
            if key.to_string() == self.fail_on {
                return Err(InjectionError("synthetic press failure".to_string()));
            }
            self.calls.lock().push(format!("press {}", key));
            Ok(())
        }

        fn release(&self, key: &KeyToken) -> std::result::Result<(), InjectionError> {
            self.calls.lock().push(format!("release {}", key));
            Ok(())
        }
    }

    #[test]
    fn test_press_order_and_reverse_release() {
        let injector = RecordingInjector::default();
        let executor = ShortcutExecutor::new(injector.clone());

        executor.execute("ctrl+shift+c").unwrap();

        assert_eq!(
            injector.calls(),
            vec![
                "press ctrl",
                "press shift",
                "press c",
                "release c",
                "release shift",
                "release ctrl",
            ]
        );
    }

    #[test]
    fn test_single_key_shortcut() {
        let injector = RecordingInjector::default();
        let executor = ShortcutExecutor::new(injector.clone());

        executor.execute("f5").unwrap();
        assert_eq!(injector.calls(), vec!["press f5", "release f5"]);
    }

    #[test]
    fn test_execute_invalid_shortcut_is_parse_error() {
        let executor = ShortcutExecutor::new(RecordingInjector::default());
        let err = executor.execute("ctrl+bogus").unwrap_err();
        assert!(matches!(err, ExecutionError::Shortcut(_)));
    }

    #[test]
    fn test_execute_fast_reports_failure_as_flag() {
        let executor = ShortcutExecutor::new(RecordingInjector::default());
        assert!(executor.execute_fast("ctrl+v"));
        assert!(!executor.execute_fast("f99"));
    }

    #[test]
    fn test_press_failure_unwinds_held_keys() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let injector = FailingInjector {
            fail_on: "c".to_string(),
            calls: Arc::clone(&calls),
        };
        let executor = ShortcutExecutor::new(injector);

        let err = executor.execute("ctrl+shift+c").unwrap_err();
        assert!(matches!(err, ExecutionError::Press { .. }));

        // Already-pressed modifiers were released in reverse order
        assert_eq!(
            calls.lock().clone(),
            vec![
                "press ctrl",
                "press shift",
                "release shift",
                "release ctrl",
            ]
        );
    }

    #[test]
    fn test_parser_cache_shared_across_executions() {
        let executor = ShortcutExecutor::new(RecordingInjector::default());
        executor.execute("ctrl+c").unwrap();
        executor.execute("ctrl+c").unwrap();
        assert_eq!(executor.parser.cached_len(), 1);
    }
}
