//! Listener Lifecycle and Event Processing
//!
//! Orchestrates the mapping engine: owns the active mapping table, the
//! history window, and the pending single-key record, and drives them
//! from the event-subscription loop.
//!
//! # Concurrency
//!
//! Two execution contexts touch engine state: the subscription loop
//! (one event per physical button release) and the deferred single-key
//! timer. History window and pending record are guarded together by one
//! mutex; event rates are human-scale and the window holds at most a
//! handful of entries, so a single critical section is sufficient. The
//! mapping table is swapped wholesale behind an `RwLock<Arc<_>>` so a
//! reload never exposes a partially built table to the hot path.

use crate::api::{ControlResponse, ReloadResponse, StatusResponse};
use crate::config::{Config, EngineConfig};
use crate::engine::executor::{KeyInjector, ShortcutExecutor};
use crate::engine::history::HistoryWindow;
use crate::engine::matcher::MappingTable;
use crate::engine::pending::PendingSingleKey;
use crate::hook::{ButtonEvent, EventSink, MouseButton, SinkShared};
use crate::mappings::MappingStore;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// History window plus pending single-key record, guarded as one unit
struct EngineState {
    history: HistoryWindow,
    pending: Option<PendingSingleKey>,
}

/// Lifecycle state
struct RunState {
    active: bool,
    shutdown: Option<CancellationToken>,
}

struct Inner<I> {
    cfg: EngineConfig,
    store: MappingStore,
    executor: ShortcutExecutor<I>,
    table: RwLock<Arc<MappingTable>>,
    state: Mutex<EngineState>,
    run: Mutex<RunState>,
    sink: Arc<SinkShared>,
    generation: AtomicU64,
}

impl<I: KeyInjector> Inner<I> {
    /// Rebuild the mapping table from the store and install it atomically.
    ///
    /// A store failure degrades to an empty table rather than aborting;
    /// the listener keeps running without mappings.
    fn load_table(&self) {
        let records = match self.store.load() {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "failed to load mappings, installing empty table");
                Vec::new()
            }
        };
        let table = MappingTable::build(&records);
        *self.table.write() = Arc::new(table);
    }

    /// Execute the pending single-key action if it is still the one this
    /// timer was armed for. A mismatched or absent record means the
    /// deferral was superseded between the deadline and this call.
    fn fire_pending(&self, generation: u64) {
        let taken = {
            let mut state = self.state.lock();
            match state.pending.as_ref() {
                Some(p) if p.generation() == generation => state.pending.take(),
                _ => None,
            }
        };

        let Some(pending) = taken else {
            return;
        };

        match self.executor.execute(pending.action()) {
            Ok(()) => {
                info!(
                    key_type = %pending.key_type(),
                    action = %pending.action(),
                    "single-key mapping executed"
                );
            }
            Err(e) => {
                error!(
                    key_type = %pending.key_type(),
                    error = %e,
                    "single-key mapping failed"
                );
            }
        }
    }
}

/// Mouse button listener: lifecycle orchestration plus the event-to-action
/// translation engine.
///
/// Clonable handle over shared state; clones drive the same engine.
pub struct MouseListener<I: KeyInjector> {
    inner: Arc<Inner<I>>,
}

impl<I: KeyInjector> Clone for MouseListener<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: KeyInjector + 'static> MouseListener<I> {
    /// Create a stopped listener from configuration and an injector
    pub fn new(config: &Config, injector: I) -> Self {
        let cfg = config.engine.clone();
        let history = HistoryWindow::new(cfg.sequence_timeout(), cfg.history_cap);
        Self {
            inner: Arc::new(Inner {
                cfg,
                store: MappingStore::new(config.listener.mappings_path.clone()),
                executor: ShortcutExecutor::new(injector),
                table: RwLock::new(Arc::new(MappingTable::default())),
                state: Mutex::new(EngineState {
                    history,
                    pending: None,
                }),
                run: Mutex::new(RunState {
                    active: false,
                    shutdown: None,
                }),
                sink: Arc::new(SinkShared::default()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Callback handle for the platform hook to deliver button events
    pub fn sink(&self) -> EventSink {
        EventSink::new(Arc::clone(&self.inner.sink))
    }

    /// Whether the listener is currently running
    pub fn is_running(&self) -> bool {
        self.inner.run.lock().active
    }

    /// Current status report
    pub fn status(&self) -> StatusResponse {
        let running = self.is_running();
        StatusResponse {
            running,
            message: if running {
                "listener running".to_string()
            } else {
                "listener stopped".to_string()
            },
        }
    }

    /// Start the listener: load mappings and spawn the subscription loop.
    ///
    /// Idempotent; a second start is a no-op reported with `success:
    /// false` and spawns nothing.
    pub fn start(&self) -> ControlResponse {
        let mut run = self.inner.run.lock();
        if run.active {
            return ControlResponse {
                success: false,
                message: "listener already running".to_string(),
            };
        }

        self.inner.load_table();

        let (tx, rx) = mpsc::unbounded_channel();
        *self.inner.sink.tx.lock() = Some(tx);

        let shutdown = CancellationToken::new();
        run.shutdown = Some(shutdown.clone());
        run.active = true;

        tokio::spawn(run_subscription(self.clone(), rx, shutdown));

        info!("mouse listener started");
        ControlResponse {
            success: true,
            message: "listener started".to_string(),
        }
    }

    /// Stop the listener: cancel any pending single key, clear the
    /// history window, and shut down the subscription loop.
    ///
    /// Idempotent; stopping a stopped listener reports `success: false`.
    pub fn stop(&self) -> ControlResponse {
        {
            let mut run = self.inner.run.lock();
            if !run.active {
                return ControlResponse {
                    success: false,
                    message: "listener not running".to_string(),
                };
            }
            if let Some(shutdown) = run.shutdown.take() {
                shutdown.cancel();
            }
            *self.inner.sink.tx.lock() = None;
            run.active = false;
        }

        let mut state = self.inner.state.lock();
        if let Some(pending) = state.pending.take() {
            pending.cancel();
            debug!(key_type = %pending.key_type(), "pending single key discarded on stop");
        }
        state.history.clear();

        info!("mouse listener stopped");
        ControlResponse {
            success: true,
            message: "listener stopped".to_string(),
        }
    }

    /// Reload the mapping table from the store.
    ///
    /// Valid in either lifecycle state. History window and pending state
    /// are deliberately left untouched: a reload mid-sequence does not
    /// erase in-flight chord detection.
    pub fn reload(&self) -> ReloadResponse {
        self.inner.load_table();
        ReloadResponse {
            message: "mappings reloaded".to_string(),
        }
    }

    /// Stop the listener if running, then start it again
    pub fn restart(&self) -> ControlResponse {
        if self.is_running() {
            self.stop();
        }
        self.start()
    }

    /// Process one button-release event.
    ///
    /// This is the engine entry the subscription loop drives; hook
    /// adapters that deliver events directly may call it as well.
    /// Returns whether the event was consumed by a mapping.
    pub fn handle_button(&self, button: MouseButton) -> bool {
        let key_type = button.key_type();
        let now = Instant::now();
        let table = Arc::clone(&*self.inner.table.read());

        let mut state = self.inner.state.lock();

        // Any new event invalidates the outstanding deferral; the event is
        // then evaluated from scratch and may arm a fresh one.
        if let Some(pending) = state.pending.take() {
            pending.cancel();
        }

        state.history.record(&key_type, now);

        if let Some(matched) = table.match_sequence(&state.history) {
            let mapping = matched.mapping;

            match self.inner.executor.execute(&mapping.action) {
                Ok(()) => {
                    info!(
                        name = %mapping.name,
                        sequence = ?mapping.sequence,
                        action = %mapping.action,
                        "chord mapping executed"
                    );
                    // A match resets context completely so stale partial
                    // presses cannot leak into the next chord.
                    state.history.clear();
                    true
                }
                Err(e) => {
                    error!(action = %mapping.action, error = %e, "chord mapping failed");
                    false
                }
            }
        } else if let Some(action) = table.single_action(&key_type) {
            // Maybe the first button of a longer chord: defer, and let a
            // newer event or chord match cancel the deferral.
            let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed) + 1;
            let pending =
                PendingSingleKey::new(key_type.clone(), action.to_string(), now, generation);
            let token = pending.token();
            state.pending = Some(pending);
            drop(state);

            let delay = self.inner.cfg.single_key_delay();
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = tokio::time::sleep(delay) => inner.fire_pending(generation),
                }
            });

            debug!(%key_type, %action, "single-key mapping deferred");
            true
        } else {
            false
        }
    }
}

/// Drain button events until shutdown. Only release events drive the
/// engine; presses are delivered by the hook but ignored here.
async fn run_subscription<I: KeyInjector + 'static>(
    listener: MouseListener<I>,
    mut rx: mpsc::UnboundedReceiver<ButtonEvent>,
    shutdown: CancellationToken,
) {
    info!("event subscription loop started");
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            event = rx.recv() => match event {
                Some(event) => {
                    if !event.pressed {
                        listener.handle_button(event.button);
                    }
                }
                None => break,
            },
        }
    }
    info!("event subscription loop stopped");
}
