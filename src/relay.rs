//! Workspace change relay
//!
//! The editor widget emits a JSON change event on every edit. The relay pulls
//! the placed blocks out of `event.blocks.blocks` and publishes them, verbatim,
//! to the host's shared state. Events without that list are logged and
//! dropped; the shared state keeps its previous value.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::ErrorKind;

/// The block instances currently placed in the workspace, in widget order.
pub type WorkspaceSnapshot = Vec<Value>;

/// The host's shared state container.
pub trait SharedState {
    /// Replace the published workspace snapshot.
    fn publish_workspace(&self, snapshot: WorkspaceSnapshot);
}

impl<F> SharedState for F
where
    F: Fn(WorkspaceSnapshot),
{
    fn publish_workspace(&self, snapshot: WorkspaceSnapshot) {
        self(snapshot)
    }
}

/// In-memory shared state.
///
/// Clones share the same slot. Each publish bumps a version counter so
/// readers can tell a republished identical snapshot from no publish at all.
#[derive(Debug, Clone, Default)]
pub struct SharedWorkspace {
    inner: Arc<RwLock<Published>>,
}

#[derive(Debug, Default)]
struct Published {
    snapshot: Option<WorkspaceSnapshot>,
    version: u64,
}

impl SharedWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last published snapshot, if any.
    pub fn current(&self) -> Option<WorkspaceSnapshot> {
        self.inner.read().snapshot.clone()
    }

    /// Number of publishes so far.
    pub fn version(&self) -> u64 {
        self.inner.read().version
    }
}

impl SharedState for SharedWorkspace {
    fn publish_workspace(&self, snapshot: WorkspaceSnapshot) {
        let mut inner = self.inner.write();
        inner.snapshot = Some(snapshot);
        inner.version += 1;
    }
}

/// Forwards widget change events to a [`SharedState`].
pub struct WorkspaceRelay<P> {
    state: P,
    malformed: AtomicU64,
}

impl<P: SharedState> WorkspaceRelay<P> {
    pub fn new(state: P) -> Self {
        Self {
            state,
            malformed: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> &P {
        &self.state
    }

    /// Count of events dropped as malformed.
    pub fn malformed_events(&self) -> u64 {
        self.malformed.load(Ordering::Relaxed)
    }

    /// Handle one change event.
    ///
    /// Publishes exactly once when `event.blocks.blocks` is an array, and
    /// not at all otherwise.
    pub fn handle_change(&self, event: &Value) -> Result<(), RelayError> {
        match extract_blocks(event) {
            Some(blocks) => {
                debug!(blocks = blocks.len(), "publishing workspace snapshot");
                self.state.publish_workspace(blocks.clone());
                Ok(())
            }
            None => Err(self.reject(event.to_string())),
        }
    }

    /// Handle a change event still in its serialized form.
    pub fn handle_change_json(&self, event: &str) -> Result<(), RelayError> {
        match serde_json::from_str::<Value>(event) {
            Ok(value) => self.handle_change(&value),
            Err(_) => Err(self.reject(event.to_string())),
        }
    }

    fn reject(&self, event: String) -> RelayError {
        self.malformed.fetch_add(1, Ordering::Relaxed);
        warn!(%event, "invalid block data in workspace change");
        RelayError::MalformedEvent(event)
    }
}

fn extract_blocks(event: &Value) -> Option<&Vec<Value>> {
    event.get("blocks")?.get("blocks")?.as_array()
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Invalid block data: {0}")]
    MalformedEvent(String),
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedChangeEvent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Counts events at WARN level.
    #[derive(Clone, Default)]
    struct WarnCounter(Arc<AtomicU64>);

    impl WarnCounter {
        fn count(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_valid_event_publishes_once() {
        let relay = WorkspaceRelay::new(SharedWorkspace::new());
        let event = json!({ "blocks": { "languageVersion": 0, "blocks": [{ "type": "block_0" }, { "type": "block_1" }] } });

        relay.handle_change(&event).unwrap();

        assert_eq!(relay.state().version(), 1);
        assert_eq!(
            relay.state().current().unwrap(),
            vec![json!({ "type": "block_0" }), json!({ "type": "block_1" })]
        );
        assert_eq!(relay.malformed_events(), 0);
    }

    #[test]
    fn test_missing_blocks_publishes_nothing() {
        let relay = WorkspaceRelay::new(SharedWorkspace::new());

        let err = relay.handle_change(&json!({ "blocks": {} })).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedChangeEvent);
        assert_eq!(relay.state().version(), 0);
        assert!(relay.state().current().is_none());
        assert_eq!(relay.malformed_events(), 1);
    }

    #[test]
    fn test_malformed_event_logs_one_warning() {
        let warnings = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(warnings.clone());
        let relay = WorkspaceRelay::new(SharedWorkspace::new());

        tracing::subscriber::with_default(subscriber, || {
            relay
                .handle_change(&json!({ "blocks": { "blocks": [{ "type": "block_0" }] } }))
                .unwrap();
            assert_eq!(warnings.count(), 0);

            assert!(relay.handle_change(&json!({ "blocks": { "x": 1 } })).is_err());
        });

        assert_eq!(warnings.count(), 1);
        assert_eq!(relay.state().version(), 1);
    }

    #[test]
    fn test_malformed_event_keeps_previous_snapshot() {
        let relay = WorkspaceRelay::new(SharedWorkspace::new());
        relay.handle_change(&json!({ "blocks": { "blocks": [1] } })).unwrap();

        assert!(relay.handle_change(&json!(null)).is_err());
        assert!(relay.handle_change(&json!({ "blocks": { "blocks": "x" } })).is_err());

        assert_eq!(relay.state().current().unwrap(), vec![json!(1)]);
        assert_eq!(relay.malformed_events(), 2);

        // still usable
        relay.handle_change(&json!({ "blocks": { "blocks": [] } })).unwrap();
        assert_eq!(relay.state().current().unwrap(), Vec::<Value>::new());
        assert_eq!(relay.state().version(), 2);
    }

    #[test]
    fn test_closure_state_preserves_order() {
        let seen = RefCell::new(Vec::new());
        let relay = WorkspaceRelay::new(|snapshot: WorkspaceSnapshot| seen.borrow_mut().push(snapshot.len()));

        for n in 0..4 {
            let blocks: Vec<Value> = (0..n).map(|i| json!({ "id": i })).collect();
            relay.handle_change(&json!({ "blocks": { "blocks": blocks } })).unwrap();
        }

        assert_eq!(*seen.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_handle_change_json() {
        let relay = WorkspaceRelay::new(SharedWorkspace::new());

        relay.handle_change_json(r#"{"blocks":{"blocks":[{"type":"block_0"}]}}"#).unwrap();
        assert!(relay.handle_change_json("not json").is_err());

        assert_eq!(relay.state().version(), 1);
        assert_eq!(relay.malformed_events(), 1);
    }
}
