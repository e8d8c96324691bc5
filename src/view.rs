//! Playground view
//!
//! Ties the loader and the relay to the three-state view lifecycle:
//!
//! ```text
//! Loading ──load ok──▶ Ready(toolbox)
//!    │
//!    └────load err──▶ Failed(message)
//! ```
//!
//! Both end states are terminal for a mount. A mount can be aborted while
//! the fetch is in flight, which leaves the view in `Loading`.

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::WorkspaceConfig;
use crate::core::registry::BlockTypeRegistry;
use crate::core::toolbox::ToolboxDescriptor;
use crate::loader::{BlockLoader, PlaySource};
use crate::relay::{RelayError, SharedState, WorkspaceRelay};

/// Message shown to the user when loading fails. Details go to the log.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load blocks from the API.";
pub const LOADING_MESSAGE: &str = "Loading blocks...";

/// Identifies one mount of a view in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountId(pub Uuid);

impl MountId {
    pub fn new() -> Self {
        MountId(Uuid::new_v4())
    }
}

impl Default for MountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(ToolboxDescriptor),
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    /// Loading → Ready.
    pub fn ready(&mut self, toolbox: ToolboxDescriptor) -> Result<(), StateError> {
        self.settle(LoadState::Ready(toolbox))
    }

    /// Loading → Failed.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), StateError> {
        self.settle(LoadState::Failed(message.into()))
    }

    fn settle(&mut self, next: LoadState) -> Result<(), StateError> {
        if self.is_settled() {
            return Err(StateError::AlreadySettled);
        }
        *self = next;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("Load state already settled")]
    AlreadySettled,
}

/// Everything the editor widget needs to render the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceProps {
    pub toolbox_configuration: ToolboxDescriptor,
    pub workspace_configuration: WorkspaceConfig,
}

/// What the view shows for its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewFrame {
    Placeholder(String),
    Error(String),
    Workspace(WorkspaceProps),
}

impl ViewFrame {
    pub fn is_interactive(&self) -> bool {
        matches!(self, ViewFrame::Workspace(_))
    }
}

/// A mounted playground: one loader run, one relay, one lifecycle.
pub struct PlaygroundView<S, R, P> {
    id: MountId,
    loader: BlockLoader<S, R>,
    relay: WorkspaceRelay<P>,
    state: LoadState,
    abort: AbortHandle,
    registration: Option<AbortRegistration>,
}

impl<S, R, P> PlaygroundView<S, R, P>
where
    S: PlaySource,
    R: BlockTypeRegistry,
    P: SharedState,
{
    pub fn new(loader: BlockLoader<S, R>, shared: P) -> Self {
        let (abort, registration) = AbortHandle::new_pair();
        Self {
            id: MountId::new(),
            loader,
            relay: WorkspaceRelay::new(shared),
            state: LoadState::Loading,
            abort,
            registration: Some(registration),
        }
    }

    pub fn id(&self) -> MountId {
        self.id
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn relay(&self) -> &WorkspaceRelay<P> {
        &self.relay
    }

    /// Handle that cancels an in-flight mount.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Run the loader and settle the lifecycle.
    ///
    /// Only the first call fetches; later calls are no-ops.
    pub async fn mount(&mut self) {
        let span = info_span!("playground", mount = %self.id);

        let Some(registration) = self.registration.take() else {
            span.in_scope(|| warn!("view already mounted, skipping load"));
            return;
        };

        let outcome = Abortable::new(self.loader.load(), registration)
            .instrument(span.clone())
            .await;

        let _entered = span.enter();
        let transition = match outcome {
            Ok(Ok(loaded)) => self.state.ready(loaded.toolbox),
            Ok(Err(err)) => {
                error!(error = %err, kind = ?err.kind(), "error fetching blocks");
                self.state.fail(LOAD_FAILED_MESSAGE)
            }
            Err(_aborted) => {
                debug!("mount aborted before load completed");
                Ok(())
            }
        };

        if let Err(err) = transition {
            warn!(error = %err, "ignoring late load result");
        }
    }

    /// Forward a widget change event to the shared state.
    pub fn on_workspace_change(&self, event: &serde_json::Value) -> Result<(), RelayError> {
        self.relay.handle_change(event)
    }

    pub fn render(&self) -> ViewFrame {
        match &self.state {
            LoadState::Loading => ViewFrame::Placeholder(LOADING_MESSAGE.into()),
            LoadState::Failed(message) => ViewFrame::Error(format!("Error: {}", message)),
            LoadState::Ready(toolbox) => ViewFrame::Workspace(WorkspaceProps {
                toolbox_configuration: toolbox.clone(),
                workspace_configuration: self.loader.config().workspace.clone(),
            }),
        }
    }
}
