//! Playbook Blocks - dynamic block palette for playbook plays
//!
//! This crate turns the plays served by a playbook API into block types for a
//! visual block editor, builds the toolbox listing them, and relays the
//! user's workspace edits to a shared application state.

pub mod config;
pub mod core;
pub mod loader;
pub mod relay;
pub mod view;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use config::{PlaygroundConfig, WorkspaceConfig};
pub use self::core::{BlockDefinition, BlockTypeRegistry, BlockTypes, ErrorKind, Play, PlayList, ToolboxDescriptor};
pub use loader::{BlockLoader, HttpPlaySource, LoadError, LoadedBlocks, PlaySource};
pub use relay::{SharedState, SharedWorkspace, WorkspaceRelay, WorkspaceSnapshot};
pub use view::{LoadState, PlaygroundView, ViewFrame};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
