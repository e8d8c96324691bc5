//! Core block abstractions and types
//!
//! This module defines the play records that arrive from the playbook API,
//! the block definitions generated from them, the toolbox that lists those
//! blocks, and the registry the editor widget resolves block types from.

pub mod play;
pub mod block;
pub mod toolbox;
pub mod registry;

pub use block::{BlockDefinition, BLOCK_ID_PREFIX};
pub use play::{Play, PlayList};
pub use registry::{BlockTypeRegistry, BlockTypes, RegistryError};
pub use toolbox::{ToolboxDescriptor, ToolboxEntry};

/// Broad error categories surfaced by the playground.
///
/// Every concrete error type in the crate maps onto one of these so that a
/// host can decide how to present a failure without matching on details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Fetch, status, JSON parsing, or registration failed while loading.
    /// Terminal for the mount.
    NetworkOrParseFailure,
    /// A workspace change event had no usable block list. Recoverable.
    MalformedChangeEvent,
}
