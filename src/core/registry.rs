//! Block type registry
//!
//! The editor widget resolves toolbox entries against a registry of block
//! types, so definitions must be registered before the toolbox is rendered.
//! This module provides:
//! - the [`BlockTypeRegistry`] capability the loader is handed
//! - [`BlockTypes`], a thread-safe in-memory registry
//!
//! Registration is additive: re-registering an id overwrites the previous
//! definition in place, so a remount that loads the same plays again is
//! harmless.

use crate::core::block::BlockDefinition;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Capability for registering block types with an editor widget.
pub trait BlockTypeRegistry {
    /// Register `definitions` as a unit.
    ///
    /// Implementations must either register every definition or none.
    fn register_types(&self, definitions: &[BlockDefinition]) -> Result<(), RegistryError>;
}

impl<R: BlockTypeRegistry + ?Sized> BlockTypeRegistry for Arc<R> {
    fn register_types(&self, definitions: &[BlockDefinition]) -> Result<(), RegistryError> {
        (**self).register_types(definitions)
    }
}

/// In-memory block type registry
///
/// Uses `Arc<RwLock<HashMap>>` so clones share one set of types; reads are
/// concurrent and registration takes the write lock once per batch.
#[derive(Clone, Default)]
pub struct BlockTypes {
    types: Arc<RwLock<HashMap<String, BlockDefinition>>>,
    order: Arc<RwLock<Vec<String>>>,
}

impl BlockTypes {
    /// Create a new empty registry
    ///
    /// # Example
    /// ```
    /// use playbook_blocks::core::registry::BlockTypes;
    ///
    /// let registry = BlockTypes::new();
    /// assert_eq!(registry.count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a definition by its type id
    pub fn get(&self, id: &str) -> Option<BlockDefinition> {
        self.types.read().get(id).cloned()
    }

    /// All definitions in first-registration order
    pub fn definitions(&self) -> Vec<BlockDefinition> {
        let types = self.types.read();
        self.order
            .read()
            .iter()
            .filter_map(|id| types.get(id).cloned())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.types.read().len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types.read().contains_key(id)
    }

    /// Remove every registered type
    pub fn clear(&self) {
        self.types.write().clear();
        self.order.write().clear();
    }
}

impl BlockTypeRegistry for BlockTypes {
    fn register_types(&self, definitions: &[BlockDefinition]) -> Result<(), RegistryError> {
        // Validate the whole batch first so a bad definition registers nothing.
        for def in definitions {
            def.validate().map_err(RegistryError::ValidationError)?;
        }

        let mut types = self.types.write();
        let mut order = self.order.write();
        for def in definitions {
            if types.insert(def.id.clone(), def.clone()).is_none() {
                order.push(def.id.clone());
            }
        }

        Ok(())
    }
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A definition in the batch failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),
}
