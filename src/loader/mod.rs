//! Block definition loader
//!
//! Turns the play list into registered block types and a toolbox:
//!
//! 1. fetch the plays (once)
//! 2. derive one [`BlockDefinition`] per play, `block_0..block_{n-1}`
//! 3. register the whole set with the widget's type registry
//! 4. build the [`ToolboxDescriptor`] referencing those ids
//!
//! Registration always happens before the toolbox exists, since the toolbox
//! refers to block types by id.

pub mod source;

use tracing::{info, warn};

use crate::config::PlaygroundConfig;
use crate::core::block::BlockDefinition;
use crate::core::play::PlayList;
use crate::core::registry::{BlockTypeRegistry, RegistryError};
use crate::core::toolbox::ToolboxDescriptor;
use crate::core::ErrorKind;

pub use source::{HttpPlaySource, PlaySource, SourceError};

/// Output of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBlocks {
    pub definitions: Vec<BlockDefinition>,
    pub toolbox: ToolboxDescriptor,
}

impl LoadedBlocks {
    fn with_definitions(
        list: &PlayList,
        definitions: Vec<BlockDefinition>,
        config: &PlaygroundConfig,
    ) -> Self {
        let category = list
            .category
            .as_deref()
            .unwrap_or(config.category_fallback.as_str());
        let toolbox = ToolboxDescriptor::build(category, &definitions);

        Self {
            definitions,
            toolbox,
        }
    }
}

/// Derive the blocks for `list` and register them with `registry`.
///
/// Nothing is registered when any definition is rejected.
pub fn register_play_list<R>(
    list: &PlayList,
    registry: &R,
    config: &PlaygroundConfig,
) -> Result<LoadedBlocks, RegistryError>
where
    R: BlockTypeRegistry + ?Sized,
{
    if list.plays_defaulted {
        warn!("response has no plays array, building an empty toolbox");
    }

    let definitions =
        BlockDefinition::from_plays(&list.plays, config.block_colour, &config.tooltip_fallback);
    registry.register_types(&definitions)?;

    Ok(LoadedBlocks::with_definitions(list, definitions, config))
}

/// Loads plays from a [`PlaySource`] into a [`BlockTypeRegistry`].
pub struct BlockLoader<S, R> {
    source: S,
    registry: R,
    config: PlaygroundConfig,
}

impl<S, R> BlockLoader<S, R>
where
    S: PlaySource,
    R: BlockTypeRegistry,
{
    pub fn new(source: S, registry: R, config: PlaygroundConfig) -> Self {
        Self {
            source,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    /// Run one load cycle: exactly one fetch, then registration.
    pub async fn load(&self) -> Result<LoadedBlocks, LoadError> {
        let origin = self.source.describe();
        info!(source = %origin, "loading plays");

        let list = self.source.fetch_plays().await?;
        let loaded = register_play_list(&list, &self.registry, &self.config)?;

        info!(
            source = %origin,
            blocks = loaded.definitions.len(),
            "registered play blocks"
        );
        Ok(loaded)
    }
}

/// Errors that end a load cycle
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Block registration failed: {0}")]
    Registration(#[from] RegistryError),
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NetworkOrParseFailure
    }
}
