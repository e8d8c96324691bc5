//! Block definitions generated from plays
//!
//! A [`BlockDefinition`] serializes in the JSON block format the editor
//! widget accepts for type registration (`type`, `message0`, `colour`,
//! `tooltip`, `helpUrl`).

use serde::{Deserialize, Serialize};

use super::play::Play;

/// Prefix of every generated block type id.
pub const BLOCK_ID_PREFIX: &str = "block_";

/// A block type derived from one play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// `block_{i}`, where `i` is the play's position in the response.
    #[serde(rename = "type")]
    pub id: String,
    /// Text rendered on the block.
    #[serde(rename = "message0")]
    pub label: String,
    /// Hue index.
    pub colour: u16,
    pub tooltip: String,
    #[serde(rename = "helpUrl", default)]
    pub help_url: String,
}

impl BlockDefinition {
    /// Build the definition for the play at `index`.
    pub fn from_play(index: usize, play: &Play, colour: u16, tooltip_fallback: &str) -> Self {
        Self {
            id: block_id(index),
            label: play.description.clone(),
            colour,
            tooltip: play
                .context
                .clone()
                .unwrap_or_else(|| tooltip_fallback.to_string()),
            help_url: String::new(),
        }
    }

    /// Build one definition per play, preserving order.
    pub fn from_plays(plays: &[Play], colour: u16, tooltip_fallback: &str) -> Vec<Self> {
        plays
            .iter()
            .enumerate()
            .map(|(i, play)| Self::from_play(i, play, colour, tooltip_fallback))
            .collect()
    }

    /// Check the definition is registrable.
    ///
    /// Only the type id matters to the widget; an empty label renders as an
    /// empty block.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("Block type id cannot be empty".into());
        }
        Ok(())
    }
}

/// Positional block type id.
pub fn block_id(index: usize) -> String {
    format!("{}{}", BLOCK_ID_PREFIX, index)
}
