//! Flyout toolbox descriptor
//!
//! The toolbox is a single category label followed by one block reference per
//! generated definition. It is built once per load and never mutated.

use serde::{Deserialize, Serialize};

use super::block::BlockDefinition;

/// CSS class attached to the category label.
pub const CATEGORY_LABEL_CLASS: &str = "category-label";

/// One entry in the toolbox contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ToolboxEntry {
    Label {
        text: String,
        #[serde(rename = "web-class")]
        web_class: String,
    },
    Block {
        #[serde(rename = "type")]
        block_type: String,
    },
}

/// Serializes as `{ "kind": "flyoutToolbox", "contents": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolboxDescriptor {
    kind: String,
    contents: Vec<ToolboxEntry>,
}

impl ToolboxDescriptor {
    /// Build the toolbox for `definitions` under `category`.
    pub fn build(category: &str, definitions: &[BlockDefinition]) -> Self {
        let mut contents = Vec::with_capacity(definitions.len() + 1);
        contents.push(ToolboxEntry::Label {
            text: category.to_string(),
            web_class: CATEGORY_LABEL_CLASS.to_string(),
        });
        contents.extend(definitions.iter().map(|def| ToolboxEntry::Block {
            block_type: def.id.clone(),
        }));

        Self {
            kind: "flyoutToolbox".into(),
            contents,
        }
    }

    pub fn contents(&self) -> &[ToolboxEntry] {
        &self.contents
    }

    /// Text of the leading category label.
    pub fn category_label(&self) -> Option<&str> {
        match self.contents.first() {
            Some(ToolboxEntry::Label { text, .. }) => Some(text),
            _ => None,
        }
    }

    /// Block type ids referenced by the toolbox, in order.
    pub fn block_types(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().filter_map(|entry| match entry {
            ToolboxEntry::Block { block_type } => Some(block_type.as_str()),
            ToolboxEntry::Label { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::play::Play;
    use serde_json::json;

    #[test]
    fn test_label_precedes_blocks() {
        let defs = BlockDefinition::from_plays(&[Play::new("a"), Play::new("b")], 230, "");
        let toolbox = ToolboxDescriptor::build("Recon", &defs);

        assert_eq!(toolbox.len(), 3);
        assert_eq!(toolbox.category_label(), Some("Recon"));
        assert_eq!(toolbox.block_types().collect::<Vec<_>>(), ["block_0", "block_1"]);
    }

    #[test]
    fn test_empty_definitions_still_have_label() {
        let toolbox = ToolboxDescriptor::build("Category", &[]);
        assert_eq!(toolbox.len(), 1);
        assert_eq!(toolbox.category_label(), Some("Category"));
    }

    #[test]
    fn test_serializes_as_flyout_toolbox() {
        let defs = BlockDefinition::from_plays(&[Play::new("a")], 230, "");
        let value = serde_json::to_value(ToolboxDescriptor::build("Recon", &defs)).unwrap();

        assert_eq!(
            value,
            json!({
                "kind": "flyoutToolbox",
                "contents": [
                    { "kind": "label", "text": "Recon", "web-class": "category-label" },
                    { "kind": "block", "type": "block_0" }
                ]
            })
        );
    }
}
