//! Sticker Item Entity
//!
//! A single line of text inside one sticker.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::ItemId;
use super::layout::LayoutState;

pub const DEFAULT_ITEM_CONTENT: &str = "content";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerItem {
    pub id: ItemId,
    pub content: String,
}

/// Persisted shape of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemData {
    pub id: ItemId,
    pub content: String,
}

impl StickerItem {
    /// Missing id gets a fresh one, missing content the placeholder text
    pub fn new(layout: &mut LayoutState, id: Option<ItemId>, content: Option<String>) -> Self {
        Self {
            id: id.unwrap_or_else(|| layout.fresh_id()),
            content: content.unwrap_or_else(|| DEFAULT_ITEM_CONTENT.to_string()),
        }
    }

    pub fn serialize(&self) -> ItemData {
        ItemData {
            id: self.id.clone(),
            content: self.content.clone(),
        }
    }

    pub fn deserialize(data: ItemData) -> Self {
        Self {
            id: data.id,
            content: data.content,
        }
    }
}

impl Entity for StickerItem {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}
