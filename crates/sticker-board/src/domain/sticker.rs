//! Sticker Entity
//!
//! A titled, colored card holding an ordered list of item ids. The item
//! values themselves live in the board's item map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::{ItemId, StickerId};
use super::item::{ItemData, StickerItem};
use super::layout::LayoutState;

pub const DEFAULT_TITLE: &str = "Sticker";

/// Screen coordinates of a sticker's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub top: i32,
    pub left: i32,
}

/// Creation arguments; every `None` falls back to a layout default
#[derive(Debug, Clone, Default)]
pub struct StickerDraft {
    pub title: Option<String>,
    pub background_color: Option<String>,
    pub z_index: Option<i32>,
    pub position: Option<Position>,
    pub items: Vec<StickerItem>,
}

/// Persisted shape of a sticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerData {
    pub title: String,
    pub background_color: String,
    pub z_index: i32,
    pub position: Position,
    pub items: Vec<ItemData>,
}

impl From<StickerData> for StickerDraft {
    fn from(data: StickerData) -> Self {
        Self {
            title: Some(data.title),
            background_color: Some(data.background_color),
            z_index: Some(data.z_index),
            position: Some(data.position),
            items: data.items.into_iter().map(StickerItem::deserialize).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    id: StickerId,
    pub title: String,
    pub background_color: String,
    pub z_index: i32,
    pub position: Position,
    items: Vec<ItemId>,
}

impl Sticker {
    /// Applies defaults and returns the draft's items for the caller to own
    pub fn new(id: StickerId, draft: StickerDraft, layout: &mut LayoutState) -> (Self, Vec<StickerItem>) {
        let position = match draft.position {
            Some(position) => position,
            None => layout.next_spawn_offset(),
        };
        let z_index = match draft.z_index {
            Some(z_index) => {
                layout.observe_z_index(z_index);
                z_index
            }
            None => layout.next_z_index(),
        };
        let background_color = draft
            .background_color
            .unwrap_or_else(|| layout.random_background_color());

        let sticker = Self {
            id,
            title: draft.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            background_color,
            z_index,
            position,
            items: draft.items.iter().map(|item| item.id.clone()).collect(),
        };
        (sticker, draft.items)
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn contains(&self, item: &ItemId) -> bool {
        self.items.iter().any(|id| id == item)
    }

    pub fn push_item(&mut self, item: ItemId) {
        self.items.push(item);
    }

    /// Moves the sticker above every other one
    pub fn raise(&mut self, layout: &mut LayoutState) -> i32 {
        self.z_index = layout.next_z_index();
        self.z_index
    }

    /// Drops `item` from the list. Returns whether it was present.
    pub fn on_item_deleted(&mut self, item: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|id| id != item);
        self.items.len() != before
    }

    /// Adopts `item` if it came from another sticker, then rebuilds the
    /// order from the visible top-to-bottom sequence of the item list.
    pub fn on_item_moved(&mut self, item: &ItemId, visible: &[ItemId]) {
        if !self.contains(item) {
            self.items.push(item.clone());
        }
        let known = std::mem::take(&mut self.items);
        self.items = visible
            .iter()
            .filter(|id| known.contains(id))
            .cloned()
            .collect();
    }

    pub fn serialize(&self, items: &HashMap<ItemId, StickerItem>) -> StickerData {
        StickerData {
            title: self.title.clone(),
            background_color: self.background_color.clone(),
            z_index: self.z_index,
            position: self.position,
            items: self
                .items
                .iter()
                .filter_map(|id| items.get(id))
                .map(StickerItem::serialize)
                .collect(),
        }
    }
}

impl Entity for Sticker {
    type Id = StickerId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FixedRandom;

    fn ids(raw: &[&str]) -> Vec<ItemId> {
        raw.iter().map(|id| ItemId::new(*id)).collect()
    }

    fn make_sticker(items: &[&str]) -> Sticker {
        let mut layout = LayoutState::new(1, FixedRandom(0.5));
        let draft = StickerDraft {
            items: items
                .iter()
                .map(|id| StickerItem::new(&mut layout, Some(ItemId::new(*id)), None))
                .collect(),
            ..Default::default()
        };
        Sticker::new(StickerId::new(1), draft, &mut layout).0
    }

    #[test]
    fn test_defaults_applied() {
        let mut layout = LayoutState::new(1, FixedRandom(0.0));
        let (first, _) = Sticker::new(StickerId::new(1), StickerDraft::default(), &mut layout);
        let (second, _) = Sticker::new(StickerId::new(2), StickerDraft::default(), &mut layout);

        assert_eq!(first.title, DEFAULT_TITLE);
        assert_eq!(first.background_color, "rgb(150, 150, 150)");
        assert_eq!(first.position, Position { top: 10, left: 10 });
        assert_eq!(second.position, Position { top: 20, left: 20 });
        assert!(second.z_index > first.z_index);
    }

    #[test]
    fn test_restored_values_kept_and_counter_advanced() {
        let mut layout = LayoutState::new(1, FixedRandom(0.0));
        let draft = StickerDraft {
            title: Some("Groceries".into()),
            background_color: Some("rgb(1, 2, 3)".into()),
            z_index: Some(30),
            position: Some(Position { top: 100, left: 250 }),
            items: Vec::new(),
        };
        let (restored, _) = Sticker::new(StickerId::new(1), draft, &mut layout);
        assert_eq!(restored.title, "Groceries");
        assert_eq!(restored.z_index, 30);
        assert_eq!(restored.position, Position { top: 100, left: 250 });

        // Restoring with explicit coordinates doesn't consume a spawn step
        let (fresh, _) = Sticker::new(StickerId::new(2), StickerDraft::default(), &mut layout);
        assert_eq!(fresh.position, Position { top: 10, left: 10 });
        assert_eq!(fresh.z_index, 31);
    }

    #[test]
    fn test_on_item_deleted_by_identity() {
        let mut sticker = make_sticker(&["a", "b", "c"]);
        assert!(sticker.on_item_deleted(&ItemId::new("b")));
        assert_eq!(sticker.items(), ids(&["a", "c"]).as_slice());
        assert!(!sticker.on_item_deleted(&ItemId::new("zzz")));
    }

    #[test]
    fn test_on_item_moved_reorders_from_visible_sequence() {
        let mut sticker = make_sticker(&["a", "b", "c"]);
        sticker.on_item_moved(&ItemId::new("a"), &ids(&["b", "a", "c"]));
        assert_eq!(sticker.items(), ids(&["b", "a", "c"]).as_slice());
    }

    #[test]
    fn test_on_item_moved_adopts_foreign_item() {
        let mut sticker = make_sticker(&["z"]);
        sticker.on_item_moved(&ItemId::new("x"), &ids(&["z", "x"]));
        assert_eq!(sticker.items(), ids(&["z", "x"]).as_slice());
    }

    #[test]
    fn test_serialize_uses_wire_field_names() {
        let mut layout = LayoutState::new(1, FixedRandom(0.0));
        let item = StickerItem::new(&mut layout, Some(ItemId::new("i1")), Some("eggs".into()));
        let draft = StickerDraft {
            title: Some("T".into()),
            background_color: Some("red".into()),
            z_index: Some(3),
            position: Some(Position { top: 4, left: 5 }),
            items: vec![item],
        };
        let (sticker, items) = Sticker::new(StickerId::new(1), draft, &mut layout);
        let map: HashMap<_, _> = items.into_iter().map(|i| (i.id.clone(), i)).collect();

        let json = serde_json::to_value(sticker.serialize(&map)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "T",
                "backgroundColor": "red",
                "zIndex": 3,
                "position": { "top": 4, "left": 5 },
                "items": [{ "id": "i1", "content": "eggs" }]
            })
        );
    }
}
