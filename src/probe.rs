//! DOM Drop Probe
//!
//! Answers the drag controller's layout questions from the rendered page.
//! The ghost carries `pointer-events: none`, so `elementFromPoint` looks
//! straight through it.

use sticker_board::{DropProbe, HitTarget, ItemId, ListSurface, Node, Point, StickerId};

/// Element id of the rendered placeholder; only one exists at a time
pub const PLACEHOLDER_ELEMENT_ID: &str = "drag-placeholder";

/// Attribute carrying the owning sticker on an item list
pub const STICKER_ID_ATTR: &str = "data-sticker-id";

pub fn parse_sticker_id(raw: &str) -> Option<StickerId> {
    raw.parse().ok()
}

pub struct DomProbe;

impl DomProbe {
    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|win| win.document())
    }
}

impl DropProbe for DomProbe {
    fn hit_test(&self, client: Point) -> Option<HitTarget> {
        let element = Self::document()?.element_from_point(client.x as f32, client.y as f32)?;
        let droppable = element.closest(".droppable").ok().flatten()?;
        if droppable.class_list().contains("item") {
            return Some(HitTarget::Item(ItemId::new(droppable.id())));
        }
        droppable
            .get_attribute(STICKER_ID_ATTR)
            .and_then(|raw| parse_sticker_id(&raw))
            .map(HitTarget::Region)
    }

    fn top_of(&self, _surface: &ListSurface, node: &Node) -> Option<f64> {
        let element_id = match node {
            Node::Item(item) => item.as_str(),
            Node::Placeholder => PLACEHOLDER_ELEMENT_ID,
        };
        let element = Self::document()?.get_element_by_id(element_id)?;
        Some(element.get_bounding_client_rect().top())
    }
}
