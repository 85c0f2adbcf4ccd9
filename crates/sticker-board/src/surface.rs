//! List Surface
//!
//! Presentation order of every sticker's item list: item nodes plus at most
//! one placeholder, and a set of hidden items. The drag protocol only
//! reorders this model; stickers read their order back from it.
//!
//! Sibling queries see hidden nodes, the same way element siblings do.

use std::collections::{HashMap, HashSet};

use crate::domain::{ItemId, StickerId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Item(ItemId),
    Placeholder,
}

#[derive(Debug, Default)]
pub struct ListSurface {
    regions: HashMap<StickerId, Vec<Node>>,
    hidden: HashSet<ItemId>,
}

impl ListSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or replaces) the item list region of a sticker
    pub fn mount(&mut self, region: StickerId, items: impl IntoIterator<Item = ItemId>) {
        let nodes = items.into_iter().map(Node::Item).collect();
        self.regions.insert(region, nodes);
    }

    pub fn unmount(&mut self, region: StickerId) -> Vec<Node> {
        let nodes = self.regions.remove(&region).unwrap_or_default();
        for node in &nodes {
            if let Node::Item(id) = node {
                self.hidden.remove(id);
            }
        }
        nodes
    }

    pub fn nodes(&self, region: StickerId) -> &[Node] {
        self.regions.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    fn locate(&self, node: &Node) -> Option<(StickerId, usize)> {
        self.regions.iter().find_map(|(region, nodes)| {
            nodes.iter().position(|n| n == node).map(|index| (*region, index))
        })
    }

    pub fn parent_of(&self, node: &Node) -> Option<StickerId> {
        self.locate(node).map(|(region, _)| region)
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.locate(node).is_some()
    }

    pub fn next_sibling(&self, node: &Node) -> Option<&Node> {
        let (region, index) = self.locate(node)?;
        self.regions.get(&region)?.get(index + 1)
    }

    pub fn previous_sibling(&self, node: &Node) -> Option<&Node> {
        let (region, index) = self.locate(node)?;
        let index = index.checked_sub(1)?;
        self.regions.get(&region)?.get(index)
    }

    /// Removes `node` from wherever it sits
    pub fn detach(&mut self, node: &Node) -> Option<StickerId> {
        let (region, index) = self.locate(node)?;
        self.regions.get_mut(&region)?.remove(index);
        Some(region)
    }

    /// Moves `node` to the end of `region`. Returns whether its location changed.
    pub fn append(&mut self, region: StickerId, node: Node) -> bool {
        if !self.regions.contains_key(&region) {
            return false;
        }
        let before = self.locate(&node);
        self.detach(&node);
        let nodes = self.regions.entry(region).or_default();
        nodes.push(node);
        before != Some((region, nodes.len() - 1))
    }

    /// Moves `node` right before `anchor`. Returns whether its location changed.
    pub fn insert_before(&mut self, node: Node, anchor: &Node) -> bool {
        self.insert_relative(node, anchor, 0)
    }

    /// Moves `node` right after `anchor`. Returns whether its location changed.
    pub fn insert_after(&mut self, node: Node, anchor: &Node) -> bool {
        self.insert_relative(node, anchor, 1)
    }

    fn insert_relative(&mut self, node: Node, anchor: &Node, shift: usize) -> bool {
        if &node == anchor || !self.contains(anchor) {
            return false;
        }
        let before = self.locate(&node);
        self.detach(&node);
        let Some((region, index)) = self.locate(anchor) else {
            return false;
        };
        let Some(nodes) = self.regions.get_mut(&region) else {
            return false;
        };
        let at = index + shift;
        nodes.insert(at, node);
        before != Some((region, at))
    }

    pub fn hide(&mut self, item: &ItemId) {
        self.hidden.insert(item.clone());
    }

    pub fn show(&mut self, item: &ItemId) {
        self.hidden.remove(item);
    }

    pub fn is_hidden(&self, item: &ItemId) -> bool {
        self.hidden.contains(item)
    }

    /// Non-hidden items of `region`, top to bottom
    pub fn visible_items(&self, region: StickerId) -> Vec<ItemId> {
        self.nodes(region)
            .iter()
            .filter_map(|node| match node {
                Node::Item(id) if !self.is_hidden(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn has_visible_items(&self, region: StickerId) -> bool {
        self.nodes(region)
            .iter()
            .any(|node| matches!(node, Node::Item(id) if !self.is_hidden(id)))
    }

    /// Puts `item` where the placeholder is, drops the placeholder and
    /// un-hides the item. Returns the destination region.
    pub fn commit_placeholder(&mut self, item: &ItemId) -> Option<StickerId> {
        let region = self.parent_of(&Node::Placeholder)?;
        let node = Node::Item(item.clone());
        self.detach(&node);
        self.insert_before(node, &Node::Placeholder);
        self.detach(&Node::Placeholder);
        self.show(item);
        Some(region)
    }

    pub fn discard_placeholder(&mut self) -> Option<StickerId> {
        self.detach(&Node::Placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Node {
        Node::Item(ItemId::new(id))
    }

    fn region_of(surface: &ListSurface, region: StickerId) -> Vec<String> {
        surface
            .nodes(region)
            .iter()
            .map(|node| match node {
                Node::Item(id) => id.to_string(),
                Node::Placeholder => "_".to_string(),
            })
            .collect()
    }

    fn setup() -> (ListSurface, StickerId, StickerId) {
        let a = StickerId::new(1);
        let b = StickerId::new(2);
        let mut surface = ListSurface::new();
        surface.mount(a, ["x", "y"].map(ItemId::new));
        surface.mount(b, ["z"].map(ItemId::new));
        (surface, a, b)
    }

    #[test]
    fn test_insert_before_and_after() {
        let (mut surface, a, _) = setup();
        assert!(surface.insert_before(Node::Placeholder, &item("x")));
        assert_eq!(region_of(&surface, a), ["_", "x", "y"]);

        assert!(surface.insert_after(Node::Placeholder, &item("y")));
        assert_eq!(region_of(&surface, a), ["x", "y", "_"]);

        // Already there
        assert!(!surface.insert_after(Node::Placeholder, &item("y")));
    }

    #[test]
    fn test_siblings_include_hidden_nodes() {
        let (mut surface, _, _) = setup();
        surface.insert_before(Node::Placeholder, &item("x"));
        surface.hide(&ItemId::new("x"));
        assert_eq!(surface.next_sibling(&Node::Placeholder), Some(&item("x")));
        assert_eq!(surface.previous_sibling(&item("y")), Some(&item("x")));
        assert_eq!(surface.previous_sibling(&Node::Placeholder), None);
    }

    #[test]
    fn test_append_moves_across_regions() {
        let (mut surface, a, b) = setup();
        surface.insert_before(Node::Placeholder, &item("x"));
        assert!(surface.append(b, Node::Placeholder));
        assert_eq!(region_of(&surface, a), ["x", "y"]);
        assert_eq!(region_of(&surface, b), ["z", "_"]);
        assert!(!surface.append(b, Node::Placeholder));
    }

    #[test]
    fn test_visible_items_skip_hidden_and_placeholder() {
        let (mut surface, a, b) = setup();
        surface.insert_before(Node::Placeholder, &item("x"));
        surface.hide(&ItemId::new("x"));
        assert_eq!(surface.visible_items(a), vec![ItemId::new("y")]);
        assert!(surface.has_visible_items(a));

        surface.detach(&item("z"));
        assert!(!surface.has_visible_items(b));
    }

    #[test]
    fn test_commit_placeholder_moves_item_into_slot() {
        let (mut surface, a, b) = setup();
        surface.insert_before(Node::Placeholder, &item("x"));
        surface.hide(&ItemId::new("x"));
        surface.insert_after(Node::Placeholder, &item("z"));

        assert_eq!(surface.commit_placeholder(&ItemId::new("x")), Some(b));
        assert_eq!(region_of(&surface, a), ["y"]);
        assert_eq!(region_of(&surface, b), ["z", "x"]);
        assert!(!surface.is_hidden(&ItemId::new("x")));
        assert!(!surface.contains(&Node::Placeholder));
    }

    #[test]
    fn test_unmount_forgets_hidden_items() {
        let (mut surface, a, _) = setup();
        surface.hide(&ItemId::new("y"));
        let nodes = surface.unmount(a);
        assert_eq!(nodes.len(), 2);
        assert!(!surface.is_hidden(&ItemId::new("y")));
        assert!(surface.nodes(a).is_empty());
    }
}
