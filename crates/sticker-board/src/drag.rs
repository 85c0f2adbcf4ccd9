//! Drag Protocol
//!
//! `DragController` drives one item gesture at a time:
//! idle -> armed (pointer down) -> dragging (moved past threshold) -> idle
//! (release commits). `CardDrag` tracks a whole sticker being moved by its
//! body or title.
//!
//! The controller never looks at a page. It asks a `DropProbe` what lies
//! under the pointer and where nodes are, and writes placeholder moves into
//! the board's `ListSurface`.

use std::ops::Sub;

use crate::board::Board;
use crate::domain::{ItemId, Position, StickerId};
use crate::events::BoardEvent;
use crate::surface::{ListSurface, Node};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One pointer reading in viewport (`client`) and document (`page`) space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub client: Point,
    pub page: Point,
}

impl PointerSample {
    /// Sample for an unscrolled page, where both spaces coincide
    pub fn at(x: f64, y: f64) -> Self {
        let point = Point::new(x, y);
        Self { client: point, page: point }
    }
}

pub fn exceeds_threshold(from: Point, to: Point, threshold: f64) -> bool {
    (to.x - from.x).abs() > threshold || (to.y - from.y).abs() > threshold
}

/// What a probe found under the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// A droppable item
    Item(ItemId),
    /// A sticker's item list region (outside any item)
    Region(StickerId),
}

/// Rendering-side queries the drag protocol needs
pub trait DropProbe {
    /// Droppable thing under `client`, ignoring the ghost
    fn hit_test(&self, client: Point) -> Option<HitTarget>;

    /// Top edge of a rendered node, `None` if it has no layout box
    fn top_of(&self, surface: &ListSurface, node: &Node) -> Option<f64>;
}

/// Where inside an item the press landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOrigin {
    Body,
    /// An embedded control such as the delete button
    Control,
}

/// Floating copy of the dragged item, positioned in page space
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub item: ItemId,
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq)]
enum DragPhase {
    Idle,
    Armed { item: ItemId, start: Point, grab: Point },
    Dragging { item: ItemId, grab: Point, ghost: Ghost },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStep {
    Ignored,
    /// Pressed but still within the threshold
    Pending,
    /// Placeholder inserted, item hidden, ghost created
    Started,
    Tracking { placeholder_moved: bool },
}

impl DragStep {
    /// Whether the list surface changed during this step
    pub fn touches_layout(self) -> bool {
        matches!(self, DragStep::Started | DragStep::Tracking { placeholder_moved: true })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    pub item: ItemId,
    pub from: StickerId,
    pub to: StickerId,
    /// Final position of the item in the destination sticker
    pub index: usize,
}

impl DropOutcome {
    pub fn is_transfer(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone)]
pub struct DragController {
    phase: DragPhase,
    threshold: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl DragController {
    pub fn new(threshold: f64) -> Self {
        Self {
            phase: DragPhase::Idle,
            threshold,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.phase, DragPhase::Armed { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn ghost(&self) -> Option<&Ghost> {
        match &self.phase {
            DragPhase::Dragging { ghost, .. } => Some(ghost),
            _ => None,
        }
    }

    /// Pointer down on an item. `grab` is the pointer's offset from the
    /// item's top-left corner. Returns whether the controller armed.
    pub fn press(&mut self, item: ItemId, sample: PointerSample, grab: Point, origin: PressOrigin) -> bool {
        if origin == PressOrigin::Control || self.is_dragging() {
            return false;
        }
        self.phase = DragPhase::Armed {
            item,
            start: sample.client,
            grab,
        };
        true
    }

    pub fn pointer_move<P: DropProbe>(&mut self, board: &mut Board, sample: PointerSample, probe: &P) -> DragStep {
        match &mut self.phase {
            DragPhase::Idle => DragStep::Ignored,
            DragPhase::Armed { start, .. } => {
                if !exceeds_threshold(*start, sample.client, self.threshold) {
                    return DragStep::Pending;
                }
                self.start_drag(board.surface_mut(), sample)
            }
            DragPhase::Dragging { item, grab, ghost } => {
                ghost.left = sample.page.x - grab.x;
                ghost.top = sample.page.y - grab.y;
                let placeholder_moved = relocate(board.surface_mut(), item, sample.client, probe);
                DragStep::Tracking { placeholder_moved }
            }
        }
    }

    fn start_drag(&mut self, surface: &mut ListSurface, sample: PointerSample) -> DragStep {
        let DragPhase::Armed { item, grab, .. } = std::mem::replace(&mut self.phase, DragPhase::Idle) else {
            return DragStep::Ignored;
        };
        let node = Node::Item(item.clone());
        if !surface.insert_before(Node::Placeholder, &node) {
            log::warn!("[DND] {} is not on the board, drag dropped", item);
            return DragStep::Ignored;
        }
        surface.hide(&item);
        log::debug!("[DND] drag started: {}", item);

        let ghost = Ghost {
            item: item.clone(),
            left: sample.page.x - grab.x,
            top: sample.page.y - grab.y,
        };
        self.phase = DragPhase::Dragging { item, grab, ghost };
        DragStep::Started
    }

    /// Pointer up. Commits a running drag to the placeholder's slot; a
    /// press that never became a drag changes nothing.
    pub fn release(&mut self, board: &mut Board) -> Option<DropOutcome> {
        let DragPhase::Dragging { item, .. } = std::mem::replace(&mut self.phase, DragPhase::Idle) else {
            return None;
        };

        let from = board.surface().parent_of(&Node::Item(item.clone()));
        let to = board.surface().parent_of(&Node::Placeholder);
        let (Some(from), Some(to)) = (from, to) else {
            log::warn!("[DND] drop of {} lost its slot, restoring", item);
            board.surface_mut().discard_placeholder();
            board.surface_mut().show(&item);
            return None;
        };

        if from != to {
            board.dispatch(from, BoardEvent::ItemDeleted(item.clone()));
        }
        board.surface_mut().commit_placeholder(&item)?;
        board.dispatch(to, BoardEvent::ItemMoved(item.clone()));
        board.dispatch(to, BoardEvent::ContentChanged);

        let index = board
            .sticker(to)
            .and_then(|sticker| sticker.items().iter().position(|id| id == &item))
            .unwrap_or_default();
        log::debug!("[DND] dropped {}: sticker {} -> {} at {}", item, from, to, index);
        Some(DropOutcome { item, from, to, index })
    }
}

/// Moves the placeholder according to what is under the pointer
fn relocate<P: DropProbe>(surface: &mut ListSurface, dragged: &ItemId, client: Point, probe: &P) -> bool {
    match probe.hit_test(client) {
        Some(HitTarget::Item(target)) if &target != dragged && !surface.is_hidden(&target) => {
            place_near(surface, &target, probe)
        }
        Some(HitTarget::Region(region)) if !surface.has_visible_items(region) => {
            surface.append(region, Node::Placeholder)
        }
        _ => false,
    }
}

/// Puts the placeholder next to `target`. Coming from above it lands before
/// the target, or after it once it already sits right before; coming from
/// below mirrors that. Hovering a boundary therefore toggles instead of
/// jittering.
fn place_near<P: DropProbe>(surface: &mut ListSurface, target: &ItemId, probe: &P) -> bool {
    let target_node = Node::Item(target.clone());
    let (Some(placeholder_top), Some(target_top)) = (
        probe.top_of(surface, &Node::Placeholder),
        probe.top_of(surface, &target_node),
    ) else {
        return false;
    };

    if placeholder_top < target_top {
        if surface.next_sibling(&Node::Placeholder) == Some(&target_node) {
            surface.insert_after(Node::Placeholder, &target_node)
        } else {
            surface.insert_before(Node::Placeholder, &target_node)
        }
    } else if placeholder_top > target_top {
        if surface.previous_sibling(&Node::Placeholder) == Some(&target_node) {
            surface.insert_before(Node::Placeholder, &target_node)
        } else {
            surface.insert_after(Node::Placeholder, &target_node)
        }
    } else {
        false
    }
}

/// A sticker being dragged around the board.
///
/// Positions follow `page - parent - shift`, where `shift` is the grab
/// point inside the card and `parent` the origin of the card's offset
/// parent, both fixed at press time.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDrag {
    sticker: StickerId,
    start: Point,
    shift: Point,
    parent: Point,
    threshold: f64,
    moved: bool,
    on_title: bool,
    position: Position,
}

impl CardDrag {
    /// `corner` is the card's top-left in client space, `offset` its
    /// position relative to its offset parent.
    pub fn begin(sticker: StickerId, sample: PointerSample, corner: Point, offset: Position, threshold: f64) -> Self {
        let shift = sample.client - corner;
        let parent = corner - Point::new(offset.left as f64, offset.top as f64);
        Self {
            sticker,
            start: sample.client,
            shift,
            parent,
            threshold,
            moved: false,
            on_title: false,
            position: offset,
        }
    }

    /// Marks the press as landing on the title, which makes a plain click
    /// open the title editor
    pub fn from_title(mut self, on_title: bool) -> Self {
        self.on_title = on_title;
        self
    }

    pub fn track(&mut self, sample: PointerSample) -> Position {
        if exceeds_threshold(self.start, sample.client, self.threshold) {
            self.moved = true;
        }
        self.position = Position {
            top: (sample.page.y - self.parent.y - self.shift.y).round() as i32,
            left: (sample.page.x - self.parent.x - self.shift.x).round() as i32,
        };
        self.position
    }

    pub fn sticker(&self) -> StickerId {
        self.sticker
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Title press released without crossing the threshold
    pub fn is_title_click(&self) -> bool {
        self.on_title && !self.moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive_per_axis() {
        let origin = Point::new(10.0, 10.0);
        assert!(!exceeds_threshold(origin, Point::new(15.0, 15.0), 5.0));
        assert!(exceeds_threshold(origin, Point::new(15.5, 10.0), 5.0));
        assert!(exceeds_threshold(origin, Point::new(10.0, 4.0), 5.0));
    }

    #[test]
    fn test_press_on_control_never_arms() {
        let mut drag = DragController::new(5.0);
        let armed = drag.press(ItemId::new("a"), PointerSample::at(0.0, 0.0), Point::default(), PressOrigin::Control);
        assert!(!armed);
        assert!(drag.is_idle());
    }

    #[test]
    fn test_card_drag_follows_pointer_from_grab_point() {
        // Card at (left 40, top 30) inside a parent whose origin is (100, 50)
        let corner = Point::new(140.0, 80.0);
        let offset = Position { top: 30, left: 40 };
        let mut card = CardDrag::begin(StickerId::new(1), PointerSample::at(150.0, 90.0), corner, offset, 5.0);

        assert_eq!(card.position(), offset);
        assert_eq!(card.track(PointerSample::at(170.0, 120.0)), Position { top: 60, left: 60 });
        assert!(card.has_moved());
    }

    #[test]
    fn test_title_click_vs_drag() {
        let offset = Position { top: 0, left: 0 };
        let mut click = CardDrag::begin(StickerId::new(1), PointerSample::at(10.0, 10.0), Point::default(), offset, 5.0)
            .from_title(true);
        click.track(PointerSample::at(13.0, 14.0));
        assert!(click.is_title_click());

        let mut dragged = click.clone();
        dragged.track(PointerSample::at(10.0, 16.0));
        assert!(!dragged.is_title_click());

        let body = CardDrag::begin(StickerId::new(1), PointerSample::at(10.0, 10.0), Point::default(), offset, 5.0);
        assert!(!body.is_title_click());
    }
}
