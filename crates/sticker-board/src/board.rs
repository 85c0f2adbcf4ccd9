//! Board Store
//!
//! The live set of stickers, keyed by id, plus the item entities they own
//! and the list surface they are rendered from. Every mutation announces
//! itself through `dispatch`, which reaches the owning sticker before any
//! document-level subscriber (such as the save scheduler).

use std::collections::HashMap;

use crate::config::BoardConfig;
use crate::domain::{
    DomainError, DomainResult, Entity, ItemId, LayoutState, Position, Sticker, StickerData, StickerDraft, StickerId,
    StickerItem,
};
use crate::edit::{accept_edit, EditTarget};
use crate::events::{BoardEvent, EventBus, ListenerId};
use crate::persist::{self, KeyValueStore};
use crate::surface::{ListSurface, Node};

#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    layout: LayoutState,
    stickers: HashMap<StickerId, Sticker>,
    /// Creation order
    order: Vec<StickerId>,
    items: HashMap<ItemId, StickerItem>,
    surface: ListSurface,
    bus: EventBus,
}

impl Board {
    pub fn new(config: BoardConfig, layout: LayoutState) -> Self {
        let layout = layout.with_spawn_step(config.spawn_step);
        Self {
            config,
            layout,
            stickers: HashMap::new(),
            order: Vec::new(),
            items: HashMap::new(),
            surface: ListSurface::new(),
            bus: EventBus::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    // ========================
    // Notifications
    // ========================

    /// Registers a document-level listener
    pub fn subscribe(&mut self, listener: impl FnMut(&BoardEvent) + Send + Sync + 'static) -> ListenerId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Delivers `event` raised inside sticker `origin`: the sticker reacts
    /// first (and may raise content-changed, delivered depth-first), then
    /// document-level listeners see the event.
    pub fn dispatch(&mut self, origin: StickerId, event: BoardEvent) {
        let follow_up = match &event {
            BoardEvent::ItemDeleted(item) => self.stickers.get_mut(&origin).map(|sticker| {
                sticker.on_item_deleted(item);
                BoardEvent::ContentChanged
            }),
            BoardEvent::ItemMoved(item) => {
                let visible = self.surface.visible_items(origin);
                self.stickers.get_mut(&origin).map(|sticker| {
                    sticker.on_item_moved(item, &visible);
                    BoardEvent::ContentChanged
                })
            }
            BoardEvent::ContentChanged => None,
        };
        if let Some(next) = follow_up {
            self.dispatch(origin, next);
        }
        self.bus.publish(&event);
    }

    fn publish_change(&mut self) {
        self.bus.publish(&BoardEvent::ContentChanged);
    }

    // ========================
    // Stickers
    // ========================

    /// Builds a sticker and mounts its item list without announcing it
    fn create_sticker(&mut self, draft: StickerDraft) -> StickerId {
        let id = self.layout.fresh_sticker_id();
        let (sticker, items) = Sticker::new(id, draft, &mut self.layout);
        self.surface.mount(id, sticker.items().iter().cloned());
        for item in items {
            self.items.insert(item.id(), item);
        }
        self.stickers.insert(sticker.id(), sticker);
        self.order.push(id);
        id
    }

    /// Creates a sticker and adds it to the live set
    pub fn add(&mut self, draft: StickerDraft) -> StickerId {
        let id = self.create_sticker(draft);
        log::info!("[BOARD] sticker {} added", id);
        self.publish_change();
        id
    }

    /// Deletes a sticker, its items and its item list
    pub fn remove(&mut self, id: StickerId) -> DomainResult<Sticker> {
        let sticker = self
            .stickers
            .remove(&id)
            .ok_or_else(|| DomainError::NotFound(format!("sticker {}", id)))?;
        self.order.retain(|other| *other != id);
        for node in self.surface.unmount(id) {
            if let Node::Item(item) = node {
                self.items.remove(&item);
            }
        }
        log::info!("[BOARD] sticker {} removed", id);
        self.publish_change();
        Ok(sticker)
    }

    /// Deletes every sticker. Returns how many there were.
    pub fn clear(&mut self) -> usize {
        let ids = self.order.clone();
        ids.into_iter().filter(|id| self.remove(*id).is_ok()).count()
    }

    pub fn sticker(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.get(&id)
    }

    pub fn sticker_ids(&self) -> &[StickerId] {
        &self.order
    }

    /// Live stickers in creation order
    pub fn stickers(&self) -> impl Iterator<Item = &Sticker> + '_ {
        self.order.iter().filter_map(|id| self.stickers.get(id))
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    /// Moves a sticker to the top of the stacking order
    pub fn raise(&mut self, id: StickerId) -> DomainResult<i32> {
        let sticker = self
            .stickers
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("sticker {}", id)))?;
        Ok(sticker.raise(&mut self.layout))
    }

    /// Stores the final position of a sticker drag
    pub fn commit_position(&mut self, id: StickerId, position: Position) -> DomainResult<()> {
        let sticker = self
            .stickers
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("sticker {}", id)))?;
        sticker.position = position;
        self.dispatch(id, BoardEvent::ContentChanged);
        Ok(())
    }

    // ========================
    // Items
    // ========================

    pub fn item(&self, id: &ItemId) -> Option<&StickerItem> {
        self.items.get(id)
    }

    /// Items of a sticker in display order
    pub fn items_of(&self, id: StickerId) -> Vec<&StickerItem> {
        self.stickers
            .get(&id)
            .map(|sticker| sticker.items().iter().filter_map(|item| self.items.get(item)).collect())
            .unwrap_or_default()
    }

    /// Sticker whose item list currently holds `item`
    pub fn owner_of(&self, item: &ItemId) -> Option<StickerId> {
        self.surface.parent_of(&Node::Item(item.clone()))
    }

    /// Appends a fresh item to a sticker
    pub fn add_item(&mut self, id: StickerId) -> DomainResult<ItemId> {
        if !self.stickers.contains_key(&id) {
            return Err(DomainError::NotFound(format!("sticker {}", id)));
        }
        let item = StickerItem::new(&mut self.layout, None, None);
        let item_id = item.id();
        self.items.insert(item_id.clone(), item);
        if let Some(sticker) = self.stickers.get_mut(&id) {
            sticker.push_item(item_id.clone());
        }
        self.surface.append(id, Node::Item(item_id.clone()));
        self.dispatch(id, BoardEvent::ContentChanged);
        Ok(item_id)
    }

    /// Announces the deletion to the owning sticker, then drops the item
    pub fn delete_item(&mut self, id: &ItemId) -> DomainResult<StickerItem> {
        let owner = self
            .owner_of(id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))?;
        self.dispatch(owner, BoardEvent::ItemDeleted(id.clone()));
        self.surface.detach(&Node::Item(id.clone()));
        self.surface.show(id);
        self.items
            .remove(id)
            .ok_or_else(|| DomainError::Internal(format!("item {} had a node but no entity", id)))
    }

    /// Commits an edit-in-place session. Empty input keeps the previous
    /// text and announces nothing. Returns whether the value changed.
    pub fn commit_edit(&mut self, target: &EditTarget, input: &str) -> DomainResult<bool> {
        let (origin, accepted) = match target {
            EditTarget::Title(id) => {
                let sticker = self
                    .stickers
                    .get_mut(id)
                    .ok_or_else(|| DomainError::NotFound(format!("sticker {}", id)))?;
                (*id, accept_edit(&mut sticker.title, input))
            }
            EditTarget::Content(item_id) => {
                let owner = self
                    .owner_of(item_id)
                    .ok_or_else(|| DomainError::NotFound(format!("item {}", item_id)))?;
                let item = self
                    .items
                    .get_mut(item_id)
                    .ok_or_else(|| DomainError::NotFound(format!("item {}", item_id)))?;
                (owner, accept_edit(&mut item.content, input))
            }
        };
        if accepted {
            self.dispatch(origin, BoardEvent::ContentChanged);
        }
        Ok(accepted)
    }

    // ========================
    // Surface
    // ========================

    pub fn surface(&self) -> &ListSurface {
        &self.surface
    }

    pub(crate) fn surface_mut(&mut self) -> &mut ListSurface {
        &mut self.surface
    }

    // ========================
    // Persistence
    // ========================

    pub fn serialize(&self) -> Vec<StickerData> {
        self.stickers()
            .map(|sticker| sticker.serialize(&self.items))
            .collect()
    }

    /// Replaces the stored snapshot with the current board
    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> DomainResult<usize> {
        let raw = persist::encode(&self.serialize())?;
        store.write(&self.config.storage_key, &raw)?;
        log::debug!("[STORE] saved {} sticker(s), {} bytes", self.len(), raw.len());
        Ok(self.len())
    }

    /// Restores stickers from the stored snapshot. `Ok(None)` means nothing
    /// was saved yet. A snapshot that fails to parse or validate leaves the
    /// board untouched.
    pub fn load<S: KeyValueStore>(&mut self, store: &S) -> DomainResult<Option<Vec<StickerId>>> {
        let Some(raw) = store.read(&self.config.storage_key)? else {
            return Ok(None);
        };
        let stickers = persist::decode(&raw)?;
        if let Some(clash) = stickers
            .iter()
            .flat_map(|sticker| sticker.items.iter())
            .find(|item| self.items.contains_key(&item.id))
        {
            return Err(DomainError::Conflict(format!("item id {} already on the board", clash.id)));
        }

        let ids: Vec<StickerId> = stickers
            .into_iter()
            .map(|data| self.create_sticker(StickerDraft::from(data)))
            .collect();
        log::info!("[STORE] restored {} sticker(s)", ids.len());
        Ok(Some(ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FixedRandom;
    use crate::persist::MemoryStore;
    use std::sync::{Arc, Mutex};

    fn make_board() -> Board {
        Board::new(BoardConfig::default(), LayoutState::new(7, FixedRandom(0.5)))
    }

    fn record(board: &mut Board) -> Arc<Mutex<Vec<BoardEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        board.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        events
    }

    #[test]
    fn test_add_and_remove_announce_changes() {
        let mut board = make_board();
        let events = record(&mut board);

        let id = board.add(StickerDraft::default());
        assert_eq!(board.len(), 1);
        board.remove(id).unwrap();
        assert!(board.is_empty());

        assert_eq!(*events.lock().unwrap(), vec![BoardEvent::ContentChanged, BoardEvent::ContentChanged]);
        assert!(matches!(board.remove(id), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_add_item_appends_and_announces() {
        let mut board = make_board();
        let sticker = board.add(StickerDraft::default());
        let events = record(&mut board);

        let first = board.add_item(sticker).unwrap();
        let second = board.add_item(sticker).unwrap();

        assert_eq!(board.sticker(sticker).unwrap().items(), [first.clone(), second.clone()].as_slice());
        assert_eq!(board.surface().visible_items(sticker), vec![first, second]);
        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_entities_are_stored_under_their_ids() {
        let mut board = make_board();
        let sticker = board.add(StickerDraft::default());
        let item = board.add_item(sticker).unwrap();

        assert_eq!(board.sticker(sticker).unwrap().id(), sticker);
        let stored = board.item(&item).unwrap();
        assert_eq!(stored.id(), item);
        assert_eq!(board.items_of(sticker), vec![stored]);
    }

    #[test]
    fn test_commit_edit_accepts_whitespace_title() {
        let mut board = make_board();
        let sticker = board.add(StickerDraft::default());
        let events = record(&mut board);

        assert!(board.commit_edit(&EditTarget::Title(sticker), "   ").unwrap());
        assert_eq!(board.sticker(sticker).unwrap().title, "   ");
        assert_eq!(*events.lock().unwrap(), vec![BoardEvent::ContentChanged]);
    }

    #[test]
    fn test_delete_item_reaches_sticker_before_document() {
        let mut board = make_board();
        let sticker = board.add(StickerDraft::default());
        let item = board.add_item(sticker).unwrap();
        let events = record(&mut board);

        let removed = board.delete_item(&item).unwrap();
        assert_eq!(removed.id, item);
        assert!(board.sticker(sticker).unwrap().items().is_empty());
        assert!(board.item(&item).is_none());
        assert!(board.surface().nodes(sticker).is_empty());

        // The sticker's re-emitted change arrives before the deletion itself
        assert_eq!(
            *events.lock().unwrap(),
            vec![BoardEvent::ContentChanged, BoardEvent::ItemDeleted(item)]
        );
    }

    #[test]
    fn test_commit_edit_guards_empty_input() {
        let mut board = make_board();
        let sticker = board.add(StickerDraft::default());
        let item = board.add_item(sticker).unwrap();
        let events = record(&mut board);

        assert!(!board.commit_edit(&EditTarget::Title(sticker), "").unwrap());
        assert_eq!(board.sticker(sticker).unwrap().title, "Sticker");
        assert!(events.lock().unwrap().is_empty());

        assert!(board.commit_edit(&EditTarget::Title(sticker), "Errands").unwrap());
        assert!(board.commit_edit(&EditTarget::Content(item.clone()), "post office").unwrap());
        assert_eq!(board.sticker(sticker).unwrap().title, "Errands");
        assert_eq!(board.item(&item).unwrap().content, "post office");
        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_raise_and_commit_position() {
        let mut board = make_board();
        let below = board.add(StickerDraft::default());
        let above = board.add(StickerDraft::default());

        let z = board.raise(below).unwrap();
        assert!(z > board.sticker(above).unwrap().z_index);

        let events = record(&mut board);
        board.commit_position(below, Position { top: 5, left: 6 }).unwrap();
        assert_eq!(board.sticker(below).unwrap().position, Position { top: 5, left: 6 });
        assert_eq!(*events.lock().unwrap(), vec![BoardEvent::ContentChanged]);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut board = make_board();
        let a = board.add(StickerDraft::default());
        board.add(StickerDraft::default());
        board.add_item(a).unwrap();

        assert_eq!(board.clear(), 2);
        assert!(board.is_empty());
        assert!(board.items_of(a).is_empty());
        assert!(board.serialize().is_empty());
    }

    #[test]
    fn test_load_absent_is_not_an_error() {
        let mut board = make_board();
        assert_eq!(board.load(&MemoryStore::new()).unwrap(), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_load_malformed_leaves_board_empty() {
        let mut board = make_board();
        let store = MemoryStore::with_value("stickers", "[{\"title\": 3");
        assert!(board.load(&store).is_err());
        assert!(board.is_empty());
    }

    #[test]
    fn test_load_does_not_announce() {
        let mut source = make_board();
        source.add(StickerDraft::default());
        let mut store = MemoryStore::new();
        source.save(&mut store).unwrap();

        let mut board = make_board();
        let events = record(&mut board);
        let ids = board.load(&store).unwrap().unwrap();
        assert_eq!(ids.len(), 1);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut board = make_board();
        board.add(StickerDraft::default());
        let mut store = MemoryStore::read_only();
        assert!(matches!(board.save(&mut store), Err(DomainError::Storage(_))));
    }
}
