//! Board Context
//!
//! Shared state provided via Leptos Context API, plus the gesture and
//! toolbar actions components call into.

use leptos::prelude::*;
use leptos_dragdrop::{set_text_selection, track_pointer, ClickGuard, PointerPress, PointerSample};
use sticker_board::{
    Board, CardDrag, DragController, DragStep, EditTarget, ItemId, Point, Position, PressOrigin, StickerDraft,
    StickerId,
};

use crate::probe::DomProbe;
use crate::ui_state::{UiStateStoreFields, UiStore};

/// Gap between the dragged item's box and its ghost, per axis
const GHOST_INSET: f64 = 20.0;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct BoardContext {
    pub board: RwSignal<Board>,
    pub drag: RwSignal<DragController>,
    pub ui: UiStore,
    pub click_guard: ClickGuard,
}

pub fn use_board() -> BoardContext {
    expect_context::<BoardContext>()
}

fn to_board_sample(sample: PointerSample) -> sticker_board::PointerSample {
    sticker_board::PointerSample {
        client: Point::new(sample.client_x, sample.client_y),
        page: Point::new(sample.page_x, sample.page_y),
    }
}

impl BoardContext {
    // ========================
    // Toolbar
    // ========================

    /// Adds a default sticker and opens its title for editing
    pub fn new_sticker(&self) {
        let Some(id) = self.board.try_update(|board| board.add(StickerDraft::default())) else {
            return;
        };
        self.begin_edit(EditTarget::Title(id));
    }

    pub fn delete_all(&self) {
        let removed = self.board.try_update(|board| board.clear()).unwrap_or_default();
        *self.ui.editing().write() = None;
        log::info!("[APP] deleted {} sticker(s)", removed);
    }

    pub fn delete_sticker(&self, id: StickerId) {
        if let Some(Err(err)) = self.board.try_update(|board| board.remove(id)) {
            log::warn!("[APP] delete sticker {}: {}", id, err);
        }
    }

    // ========================
    // Items
    // ========================

    /// Appends an item and opens its content for editing
    pub fn add_item(&self, sticker: StickerId) {
        match self.board.try_update(|board| board.add_item(sticker)) {
            Some(Ok(item)) => self.begin_edit(EditTarget::Content(item)),
            Some(Err(err)) => log::warn!("[APP] add item to {}: {}", sticker, err),
            None => {}
        }
    }

    pub fn delete_item(&self, item: &ItemId) {
        if let Some(Err(err)) = self.board.try_update(|board| board.delete_item(item)) {
            log::warn!("[APP] delete item {}: {}", item, err);
        }
    }

    // ========================
    // Edit in place
    // ========================

    pub fn begin_edit(&self, target: EditTarget) {
        *self.ui.editing().write() = Some(target);
    }

    pub fn commit_edit(&self, target: EditTarget, input: String) {
        match self.board.try_update(|board| board.commit_edit(&target, &input)) {
            Some(Ok(false)) => log::debug!("[APP] blank edit ignored"),
            Some(Err(err)) => log::warn!("[APP] edit failed: {}", err),
            _ => {}
        }
        if self.ui.editing().get_untracked().as_ref() == Some(&target) {
            *self.ui.editing().write() = None;
        }
    }

    // ========================
    // Sticker drag
    // ========================

    /// Raises the sticker and makes it follow the pointer until release.
    /// `card` is the sticker's element.
    pub fn press_card(&self, id: StickerId, press: PointerPress, card: &web_sys::HtmlElement) {
        if press.on_control {
            return;
        }
        if let Some(Err(err)) = self.board.try_update(|board| board.raise(id)) {
            log::warn!("[APP] raise {}: {}", id, err);
            return;
        }

        let rect = card.get_bounding_client_rect();
        let corner = Point::new(rect.left(), rect.top());
        let offset = Position {
            top: card.offset_top(),
            left: card.offset_left(),
        };
        let threshold = self.board.with_untracked(|board| board.config().drag_threshold);
        let on_title = press.handle.as_deref() == Some("title");
        let drag = CardDrag::begin(id, to_board_sample(press.sample), corner, offset, threshold).from_title(on_title);
        *self.ui.card_drag().write() = Some(drag);

        set_text_selection(false);
        let ctx = *self;
        track_pointer(
            Callback::new(move |sample| ctx.move_card(sample)),
            Callback::new(move |_| ctx.drop_card()),
        );
    }

    fn move_card(&self, sample: PointerSample) {
        if let Some(drag) = &mut *self.ui.card_drag().write() {
            drag.track(to_board_sample(sample));
        }
    }

    fn drop_card(&self) {
        set_text_selection(true);
        let Some(drag) = self.ui.card_drag().write().take() else {
            return;
        };
        if let Some(Err(err)) = self
            .board
            .try_update(|board| board.commit_position(drag.sticker(), drag.position()))
        {
            log::warn!("[APP] sticker {} vanished mid-drag: {}", drag.sticker(), err);
            return;
        }
        if drag.is_title_click() {
            self.begin_edit(EditTarget::Title(drag.sticker()));
        }
    }

    // ========================
    // Item drag
    // ========================

    /// Arms an item drag; it starts once the pointer leaves the threshold.
    /// `row` is the item's element.
    pub fn press_item(&self, item: ItemId, press: PointerPress, row: &web_sys::HtmlElement) {
        let origin = if press.on_control {
            PressOrigin::Control
        } else {
            PressOrigin::Body
        };
        let sample = to_board_sample(press.sample);
        let rect = row.get_bounding_client_rect();
        let grab = Point::new(sample.client.x - rect.left(), sample.client.y - rect.top());
        let armed = self
            .drag
            .try_update(|drag| drag.press(item, sample, grab, origin))
            .unwrap_or(false);
        if !armed {
            return;
        }

        let width = row.client_width() as f64;
        let height = row.client_height() as f64;
        *self.ui.ghost_size().write() = ((width - GHOST_INSET).max(0.0), (height - GHOST_INSET).max(0.0));
        *self.ui.placeholder_height().write() = height;

        let ctx = *self;
        track_pointer(
            Callback::new(move |sample| ctx.move_item(sample)),
            Callback::new(move |_| ctx.drop_item()),
        );
    }

    fn move_item(&self, sample: PointerSample) {
        let sample = to_board_sample(sample);
        let board = self.board;
        let step = self
            .drag
            .try_update(|drag| {
                board.try_maybe_update(|board| {
                    let step = drag.pointer_move(board, sample, &DomProbe);
                    (step.touches_layout(), step)
                })
            })
            .flatten();
        if step == Some(DragStep::Started) {
            set_text_selection(false);
        }
    }

    fn drop_item(&self) {
        set_text_selection(true);
        let board = self.board;
        let outcome = self
            .drag
            .try_update(|drag| board.try_update(|board| drag.release(board)))
            .flatten()
            .flatten();
        if let Some(outcome) = outcome {
            self.click_guard.arm();
            log::info!(
                "[DND] {} -> sticker {} at {}{}",
                outcome.item,
                outcome.to,
                outcome.index,
                if outcome.is_transfer() { " (transfer)" } else { "" }
            );
        }
    }
}
