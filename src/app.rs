//! Sticker Board App
//!
//! Builds the board from configuration and storage, wires saving to
//! content changes, and lays out the toolbar, stickers and drag ghost.

use leptos::prelude::*;
use leptos_dragdrop::ClickGuard;
use reactive_stores::Store;
use sticker_board::{Board, BoardConfig, BoardEvent, DragController, KeyValueStore, LayoutState, RandomSource};

use crate::components::{BoardToolbar, DragGhost, StickerCard};
use crate::context::BoardContext;
use crate::persistence::SaveScheduler;
use crate::storage::LocalStore;
use crate::ui_state::UiState;

/// Optional `<script type="application/json">` block overriding defaults
const CONFIG_ELEMENT_ID: &str = "board-config";

struct JsRandom;

impl RandomSource for JsRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

fn load_config() -> BoardConfig {
    let raw = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let Some(raw) = raw else {
        return BoardConfig::default();
    };
    BoardConfig::from_json(&raw).unwrap_or_else(|err| {
        log::warn!("[APP] ignoring #{}: {}", CONFIG_ELEMENT_ID, err);
        BoardConfig::default()
    })
}

fn restore(board: &mut Board, store: &impl KeyValueStore) {
    match board.load(store) {
        Ok(Some(ids)) => log::info!("[APP] restored {} sticker(s)", ids.len()),
        Ok(None) => log::info!("[APP] no saved board, starting empty"),
        Err(err) => log::error!("[APP] saved board unreadable, starting empty: {}", err),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    let threshold = config.drag_threshold;
    let save_window = config.save_debounce_ms;
    log::debug!("[APP] config: {:?}", config);

    let mut board = Board::new(config, LayoutState::new(js_sys::Date::now() as u64, JsRandom));
    let store = LocalStore::open();
    restore(&mut board, &store);

    let board = RwSignal::new(board);
    let saves = SaveScheduler::new(board, store, save_window);
    board.update_untracked(|board| {
        board.subscribe(move |event| {
            if matches!(event, BoardEvent::ContentChanged) {
                saves.request();
            }
        });
    });

    provide_context(BoardContext {
        board,
        drag: RwSignal::new(DragController::new(threshold)),
        ui: Store::new(UiState::default()),
        click_guard: ClickGuard::new(),
    });

    view! {
        <BoardToolbar />
        <div id="stickerContainer">
            <For
                each=move || board.with(|board| board.sticker_ids().to_vec())
                key=|id| *id
                children=move |id| view! { <StickerCard id=id /> }
            />
        </div>
        <DragGhost />
    }
}
