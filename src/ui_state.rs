//! UI State Store
//!
//! View-only state that never reaches storage, using Leptos
//! reactive_stores for field-level reactivity.

use reactive_stores::Store;
use sticker_board::{CardDrag, EditTarget};

#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Open edit-in-place session, at most one at a time
    pub editing: Option<EditTarget>,
    /// Sticker currently following the pointer
    pub card_drag: Option<CardDrag>,
    /// Ghost width and height in px
    pub ghost_size: (f64, f64),
    /// Height of the dragged item, given to the placeholder
    pub placeholder_height: f64,
}

pub type UiStore = Store<UiState>;
