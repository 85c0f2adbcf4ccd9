//! UI Components
//!
//! Reusable Leptos components.

mod board_toolbar;
mod drag_ghost;
mod edit_in_place;
mod sticker_card;
mod sticker_item_row;

pub use board_toolbar::BoardToolbar;
pub use drag_ghost::DragGhost;
pub use edit_in_place::EditInPlace;
pub use sticker_card::StickerCard;
pub use sticker_item_row::StickerItemRow;
