//! Domain Layer
//!
//! Entities of the board and the counters that hand out their identities.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod ids;
mod item;
mod layout;
mod sticker;

pub use entity::{DomainError, DomainResult, Entity};
pub use ids::{ItemId, StickerId};
pub use item::{ItemData, StickerItem, DEFAULT_ITEM_CONTENT};
pub use layout::{LayoutState, RandomSource};
pub use sticker::{Position, Sticker, StickerData, StickerDraft, DEFAULT_TITLE};

#[cfg(test)]
pub(crate) use layout::FixedRandom;
