//! Sticker Board Core
//!
//! Layered like the app that renders it:
//! - domain: stickers, items, ids and the process-wide layout state
//! - surface: ordered list model the drag protocol reorders
//! - drag: item reorder/transfer state machine and sticker dragging
//! - events: notification channel between stickers and the store
//! - board: the store of live stickers
//! - persist: snapshot codec, debounced saving and key-value storage

pub mod board;
pub mod config;
pub mod domain;
pub mod drag;
pub mod edit;
pub mod events;
pub mod persist;
pub mod surface;


pub use board::Board;
pub use config::BoardConfig;
pub use domain::{
    DomainError, DomainResult, Entity, ItemData, ItemId, LayoutState, Position, RandomSource,
    Sticker, StickerData, StickerDraft, StickerId, StickerItem,
};
pub use drag::{CardDrag, DragController, DragStep, DropOutcome, DropProbe, Ghost, HitTarget, Point, PointerSample, PressOrigin};
pub use edit::EditTarget;
pub use events::{BoardEvent, EventBus, ListenerId};
pub use persist::{DebouncedSaver, Debouncer, KeyValueStore, MemoryStore};
pub use surface::{ListSurface, Node};
