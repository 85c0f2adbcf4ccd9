//! Edit-in-place targets
//!
//! Titles and item contents share one commit rule: an empty value is
//! discarded and the previous text stays. Anything else, spaces included,
//! is taken as typed.

use crate::domain::{ItemId, StickerId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditTarget {
    /// Sticker title
    Title(StickerId),
    /// Item content
    Content(ItemId),
}

/// Writes `input` into `current` unless it is empty. Returns whether it did.
pub fn accept_edit(current: &mut String, input: &str) -> bool {
    if input.is_empty() {
        return false;
    }
    *current = input.to_string();
    true
}
