//! Layout State
//!
//! Process-wide counters for stacking order, spawn placement and fresh
//! identities. Stickers and items ask this object for values instead of
//! touching globals.

use std::fmt;

use super::ids::{ItemId, StickerId};
use super::sticker::Position;

/// Uniform random numbers in `[0, 1)`
pub trait RandomSource: Send + Sync {
    fn next_unit(&mut self) -> f64;
}

/// Channel range for generated background colors (150..200)
const COLOR_BASE: f64 = 150.0;
const COLOR_SPAN: f64 = 50.0;

pub struct LayoutState {
    z_index: i32,
    spawn_top: i32,
    spawn_left: i32,
    spawn_step: i32,
    id_seed: u64,
    id_counter: u64,
    sticker_counter: u32,
    random: Box<dyn RandomSource>,
}

impl LayoutState {
    /// `id_seed` should be time based (e.g. page load millis) so ids stay
    /// unique across sessions sharing the same storage.
    pub fn new(id_seed: u64, random: impl RandomSource + 'static) -> Self {
        Self {
            z_index: 0,
            spawn_top: 0,
            spawn_left: 0,
            spawn_step: 10,
            id_seed,
            id_counter: 0,
            sticker_counter: 0,
            random: Box::new(random),
        }
    }

    pub fn with_spawn_step(mut self, step: i32) -> Self {
        self.spawn_step = step;
        self
    }

    /// Hands out a stacking value above every value seen so far
    pub fn next_z_index(&mut self) -> i32 {
        self.z_index += 1;
        self.z_index
    }

    /// Advances the counter past a restored value
    pub fn observe_z_index(&mut self, z_index: i32) {
        if z_index > self.z_index {
            self.z_index = z_index;
        }
    }

    /// Each new sticker lands one step down and right of the previous one
    pub fn next_spawn_offset(&mut self) -> Position {
        self.spawn_top += self.spawn_step;
        self.spawn_left += self.spawn_step;
        Position {
            top: self.spawn_top,
            left: self.spawn_left,
        }
    }

    pub fn fresh_id(&mut self) -> ItemId {
        self.id_counter += 1;
        let suffix = (self.random.next_unit() * 1_000_000.0) as u32;
        ItemId::new(format!("item-{}-{}-{:06}", self.id_seed, self.id_counter, suffix))
    }

    pub fn fresh_sticker_id(&mut self) -> StickerId {
        self.sticker_counter += 1;
        StickerId::new(self.sticker_counter)
    }

    pub fn random_background_color(&mut self) -> String {
        let mut channel = || (self.random.next_unit() * COLOR_SPAN + COLOR_BASE).floor() as u8;
        let (r, g, b) = (channel(), channel(), channel());
        format!("rgb({}, {}, {})", r, g, b)
    }
}

impl fmt::Debug for LayoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutState")
            .field("z_index", &self.z_index)
            .field("spawn_top", &self.spawn_top)
            .field("spawn_left", &self.spawn_left)
            .field("spawn_step", &self.spawn_step)
            .field("id_seed", &self.id_seed)
            .field("id_counter", &self.id_counter)
            .field("sticker_counter", &self.sticker_counter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) struct FixedRandom(pub f64);

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_index_is_monotonic() {
        let mut layout = LayoutState::new(1, FixedRandom(0.5));
        let a = layout.next_z_index();
        let b = layout.next_z_index();
        assert!(b > a);
    }

    #[test]
    fn test_observe_high_z_index_moves_counter_past_it() {
        let mut layout = LayoutState::new(1, FixedRandom(0.5));
        layout.next_z_index();
        layout.observe_z_index(40);
        assert_eq!(layout.next_z_index(), 41);

        // Lower restored values never pull the counter back
        layout.observe_z_index(3);
        assert_eq!(layout.next_z_index(), 42);
    }

    #[test]
    fn test_spawn_offsets_step_by_ten() {
        let mut layout = LayoutState::new(1, FixedRandom(0.5));
        assert_eq!(layout.next_spawn_offset(), Position { top: 10, left: 10 });
        assert_eq!(layout.next_spawn_offset(), Position { top: 20, left: 20 });
    }

    #[test]
    fn test_fresh_ids_are_unique_even_with_same_random() {
        let mut layout = LayoutState::new(99, FixedRandom(0.25));
        let a = layout.fresh_id();
        let b = layout.fresh_id();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("item-99-"));
    }

    #[test]
    fn test_background_color_channels_in_range() {
        let mut low = LayoutState::new(1, FixedRandom(0.0));
        assert_eq!(low.random_background_color(), "rgb(150, 150, 150)");

        let mut high = LayoutState::new(1, FixedRandom(0.999));
        assert_eq!(high.random_background_color(), "rgb(199, 199, 199)");
    }
}
