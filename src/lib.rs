//! `lifecore`: the computational core of a Conway's Game of Life engine
//! for an effectively unbounded two-dimensional grid, on the B3/S23
//! ruleset only.
//!
//! Two independent algorithms are exposed behind one polymorphic handle,
//! [`LifeUniverse`]:
//!
//! - [`hashlife`] — Gosper's memoized recursive quadtree, which advances
//!   large regular patterns by `2^k` generations per call.
//! - [`quicklife`] — Hensel's sparse, block-partitioned bitboard
//!   simulator, which advances irregular patterns one generation at a
//!   time.
//!
//! Patterns, rendering, coordinate/scale translation, and file I/O are
//! external collaborators and out of this crate's scope; the core only
//! accepts `(x, y)` cell-alive events and exposes grid-mutation, step,
//! and region-enumeration operations.

pub mod config;
pub mod hashlife;
pub mod life_rule;
pub mod quicklife;
pub mod stats;

use hashlife::HashLifeEngine;
use quicklife::QuickLifeEngine;
use stats::Stats;

/// Which of the two algorithms backs a [`LifeUniverse`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    HashLife,
    QuickLife,
}

/// The public contract over either engine variant (spec.md §6).
///
/// Construct with [`LifeUniverse::new`], populate with [`set`](Self::set),
/// then advance with [`step`](Self::step) or [`step_speed`](Self::step_speed).
pub enum LifeUniverse {
    HashLife(HashLifeEngine),
    QuickLife(QuickLifeEngine),
}

impl LifeUniverse {
    pub fn new(variant: Variant) -> Self {
        match variant {
            Variant::HashLife => LifeUniverse::HashLife(HashLifeEngine::new()),
            Variant::QuickLife => LifeUniverse::QuickLife(QuickLifeEngine::new()),
        }
    }

    pub fn new_hashlife() -> Self {
        Self::new(Variant::HashLife)
    }

    pub fn new_quicklife() -> Self {
        Self::new(Variant::QuickLife)
    }

    pub fn variant(&self) -> Variant {
        match self {
            LifeUniverse::HashLife(_) => Variant::HashLife,
            LifeUniverse::QuickLife(_) => Variant::QuickLife,
        }
    }

    /// Resets to an all-dead grid at generation 0.
    pub fn clear(&mut self) {
        match self {
            LifeUniverse::HashLife(e) => e.clear(),
            LifeUniverse::QuickLife(e) => e.clear(),
        }
    }

    /// Sets cell `(x, y)`. Coordinates outside the representable region
    /// are silently clipped (spec.md §7).
    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        match self {
            LifeUniverse::HashLife(e) => e.set(x, y, alive),
            LifeUniverse::QuickLife(e) => e.set(x, y, alive),
        }
    }

    /// Reads cell `(x, y)`; `false` outside the representable region.
    pub fn get(&self, x: i64, y: i64) -> bool {
        match self {
            LifeUniverse::HashLife(e) => e.get(x, y),
            LifeUniverse::QuickLife(e) => e.get(x, y),
        }
    }

    /// Advances by one generation.
    pub fn step(&mut self) {
        self.step_speed(0);
    }

    /// Advances by `2^speed` generations. HashLife may serve this with a
    /// single memoized step at the universe's current level; QuickLife
    /// always performs `2^speed` single steps (spec.md §6).
    pub fn step_speed(&mut self, speed: u8) {
        match self {
            LifeUniverse::HashLife(e) => e.step(speed),
            LifeUniverse::QuickLife(e) => e.step(speed),
        }
    }

    /// Invokes `callback(x, y)` once per live cell in `[x_min, x_max) x
    /// [y_min, y_max)`. Order is unspecified but deterministic for a
    /// given state (spec.md §4.4).
    pub fn draw(&self, x_min: i64, y_min: i64, x_max: i64, y_max: i64, callback: &mut dyn FnMut(i64, i64)) {
        match self {
            LifeUniverse::HashLife(e) => e.draw(x_min, y_min, x_max, y_max, callback),
            LifeUniverse::QuickLife(e) => e.draw(x_min, y_min, x_max, y_max, callback),
        }
    }

    pub fn population(&self) -> u64 {
        match self {
            LifeUniverse::HashLife(e) => e.population(),
            LifeUniverse::QuickLife(e) => e.population(),
        }
    }

    pub fn generation(&self) -> u128 {
        match self {
            LifeUniverse::HashLife(e) => e.generation(),
            LifeUniverse::QuickLife(e) => e.generation(),
        }
    }

    pub fn stats(&self) -> Stats {
        match self {
            LifeUniverse::HashLife(e) => e.stats(),
            LifeUniverse::QuickLife(e) => e.stats(),
        }
    }

    /// Human-readable generation and cache statistics. Purely diagnostic
    /// (spec.md §6).
    pub fn report(&self) -> String {
        self.stats().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashlife_variant_reports_itself() {
        let universe = LifeUniverse::new(Variant::HashLife);
        assert_eq!(universe.variant(), Variant::HashLife);
    }

    #[test]
    fn quicklife_variant_reports_itself() {
        let universe = LifeUniverse::new(Variant::QuickLife);
        assert_eq!(universe.variant(), Variant::QuickLife);
    }

    #[test]
    fn both_variants_agree_on_a_blinker() {
        for variant in [Variant::HashLife, Variant::QuickLife] {
            let mut universe = LifeUniverse::new(variant);
            for (x, y) in [(0, 0), (1, 0), (2, 0)] {
                universe.set(x, y, true);
            }
            universe.step();
            for (x, y) in [(1, -1), (1, 0), (1, 1)] {
                assert!(universe.get(x, y), "{variant:?}: expected ({x},{y}) alive");
            }
        }
    }

    #[test]
    fn report_includes_variant_name() {
        let universe = LifeUniverse::new(Variant::HashLife);
        assert!(universe.report().contains("HashLife"));
        let universe = LifeUniverse::new(Variant::QuickLife);
        assert!(universe.report().contains("QuickLife"));
    }
}
