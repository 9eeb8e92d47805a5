//! `QuickLifeEngine`: the public driver atop `SparseBlockGrid`.
//!
//! Mirrors `HashLifeEngine`'s shape (a thin, stateful wrapper exposing
//! `clear`/`set`/`get`/`step`/`draw`/`report`) so `LifeUniverse` can hold
//! either variant behind one small match.

use super::grid::SparseBlockGrid;
use crate::stats::Stats;

pub struct QuickLifeEngine {
    grid: SparseBlockGrid,
    generation: u128,
}

impl QuickLifeEngine {
    pub fn new() -> Self {
        Self {
            grid: SparseBlockGrid::new(),
            generation: 0,
        }
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
    }

    pub fn generation(&self) -> u128 {
        self.generation
    }

    pub fn population(&self) -> u64 {
        self.grid.population()
    }

    pub fn get(&self, x: i64, y: i64) -> bool {
        self.grid.get(x, y)
    }

    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        self.grid.set(x, y, alive);
    }

    pub fn step_one(&mut self) {
        self.grid.step_one();
        self.generation += 1;
    }

    /// Advances by `2^speed` generations: unlike HashLife, QuickLife has
    /// no memoized multi-generation step, so this is `2^speed` single
    /// steps (spec.md §6).
    pub fn step(&mut self, speed: u8) {
        let steps = 1u128 << speed;
        for _ in 0..steps {
            self.step_one();
        }
    }

    pub fn draw(&self, x_min: i64, y_min: i64, x_max: i64, y_max: i64, callback: &mut dyn FnMut(i64, i64)) {
        self.grid.draw(x_min, y_min, x_max, y_max, callback);
    }

    pub fn stats(&self) -> Stats {
        self.grid.stats(self.generation)
    }

    pub fn report(&self) -> String {
        self.stats().to_string()
    }
}

impl Default for QuickLifeEngine {
    fn default() -> Self {
        Self::new()
    }
}
