//! `HashLifeEngine`: the embiggen/step driver atop `QuadMemoizer`.

use super::memoizer::QuadMemoizer;
use super::quad::NodeId;
use crate::config;
use crate::stats::Stats;

pub struct HashLifeEngine {
    memo: QuadMemoizer,
    root: NodeId,
    generation: u128,
}

impl HashLifeEngine {
    pub fn new() -> Self {
        let mut memo = QuadMemoizer::new();
        let root = memo.empty_node(3);
        Self {
            memo,
            root,
            generation: 0,
        }
    }

    pub fn clear(&mut self) {
        self.root = self.memo.empty_node(3);
        self.generation = 0;
    }

    pub fn generation(&self) -> u128 {
        self.generation
    }

    pub fn population(&self) -> u64 {
        self.memo.population(self.root)
    }

    fn level(&self) -> u8 {
        self.memo.level(self.root)
    }

    fn half_side(&self) -> i64 {
        1i64 << (self.level() - 1)
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        let half = self.half_side();
        x >= -half && x < half && y >= -half && y < half
    }

    /// Wraps the root in one extra level of empty padding, keeping the
    /// existing content centered.
    fn embiggen(&mut self) {
        let level = self.level();
        if level >= config::MAX_LEVEL {
            return;
        }
        let (nw, ne, sw, se) = self.memo.children(self.root);
        let empty = self.memo.empty_node(level - 1);
        let new_nw = self.memo.join(empty, empty, empty, nw);
        let new_ne = self.memo.join(empty, empty, ne, empty);
        let new_sw = self.memo.join(empty, sw, empty, empty);
        let new_se = self.memo.join(se, empty, empty, empty);
        self.root = self.memo.join(new_nw, new_ne, new_sw, new_se);
    }

    /// True if every grandchild of `id` other than the four touching its
    /// own center is the canonical empty quad — i.e. nothing lives within
    /// one quarter-width of the border.
    fn outer_ring_empty(&self, id: NodeId) -> bool {
        let (nw, ne, sw, se) = self.memo.children(id);
        let (nw_nw, nw_ne, nw_sw, _) = self.memo.children(nw);
        let (ne_nw, ne_ne, _, ne_se) = self.memo.children(ne);
        let (sw_nw, _, sw_sw, sw_se) = self.memo.children(sw);
        let (_, se_ne, se_sw, se_se) = self.memo.children(se);
        [
            nw_nw, nw_ne, nw_sw, ne_nw, ne_ne, ne_se, sw_nw, sw_sw, sw_se, se_ne, se_sw, se_se,
        ]
        .into_iter()
        .all(|child| self.memo.is_empty(child))
    }

    /// Grows until both the outer ring and the ring just inside it are
    /// empty, per spec.md's padding discipline.
    fn pad_before_step(&mut self) {
        while self.level() < 3 {
            self.embiggen();
        }
        if !self.outer_ring_empty(self.root) {
            self.embiggen();
            self.embiggen();
            return;
        }
        let inner = self.memo.center(self.root);
        if !self.outer_ring_empty(inner) {
            self.embiggen();
        }
    }

    /// Advances by `2^speed` generations in as many memoized steps as the
    /// current (and growing) level's algorithmic maximum allows.
    pub fn step(&mut self, speed: u8) {
        let mut remaining = speed;
        loop {
            self.pad_before_step();
            let max_k = self.level() - 2;
            let k = max_k.min(remaining);
            self.root = self.memo.step(self.root, k);
            self.generation += 1u128 << k;
            self.embiggen();
            self.evict_if_needed();
            remaining -= k;
            if remaining == 0 {
                break;
            }
            if k == 0 && self.level() >= config::MAX_LEVEL {
                // Cannot grow further and the level offers no speed: the
                // maximum-level boundary case from spec.md §8.
                break;
            }
        }
    }

    pub fn step_one(&mut self) {
        self.step(0);
    }

    /// Relocates `root` across a memo eviction, if the memo has crossed
    /// its threshold. Only ever called between top-level operations, when
    /// `root` is the only live `NodeId` this engine holds — never from
    /// inside `QuadMemoizer::join`/`step`'s own recursion, where many
    /// other local `NodeId`s into the same arena would be left dangling
    /// by a bulk clear.
    fn evict_if_needed(&mut self) {
        if self.memo.needs_eviction() {
            self.root = self.memo.evict_keeping_root(self.root);
        }
    }

    fn descend_coords(&self, x: i64, y: i64) -> (u64, u64) {
        let size = 1i64 << self.level();
        let half = size >> 1;
        ((x + half) as u64, (y + half) as u64)
    }

    pub fn get(&self, x: i64, y: i64) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let (ux, uy) = self.descend_coords(x, y);
        let mut node = self.root;
        let mut lvl = self.level();
        while lvl > 0 {
            lvl -= 1;
            let xbit = (ux >> lvl) & 1;
            let ybit = (uy >> lvl) & 1;
            let (nw, ne, sw, se) = self.memo.children(node);
            node = match (xbit, ybit) {
                (0, 1) => nw,
                (1, 1) => ne,
                (0, 0) => sw,
                (1, 0) => se,
                _ => unreachable!(),
            };
        }
        matches!(self.memo.node(node), crate::hashlife::quad::QuadNode::Leaf { alive: true })
    }

    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        while !self.in_bounds(x, y) {
            self.embiggen();
            if self.level() >= config::MAX_LEVEL && !self.in_bounds(x, y) {
                return;
            }
        }
        let (ux, uy) = self.descend_coords(x, y);
        let level = self.level();
        self.root = self.set_rec(self.root, level, ux, uy, alive);
        self.evict_if_needed();
    }

    fn set_rec(&mut self, node: NodeId, level: u8, ux: u64, uy: u64, alive: bool) -> NodeId {
        if level == 0 {
            return self.memo.leaf(alive);
        }
        let lvl = level - 1;
        let xbit = (ux >> lvl) & 1;
        let ybit = (uy >> lvl) & 1;
        let (nw, ne, sw, se) = self.memo.children(node);
        let (nw, ne, sw, se) = match (xbit, ybit) {
            (0, 1) => (self.set_rec(nw, lvl, ux, uy, alive), ne, sw, se),
            (1, 1) => (nw, self.set_rec(ne, lvl, ux, uy, alive), sw, se),
            (0, 0) => (nw, ne, self.set_rec(sw, lvl, ux, uy, alive), se),
            (1, 0) => (nw, ne, sw, self.set_rec(se, lvl, ux, uy, alive)),
            _ => unreachable!(),
        };
        self.memo.join(nw, ne, sw, se)
    }

    /// Invokes `callback(x, y)` for every live cell within `[x_min, x_max)
    /// x [y_min, y_max)`, pruning subtrees whose bounding box misses the
    /// rectangle or that are canonically empty.
    pub fn draw(&self, x_min: i64, y_min: i64, x_max: i64, y_max: i64, callback: &mut dyn FnMut(i64, i64)) {
        let half = self.half_side();
        self.draw_rec(self.root, -half, -half, half, callback, x_min, y_min, x_max, y_max);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_rec(
        &self,
        node: NodeId,
        node_x_min: i64,
        node_y_min: i64,
        node_x_max: i64,
        callback: &mut dyn FnMut(i64, i64),
        x_min: i64,
        y_min: i64,
        x_max: i64,
        y_max: i64,
    ) {
        if self.memo.population(node) == 0 {
            return;
        }
        let side = node_x_max - node_x_min;
        let node_y_max = node_y_min + side;
        if node_x_max <= x_min || node_x_min >= x_max || node_y_max <= y_min || node_y_min >= y_max
        {
            return;
        }
        match self.memo.node(node) {
            crate::hashlife::quad::QuadNode::Leaf { alive: true } => {
                callback(node_x_min, node_y_min);
            }
            crate::hashlife::quad::QuadNode::Leaf { alive: false } => {}
            crate::hashlife::quad::QuadNode::Branch { .. } => {
                let (nw, ne, sw, se) = self.memo.children(node);
                let half = side / 2;
                let mid_x = node_x_min + half;
                let mid_y = node_y_min + half;
                // north = +y (see spec.md §9 Open Questions).
                self.draw_rec(nw, node_x_min, mid_y, mid_x, callback, x_min, y_min, x_max, y_max);
                self.draw_rec(ne, mid_x, mid_y, node_x_max, callback, x_min, y_min, x_max, y_max);
                self.draw_rec(sw, node_x_min, node_y_min, mid_x, callback, x_min, y_min, x_max, y_max);
                self.draw_rec(se, mid_x, node_y_min, node_x_max, callback, x_min, y_min, x_max, y_max);
            }
        }
    }

    pub fn stats(&self) -> Stats {
        Stats {
            variant: "HashLife",
            generation: self.generation,
            population: self.population(),
            level: Some(self.level()),
            node_count: Some(self.memo.node_count()),
            memo_entry_count: Some(self.memo.memo_entry_count()),
            active_blocks: None,
            stable_blocks: None,
            dead_blocks: None,
        }
    }

    pub fn report(&self) -> String {
        self.stats().to_string()
    }
}

impl Default for HashLifeEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_engine_is_empty() {
        let engine = HashLifeEngine::new();
        assert_eq!(engine.population(), 0);
        assert!(!engine.get(0, 0));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut engine = HashLifeEngine::new();
        engine.set(5, -3, true);
        assert!(engine.get(5, -3));
        assert!(!engine.get(5, -2));
        engine.set(5, -3, false);
        assert!(!engine.get(5, -3));
    }

    #[test]
    fn blinker_rotates_every_generation() {
        let mut engine = HashLifeEngine::new();
        for (x, y) in [(0, 0), (1, 0), (2, 0)] {
            engine.set(x, y, true);
        }
        engine.step_one();
        for (x, y) in [(1, -1), (1, 0), (1, 1)] {
            assert!(engine.get(x, y), "expected ({x},{y}) alive after one step");
        }
        engine.step_one();
        for (x, y) in [(0, 0), (1, 0), (2, 0)] {
            assert!(engine.get(x, y), "expected ({x},{y}) alive after two steps");
        }
    }

    #[test]
    fn block_still_life_is_unchanged() {
        let mut engine = HashLifeEngine::new();
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            engine.set(x, y, true);
        }
        for _ in 0..10 {
            engine.step_one();
        }
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert!(engine.get(x, y));
        }
        assert_eq!(engine.population(), 4);
    }

    #[test]
    fn clear_resets_generation_and_population() {
        let mut engine = HashLifeEngine::new();
        engine.set(0, 0, true);
        engine.step_one();
        engine.clear();
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.population(), 0);
    }
}
