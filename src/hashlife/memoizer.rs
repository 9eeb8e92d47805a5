//! `QuadMemoizer`: the construction memo, the step memo, and the node
//! arena they both index into.
//!
//! Grounded on cainydev's `HashLifeCache` (construction/step memoization
//! over an `FxHashMap`, canonical empty-node-per-level table, population
//! caching) adapted from an `Arc`-graph onto an arena-index graph per
//! spec.md's "reference-cycle-free ownership" design note.

use rustc_hash::FxHashMap;

use super::quad::{ChildKey, NodeId, QuadNode};
use crate::config;

/// The two canonical level-0 leaves. Always the first two arena slots.
const DEAD_LEAF: NodeId = NodeId::new(0);
const ALIVE_LEAF: NodeId = NodeId::new(1);

pub(crate) struct QuadMemoizer {
    nodes: Vec<QuadNode>,
    construction_memo: FxHashMap<ChildKey, NodeId>,
    step_memo: FxHashMap<(NodeId, u8), NodeId>,
    empty_per_level: Vec<NodeId>,
    eviction_threshold: usize,
}

impl QuadMemoizer {
    pub(crate) fn new() -> Self {
        let nodes = vec![
            QuadNode::Leaf { alive: false },
            QuadNode::Leaf { alive: true },
        ];
        let mut memo = Self {
            nodes,
            construction_memo: FxHashMap::default(),
            step_memo: FxHashMap::default(),
            empty_per_level: vec![DEAD_LEAF],
            eviction_threshold: config::HASHLIFE_MEMO_INITIAL_THRESHOLD,
        };
        debug_assert_eq!(memo.node(DEAD_LEAF).population(), 0);
        debug_assert_eq!(memo.node(ALIVE_LEAF).population(), 1);
        memo
    }

    pub(crate) fn leaf(&self, alive: bool) -> NodeId {
        if alive {
            ALIVE_LEAF
        } else {
            DEAD_LEAF
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &QuadNode {
        &self.nodes[id.index()]
    }

    pub(crate) fn level(&self, id: NodeId) -> u8 {
        self.node(id).level()
    }

    pub(crate) fn population(&self, id: NodeId) -> u64 {
        self.node(id).population()
    }

    pub(crate) fn children(&self, id: NodeId) -> (NodeId, NodeId, NodeId, NodeId) {
        self.node(id).children()
    }

    pub(crate) fn is_empty(&self, id: NodeId) -> bool {
        let level = self.level(id) as usize;
        level < self.empty_per_level.len() && self.empty_per_level[level] == id
    }

    /// The canonical empty quad at `level`, constructing it (and every
    /// level below it) on first request.
    pub(crate) fn empty_node(&mut self, level: u8) -> NodeId {
        while self.empty_per_level.len() <= level as usize {
            let below = *self.empty_per_level.last().unwrap();
            let wider = self.join(below, below, below, below);
            self.empty_per_level.push(wider);
        }
        self.empty_per_level[level as usize]
    }

    /// The memoized canonical constructor: four equal-level children to
    /// their unique parent.
    pub(crate) fn join(&mut self, nw: NodeId, ne: NodeId, sw: NodeId, se: NodeId) -> NodeId {
        let child_level = self.level(nw);
        debug_assert_eq!(child_level, self.level(ne));
        debug_assert_eq!(child_level, self.level(sw));
        debug_assert_eq!(child_level, self.level(se));

        let key = (nw, ne, sw, se);
        if let Some(&id) = self.construction_memo.get(&key) {
            return id;
        }

        let population =
            self.population(nw) + self.population(ne) + self.population(sw) + self.population(se);
        let node = QuadNode::Branch {
            nw,
            ne,
            sw,
            se,
            level: child_level + 1,
            population,
        };
        let id = self.push_node(node);
        self.construction_memo.insert(key, id);
        id
    }

    fn push_node(&mut self, node: QuadNode) -> NodeId {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeId::new(index)
    }

    /// `centered_horizontal(left, right)`: the level-(L-1) quad straddling
    /// the vertical seam between two level-L siblings `left`, `right`.
    pub(crate) fn centered_horizontal(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let (_, l_ne, _, l_se) = self.children(left);
        let (r_nw, _, r_sw, _) = self.children(right);
        self.join(l_ne, r_nw, l_se, r_sw)
    }

    /// `centered_vertical(top, bottom)`: the level-(L-1) quad straddling
    /// the horizontal seam between two level-L siblings `top`, `bottom`.
    pub(crate) fn centered_vertical(&mut self, top: NodeId, bottom: NodeId) -> NodeId {
        let (_, _, t_sw, t_se) = self.children(top);
        let (b_nw, b_ne, _, _) = self.children(bottom);
        self.join(t_sw, t_se, b_nw, b_ne)
    }

    /// The true geometric center of a level-L quad given as its four
    /// level-(L-1) children: a level-(L-1) quad built from each child's
    /// innermost grandchild.
    pub(crate) fn centered_sub(
        &mut self,
        nw: NodeId,
        ne: NodeId,
        sw: NodeId,
        se: NodeId,
    ) -> NodeId {
        let (_, _, _, nw_se) = self.children(nw);
        let (_, _, ne_sw, _) = self.children(ne);
        let (_, sw_ne, _, _) = self.children(sw);
        let (se_nw, _, _, _) = self.children(se);
        self.join(nw_se, ne_sw, sw_ne, se_nw)
    }

    /// `center(q)` for a level-L quad, `L >= 2`.
    pub(crate) fn center(&mut self, id: NodeId) -> NodeId {
        let (nw, ne, sw, se) = self.children(id);
        self.centered_sub(nw, ne, sw, se)
    }

    pub(crate) fn north(&mut self, id: NodeId) -> NodeId {
        let (nw, ne, _, _) = self.children(id);
        self.centered_horizontal(nw, ne)
    }

    pub(crate) fn south(&mut self, id: NodeId) -> NodeId {
        let (_, _, sw, se) = self.children(id);
        self.centered_horizontal(sw, se)
    }

    pub(crate) fn west(&mut self, id: NodeId) -> NodeId {
        let (nw, _, sw, _) = self.children(id);
        self.centered_vertical(nw, sw)
    }

    pub(crate) fn east(&mut self, id: NodeId) -> NodeId {
        let (_, ne, _, se) = self.children(id);
        self.centered_vertical(ne, se)
    }

    /// Extracts the level-2 quad's 16 cells into the `4*y+x` bit layout
    /// shared with QuickLife's table construction.
    fn level2_bits(&self, id: NodeId) -> u16 {
        let (nw, ne, sw, se) = self.children(id);
        let mut bits: u16 = 0;
        let mut set = |child: NodeId, ox: i32, oy: i32| {
            let (cnw, cne, csw, cse) = self.children(child);
            let mut put = |leaf: NodeId, x: i32, y: i32| {
                if let QuadNode::Leaf { alive: true } = self.node(leaf) {
                    bits |= 1 << (4 * (oy + y) + (ox + x));
                }
            };
            put(cnw, 0, 0);
            put(cne, 1, 0);
            put(csw, 0, 1);
            put(cse, 1, 1);
        };
        set(nw, 0, 0);
        set(ne, 2, 0);
        set(sw, 0, 2);
        set(se, 2, 2);
        bits
    }

    /// Builds the level-1 quad (2x2 cells) from a packed `2*y+x` result,
    /// the inverse of the extraction `level2_bits` performs at level 2.
    fn build_level1(&mut self, bits: u8) -> NodeId {
        let nw = self.leaf(bits & 0b0001 != 0);
        let ne = self.leaf(bits & 0b0010 != 0);
        let sw = self.leaf(bits & 0b0100 != 0);
        let se = self.leaf(bits & 0b1000 != 0);
        self.join(nw, ne, sw, se)
    }

    /// `step(q, k)`: advances the center of `q` (level `L`) by `2^k`
    /// generations, returning a level-`(L-1)` result.
    pub(crate) fn step(&mut self, id: NodeId, k: u8) -> NodeId {
        let level = self.level(id);
        debug_assert!(level >= 2, "step requires level >= 2");
        debug_assert!(k <= level - 2, "k exceeds the algorithmic maximum for this level");

        if let Some(&cached) = self.step_memo.get(&(id, k)) {
            return cached;
        }

        let result = if self.is_empty(id) {
            self.empty_node(level - 1)
        } else if level == 2 {
            debug_assert_eq!(k, 0);
            let bits = self.level2_bits(id);
            let center = crate::life_rule::step_center_from_quad2(bits);
            self.build_level1(center)
        } else {
            self.step_general(id, level, k)
        };

        self.step_memo.insert((id, k), result);
        result
    }

    fn step_general(&mut self, id: NodeId, level: u8, k: u8) -> NodeId {
        let (nw, ne, sw, se) = self.children(id);
        let n = self.north(id);
        let e = self.east(id);
        let s = self.south(id);
        let w = self.west(id);
        let c = self.center(id);

        let kp = k.min(level - 3);
        let c00 = self.step(nw, kp);
        let c01 = self.step(n, kp);
        let c02 = self.step(ne, kp);
        let c10 = self.step(w, kp);
        let c11 = self.step(c, kp);
        let c12 = self.step(e, kp);
        let c20 = self.step(sw, kp);
        let c21 = self.step(s, kp);
        let c22 = self.step(se, kp);

        let block_nw = self.join(c00, c01, c10, c11);
        let block_ne = self.join(c01, c02, c11, c12);
        let block_sw = self.join(c10, c11, c20, c21);
        let block_se = self.join(c11, c12, c21, c22);

        let (r_nw, r_ne, r_sw, r_se) = if k == level - 2 {
            // Maximal speed for this level: both recursive depths are the
            // child level's own maximum, doubling the advance exactly.
            let depth = level - 3;
            (
                self.step(block_nw, depth),
                self.step(block_ne, depth),
                self.step(block_sw, depth),
                self.step(block_se, depth),
            )
        } else {
            // Sub-maximal speed: the first pass already advanced the full
            // requested k generations, so the second pass is pure
            // re-centering, not a further time step.
            (
                self.center(block_nw),
                self.center(block_ne),
                self.center(block_sw),
                self.center(block_se),
            )
        };

        self.join(r_nw, r_ne, r_sw, r_se)
    }

    /// Whether the combined memo size has crossed the eviction threshold.
    /// Callers must only act on this between recursive `join`/`step`
    /// calls, never from inside one — see `evict_keeping_root`.
    pub(crate) fn needs_eviction(&self) -> bool {
        self.construction_memo.len() + self.step_memo.len() > self.eviction_threshold
    }

    /// Bulk clear-and-regrow that relocates a live root across the reset.
    ///
    /// `join`/`step` no longer evict themselves: every in-flight `NodeId`
    /// local to `step_general`'s recursion is a raw index into `self.nodes`,
    /// so clearing that arena mid-recursion would leave those locals (and
    /// the engine's own `root`) dangling or silently pointing at an
    /// unrelated node. Eviction is instead only ever triggered by the
    /// engine between top-level calls, passing in the one `NodeId` still
    /// live at that point; this walks and copies everything reachable from
    /// it into the fresh arena (re-running it through `join`, so the
    /// result stays canonical and dedupes with the rebuilt empty-per-level
    /// chain), then clears both memos and doubles the threshold.
    pub(crate) fn evict_keeping_root(&mut self, root: NodeId) -> NodeId {
        let old_nodes = std::mem::take(&mut self.nodes);
        let max_level = self.empty_per_level.len().saturating_sub(1) as u8;

        self.nodes = vec![
            QuadNode::Leaf { alive: false },
            QuadNode::Leaf { alive: true },
        ];
        self.construction_memo.clear();
        self.step_memo.clear();
        self.empty_per_level.clear();
        self.empty_per_level.push(DEAD_LEAF);
        for level in 1..=max_level {
            self.empty_node(level);
        }

        let mut remap: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        remap.insert(DEAD_LEAF, DEAD_LEAF);
        remap.insert(ALIVE_LEAF, ALIVE_LEAF);
        let new_root = self.copy_reachable(&old_nodes, root, &mut remap);

        let post_clear_size = self.nodes.len() + self.construction_memo.len();
        self.eviction_threshold = self.eviction_threshold.max(post_clear_size * 2);
        new_root
    }

    /// Copies `id` (from `old_nodes`, the arena being discarded) into the
    /// current arena, recursing into children first so every copy goes
    /// through the memoized `join` and lands on the canonical node.
    fn copy_reachable(
        &mut self,
        old_nodes: &[QuadNode],
        id: NodeId,
        remap: &mut FxHashMap<NodeId, NodeId>,
    ) -> NodeId {
        if let Some(&new_id) = remap.get(&id) {
            return new_id;
        }
        let new_id = match old_nodes[id.index()] {
            QuadNode::Leaf { alive } => self.leaf(alive),
            QuadNode::Branch { nw, ne, sw, se, .. } => {
                let new_nw = self.copy_reachable(old_nodes, nw, remap);
                let new_ne = self.copy_reachable(old_nodes, ne, remap);
                let new_sw = self.copy_reachable(old_nodes, sw, remap);
                let new_se = self.copy_reachable(old_nodes, se, remap);
                self.join(new_nw, new_ne, new_sw, new_se)
            }
        };
        remap.insert(id, new_id);
        new_id
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn memo_entry_count(&self) -> usize {
        self.construction_memo.len() + self.step_memo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalization_is_identity_stable() {
        let mut memo = QuadMemoizer::new();
        let a = memo.join(ALIVE_LEAF, DEAD_LEAF, DEAD_LEAF, DEAD_LEAF);
        let b = memo.join(ALIVE_LEAF, DEAD_LEAF, DEAD_LEAF, DEAD_LEAF);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_children_give_distinct_parents() {
        let mut memo = QuadMemoizer::new();
        let a = memo.join(ALIVE_LEAF, DEAD_LEAF, DEAD_LEAF, DEAD_LEAF);
        let b = memo.join(DEAD_LEAF, ALIVE_LEAF, DEAD_LEAF, DEAD_LEAF);
        assert_ne!(a, b);
    }

    #[test]
    fn empty_quad_is_canonical_per_level() {
        let mut memo = QuadMemoizer::new();
        let e2 = memo.empty_node(2);
        let manual = memo.join(DEAD_LEAF, DEAD_LEAF, DEAD_LEAF, DEAD_LEAF);
        let manual = memo.join(manual, manual, manual, manual);
        assert_eq!(e2, manual);
    }

    #[test]
    fn step_on_empty_quad_stays_empty() {
        let mut memo = QuadMemoizer::new();
        let e3 = memo.empty_node(3);
        let stepped = memo.step(e3, 0);
        assert_eq!(stepped, memo.empty_node(2));
    }

    #[test]
    fn still_life_block_is_unchanged_after_one_generation() {
        let mut memo = QuadMemoizer::new();
        // level-2 quad: a 2x2 live block centered in an otherwise dead 4x4.
        let nw = memo.join(DEAD_LEAF, DEAD_LEAF, DEAD_LEAF, ALIVE_LEAF);
        let ne = memo.join(DEAD_LEAF, DEAD_LEAF, ALIVE_LEAF, DEAD_LEAF);
        let sw = memo.join(DEAD_LEAF, ALIVE_LEAF, DEAD_LEAF, DEAD_LEAF);
        let se = memo.join(ALIVE_LEAF, DEAD_LEAF, DEAD_LEAF, DEAD_LEAF);
        let q = memo.join(nw, ne, sw, se);
        let stepped = memo.step(q, 0);
        assert_eq!(memo.population(stepped), 4);
    }

    #[test]
    fn eviction_preserves_empty_chain_and_raises_threshold() {
        let mut memo = QuadMemoizer::new();
        let root = memo.empty_node(5);
        let threshold_before = memo.eviction_threshold;
        let new_root = memo.evict_keeping_root(root);
        assert!(memo.eviction_threshold >= threshold_before);
        assert_eq!(memo.empty_per_level.len(), 6);
        assert_eq!(new_root, memo.empty_node(5));
    }

    #[test]
    fn eviction_relocates_a_live_non_empty_root() {
        let mut memo = QuadMemoizer::new();
        let nw = memo.join(ALIVE_LEAF, DEAD_LEAF, DEAD_LEAF, DEAD_LEAF);
        let ne = memo.join(DEAD_LEAF, ALIVE_LEAF, DEAD_LEAF, DEAD_LEAF);
        let sw = memo.join(DEAD_LEAF, DEAD_LEAF, ALIVE_LEAF, DEAD_LEAF);
        let se = memo.join(DEAD_LEAF, DEAD_LEAF, DEAD_LEAF, ALIVE_LEAF);
        let root = memo.join(nw, ne, sw, se);
        let population_before = memo.population(root);

        let new_root = memo.evict_keeping_root(root);

        assert_eq!(memo.population(new_root), population_before);
        // The relocated root is still canonical: joining the same four
        // (newly relocated) children again yields the same id.
        let (new_nw, new_ne, new_sw, new_se) = memo.children(new_root);
        assert_eq!(memo.join(new_nw, new_ne, new_sw, new_se), new_root);
    }
}
