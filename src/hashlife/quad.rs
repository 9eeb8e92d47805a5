//! `CanonicalQuad`: the immutable, hash-consed quadtree node.
//!
//! Nodes live in one arena (`Vec<QuadNode>`) owned by the `QuadMemoizer`;
//! every reference between nodes is a `NodeId`, an index into that arena,
//! never a raw pointer or `Rc`. Bulk eviction is therefore `Vec::clear`
//! rather than a cycle-breaking graph walk.

/// Index into the memoizer's node arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Quadtree level. Level 0 is a single cell; level `L` covers a
/// `2^L x 2^L` square.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Level(pub u8);

/// The canonical node shape: either a single cell (level 0) or four
/// equal-level children (level `L >= 1`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum QuadNode {
    Leaf {
        alive: bool,
    },
    Branch {
        nw: NodeId,
        ne: NodeId,
        sw: NodeId,
        se: NodeId,
        level: u8,
        /// Cached live-cell count, so `report()` and population-based
        /// emptiness checks don't require a full `draw` pass.
        population: u64,
    },
}

impl QuadNode {
    pub(crate) fn level(&self) -> u8 {
        match *self {
            QuadNode::Leaf { .. } => 0,
            QuadNode::Branch { level, .. } => level,
        }
    }

    pub(crate) fn population(&self) -> u64 {
        match *self {
            QuadNode::Leaf { alive } => alive as u64,
            QuadNode::Branch { population, .. } => population,
        }
    }

    pub(crate) fn children(&self) -> (NodeId, NodeId, NodeId, NodeId) {
        match *self {
            QuadNode::Branch { nw, ne, sw, se, .. } => (nw, ne, sw, se),
            QuadNode::Leaf { .. } => panic!("leaf has no children"),
        }
    }
}

/// The construction memo is keyed on the four children's identities, not
/// on any structural hash of their contents — identity hashing is what
/// makes canonicalization correct and cheap.
pub(crate) type ChildKey = (NodeId, NodeId, NodeId, NodeId);
