//! `Quad4Block`: one 16x16 double-buffered tile of the sparse grid.

use super::bits::Quad3;
use super::mask::{ActivityMask, Quadrant};

/// Index into the grid's block arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct BlockId(u32);

impl BlockId {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which of the three driver lists a block currently belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Membership {
    Active,
    Stable,
    Dead,
}

/// The six stored neighbour directions. NE and SW are reachable via
/// neighbours' neighbours and are not stored directly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    South,
    East,
    West,
    Northwest,
    Southeast,
}

pub(crate) const DIRECTIONS: [Direction; 6] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
    Direction::Northwest,
    Direction::Southeast,
];

impl Direction {
    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Northwest => Direction::Southeast,
            Direction::Southeast => Direction::Northwest,
        }
    }

    pub(crate) fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Northwest => (-1, 1),
            Direction::Southeast => (1, -1),
        }
    }
}

pub(crate) struct Quad4Block {
    pub even: [Quad3; 4],
    pub odd: [Quad3; 4],
    pub even_mask: ActivityMask,
    pub odd_mask: ActivityMask,
    pub stay_active_next_step: bool,
    pub membership: Membership,
    pub neighbors: [Option<BlockId>; 6],
    pub list_prev: Option<BlockId>,
    pub list_next: Option<BlockId>,
}

impl Quad4Block {
    pub fn new_dead() -> Self {
        Self {
            even: [Quad3::DEAD; 4],
            odd: [Quad3::DEAD; 4],
            even_mask: ActivityMask::ALL_ACTIVE,
            odd_mask: ActivityMask::ALL_ACTIVE,
            stay_active_next_step: false,
            membership: Membership::Active,
            neighbors: [None; 6],
            list_prev: None,
            list_next: None,
        }
    }

    pub fn neighbor(&self, direction: Direction) -> Option<BlockId> {
        self.neighbors[direction as usize]
    }

    pub fn set_neighbor(&mut self, direction: Direction, id: Option<BlockId>) {
        self.neighbors[direction as usize] = id;
    }

    pub fn quad(&self, phase_odd: bool, quadrant: Quadrant) -> Quad3 {
        let set = if phase_odd { &self.odd } else { &self.even };
        set[quadrant as usize]
    }

    pub fn set_quad(&mut self, phase_odd: bool, quadrant: Quadrant, value: Quad3) {
        let set = if phase_odd { &mut self.odd } else { &mut self.even };
        set[quadrant as usize] = value;
    }

    pub fn mask(&self, phase_odd: bool) -> ActivityMask {
        if phase_odd {
            self.odd_mask
        } else {
            self.even_mask
        }
    }

    pub fn mask_mut(&mut self, phase_odd: bool) -> &mut ActivityMask {
        if phase_odd {
            &mut self.odd_mask
        } else {
            &mut self.even_mask
        }
    }

    pub fn is_all_dead(&self) -> bool {
        self.even.iter().all(|q| q.is_all_dead()) && self.odd.iter().all(|q| q.is_all_dead())
    }

    pub fn get_cell(&self, phase_odd: bool, x: u8, y: u8) -> bool {
        debug_assert!(x < 16 && y < 16);
        // Block-local y increases north, matching the public coordinate
        // convention (spec.md §9 Open Questions: increasing Y is north).
        let quadrant = match (x < 8, y >= 8) {
            (true, true) => Quadrant::Nw,
            (false, true) => Quadrant::Ne,
            (true, false) => Quadrant::Sw,
            (false, false) => Quadrant::Se,
        };
        let (lx, ly) = (x % 8, y % 8);
        self.quad(phase_odd, quadrant).get(lx, ly)
    }

    pub fn set_cell(&mut self, phase_odd: bool, x: u8, y: u8, alive: bool) {
        debug_assert!(x < 16 && y < 16);
        let quadrant = match (x < 8, y >= 8) {
            (true, true) => Quadrant::Nw,
            (false, true) => Quadrant::Ne,
            (true, false) => Quadrant::Sw,
            (false, false) => Quadrant::Se,
        };
        let (lx, ly) = (x % 8, y % 8);
        let set = if phase_odd { &mut self.odd } else { &mut self.even };
        set[quadrant as usize].set(lx, ly, alive);
    }
}
