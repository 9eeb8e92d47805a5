//! `SparseBlockGrid`: the hash map of `Quad4Block`s plus the three
//! intrusive Active/Stable/Dead lists and the phase-advance driver.
//!
//! Grounded on spec.md §9's "QuickLife block links form cycles" design
//! note: blocks live in one arena (`Vec<Quad4Block>`) owned by the grid,
//! and every link — neighbour or list — is a `BlockId` index into that
//! arena rather than a pointer or `Rc`, the same discipline
//! `QuadMemoizer` applies to HashLife's quadtree.

use rustc_hash::FxHashMap;

use super::bits::Quad3;
use super::block::{BlockId, Direction, Membership, Quad4Block, DIRECTIONS};
use super::mask::{ActivityMask, Quadrant, Region, RegionState};
use super::tables::StepTable;
use crate::config;
use crate::stats::Stats;

const QUADRANTS: [Quadrant; 4] = [Quadrant::Nw, Quadrant::Ne, Quadrant::Sw, Quadrant::Se];

/// Which external neighbours feed a quadrant's margin for a given step
/// direction — derived once from the phase-offset discipline in spec.md
/// §4.2: even→odd only ever needs south/east/southeast data, odd→even
/// only ever needs north/west/northwest.
fn margin_directions(quadrant: Quadrant, to_odd: bool) -> &'static [Direction] {
    use Direction::*;
    match (quadrant, to_odd) {
        (Quadrant::Nw, true) => &[],
        (Quadrant::Ne, true) => &[East],
        (Quadrant::Sw, true) => &[South],
        (Quadrant::Se, true) => &[East, South, Southeast],
        (Quadrant::Se, false) => &[],
        (Quadrant::Sw, false) => &[West],
        (Quadrant::Ne, false) => &[North],
        (Quadrant::Nw, false) => &[North, West, Northwest],
    }
}

pub(crate) struct SparseBlockGrid {
    blocks: Vec<Quad4Block>,
    coords: Vec<(i16, i16)>,
    free: Vec<BlockId>,
    index: FxHashMap<(i16, i16), BlockId>,
    active_head: Option<BlockId>,
    stable_head: Option<BlockId>,
    dead_head: Option<BlockId>,
    /// True once the generation counter is odd: the odd buffers hold the
    /// live state, shifted (+1, -1) cells from the even layout.
    phase_odd: bool,
    generation: u64,
    last_reclaim: u64,
    dead_count: usize,
}

impl SparseBlockGrid {
    pub(crate) fn new() -> Self {
        Self {
            blocks: Vec::new(),
            coords: Vec::new(),
            free: Vec::new(),
            index: FxHashMap::default(),
            active_head: None,
            stable_head: None,
            dead_head: None,
            phase_odd: false,
            generation: 0,
            last_reclaim: 0,
            dead_count: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn phase_odd(&self) -> bool {
        self.phase_odd
    }

    fn head(&self, m: Membership) -> Option<BlockId> {
        match m {
            Membership::Active => self.active_head,
            Membership::Stable => self.stable_head,
            Membership::Dead => self.dead_head,
        }
    }

    fn set_head(&mut self, m: Membership, id: Option<BlockId>) {
        match m {
            Membership::Active => self.active_head = id,
            Membership::Stable => self.stable_head = id,
            Membership::Dead => self.dead_head = id,
        }
    }

    fn list_push_front(&mut self, m: Membership, id: BlockId) {
        let old_head = self.head(m);
        self.blocks[id.index()].list_prev = None;
        self.blocks[id.index()].list_next = old_head;
        if let Some(h) = old_head {
            self.blocks[h.index()].list_prev = Some(id);
        }
        self.set_head(m, Some(id));
        self.blocks[id.index()].membership = m;
        if m == Membership::Dead {
            self.dead_count += 1;
        }
    }

    fn list_remove(&mut self, id: BlockId) {
        let (prev, next, m) = {
            let b = &self.blocks[id.index()];
            (b.list_prev, b.list_next, b.membership)
        };
        match prev {
            Some(p) => self.blocks[p.index()].list_next = next,
            None => self.set_head(m, next),
        }
        if let Some(n) = next {
            self.blocks[n.index()].list_prev = prev;
        }
        if m == Membership::Dead {
            self.dead_count -= 1;
        }
    }

    fn move_to(&mut self, id: BlockId, m: Membership) {
        if self.blocks[id.index()].membership == m {
            return;
        }
        self.list_remove(id);
        self.list_push_front(m, id);
    }

    fn clip_block_coord(v: i64) -> i16 {
        v.clamp(config::BLOCK_COORD_MIN as i64, config::BLOCK_COORD_MAX as i64) as i16
    }

    /// Splits a global (possibly phase-shifted) cell coordinate into a
    /// block coordinate and a local `0..16` offset.
    fn locate(x: i64, y: i64) -> ((i16, i16), (u8, u8)) {
        let bx = x.div_euclid(16);
        let by = y.div_euclid(16);
        let lx = x.rem_euclid(16) as u8;
        let ly = y.rem_euclid(16) as u8;
        (
            (Self::clip_block_coord(bx), Self::clip_block_coord(by)),
            (lx, ly),
        )
    }

    fn block_id_at(&self, coord: (i16, i16)) -> Option<BlockId> {
        self.index.get(&coord).copied()
    }

    /// Finds or allocates the block at `coord`, wiring neighbour pointers
    /// to any blocks already present at the eight surrounding coordinates.
    fn ensure_block(&mut self, coord: (i16, i16)) -> BlockId {
        if let Some(id) = self.block_id_at(coord) {
            return id;
        }
        let id = match self.free.pop() {
            Some(id) => {
                self.blocks[id.index()] = Quad4Block::new_dead();
                self.coords[id.index()] = coord;
                id
            }
            None => {
                let id = BlockId::new(self.blocks.len() as u32);
                self.blocks.push(Quad4Block::new_dead());
                self.coords.push(coord);
                id
            }
        };
        self.index.insert(coord, id);
        for &dir in DIRECTIONS.iter() {
            let (dx, dy) = dir.offset();
            let neighbor_coord = (coord.0 + dx as i16, coord.1 + dy as i16);
            if let Some(nid) = self.block_id_at(neighbor_coord) {
                self.blocks[id.index()].set_neighbor(dir, Some(nid));
                self.blocks[nid.index()].set_neighbor(dir.opposite(), Some(id));
            }
        }
        self.list_push_front(Membership::Active, id);
        id
    }

    fn activate(&mut self, id: BlockId) {
        self.move_to(id, Membership::Active);
    }

    // ── external cell access ────────────────────────────────────────────

    pub(crate) fn get(&self, x: i64, y: i64) -> bool {
        let (gx, gy) = if self.phase_odd { (x - 1, y + 1) } else { (x, y) };
        let (coord, (lx, ly)) = Self::locate(gx, gy);
        match self.block_id_at(coord) {
            Some(id) => self.blocks[id.index()].get_cell(self.phase_odd, lx, ly),
            None => false,
        }
    }

    pub(crate) fn set(&mut self, x: i64, y: i64, alive: bool) {
        let (gx, gy) = if self.phase_odd { (x + 1, y - 1) } else { (x, y) };
        let (coord, (lx, ly)) = Self::locate(gx, gy);
        let id = self.ensure_block(coord);
        self.blocks[id.index()].set_cell(self.phase_odd, lx, ly, alive);
        self.blocks[id.index()].stay_active_next_step = true;
        self.activate(id);
        // A write on the block's outer ring can change what a neighbour
        // reads as its margin next step; wake every existing neighbour.
        for &dir in DIRECTIONS.iter() {
            if let Some(nid) = self.blocks[id.index()].neighbor(dir) {
                self.activate(nid);
            }
        }
    }

    pub(crate) fn draw(&self, x_min: i64, y_min: i64, x_max: i64, y_max: i64, callback: &mut dyn FnMut(i64, i64)) {
        let shift = if self.phase_odd { (1i64, -1i64) } else { (0, 0) };
        for (&coord, &id) in self.index.iter() {
            let block = &self.blocks[id.index()];
            if block.membership == Membership::Dead {
                continue;
            }
            let base_x = coord.0 as i64 * 16;
            let base_y = coord.1 as i64 * 16;
            if base_x + 16 <= x_min || base_x >= x_max || base_y + 16 <= y_min || base_y >= y_max {
                continue;
            }
            for ly in 0u8..16 {
                for lx in 0u8..16 {
                    if !block.get_cell(self.phase_odd, lx, ly) {
                        continue;
                    }
                    let gx = base_x + lx as i64 - shift.0;
                    let gy = base_y + ly as i64 - shift.1;
                    if gx >= x_min && gx < x_max && gy >= y_min && gy < y_max {
                        callback(gx, gy);
                    }
                }
            }
        }
    }

    pub(crate) fn population(&self) -> u64 {
        let mut total = 0u64;
        for (&_coord, &id) in self.index.iter() {
            let block = &self.blocks[id.index()];
            if block.membership == Membership::Dead {
                continue;
            }
            let quads = if self.phase_odd { &block.odd } else { &block.even };
            for q in quads {
                total += (q.nw.0.count_ones()
                    + q.ne.0.count_ones()
                    + q.sw.0.count_ones()
                    + q.se.0.count_ones()) as u64;
            }
        }
        total
    }

    pub(crate) fn active_count(&self) -> usize {
        self.count_list(self.active_head)
    }

    pub(crate) fn stable_count(&self) -> usize {
        self.count_list(self.stable_head)
    }

    pub(crate) fn dead_count(&self) -> usize {
        self.dead_count
    }

    fn count_list(&self, mut head: Option<BlockId>) -> usize {
        let mut n = 0;
        while let Some(id) = head {
            n += 1;
            head = self.blocks[id.index()].list_next;
        }
        n
    }

    // ── stepping ─────────────────────────────────────────────────────────

    /// Reads one cell from the *source* phase, resolving margin reads
    /// (`lx`/`ly` outside `0..16`) through the block's stored neighbours.
    /// The phase shift applied in `step_quadrant` pushes the SE quadrant's
    /// lookup window up to two cells past the block edge, so `lx`/`ly`
    /// range over `-2..=17`, not just a one-cell margin; `rem_euclid(16)`
    /// below resolves any of those back onto the single stored neighbour
    /// in that direction.
    fn read_margin(&self, id: BlockId, src_odd: bool, lx: i32, ly: i32) -> bool {
        let (dx, dy): (i32, i32) = (
            if lx < 0 { -1 } else if lx >= 16 { 1 } else { 0 },
            if ly < 0 { -1 } else if ly >= 16 { 1 } else { 0 },
        );
        if dx == 0 && dy == 0 {
            return self.blocks[id.index()].get_cell(src_odd, lx as u8, ly as u8);
        }
        let dir = direction_for_offset(dx, dy);
        let Some(nid) = self.blocks[id.index()].neighbor(dir) else {
            return false;
        };
        let nlx = lx.rem_euclid(16) as u8;
        let nly = ly.rem_euclid(16) as u8;
        self.blocks[nid.index()].get_cell(src_odd, nlx, nly)
    }

    /// Computes the new 8x8 `Quad3` for one quadrant from the 10x10
    /// neighbourhood around it, using the precomputed table for every
    /// 2x2 output tile (spec.md §4.2 "Inner step").
    fn step_quadrant(
        &self,
        id: BlockId,
        quadrant: Quadrant,
        src_odd: bool,
    ) -> Quad3 {
        let table = StepTable::get();
        let (qx, qy) = quadrant_origin(quadrant);
        // The source read is offset from the destination tile by the
        // phase-offset vector spec.md §3 assigns the odd buffer: reading
        // forward (even source) looks (+1,-1) ahead, reading backward
        // (odd source) looks (-1,+1) ahead. This is what lets a step only
        // ever need 3 of the 8 neighbour directions (margin_directions)
        // instead of all 8.
        let (shift_x, shift_y): (i32, i32) = if src_odd { (-1, 1) } else { (1, -1) };
        let mut out = Quad3::DEAD;
        for ty in 0..4i32 {
            for tx in 0..4i32 {
                let tile_x = qx + tx * 2;
                let tile_y = qy + ty * 2;
                let window_x = tile_x - 1 + shift_x;
                let window_y = tile_y - 1 + shift_y;
                let mut key: u16 = 0;
                for dy in 0..4i32 {
                    for dx in 0..4i32 {
                        if self.read_margin(id, src_odd, window_x + dx, window_y + dy) {
                            key |= 1 << (4 * dy + dx);
                        }
                    }
                }
                // The window is already shifted and aligned so its own
                // centre 2x2 is exactly the tile we want: no mirror/flip
                // reorientation needed.
                let bits = table.lookup(super::bits::Quad2(key));
                for dy in 0..2u8 {
                    for dx in 0..2u8 {
                        if bits & (1 << (2 * dy + dx)) != 0 {
                            out.set((tx * 2) as u8 + dx, (ty * 2) as u8 + dy, true);
                        }
                    }
                }
            }
        }
        out
    }

    fn quadrant_needs_step(&self, id: BlockId, quadrant: Quadrant, src_mask: ActivityMask, to_odd: bool) -> bool {
        if src_mask.get(quadrant, Region::Whole) == RegionState::Active {
            return true;
        }
        for &dir in margin_directions(quadrant, to_odd) {
            if let Some(nid) = self.blocks[id.index()].neighbor(dir) {
                let nmask = if to_odd {
                    self.blocks[nid.index()].even_mask
                } else {
                    self.blocks[nid.index()].odd_mask
                };
                if nmask.has_any_active() {
                    return true;
                }
            }
        }
        false
    }

    /// Advances every Active block by one generation, flipping the
    /// even/odd phase, then performs list transitions and (periodically)
    /// Dead-list reclamation.
    pub(crate) fn step_one(&mut self) {
        let to_odd = !self.phase_odd;
        let active: Vec<BlockId> = {
            let mut ids = Vec::new();
            let mut cur = self.active_head;
            while let Some(id) = cur {
                ids.push(id);
                cur = self.blocks[id.index()].list_next;
            }
            ids
        };

        let mut newly_active = Vec::new();
        for &id in &active {
            let src_mask = if to_odd { self.blocks[id.index()].even_mask } else { self.blocks[id.index()].odd_mask };
            let mut dest_mask = ActivityMask::default();
            for quadrant in QUADRANTS {
                let old_dest = self.blocks[id.index()].quad(to_odd, quadrant);
                if self.quadrant_needs_step(id, quadrant, src_mask, to_odd) {
                    let new_quad = self.step_quadrant(id, quadrant, !to_odd);
                    let state = if new_quad == old_dest {
                        if new_quad.is_all_dead() {
                            RegionState::Dead
                        } else {
                            RegionState::Stable
                        }
                    } else {
                        RegionState::Active
                    };
                    self.blocks[id.index()].set_quad(to_odd, quadrant, new_quad);
                    for region in [Region::Whole, Region::VerticalEdge, Region::HorizontalEdge, Region::Corner] {
                        dest_mask.set(quadrant, region, state);
                    }
                    if state == RegionState::Active {
                        for &dir in margin_directions(quadrant, to_odd) {
                            let nid = match self.blocks[id.index()].neighbor(dir) {
                                Some(nid) => nid,
                                None => {
                                    // §4.2 "List transitions": an active edge/corner
                                    // borders a non-Active neighbour, "allocating it
                                    // if absent" — a fresh all-dead block, wired to
                                    // whatever neighbours already exist at its
                                    // coordinates. `ensure_block` already pushes it
                                    // onto the Active list.
                                    let (dx, dy) = dir.offset();
                                    let coord = self.coords[id.index()];
                                    let neighbor_coord = (coord.0 + dx as i16, coord.1 + dy as i16);
                                    self.ensure_block(neighbor_coord)
                                }
                            };
                            if self.blocks[nid.index()].membership != Membership::Active {
                                newly_active.push(nid);
                            }
                        }
                    }
                } else if src_mask.get(quadrant, Region::Whole) == RegionState::Dead {
                    // No live source cells and no active neighbour feed: the
                    // destination must be empty too, regardless of what the
                    // destination phase's own mask previously held (which,
                    // for a phase never yet computed, is just its ALL_ACTIVE
                    // construction-time bootstrap and not yet trustworthy).
                    for region in [Region::Whole, Region::VerticalEdge, Region::HorizontalEdge, Region::Corner] {
                        dest_mask.set(quadrant, region, RegionState::Dead);
                    }
                } else {
                    // Source is Stable: it has already undergone at least
                    // two matching real computations, which means this
                    // destination phase has too (phases alternate turn by
                    // turn), so its own prior verdict is trustworthy.
                    let prior = if to_odd { self.blocks[id.index()].odd_mask } else { self.blocks[id.index()].even_mask };
                    for region in [Region::Whole, Region::VerticalEdge, Region::HorizontalEdge, Region::Corner] {
                        dest_mask.set(quadrant, region, prior.get(quadrant, region));
                    }
                }
            }
            if to_odd {
                self.blocks[id.index()].odd_mask = dest_mask;
            } else {
                self.blocks[id.index()].even_mask = dest_mask;
            }
        }

        for id in newly_active {
            self.activate(id);
        }

        for &id in &active {
            let stay = self.blocks[id.index()].stay_active_next_step;
            self.blocks[id.index()].stay_active_next_step = false;
            let dest_mask = if to_odd { self.blocks[id.index()].odd_mask } else { self.blocks[id.index()].even_mask };
            if stay {
                continue;
            }
            if dest_mask.has_any_active() {
                continue;
            }
            let other_mask = if to_odd { self.blocks[id.index()].even_mask } else { self.blocks[id.index()].odd_mask };
            if dest_mask.is_all_dead() && other_mask.is_all_dead() {
                self.move_to(id, Membership::Dead);
            } else {
                self.move_to(id, Membership::Stable);
            }
        }

        self.phase_odd = to_odd;
        self.generation += 1;

        if self.generation - self.last_reclaim >= config::QUICKLIFE_RECLAIM_INTERVAL_GENERATIONS as u64
            || self.dead_count > config::QUICKLIFE_DEAD_LIST_RECLAIM_FLOOR
        {
            self.reclaim_dead();
        }
    }

    /// Walks the Dead list, removing every entry from the sparse map and
    /// unlinking it from its neighbours, per spec.md §4.2 "Dead
    /// reclamation". Returns the number of blocks reclaimed.
    pub(crate) fn reclaim_dead(&mut self) -> usize {
        self.last_reclaim = self.generation;
        let mut reclaimed = 0;
        let mut cur = self.dead_head;
        while let Some(id) = cur {
            let next = self.blocks[id.index()].list_next;
            for &dir in DIRECTIONS.iter() {
                if let Some(nid) = self.blocks[id.index()].neighbor(dir) {
                    self.blocks[nid.index()].set_neighbor(dir.opposite(), None);
                }
            }
            let coord = self.coords[id.index()];
            self.index.remove(&coord);
            self.list_remove(id);
            self.free.push(id);
            reclaimed += 1;
            cur = next;
        }
        reclaimed
    }

    pub(crate) fn stats(&self, generation: u128) -> Stats {
        Stats {
            variant: "QuickLife",
            generation,
            population: self.population(),
            level: None,
            node_count: None,
            memo_entry_count: None,
            active_blocks: Some(self.active_count()),
            stable_blocks: Some(self.stable_count()),
            dead_blocks: Some(self.dead_count()),
        }
    }
}

fn quadrant_origin(quadrant: Quadrant) -> (i32, i32) {
    match quadrant {
        Quadrant::Nw => (0, 8),
        Quadrant::Ne => (8, 8),
        Quadrant::Sw => (0, 0),
        Quadrant::Se => (8, 0),
    }
}

fn direction_for_offset(dx: i32, dy: i32) -> Direction {
    match (dx, dy) {
        (0, 1) => Direction::North,
        (0, -1) => Direction::South,
        (1, 0) => Direction::East,
        (-1, 0) => Direction::West,
        (-1, 1) => Direction::Northwest,
        (1, -1) => Direction::Southeast,
        _ => unreachable!("margin offsets are always a single cardinal/ordinal step"),
    }
}
