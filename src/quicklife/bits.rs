//! `Quad2`/`Quad3`: QuickLife's bit-packed leaf rectangles.
//!
//! A `Quad2` is a 4x4 grid packed into 16 bits (`bit(x,y) = 4*y + x`).
//! A `Quad3` is an 8x8 grid, four `Quad2`s arranged NW/NE/SW/SE. Both
//! are plain `Copy` values — no allocation, no shared ownership — the
//! same texture as the teacher's `TableType`/`LimitedOutputDirective`
//! bit-packed enums.

/// A 4x4 bit rectangle, `bit(x,y) = 4*y + x`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub(crate) struct Quad2(pub u16);

impl Quad2 {
    pub const DEAD: Quad2 = Quad2(0);

    #[inline]
    pub fn get(self, x: u8, y: u8) -> bool {
        debug_assert!(x < 4 && y < 4);
        (self.0 >> (4 * y + x)) & 1 != 0
    }

    #[inline]
    pub fn set(self, x: u8, y: u8, alive: bool) -> Self {
        debug_assert!(x < 4 && y < 4);
        let bit = 1u16 << (4 * y + x);
        if alive {
            Quad2(self.0 | bit)
        } else {
            Quad2(self.0 & !bit)
        }
    }

    pub fn is_all_dead(self) -> bool {
        self.0 == 0
    }

    /// Horizontal-middle mirror: swap the two east columns with the two
    /// west columns (reflect left-right).
    pub fn mirror(self) -> Self {
        let mut out = 0u16;
        for y in 0..4u8 {
            for x in 0..4u8 {
                if self.get(x, y) {
                    out |= 1 << (4 * y + (3 - x));
                }
            }
        }
        Quad2(out)
    }

    /// Vertical-middle flip: swap the two south rows with the two north
    /// rows (reflect top-bottom).
    pub fn flip(self) -> Self {
        let mut out = 0u16;
        for y in 0..4u8 {
            for x in 0..4u8 {
                if self.get(x, y) {
                    out |= 1 << (4 * (3 - y) + x);
                }
            }
        }
        Quad2(out)
    }

    /// Builds the 4x4 quad straddling the seam between two horizontally
    /// adjacent quads: the east two columns of `left` become the west
    /// half, the west two columns of `right` become the east half.
    pub fn seam_horizontal(left: Quad2, right: Quad2) -> Self {
        let mut out = 0u16;
        for y in 0..4u8 {
            for x in 0..2u8 {
                if left.get(x + 2, y) {
                    out |= 1 << (4 * y + x);
                }
                if right.get(x, y) {
                    out |= 1 << (4 * y + (x + 2));
                }
            }
        }
        Quad2(out)
    }

    /// Builds the 4x4 quad straddling the seam between two vertically
    /// adjacent quads (`top` lies north of `bottom`, y increases north):
    /// `top`'s south two rows become the output's north half, `bottom`'s
    /// north two rows become the output's south half.
    pub fn seam_vertical(top: Quad2, bottom: Quad2) -> Self {
        let mut out = 0u16;
        for y in 0..2u8 {
            for x in 0..4u8 {
                if top.get(x, y) {
                    out |= 1 << (4 * (y + 2) + x);
                }
                if bottom.get(x, y + 2) {
                    out |= 1 << (4 * y + x);
                }
            }
        }
        Quad2(out)
    }
}

/// An 8x8 grid as four `Quad2`s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub(crate) struct Quad3 {
    pub nw: Quad2,
    pub ne: Quad2,
    pub sw: Quad2,
    pub se: Quad2,
}

impl Quad3 {
    pub const DEAD: Quad3 = Quad3 {
        nw: Quad2::DEAD,
        ne: Quad2::DEAD,
        sw: Quad2::DEAD,
        se: Quad2::DEAD,
    };

    // y increases north, matching the public coordinate convention and
    // `Quad4Block`'s quadrant split (spec.md §9: increasing Y is north).
    #[inline]
    pub fn get(self, x: u8, y: u8) -> bool {
        debug_assert!(x < 8 && y < 8);
        match (x < 4, y >= 4) {
            (true, true) => self.nw.get(x, y - 4),
            (false, true) => self.ne.get(x - 4, y - 4),
            (true, false) => self.sw.get(x, y),
            (false, false) => self.se.get(x - 4, y),
        }
    }

    #[inline]
    pub fn set(&mut self, x: u8, y: u8, alive: bool) {
        debug_assert!(x < 8 && y < 8);
        match (x < 4, y >= 4) {
            (true, true) => self.nw = self.nw.set(x, y - 4, alive),
            (false, true) => self.ne = self.ne.set(x - 4, y - 4, alive),
            (true, false) => self.sw = self.sw.set(x, y, alive),
            (false, false) => self.se = self.se.set(x - 4, y, alive),
        }
    }

    pub fn is_all_dead(self) -> bool {
        self.nw.is_all_dead() && self.ne.is_all_dead() && self.sw.is_all_dead() && self.se.is_all_dead()
    }
}
