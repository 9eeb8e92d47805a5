//! `StepTable`: the 65 536-entry lookup table mapping a `Quad2` key to its
//! center 2x2 one-generation-advanced result.
//!
//! Built once, lazily, at first use — read-only thereafter. Grounded in
//! cainydev's adder-tree base case (`calc_leaf`), reapplied here to the
//! one-time table-construction pass rather than the per-step hot path.

use std::sync::OnceLock;

use super::bits::Quad2;
use crate::life_rule::step_center_from_quad2;

pub(crate) struct StepTable {
    entries: Box<[u8; 65536]>,
}

fn build() -> Box<[u8; 65536]> {
    let mut table = vec![0u8; 65536].into_boxed_slice();
    for key in 0u32..65536 {
        table[key as usize] = step_center_from_quad2(key as u16);
    }
    table.try_into().expect("65536 entries")
}

static TABLE: OnceLock<StepTable> = OnceLock::new();

impl StepTable {
    pub(crate) fn get() -> &'static StepTable {
        TABLE.get_or_init(|| StepTable { entries: build() })
    }

    /// The center 2x2 of `key` stepped one generation, packed as bit `2*y+x`.
    #[inline]
    pub(crate) fn lookup(&self, key: Quad2) -> u8 {
        self.entries[key.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_direct_step() {
        let table = StepTable::get();
        let q = Quad2::DEAD.set(1, 1, true).set(2, 1, true).set(1, 2, true);
        assert_eq!(table.lookup(q), step_center_from_quad2(q.0));
    }

    #[test]
    fn empty_key_steps_to_empty() {
        let table = StepTable::get();
        assert_eq!(table.lookup(Quad2::DEAD), 0);
    }

    #[test]
    fn two_by_two_block_is_a_still_life() {
        let table = StepTable::get();
        let mut q = Quad2::DEAD;
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            q = q.set(x, y, true);
        }
        assert_eq!(table.lookup(q), 0b1111);
    }
}
