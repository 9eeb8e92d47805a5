//! The `Stats` snapshot shared by both engines' `report()` output.

use std::fmt;

/// A point-in-time snapshot of an engine's progress and internal size.
///
/// Fields that don't apply to a given engine (e.g. `node_count` for
/// QuickLife, `active_blocks` for HashLife) are `None` rather than zero,
/// so `report()` never implies a measurement that wasn't taken.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stats {
    pub variant: &'static str,
    pub generation: u128,
    pub population: u64,
    pub level: Option<u8>,
    pub node_count: Option<usize>,
    pub memo_entry_count: Option<usize>,
    pub active_blocks: Option<usize>,
    pub stable_blocks: Option<usize>,
    pub dead_blocks: Option<usize>,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} gen={} pop={}",
            self.variant, self.generation, self.population
        )?;
        if let Some(level) = self.level {
            write!(f, " level={level}")?;
        }
        if let Some(node_count) = self.node_count {
            write!(f, " nodes={node_count}")?;
        }
        if let Some(memo_entry_count) = self.memo_entry_count {
            write!(f, " memo={memo_entry_count}")?;
        }
        if let Some(active) = self.active_blocks {
            write!(f, " active={active}")?;
        }
        if let Some(stable) = self.stable_blocks {
            write!(f, " stable={stable}")?;
        }
        if let Some(dead) = self.dead_blocks {
            write!(f, " dead={dead}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_absent_fields() {
        let stats = Stats {
            variant: "HashLife",
            generation: 4,
            population: 10,
            level: Some(6),
            node_count: Some(12),
            memo_entry_count: Some(3),
            active_blocks: None,
            stable_blocks: None,
            dead_blocks: None,
        };
        let text = stats.to_string();
        assert!(text.contains("HashLife"));
        assert!(text.contains("gen=4"));
        assert!(text.contains("level=6"));
        assert!(!text.contains("active="));
    }

    #[test]
    fn display_includes_block_counts_when_present() {
        let stats = Stats {
            variant: "QuickLife",
            generation: 1,
            population: 5,
            level: None,
            node_count: None,
            memo_entry_count: None,
            active_blocks: Some(2),
            stable_blocks: Some(1),
            dead_blocks: Some(0),
        };
        let text = stats.to_string();
        assert!(text.contains("QuickLife"));
        assert!(text.contains("active=2"));
        assert!(text.contains("stable=1"));
        assert!(text.contains("dead=0"));
        assert!(!text.contains("level="));
    }
}
