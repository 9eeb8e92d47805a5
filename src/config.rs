//! Tuning constants for both engines.
//!
//! Plain `const`s, not a parsed runtime config: the core has no
//! configuration surface (no file, no env var), only compile-time knobs,
//! mirroring how the teacher keeps its own block-size and worker-count
//! defaults as top-level constants rather than a config-file schema.

/// HashLife cannot embiggen past this level (side length `2^60`, still
/// well within a signed 64-bit coordinate range).
pub const MAX_LEVEL: u8 = 60;

/// Initial combined size (construction memo + step memo entries) at which
/// `QuadMemoizer` performs its first bulk eviction.
pub const HASHLIFE_MEMO_INITIAL_THRESHOLD: usize = 1 << 16;

/// Walk the Dead list and reclaim its entries at least this often.
pub const QUICKLIFE_RECLAIM_INTERVAL_GENERATIONS: u32 = 128;

/// Reclaim early if the Dead list grows past this size between scheduled
/// sweeps, so a burst of deaths doesn't sit in the sparse map for a full
/// interval.
pub const QUICKLIFE_DEAD_LIST_RECLAIM_FLOOR: usize = 256;

/// QuickLife block coordinates are 16-bit.
pub const BLOCK_COORD_MIN: i16 = i16::MIN;
pub const BLOCK_COORD_MAX: i16 = i16::MAX;

/// Cell coordinates passed to QuickLife's `set`/`get` are silently clipped
/// to this range (`±2^19`), per the block-coordinate bound scaled up by
/// the 16-cell block side.
pub const MAX_COORDINATE: i64 = 1i64 << 19;
