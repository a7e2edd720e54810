//! Default parameter values, collected in one place so CLI subcommands
//! and library callers agree on them (mirrors `vstolib/default.py`).

pub const NUM_THREADS: usize = 4;

pub const MAX_NEIGHBOR_DISTANCE: i64 = 100;
pub const MATCH_ALL_BREAKPOINTS: bool = true;
pub const MATCH_VARIANT_TYPES: bool = true;
pub const MIN_INS_SIZE_OVERLAP: f64 = 0.5;
pub const MIN_DEL_SIZE_OVERLAP: f64 = 0.5;

pub const OVERLAP_PADDING: i64 = 0;

pub const FILTER_EXCLUDED_REGION_PADDING: i64 = 100_000;
pub const FILTER_HOMOPOLYMER_LENGTH: i64 = 20;
