//! Option combinations, the round-robin cursor and variant identity keys.

pub mod combinations;
pub mod key;

pub use combinations::{
    combination_count, generate_combinations, plan_run, slice_for_run, RoundRobinCursor, VariantSlice,
};
pub use key::{build_option_key, DEFAULT_OPTION_KEY};
