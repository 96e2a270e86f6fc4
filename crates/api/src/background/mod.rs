//! Long-running background jobs spawned by the binary.

pub mod cooldown_retention;
