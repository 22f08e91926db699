//! Error types for map construction and iteration.

use thiserror::Error;

/// Rejected construction parameter.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("resize threshold must be > 0, got {0}")]
    ResizeThreshold(f64),

    #[error("initial slot count must be > 0")]
    InitialSlotCount,

    #[error("bucket initial capacity must be > 0")]
    BucketInitialCapacity,
}

/// Errors surfaced by `ChainedMap` and its iterator.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// `Iter::try_next` was called with no entries left.
    #[error("iterator exhausted")]
    Exhausted,

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

pub type Result<T> = core::result::Result<T, Error>;
