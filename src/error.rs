//! Error types for the gamma engine.
//!
//! Ordinary rule violations (occupied cell, area limit, spent golden move)
//! are not errors: the engine reports them as `Ok(false)`. The types here
//! cover the two genuinely exceptional outcomes: a board that cannot be
//! created and scratch memory that cannot be obtained mid-game.

use std::collections::TryReserveError;
use std::fmt;

/// Scratch memory for connectivity analysis could not be reserved.
///
/// The board is left exactly as it was before the failing call. The grid
/// size is fixed for the lifetime of a game, so a retry would hit the same
/// wall; callers should end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfMemory;

impl fmt::Display for OutOfMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "out of memory during connectivity analysis")
    }
}

impl std::error::Error for OutOfMemory {}

impl From<TryReserveError> for OutOfMemory {
    fn from(_: TryReserveError) -> Self {
        Self
    }
}

/// Reasons a board cannot be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A dimension, the player count or the area limit was zero.
    ZeroParameter {
        /// Name of the offending parameter.
        name: &'static str,
    },
    /// `width * height` does not fit in the address space.
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The grid or its scratch space could not be allocated.
    OutOfMemory,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroParameter { name } => write!(f, "{name} must be at least 1"),
            ConfigError::TooLarge { width, height } => {
                write!(f, "board {width}x{height} is too large")
            }
            ConfigError::OutOfMemory => write!(f, "out of memory while creating the board"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<TryReserveError> for ConfigError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

/// Result type for engine operations that may exhaust scratch memory.
pub type GammaResult<T> = Result<T, OutOfMemory>;
