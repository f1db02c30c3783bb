//! This module defines the error types used by the `aisle-navigation` crate.
//!
//! Planning itself never fails: an unreachable goal is an empty path. These
//! errors only surface from configuration validation and explicit grid edits.

#![warn(missing_docs)]

use thiserror::Error;

/// Error type for navigation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Returned when a grid width or height is zero.
    #[error("Invalid grid dimensions: {0}")]
    InvalidDimensions(&'static str),
    /// Returned when a movement cost is not a positive, finite number.
    #[error("Invalid movement cost: {0}")]
    InvalidMovementCost(&'static str),
    /// Returned when a node-expansion budget cannot admit a single expansion.
    #[error("Invalid search budget: {0}")]
    InvalidBudget(&'static str),
    /// Returned when attempting to access grid cells outside the valid range.
    #[error("Grid access out of bounds: {0}")]
    OutOfBounds(&'static str),
}
