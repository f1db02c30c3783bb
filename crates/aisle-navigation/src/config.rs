//! Planner configuration.
//!
//! Movement costs, the search heuristic and the route defaults live here
//! rather than as literals in the planner. Every default reproduces the
//! behaviour of the store navigation tool the planner was built for.

#![warn(missing_docs)]

use crate::astar::Heuristic;
use crate::error::NavigationError;
use crate::map::WorldPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default grid width used when a route is planned without explicit dimensions.
pub const DEFAULT_GRID_WIDTH: usize = 100;
/// Default grid height used when a route is planned without explicit dimensions.
pub const DEFAULT_GRID_HEIGHT: usize = 100;
/// Position every route starts from (the store entrance), in grid units.
pub const DEFAULT_ORIGIN: WorldPoint = WorldPoint::new(10.0, 10.0);
/// Cost of a horizontal or vertical step.
pub const ORTHOGONAL_STEP_COST: f64 = 1.0;
/// Cost of a diagonal step. A fixed approximation of √2, not the exact value.
pub const DIAGONAL_STEP_COST: f64 = 1.414;

/// Cost of a single step on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementCosts {
    /// Cost of moving to a horizontally or vertically adjacent cell.
    pub orthogonal: f64,
    /// Cost of moving to a diagonally adjacent cell.
    pub diagonal: f64,
}

impl Default for MovementCosts {
    fn default() -> Self {
        Self {
            orthogonal: ORTHOGONAL_STEP_COST,
            diagonal: DIAGONAL_STEP_COST,
        }
    }
}

impl MovementCosts {
    /// Cost of the step `(dx, dy)`. A step is diagonal when `|dx| + |dy| == 2`.
    pub fn step(&self, dx: isize, dy: isize) -> f64 {
        if dx.abs() + dy.abs() == 2 {
            self.diagonal
        } else {
            self.orthogonal
        }
    }

    fn validate(&self) -> Result<(), NavigationError> {
        if !(self.orthogonal.is_finite() && self.orthogonal > 0.0) {
            return Err(NavigationError::InvalidMovementCost(
                "orthogonal step cost must be positive and finite",
            ));
        }
        if !(self.diagonal.is_finite() && self.diagonal > 0.0) {
            return Err(NavigationError::InvalidMovementCost(
                "diagonal step cost must be positive and finite",
            ));
        }
        Ok(())
    }
}

/// Settings for a single point-to-point search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Step costs.
    pub movement: MovementCosts,
    /// Estimate of the remaining cost used to order the open list.
    pub heuristic: Heuristic,
    /// Enable 8-directional movement. When `false` only orthogonal steps are taken.
    pub allow_diagonal: bool,
    /// Allow a diagonal step between two blocked orthogonal cells.
    ///
    /// When `false` a diagonal step requires both cells it passes beside to
    /// be free.
    pub allow_corner_cutting: bool,
    /// Maximum number of nodes to expand before giving up. `None` is unbounded.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            movement: MovementCosts::default(),
            heuristic: Heuristic::Manhattan,
            allow_diagonal: true,
            allow_corner_cutting: true,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    /// Checks that the costs and budget describe a usable search.
    pub fn validate(&self) -> Result<(), NavigationError> {
        self.movement.validate()?;
        if self.max_expansions == Some(0) {
            return Err(NavigationError::InvalidBudget(
                "max_expansions must allow at least one expansion",
            ));
        }
        Ok(())
    }
}

/// Where the next leg of a route starts after a waypoint has been reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StitchMode {
    /// Continue from the waypoint's requested position, which may be fractional.
    #[default]
    NominalWaypoint,
    /// Continue from the last cell of the leg that was actually returned.
    LastPathCell,
}

/// Settings for stitching legs into a multi-stop route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteConfig {
    /// Grid width in cells.
    pub grid_width: usize,
    /// Grid height in cells.
    pub grid_height: usize,
    /// Where the first leg starts.
    pub origin: WorldPoint,
    /// How consecutive legs are joined.
    pub stitch: StitchMode,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            origin: DEFAULT_ORIGIN,
            stitch: StitchMode::default(),
        }
    }
}

impl RouteConfig {
    /// Returns a copy with the grid dimensions replaced.
    #[must_use]
    pub fn with_grid_size(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    /// Checks that the grid has at least one cell.
    pub fn validate(&self) -> Result<(), NavigationError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(NavigationError::InvalidDimensions(
                "grid width and height must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Complete planner configuration: search settings plus route settings.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Point-to-point search settings.
    pub search: SearchConfig,
    /// Multi-stop route settings.
    pub route: RouteConfig,
}

impl PlannerConfig {
    /// Validates both sections.
    pub fn validate(&self) -> Result<(), NavigationError> {
        self.search.validate()?;
        self.route.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_store_tool() {
        let config = PlannerConfig::default();
        assert_eq!(config.search.movement.orthogonal, 1.0);
        assert_eq!(config.search.movement.diagonal, 1.414);
        assert_eq!(config.search.heuristic, Heuristic::Manhattan);
        assert!(config.search.allow_diagonal);
        assert!(config.search.allow_corner_cutting);
        assert_eq!(config.search.max_expansions, None);
        assert_eq!(config.route.grid_width, 100);
        assert_eq!(config.route.grid_height, 100);
        assert_eq!(config.route.origin, WorldPoint::new(10.0, 10.0));
        assert_eq!(config.route.stitch, StitchMode::NominalWaypoint);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_step_cost() {
        let costs = MovementCosts::default();
        assert_eq!(costs.step(1, 0), 1.0);
        assert_eq!(costs.step(0, -1), 1.0);
        assert_eq!(costs.step(-1, 1), 1.414);
    }

    #[test]
    fn test_invalid_costs() {
        let mut config = PlannerConfig::default();
        config.search.movement.diagonal = 0.0;
        assert!(matches!(
            config.validate(),
            Err(NavigationError::InvalidMovementCost(_))
        ));

        config.search.movement = MovementCosts {
            orthogonal: f64::NAN,
            diagonal: 1.4,
        };
        assert!(matches!(
            config.validate(),
            Err(NavigationError::InvalidMovementCost(_))
        ));
    }

    #[test]
    fn test_invalid_budget_and_dimensions() {
        let mut config = PlannerConfig::default();
        config.search.max_expansions = Some(0);
        assert!(matches!(
            config.validate(),
            Err(NavigationError::InvalidBudget(_))
        ));

        let config = PlannerConfig {
            route: RouteConfig::default().with_grid_size(0, 50),
            ..PlannerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NavigationError::InvalidDimensions(_))
        ));
    }
}
