//! Map-related functionality for navigation.
//!
//! This module provides floor-plan geometry, the point types shared by the
//! planner and the occupancy grid that path search runs on.

pub mod floor;
pub mod occupancy;
pub mod point_types;

pub use floor::{ElementKind, FloorPlan, MapElement, Size};
pub use occupancy::{OccupancyGrid, compute_grid};
pub use point_types::{GridPoint, WorldPoint};
