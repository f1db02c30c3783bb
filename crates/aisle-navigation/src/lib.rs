//! Route planning for indoor store floor plans.
//!
//! The crate turns a floor's walls and obstacles into an occupancy grid,
//! searches it between pairs of positions and stitches the per-leg paths of
//! an ordered shopping list into one walkable route.
//!
//! ```
//! use aisle_navigation::map::{MapElement, WorldPoint};
//! use aisle_navigation::route::{Waypoint, optimize_route};
//!
//! let obstacles = [MapElement::wall(12.0, 0.0, 1.0, 15.0)];
//! let stops = [Waypoint::new("Dairy", WorldPoint::new(20.0, 10.0))];
//!
//! let route = optimize_route(&stops, &obstacles, Some((40, 40)));
//! assert_eq!(route.first().map(|p| (p.x, p.y)), Some((10, 10)));
//! assert_eq!(route.last().map(|p| (p.x, p.y)), Some((20, 10)));
//! ```
//!
//! Planning never fails. An unreachable goal is an empty path and an
//! unreachable stop is left out of the route.

pub mod astar;
pub mod config;
pub mod error;
pub mod map;
pub mod route;

pub use astar::{Heuristic, PathFinder, PathResult, SearchOutcome, find_path, find_path_detailed};
pub use config::{MovementCosts, PlannerConfig, RouteConfig, SearchConfig, StitchMode};
pub use error::NavigationError;
pub use map::{ElementKind, FloorPlan, GridPoint, MapElement, OccupancyGrid, Size, WorldPoint, compute_grid};
pub use route::{Route, RouteLeg, Waypoint, optimize_route, optimize_route_with};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<OccupancyGrid>();
        assert_send_sync::<FloorPlan>();
        assert_send_sync::<MapElement>();
        assert_send_sync::<PathFinder>();
        assert_send_sync::<PathResult>();
        assert_send_sync::<Route>();
        assert_send_sync::<Waypoint>();
        assert_send_sync::<PlannerConfig>();
        assert_send_sync::<NavigationError>();
    }
}
