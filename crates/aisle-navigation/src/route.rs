//! Multi-stop route stitching.
//!
//! A route visits waypoints in exactly the order given; choosing that order
//! is the caller's job. Each leg is searched on one shared grid, and legs
//! that cannot be completed are dropped without aborting the route.

use crate::astar::PathFinder;
use crate::config::{RouteConfig, SearchConfig, StitchMode};
use crate::map::{GridPoint, MapElement, WorldPoint, compute_grid};

use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named stop on a route, usually a rack.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    /// Name shown to the shopper.
    pub name: String,
    /// Requested position; floored to a cell when searched.
    pub position: WorldPoint,
}

impl Waypoint {
    /// Creates a new `Waypoint`.
    pub fn new(name: impl Into<String>, position: WorldPoint) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// One successfully planned leg of a route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteLeg {
    /// Name of the waypoint this leg ends at.
    pub waypoint: String,
    /// Cells of the leg, both endpoints included.
    pub points: Vec<GridPoint>,
    /// Accumulated step cost of the leg.
    pub cost: f64,
}

/// A stitched multi-leg route.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    points: Vec<GridPoint>,
    legs: Vec<RouteLeg>,
    skipped: Vec<String>,
}

impl Route {
    /// The full walkable sequence. Junction cells between legs appear once.
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// Consumes the route, returning the point sequence.
    pub fn into_points(self) -> Vec<GridPoint> {
        self.points
    }

    /// The legs that were planned, in visiting order.
    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Names of waypoints that could not be reached and were left out.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Sum of the leg costs.
    pub fn total_cost(&self) -> f64 {
        self.legs.iter().fold(0.0, |acc, leg| acc + leg.cost)
    }

    /// Number of cells in the route.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no leg succeeded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn push_leg(&mut self, waypoint: &Waypoint, leg: Vec<GridPoint>, cost: f64) {
        // The previous leg already ends on this leg's first cell.
        let skip = usize::from(!self.points.is_empty());
        self.points.extend_from_slice(&leg[skip..]);
        self.legs.push(RouteLeg {
            waypoint: waypoint.name.clone(),
            points: leg,
            cost,
        });
    }
}

/// Plans a route through `waypoints` in order and returns its cells.
///
/// Starts at the default origin `(10, 10)` on a grid of `grid_size`
/// (default `100 × 100`), using the default search settings. Unreachable
/// waypoints are skipped and the next leg starts from the last waypoint
/// reached. Returns an empty vector when `waypoints` is empty or no leg
/// succeeds.
pub fn optimize_route(
    waypoints: &[Waypoint],
    obstacles: &[MapElement],
    grid_size: Option<(usize, usize)>,
) -> Vec<GridPoint> {
    let mut config = RouteConfig::default();
    if let Some((width, height)) = grid_size {
        config = config.with_grid_size(width, height);
    }
    optimize_route_with(waypoints, obstacles, &config, &SearchConfig::default()).into_points()
}

/// Plans a route through `waypoints` in order with explicit settings.
///
/// # Arguments
/// * `waypoints` - Stops in visiting order.
/// * `obstacles` - Floor elements; only walls and obstacles block.
/// * `route` - Grid size, origin and stitching mode.
/// * `search` - Settings used for every leg.
///
/// # Returns
/// * `Route` - Stitched cells plus per-leg details and skipped waypoint names.
pub fn optimize_route_with(
    waypoints: &[Waypoint],
    obstacles: &[MapElement],
    route: &RouteConfig,
    search: &SearchConfig,
) -> Route {
    let mut planned = Route::default();
    if waypoints.is_empty() {
        return planned;
    }

    let finder = PathFinder::with_config(
        compute_grid(route.grid_width, route.grid_height, obstacles),
        search.clone(),
    );
    let mut current = route.origin;

    for waypoint in waypoints {
        let result = finder.find_path_detailed(current, waypoint.position);
        let cost = result.total_cost.unwrap_or_default();
        let outcome = result.outcome;

        match result.into_path() {
            Some(leg) if !leg.is_empty() => {
                let reached = leg[leg.len() - 1];
                planned.push_leg(waypoint, leg, cost);
                current = match route.stitch {
                    StitchMode::NominalWaypoint => waypoint.position,
                    StitchMode::LastPathCell => reached.into(),
                };
            }
            _ => {
                debug!(waypoint = %waypoint.name, ?outcome, from = ?current, "Waypoint unreachable, skipping");
                planned.skipped.push(waypoint.name.clone());
            }
        }
    }

    debug!(
        waypoints = waypoints.len(),
        legs = planned.legs.len(),
        cells = planned.points.len(),
        "Route planned"
    );
    planned
}
