//! Best-first grid search between two cells of an occupancy grid.
//!
//! The open list is a plain vector scanned for the lowest `f` on every
//! iteration; the first minimum in list order wins. A binary heap would be
//! faster but orders equal-`f` nodes differently, and routes must stay
//! identical to the ones the store tool has always drawn.

use crate::config::{MovementCosts, SearchConfig};
use crate::map::{GridPoint, MapElement, OccupancyGrid, WorldPoint, compute_grid};

use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Neighbour offsets in expansion order: orthogonal first, then diagonal.
const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Estimate of the remaining cost from a cell to the goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    /// `|dx| + |dy|`. Overestimates diagonal-heavy paths, so the search is
    /// near-optimal rather than provably shortest.
    #[default]
    Manhattan,
    /// Exact cost of an unobstructed 8-directional path. Admissible.
    Octile,
    /// `max(|dx|, |dy|)`. Admissible whenever diagonal cost ≥ orthogonal cost.
    Chebyshev,
    /// Straight-line distance. Admissible.
    Euclidean,
}

impl Heuristic {
    /// Estimates the cost from `from` to `to`, scaled by the orthogonal step cost.
    pub fn estimate(self, from: GridPoint, to: GridPoint, costs: &MovementCosts) -> f64 {
        let dx = from.x.abs_diff(to.x) as f64;
        let dy = from.y.abs_diff(to.y) as f64;
        match self {
            Heuristic::Manhattan => costs.orthogonal * (dx + dy),
            Heuristic::Octile => {
                let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
                costs.diagonal * lo + costs.orthogonal * (hi - lo)
            }
            Heuristic::Chebyshev => costs.orthogonal * dx.max(dy),
            Heuristic::Euclidean => costs.orthogonal * dx.hypot(dy),
        }
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchOutcome {
    /// The goal cell was closed and a path reconstructed.
    Found,
    /// The open list ran empty before the goal was reached.
    Exhausted,
    /// The node-expansion budget ran out first.
    BudgetExceeded,
    /// Start or goal was outside the grid, non-finite, or blocked.
    InvalidEndpoint,
}

/// Represents the result of a search with metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathResult {
    /// The computed path, if one was found.
    pub path: Option<Vec<GridPoint>>,
    /// The accumulated step cost of the path.
    pub total_cost: Option<f64>,
    /// The number of nodes expanded during the search.
    pub nodes_explored: usize,
    /// The length of the path (number of cells).
    pub path_length: usize,
    /// Why the search stopped.
    pub outcome: SearchOutcome,
}

impl PathResult {
    /// Creates a new PathResult for a successful path.
    pub fn success(path: Vec<GridPoint>, total_cost: f64, nodes_explored: usize) -> Self {
        let path_length = path.len();
        Self {
            path: Some(path),
            total_cost: Some(total_cost),
            nodes_explored,
            path_length,
            outcome: SearchOutcome::Found,
        }
    }

    /// Creates a new PathResult for a failed path search.
    pub fn failure(outcome: SearchOutcome, nodes_explored: usize) -> Self {
        Self {
            path: None,
            total_cost: None,
            nodes_explored,
            path_length: 0,
            outcome,
        }
    }

    /// Returns true if a path was found.
    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }

    /// Returns the path if one was found.
    pub fn into_path(self) -> Option<Vec<GridPoint>> {
        self.path
    }

    /// Returns the path, or an empty vector when none was found.
    pub fn into_points(self) -> Vec<GridPoint> {
        self.path.unwrap_or_default()
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(_) => write!(
                f,
                "PathResult {{ success: true, path_length: {}, total_cost: {:.3}, nodes_explored: {} }}",
                self.path_length,
                self.total_cost.unwrap_or(0.0),
                self.nodes_explored
            ),
            None => write!(
                f,
                "PathResult {{ success: false, outcome: {:?}, nodes_explored: {} }}",
                self.outcome, self.nodes_explored
            ),
        }
    }
}

/// A vertex of the search tree. Parents are indices into the node arena.
#[derive(Debug, Clone, Copy)]
struct PathNode {
    position: GridPoint,
    g: f64,
    h: f64,
    f: f64,
    parent: Option<usize>,
}

impl PathNode {
    fn new(position: GridPoint, g: f64, h: f64, parent: Option<usize>) -> Self {
        Self {
            position,
            g,
            h,
            f: g + h,
            parent,
        }
    }
}

/// Collects the walkable neighbours of `p` together with their step cost.
fn neighbors(
    grid: &OccupancyGrid,
    p: GridPoint,
    config: &SearchConfig,
    out: &mut Vec<(GridPoint, f64)>,
) {
    let directions = if config.allow_diagonal {
        &DIRECTIONS[..]
    } else {
        &DIRECTIONS[..4]
    };

    for &(dx, dy) in directions {
        let Some(next) = p.offset(dx, dy) else {
            continue;
        };
        if !grid.is_free(next) {
            continue;
        }
        let diagonal = dx != 0 && dy != 0;
        if diagonal && !config.allow_corner_cutting {
            let beside_x = p.offset(dx, 0).is_some_and(|c| grid.is_free(c));
            let beside_y = p.offset(0, dy).is_some_and(|c| grid.is_free(c));
            if !(beside_x && beside_y) {
                continue;
            }
        }
        out.push((next, config.movement.step(dx, dy)));
    }
}

/// Returns the slot in `open` holding the node with the lowest `f`.
/// Ties keep the earliest slot.
fn lowest_f(nodes: &[PathNode], open: &[usize]) -> usize {
    let mut best = 0;
    for (slot, &id) in open.iter().enumerate().skip(1) {
        if nodes[id].f < nodes[open[best]].f {
            best = slot;
        }
    }
    best
}

/// Walks parent indices from `goal` back to the root and reverses.
fn reconstruct_path(nodes: &[PathNode], goal: usize) -> Vec<GridPoint> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(id) = current {
        path.push(nodes[id].position);
        current = nodes[id].parent;
    }
    path.reverse();
    path
}

/// Finds a path between two positions with detailed results.
///
/// Both positions are floored to cells. A start or goal outside the grid or
/// on a blocked cell produces a failed result rather than an error.
///
/// # Arguments
/// * `grid` - The occupancy grid to plan in.
/// * `start` - Starting position.
/// * `goal` - Goal position.
/// * `config` - Step costs, heuristic and expansion budget.
///
/// # Returns
/// * `PathResult` - The path from start to goal inclusive, plus search statistics.
pub fn find_path_detailed(
    grid: &OccupancyGrid,
    start: WorldPoint,
    goal: WorldPoint,
    config: &SearchConfig,
) -> PathResult {
    let (Some(start), Some(goal)) = (grid.cell_at(start), grid.cell_at(goal)) else {
        trace!(?start, ?goal, "Search endpoint outside grid");
        return PathResult::failure(SearchOutcome::InvalidEndpoint, 0);
    };
    if !grid.is_free(start) || !grid.is_free(goal) {
        trace!(%start, %goal, "Search endpoint blocked");
        return PathResult::failure(SearchOutcome::InvalidEndpoint, 0);
    }

    let costs = &config.movement;
    let mut nodes = vec![PathNode::new(
        start,
        0.0,
        config.heuristic.estimate(start, goal, costs),
        None,
    )];
    let mut open: Vec<usize> = vec![0];
    let mut open_ids: HashMap<GridPoint, usize> = HashMap::from([(start, 0)]);
    let mut closed: HashSet<GridPoint> = HashSet::new();
    let mut candidates = Vec::with_capacity(DIRECTIONS.len());
    let mut nodes_explored = 0;

    while !open.is_empty() {
        if config.max_expansions.is_some_and(|limit| nodes_explored >= limit) {
            debug!(nodes_explored, %start, %goal, "Search budget exhausted");
            return PathResult::failure(SearchOutcome::BudgetExceeded, nodes_explored);
        }

        let current_id = open.remove(lowest_f(&nodes, &open));
        let current = nodes[current_id];
        open_ids.remove(&current.position);
        closed.insert(current.position);
        nodes_explored += 1;

        if current.position == goal {
            let path = reconstruct_path(&nodes, current_id);
            trace!(nodes_explored, cells = path.len(), cost = current.g, "Path found");
            return PathResult::success(path, current.g, nodes_explored);
        }

        candidates.clear();
        neighbors(grid, current.position, config, &mut candidates);
        for &(neighbor, step_cost) in &candidates {
            if closed.contains(&neighbor) {
                continue;
            }
            let tentative_g = current.g + step_cost;

            match open_ids.get(&neighbor) {
                None => {
                    let h = config.heuristic.estimate(neighbor, goal, costs);
                    nodes.push(PathNode::new(neighbor, tentative_g, h, Some(current_id)));
                    let id = nodes.len() - 1;
                    open.push(id);
                    open_ids.insert(neighbor, id);
                }
                Some(&id) => {
                    // Relax in place; the node keeps its slot in the open list.
                    let existing = &mut nodes[id];
                    if tentative_g < existing.g {
                        existing.g = tentative_g;
                        existing.f = existing.g + existing.h;
                        existing.parent = Some(current_id);
                    }
                }
            }
        }
    }

    trace!(nodes_explored, %start, %goal, "Open list exhausted");
    PathResult::failure(SearchOutcome::Exhausted, nodes_explored)
}

/// Finds a path between two positions using the default search settings.
///
/// # Returns
/// * `Vec<GridPoint>` - Cells from start to goal inclusive, or empty if no path exists.
pub fn find_path(grid: &OccupancyGrid, start: WorldPoint, goal: WorldPoint) -> Vec<GridPoint> {
    find_path_detailed(grid, start, goal, &SearchConfig::default()).into_points()
}

/// A grid built once and queried for any number of start/goal pairs.
#[derive(Debug, Clone)]
pub struct PathFinder {
    grid: OccupancyGrid,
    config: SearchConfig,
}

impl PathFinder {
    /// Rasterizes `obstacles` onto a `width × height` grid with default search settings.
    pub fn new(width: usize, height: usize, obstacles: &[MapElement]) -> Self {
        Self::with_config(compute_grid(width, height, obstacles), SearchConfig::default())
    }

    /// Wraps an existing grid.
    pub fn with_config(grid: OccupancyGrid, config: SearchConfig) -> Self {
        Self { grid, config }
    }

    /// Gets the grid searched by this finder.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Gets the search settings.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Finds a path; empty if none exists.
    pub fn find_path(&self, start: WorldPoint, goal: WorldPoint) -> Vec<GridPoint> {
        self.find_path_detailed(start, goal).into_points()
    }

    /// Finds a path and reports search statistics.
    pub fn find_path_detailed(&self, start: WorldPoint, goal: WorldPoint) -> PathResult {
        find_path_detailed(&self.grid, start, goal, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp(x: f64, y: f64) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    fn gp(x: usize, y: usize) -> GridPoint {
        GridPoint::new(x, y)
    }

    fn assert_connected(path: &[GridPoint]) {
        for pair in path.windows(2) {
            assert!(pair[0].x.abs_diff(pair[1].x) <= 1, "step {pair:?} too wide");
            assert!(pair[0].y.abs_diff(pair[1].y) <= 1, "step {pair:?} too wide");
            assert_ne!(pair[0], pair[1], "repeated cell in path");
        }
    }

    #[test]
    fn test_open_grid_diagonal() {
        let grid = compute_grid(10, 10, &[]);
        let path = find_path(&grid, wp(0.0, 0.0), wp(9.0, 9.0));

        assert_eq!(path.len(), 10);
        for (i, p) in path.iter().enumerate() {
            assert_eq!(*p, gp(i, i), "path should be strictly diagonal");
        }
    }

    #[test]
    fn test_open_grid_mixed_direction() {
        let grid = compute_grid(20, 20, &[]);
        let path = find_path(&grid, wp(10.0, 10.0), wp(15.0, 12.0));

        assert_eq!(path.len(), 6);
        assert_eq!(path[0], gp(10, 10));
        assert_eq!(path[5], gp(15, 12));
        assert_connected(&path);
    }

    #[test]
    fn test_fractional_endpoints_are_floored() {
        let grid = compute_grid(10, 10, &[]);
        let path = find_path(&grid, wp(0.9, 0.2), wp(3.7, 0.99));
        assert_eq!(path, vec![gp(0, 0), gp(1, 0), gp(2, 0), gp(3, 0)]);
    }

    #[test]
    fn test_same_start_goal() {
        let grid = compute_grid(5, 5, &[]);
        let result = find_path_detailed(&grid, wp(2.0, 2.0), wp(2.5, 2.5), &SearchConfig::default());

        assert!(result.is_success());
        assert_eq!(result.path.as_deref(), Some(&[gp(2, 2)][..]));
        assert_eq!(result.total_cost, Some(0.0));
        assert_eq!(result.nodes_explored, 1);
    }

    #[test]
    fn test_full_wall_blocks_path() {
        let grid = compute_grid(5, 5, &[MapElement::wall(0.0, 2.0, 5.0, 1.0)]);
        let result = find_path_detailed(&grid, wp(2.0, 0.0), wp(2.0, 4.0), &SearchConfig::default());

        assert!(!result.is_success());
        assert_eq!(result.outcome, SearchOutcome::Exhausted);
        // Only the ten cells above the wall are reachable.
        assert_eq!(result.nodes_explored, 10);
        assert!(find_path(&grid, wp(2.0, 0.0), wp(2.0, 4.0)).is_empty());
    }

    #[test]
    fn test_detour_through_gap() {
        let grid = compute_grid(5, 5, &[MapElement::wall(0.0, 2.0, 4.0, 1.0)]);
        let path = find_path(&grid, wp(2.0, 0.0), wp(2.0, 4.0));

        assert_eq!(path.first(), Some(&gp(2, 0)));
        assert_eq!(path.last(), Some(&gp(2, 4)));
        assert!(path.contains(&gp(4, 2)), "path must cross the wall through the gap");
        assert!(path.iter().all(|p| grid.is_free(*p)));
        assert_connected(&path);
    }

    #[test]
    fn test_blocked_endpoints() {
        let grid = compute_grid(5, 5, &[MapElement::obstacle(1.0, 1.0, 1.0, 1.0)]);
        let config = SearchConfig::default();

        let blocked_start = find_path_detailed(&grid, wp(1.0, 1.0), wp(4.0, 4.0), &config);
        assert_eq!(blocked_start.outcome, SearchOutcome::InvalidEndpoint);
        assert!(blocked_start.path.is_none());

        let blocked_goal = find_path_detailed(&grid, wp(4.0, 4.0), wp(1.5, 1.5), &config);
        assert_eq!(blocked_goal.outcome, SearchOutcome::InvalidEndpoint);
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let grid = compute_grid(5, 5, &[]);
        assert!(find_path(&grid, wp(-1.0, 0.0), wp(4.0, 4.0)).is_empty());
        assert!(find_path(&grid, wp(0.0, 0.0), wp(5.0, 4.0)).is_empty());
        assert!(find_path(&grid, wp(0.0, 0.0), wp(4.0, f64::INFINITY)).is_empty());
        assert!(find_path(&grid, wp(f64::NAN, 0.0), wp(4.0, 4.0)).is_empty());
    }

    #[test]
    fn test_corner_cutting() {
        let mut grid = OccupancyGrid::new(2, 2);
        grid.set_blocked(gp(1, 0), true).unwrap();
        grid.set_blocked(gp(0, 1), true).unwrap();

        // Only the target cell is checked by default, so the diagonal squeezes through.
        let path = find_path(&grid, wp(0.0, 0.0), wp(1.0, 1.0));
        assert_eq!(path, vec![gp(0, 0), gp(1, 1)]);

        let strict = SearchConfig {
            allow_corner_cutting: false,
            ..SearchConfig::default()
        };
        let result = find_path_detailed(&grid, wp(0.0, 0.0), wp(1.0, 1.0), &strict);
        assert!(!result.is_success());
    }

    #[test]
    fn test_four_directional() {
        let grid = compute_grid(6, 6, &[]);
        let config = SearchConfig {
            allow_diagonal: false,
            ..SearchConfig::default()
        };
        let result = find_path_detailed(&grid, wp(0.0, 0.0), wp(3.0, 2.0), &config);

        let path = result.path.clone().unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(result.total_cost, Some(5.0));
        for pair in path.windows(2) {
            assert_eq!(pair[0].x.abs_diff(pair[1].x) + pair[0].y.abs_diff(pair[1].y), 1);
        }
    }

    #[test]
    fn test_expansion_budget() {
        let grid = compute_grid(30, 30, &[]);
        let tight = SearchConfig {
            max_expansions: Some(3),
            ..SearchConfig::default()
        };
        let result = find_path_detailed(&grid, wp(0.0, 0.0), wp(29.0, 29.0), &tight);
        assert_eq!(result.outcome, SearchOutcome::BudgetExceeded);
        assert_eq!(result.nodes_explored, 3);

        // The diagonal run expands exactly one node per cell.
        let exact = SearchConfig {
            max_expansions: Some(30),
            ..SearchConfig::default()
        };
        let result = find_path_detailed(&grid, wp(0.0, 0.0), wp(29.0, 29.0), &exact);
        assert!(result.is_success());
        assert_eq!(result.nodes_explored, 30);
    }

    #[test]
    fn test_diagonal_cost_accumulates() {
        let grid = compute_grid(10, 10, &[]);
        let result = find_path_detailed(&grid, wp(0.0, 0.0), wp(3.0, 3.0), &SearchConfig::default());
        let cost = result.total_cost.unwrap();
        assert!((cost - 3.0 * 1.414).abs() < 1e-9);
    }

    #[test]
    fn test_admissible_heuristics_find_open_grid_paths() {
        let grid = compute_grid(12, 12, &[]);
        for heuristic in [Heuristic::Octile, Heuristic::Chebyshev, Heuristic::Euclidean] {
            let config = SearchConfig {
                heuristic,
                ..SearchConfig::default()
            };
            let result = find_path_detailed(&grid, wp(1.0, 2.0), wp(9.0, 5.0), &config);
            let path = result.path.unwrap();
            assert_eq!(path.len(), 9, "{heuristic:?}");
            assert_connected(&path);
        }
    }

    #[test]
    fn test_heuristic_estimates() {
        let costs = MovementCosts::default();
        let (a, b) = (gp(0, 0), gp(3, 4));
        assert_eq!(Heuristic::Manhattan.estimate(a, b, &costs), 7.0);
        assert_eq!(Heuristic::Chebyshev.estimate(a, b, &costs), 4.0);
        assert_eq!(Heuristic::Euclidean.estimate(a, b, &costs), 5.0);
        assert!((Heuristic::Octile.estimate(a, b, &costs) - (3.0 * 1.414 + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_path_finder_reuses_grid() {
        let finder = PathFinder::new(8, 8, &[MapElement::wall(3.0, 0.0, 1.0, 7.0)]);
        assert_eq!(finder.grid().blocked_count(), 7);

        let first = finder.find_path(wp(0.0, 0.0), wp(7.0, 0.0));
        let second = finder.find_path(wp(0.0, 0.0), wp(7.0, 0.0));
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert!(first.contains(&gp(3, 7)));
    }

    #[test]
    fn test_path_result_display() {
        let grid = compute_grid(5, 5, &[]);
        let config = SearchConfig::default();

        let found = find_path_detailed(&grid, wp(0.0, 0.0), wp(4.0, 0.0), &config);
        let display_str = format!("{}", found);
        assert!(display_str.contains("success: true"));
        assert!(display_str.contains("path_length: 5"));

        let missing = find_path_detailed(&grid, wp(0.0, 0.0), wp(9.0, 0.0), &config);
        let display_str = format!("{}", missing);
        assert!(display_str.contains("success: false"));
        assert!(display_str.contains("InvalidEndpoint"));
    }
}
