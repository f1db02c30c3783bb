//! Occupancy grid construction for path planning.
//!
//! This module rasterizes the rectangular walls and obstacles of a floor plan
//! onto a fixed-size boolean grid. A grid is built once per planning session
//! from an immutable snapshot of the geometry and is read-only during search;
//! when the geometry changes the grid is rebuilt wholesale.

#![warn(missing_docs)]

use crate::error::NavigationError;
use tracing::debug;

use super::floor::MapElement;
use super::point_types::{GridPoint, WorldPoint};

/// Fixed-size 2D occupancy grid. Each cell is either free or blocked.
#[derive(Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    /// Size in cells along x.
    width: usize,
    /// Size in cells along y.
    height: usize,
    /// Row-major blocked flags.
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Creates a grid with every cell free.
    ///
    /// A zero width or height produces an empty grid in which every
    /// coordinate is out of bounds.
    pub fn new(width: usize, height: usize) -> Self {
        OccupancyGrid {
            width,
            height,
            cells: vec![false; width.saturating_mul(height)],
        }
    }

    /// Gets the width of the grid in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Gets the height of the grid in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, point: GridPoint) -> usize {
        point.y * self.width + point.x
    }

    /// Returns `true` if the cell lies inside the grid.
    pub fn in_bounds(&self, point: GridPoint) -> bool {
        point.x < self.width && point.y < self.height
    }

    /// Returns `true` if the cell is inside the grid and blocked.
    pub fn is_blocked(&self, point: GridPoint) -> bool {
        self.in_bounds(point) && self.cells[self.index(point)]
    }

    /// Returns `true` if the cell is inside the grid and walkable.
    ///
    /// Out-of-bounds cells are neither free nor blocked.
    pub fn is_free(&self, point: GridPoint) -> bool {
        self.in_bounds(point) && !self.cells[self.index(point)]
    }

    /// Marks a single cell as blocked or free.
    ///
    /// # Returns
    /// * `Result<(), NavigationError>` - Error if the cell lies outside the grid
    pub fn set_blocked(&mut self, point: GridPoint, blocked: bool) -> Result<(), NavigationError> {
        if !self.in_bounds(point) {
            return Err(NavigationError::OutOfBounds(
                "Grid coordinates out of bounds",
            ));
        }
        let index = self.index(point);
        self.cells[index] = blocked;
        Ok(())
    }

    /// Converts a continuous position to the cell containing it.
    ///
    /// Both coordinates are floored. Returns `None` for non-finite input or
    /// when the floored cell falls outside the grid.
    pub fn cell_at(&self, point: WorldPoint) -> Option<GridPoint> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let (x, y) = (point.x.floor(), point.y.floor());
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
            return None;
        }
        Some(GridPoint::new(x as usize, y as usize))
    }

    /// Gets the number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&blocked| blocked).count()
    }

    /// Gets the total number of cells in the grid.
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// Blocks every cell covered by `element`, clipped to the grid.
    ///
    /// The covered range is `[floor(x), floor(x) + floor(width))` by
    /// `[floor(y), floor(y) + floor(height))`. Non-blocking kinds, empty or
    /// negative extents and non-finite geometry mark nothing.
    pub fn rasterize(&mut self, element: &MapElement) {
        if !element.is_blocking() {
            return;
        }

        let WorldPoint { x, y } = element.position;
        let (w, h) = (element.size.width, element.size.height);
        if ![x, y, w, h].iter().all(|v| v.is_finite()) {
            debug!(name = %element.name, kind = ?element.kind, "Skipping element with non-finite geometry");
            return;
        }

        // Float-to-int casts saturate, so huge rectangles clamp instead of wrapping.
        let start_x = x.floor() as i64;
        let start_y = y.floor() as i64;
        let end_x = start_x
            .saturating_add(w.floor() as i64)
            .min(self.width as i64);
        let end_y = start_y
            .saturating_add(h.floor() as i64)
            .min(self.height as i64);

        for cy in start_y.max(0)..end_y {
            let row = cy as usize * self.width;
            for cx in start_x.max(0)..end_x {
                self.cells[row + cx as usize] = true;
            }
        }
    }
}

/// Builds an occupancy grid of `width × height` cells from floor elements.
///
/// All cells start free; each wall or obstacle then blocks the cells its
/// rectangle covers. Anything outside the grid is silently clipped.
pub fn compute_grid(width: usize, height: usize, obstacles: &[MapElement]) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(width, height);
    for obstacle in obstacles {
        grid.rasterize(obstacle);
    }
    debug!(
        width,
        height,
        elements = obstacles.len(),
        blocked = grid.blocked_count(),
        "Occupancy grid built"
    );
    grid
}

impl std::fmt::Debug for OccupancyGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OccupancyGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("blocked", &self.blocked_count())
            .finish()
    }
}

impl std::fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "OccupancyGrid ({}x{})", self.width, self.height)?;
        for row in self.cells.chunks(self.width.max(1)) {
            for &blocked in row {
                write!(f, "{}", if blocked { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
