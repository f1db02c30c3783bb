//! Floor-plan geometry: the elements an editor places on a store floor.
//!
//! Every element is an axis-aligned rectangle in continuous coordinates. Only
//! walls and obstacles block movement; racks and points of interest are
//! destinations, not barriers.

#![warn(missing_docs)]

use super::occupancy::{OccupancyGrid, compute_grid};
use super::point_types::WorldPoint;
use crate::route::Waypoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of element placed on a floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElementKind {
    /// Structural wall.
    Wall,
    /// Free-standing obstacle (pillar, display stand, checkout).
    Obstacle,
    /// Shelf rack that shoppers walk up to.
    Rack,
    /// Point of interest such as an entrance or help desk.
    Poi,
}

impl ElementKind {
    /// Returns `true` for kinds that are rasterized into blocked cells.
    pub fn is_blocking(self) -> bool {
        matches!(self, ElementKind::Wall | ElementKind::Obstacle)
    }
}

/// Width and height of a rectangle.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Size {
    /// Creates a new `Size`.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangular element of a floor plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapElement {
    /// What the element is; decides whether it blocks movement.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ElementKind,
    /// Display name. Racks are addressed by it when planning a route.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Top-left corner.
    pub position: WorldPoint,
    /// Extent of the rectangle.
    pub size: Size,
}

impl MapElement {
    /// Creates an element of the given kind.
    pub fn new(
        kind: ElementKind,
        name: impl Into<String>,
        position: WorldPoint,
        size: Size,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            position,
            size,
        }
    }

    /// Creates an unnamed wall with its top-left corner at `(x, y)`.
    pub fn wall(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            ElementKind::Wall,
            "",
            WorldPoint::new(x, y),
            Size::new(width, height),
        )
    }

    /// Creates an unnamed obstacle with its top-left corner at `(x, y)`.
    pub fn obstacle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            ElementKind::Obstacle,
            "",
            WorldPoint::new(x, y),
            Size::new(width, height),
        )
    }

    /// Creates a named rack with its top-left corner at `(x, y)`.
    pub fn rack(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            ElementKind::Rack,
            name,
            WorldPoint::new(x, y),
            Size::new(width, height),
        )
    }

    /// Returns `true` if this element blocks movement.
    pub fn is_blocking(&self) -> bool {
        self.kind.is_blocking()
    }
}

/// A single store floor: its grid extent and everything placed on it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloorPlan {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Elements placed on the floor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub elements: Vec<MapElement>,
}

impl FloorPlan {
    /// Creates an empty floor of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Adds an element, builder style.
    #[must_use]
    pub fn with_element(mut self, element: MapElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Iterates over the elements that block movement.
    pub fn obstacles(&self) -> impl Iterator<Item = &MapElement> {
        self.elements.iter().filter(|e| e.is_blocking())
    }

    /// Iterates over the racks.
    pub fn racks(&self) -> impl Iterator<Item = &MapElement> {
        self.elements.iter().filter(|e| e.kind == ElementKind::Rack)
    }

    /// Looks up a rack by name. The first rack with a matching name wins.
    pub fn rack(&self, name: &str) -> Option<&MapElement> {
        self.racks().find(|rack| rack.name == name)
    }

    /// Maps an ordered list of rack names to waypoints at the racks'
    /// positions, preserving order.
    ///
    /// Names that match no rack are dropped, so the result may be shorter
    /// than `names`.
    pub fn waypoints_for<S: AsRef<str>>(&self, names: &[S]) -> Vec<Waypoint> {
        names
            .iter()
            .filter_map(|name| self.rack(name.as_ref()))
            .map(|rack| Waypoint::new(rack.name.clone(), rack.position))
            .collect()
    }

    /// Rasterizes the floor's blocking elements into an occupancy grid.
    pub fn grid(&self) -> OccupancyGrid {
        compute_grid(self.width, self.height, &self.elements)
    }
}
