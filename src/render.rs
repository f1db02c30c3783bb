use aisle_navigation::{GridPoint, OccupancyGrid, Route};
use std::collections::HashSet;

/// Draws the grid with the route on top.
///
/// `#` blocked, `.` free, `*` route, `S` route start, digits mark the end of
/// each leg in visiting order (`+` past the ninth stop). Rows run top to
/// bottom in increasing `y`, matching floor-plan screen coordinates.
pub fn render_route(grid: &OccupancyGrid, route: &Route) -> String {
    let path: HashSet<GridPoint> = route.points().iter().copied().collect();
    let start = route.points().first().copied();
    let stops: Vec<GridPoint> = route
        .legs()
        .iter()
        .filter_map(|leg| leg.points.last().copied())
        .collect();

    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = GridPoint::new(x, y);
            let glyph = if let Some(stop) = stops.iter().rposition(|&s| s == cell) {
                char::from_digit(stop as u32 + 1, 10).unwrap_or('+')
            } else if start == Some(cell) {
                'S'
            } else if path.contains(&cell) {
                '*'
            } else if grid.is_blocked(cell) {
                '#'
            } else {
                '.'
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// One line per leg: stop name, cell count, cost.
pub fn summarize_route(route: &Route) -> String {
    let mut out = String::new();
    for (i, leg) in route.legs().iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {:<16} {:>4} cells  cost {:>8.3}\n",
            i + 1,
            leg.waypoint,
            leg.points.len(),
            leg.cost
        ));
    }
    for name in route.skipped() {
        out.push_str(&format!("    {:<16} unreachable\n", name));
    }
    out.push_str(&format!(
        "total: {} cells, cost {:.3}",
        route.len(),
        route.total_cost()
    ));
    out
}
