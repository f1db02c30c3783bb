use aisle_navigation::map::{FloorPlan, MapElement};
use aisle_navigation::{RouteConfig, SearchConfig, StitchMode, optimize_route_with};

fn main() {
    let floor = FloorPlan::new(40, 20)
        .with_element(MapElement::wall(0.0, 0.0, 40.0, 1.0))
        .with_element(MapElement::obstacle(15.0, 1.0, 2.0, 12.0))
        .with_element(MapElement::obstacle(26.0, 7.0, 2.0, 13.0))
        .with_element(MapElement::rack("Produce", 4.0, 3.0, 3.0, 2.0))
        .with_element(MapElement::rack("Bakery", 20.0, 4.0, 3.0, 2.0))
        .with_element(MapElement::rack("Dairy", 33.0, 16.0, 3.0, 2.0));

    // The order comes from the shopping assistant; unknown names are dropped.
    let shopping_list = ["Bakery", "Dairy", "Candles", "Produce"];
    let stops = floor.waypoints_for(&shopping_list);
    println!("Resolved {} of {} stops", stops.len(), shopping_list.len());

    let search = SearchConfig::default();
    for stitch in [StitchMode::NominalWaypoint, StitchMode::LastPathCell] {
        let config = RouteConfig {
            stitch,
            ..RouteConfig::default().with_grid_size(floor.width, floor.height)
        };
        let route = optimize_route_with(&stops, &floor.elements, &config, &search);

        println!("\n{:?}: {} cells, cost {:.3}", stitch, route.len(), route.total_cost());
        for leg in route.legs() {
            let end = leg.points.last().copied().unwrap_or_default();
            println!("  -> {:<8} at {} ({} cells)", leg.waypoint, end, leg.points.len());
        }
        for name in route.skipped() {
            println!("  skipped {}", name);
        }
    }
}
