use aisle_navigation::map::{FloorPlan, GridPoint, MapElement, WorldPoint};
use aisle_navigation::{Heuristic, PathFinder, SearchConfig};
use rand::Rng;

fn main() {
    let (width, height) = (30, 20);
    let mut floor = FloorPlan::new(width, height);

    let mut rng = rand::rng();
    let num_obstacles = 25;
    println!("Generating {} random obstacles...", num_obstacles);
    for _ in 0..num_obstacles {
        let x = rng.random_range(0..width) as f64;
        let y = rng.random_range(0..height) as f64;
        let w = rng.random_range(1..=4) as f64;
        let h = rng.random_range(1..=4) as f64;
        floor.elements.push(MapElement::obstacle(x, y, w, h));
    }

    let grid = floor.grid();
    println!("{}", grid);

    let start = WorldPoint::new(0.0, 0.0);
    let goal = WorldPoint::from(GridPoint::new(width - 1, height - 1));

    // Compare the default Manhattan estimate with the admissible ones.
    for heuristic in [
        Heuristic::Manhattan,
        Heuristic::Octile,
        Heuristic::Chebyshev,
        Heuristic::Euclidean,
    ] {
        let config = SearchConfig {
            heuristic,
            ..SearchConfig::default()
        };
        let finder = PathFinder::with_config(grid.clone(), config);
        println!("{:<10} {}", format!("{:?}", heuristic), finder.find_path_detailed(start, goal));
    }
}
