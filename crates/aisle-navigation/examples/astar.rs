use aisle_navigation::map::{GridPoint, MapElement, OccupancyGrid, WorldPoint, compute_grid};
use aisle_navigation::{SearchConfig, find_path_detailed};
use std::collections::HashSet;

fn main() {
    // A 12x10 floor with two shelving runs and a pillar
    let obstacles = vec![
        MapElement::obstacle(3.0, 0.0, 1.0, 7.0),
        MapElement::obstacle(7.0, 3.0, 1.0, 7.0),
        MapElement::wall(9.0, 1.0, 2.0, 1.0),
        // Racks never block, so this one does not show up on the grid
        MapElement::rack("Snacks", 5.0, 5.0, 1.0, 2.0),
    ];
    let grid = compute_grid(12, 10, &obstacles);

    let start = WorldPoint::new(0.5, 0.5);
    let goal = WorldPoint::new(11.2, 9.7);

    println!("Grid:");
    print_grid(&grid, None);
    println!("\nStart: {:?}", start);
    println!("Goal: {:?}", goal);

    let result = find_path_detailed(&grid, start, goal, &SearchConfig::default());
    println!("\n{}", result);

    if let Some(path) = &result.path {
        let path_set: HashSet<GridPoint> = path.iter().copied().collect();
        println!("\nGrid with path:");
        print_grid(&grid, Some(&path_set));
    } else {
        println!("\nNo path found.");
    }
}

fn print_grid(grid: &OccupancyGrid, path: Option<&HashSet<GridPoint>>) {
    for y in 0..grid.height() {
        print!("{} ", y);
        for x in 0..grid.width() {
            let cell = GridPoint::new(x, y);
            if path.is_some_and(|p| p.contains(&cell)) {
                print!("* ");
            } else if grid.is_blocked(cell) {
                print!("X ");
            } else {
                print!(". ");
            }
        }
        println!();
    }

    print!("  ");
    for x in 0..grid.width() {
        print!("{} ", x % 10);
    }
    println!();
}
