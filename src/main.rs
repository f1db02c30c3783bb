mod render; // ASCII map and leg summary
mod settings; // settings + floor plan loading

use aisle_navigation::{RouteConfig, optimize_route_with};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings::DEFAULT_SETTINGS_PATH.to_string());
    let settings = settings::load_settings(&settings_path)
        .with_context(|| format!("failed to load settings from {settings_path}"))?;
    settings
        .planner
        .validate()
        .context("invalid planner configuration")?;

    let floor = settings::load_floor_plan(&settings.floor_plan).with_context(|| {
        format!(
            "failed to load floor plan {}",
            settings.floor_plan.display()
        )
    })?;
    info!(
        width = floor.width,
        height = floor.height,
        elements = floor.elements.len(),
        racks = floor.racks().count(),
        "Floor plan loaded"
    );

    let stops = floor.waypoints_for(settings.route.as_slice());
    if stops.len() < settings.route.len() {
        let unknown: Vec<&str> = settings
            .route
            .iter()
            .filter(|name| floor.rack(name).is_none())
            .map(String::as_str)
            .collect();
        warn!(?unknown, "Route names racks that are not on this floor");
    }

    // The floor plan, not the planner defaults, decides the grid extent.
    let route_config = RouteConfig {
        grid_width: floor.width,
        grid_height: floor.height,
        ..settings.planner.route.clone()
    };
    route_config
        .validate()
        .context("floor plan has an empty grid")?;

    let route = optimize_route_with(
        &stops,
        &floor.elements,
        &route_config,
        &settings.planner.search,
    );

    for leg in route.legs() {
        info!(rack = %leg.waypoint, cells = leg.points.len(), cost = leg.cost, "Leg planned");
    }
    for name in route.skipped() {
        warn!(rack = %name, "Rack unreachable from the previous stop, skipped");
    }
    if route.is_empty() {
        warn!("No route to draw");
    }

    println!("{}", render::render_route(&floor.grid(), &route));
    println!("{}", render::summarize_route(&route));
    Ok(())
}
