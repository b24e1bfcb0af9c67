use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use route_core::client::HttpRouteBackend;
use route_core::config::{ConfigOverrides, PlannerConfig};
use route_core::planner::RoutePlanner;

mod app;
mod ui;

use app::PlannerApp;

#[derive(Parser)]
#[command(name = "route_ui", about = "Desktop front end for the routing backend")]
struct Cli {
    /// Configuration file (defaults to ./route_planner.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Routing backend base URL
    #[arg(long, env = "ROUTE_PLANNER_BASE_URL")]
    base_url: Option<String>,
    /// Per-request timeout in seconds; requests wait indefinitely when unset
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Path of a separate bounding-box endpoint, e.g. api/get_boundaries/
    #[arg(long)]
    boundaries_path: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = PlannerConfig::load(cli.config.as_deref())?.with_overrides(ConfigOverrides {
        base_url: cli.base_url,
        request_timeout_secs: cli.timeout_secs,
        boundaries_path: cli.boundaries_path,
    })?;
    let backend = HttpRouteBackend::new(&config)?;
    let route_url = backend.route_url().to_string();
    let planner = RoutePlanner::new(Arc::new(backend));

    ui::app_shell::run(PlannerApp::new(planner, &config, route_url))?;
    Ok(())
}
