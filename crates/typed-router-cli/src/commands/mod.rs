pub mod generate;
pub mod resolve;
pub mod routes;

use anyhow::{Context, Result};
use std::path::Path;
use typed_router::RouteTree;

use crate::config::Config;
use crate::scan::scan;

/// Scans the configured app directory and builds its route tree
pub fn load_tree(config: &Config) -> Result<RouteTree> {
    let app_dir = Path::new(&config.routing.app_dir);
    let paths = scan(app_dir, &config.routing.extensions)?;

    RouteTree::from_paths(&paths)
        .with_context(|| format!("Invalid routes in {:?}", app_dir))
}
