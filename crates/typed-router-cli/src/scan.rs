use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::path::{Component, Path};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Collects the declared route paths under `app_dir`, sorted and deduplicated
///
/// Symlinked directories are followed. Any entry that cannot be read fails
/// the scan rather than dropping the routes below it.
pub fn scan(app_dir: &Path, extensions: &[String]) -> Result<Vec<String>> {
    if !app_dir.is_dir() {
        bail!("App directory not found: {:?}", app_dir);
    }

    let mut routes = BTreeSet::new();

    for entry in WalkDir::new(app_dir).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to scan {:?}", app_dir))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(app_dir).unwrap_or(entry.path());
        match route_path(relative, extensions) {
            Some(route) => {
                trace!(file = ?relative, %route, "route file");
                routes.insert(route);
            }
            None => trace!(file = ?relative, "skipped"),
        }
    }

    debug!(count = routes.len(), dir = ?app_dir, "scanned app directory");
    Ok(routes.into_iter().collect())
}

/// Maps a file path relative to the app directory to its route path
///
/// The extension is stripped and an `index` file stands for its directory.
/// Layouts (`_layout`), special files (`+html`, `+not-found`) and hidden
/// files declare no route.
pub fn route_path(relative: &Path, extensions: &[String]) -> Option<String> {
    let extension = relative.extension()?.to_str()?;
    if !extensions.iter().any(|ext| ext == extension) {
        return None;
    }

    let stem = relative.file_stem()?.to_str()?;
    // `types.d.ts` and friends
    if stem.contains('.') || stem == "_layout" || stem.starts_with('+') {
        return None;
    }

    let mut segments = Vec::new();
    for component in relative.parent()?.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str()?;
                if name.starts_with('.') {
                    return None;
                }
                segments.push(name);
            }
            Component::CurDir => {}
            _ => return None,
        }
    }

    if stem != "index" {
        segments.push(stem);
    }

    Some(format!("/{}", segments.join("/")))
}
