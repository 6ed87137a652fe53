use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing::info;
use typed_router::contract::derive;

use super::load_tree;
use crate::config::Config;

/// What `generate` did with the artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    Unchanged,
}

pub fn execute(config: &Config, check: bool) -> Result<()> {
    let out = config.emit.out_path();

    println!("{}", "Generating route declarations...".green().bold());
    println!();
    println!("App directory: {}", config.routing.app_dir.cyan());
    println!("Target: {}", config.emit.target.to_string().cyan());
    println!("Output: {}", out.display().to_string().cyan());
    println!();

    let artifact = render(config)?;

    if check {
        if is_current(&out, &artifact) {
            println!("{}", "✓ Route declarations are up to date".green());
            return Ok(());
        }
        bail!(
            "{} is out of date; run `typed-router generate`",
            out.display()
        );
    }

    match write_if_changed(&out, &artifact)? {
        Outcome::Written => println!("{}", "✓ Route declarations written".green()),
        Outcome::Unchanged => println!("{}", "✓ Route declarations unchanged".green()),
    }

    Ok(())
}

/// Builds the tree and renders the configured artifact
pub fn render(config: &Config) -> Result<String> {
    let tree = load_tree(config)?;
    let contracts = derive(&tree);
    let emitter = config.emit.target.emitter(&config.emit.options());

    info!(routes = tree.len(), target = %config.emit.target, "emitting");
    Ok(emitter.emit(&tree, &contracts))
}

fn is_current(out: &Path, artifact: &str) -> bool {
    fs::read_to_string(out).is_ok_and(|existing| existing == artifact)
}

/// Writes `artifact` unless `out` already holds exactly these bytes
pub fn write_if_changed(out: &Path, artifact: &str) -> Result<Outcome> {
    if is_current(out, artifact) {
        return Ok(Outcome::Unchanged);
    }

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    fs::write(out, artifact).with_context(|| format!("Failed to write {:?}", out))?;
    Ok(Outcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use typed_router::EmitTarget;

    fn project() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        fs::create_dir_all(app.join("colors")).unwrap();
        fs::write(app.join("index.tsx"), "").unwrap();
        fs::write(app.join("colors/[color].tsx"), "").unwrap();

        let mut config = Config::default();
        config.routing.app_dir = app.to_string_lossy().to_string();
        config.emit.out_file = Some(
            dir.path()
                .join("types/routes.d.ts")
                .to_string_lossy()
                .to_string(),
        );
        (dir, config)
    }

    #[test]
    fn test_write_only_when_changed() {
        let (_dir, config) = project();
        let out = config.emit.out_path();
        let artifact = render(&config).unwrap();

        assert_eq!(write_if_changed(&out, &artifact).unwrap(), Outcome::Written);
        assert_eq!(write_if_changed(&out, &artifact).unwrap(), Outcome::Unchanged);
        assert_eq!(fs::read_to_string(&out).unwrap(), artifact);
    }

    #[test]
    fn test_check_detects_stale_artifact() {
        let (_dir, config) = project();
        assert!(execute(&config, true).is_err());

        execute(&config, false).unwrap();
        assert!(execute(&config, true).is_ok());
    }

    #[test]
    fn test_render_other_targets() {
        let (_dir, mut config) = project();
        config.emit.target = EmitTarget::Rust;
        assert!(render(&config).unwrap().contains("pub enum RouteId"));

        config.emit.target = EmitTarget::Manifest;
        assert!(render(&config).unwrap().contains("\"/colors/[color]\""));
    }

    #[test]
    fn test_invalid_routes_fail() {
        let (dir, config) = project();
        fs::write(dir.path().join("app/colors/[shade].tsx"), "").unwrap();
        let err = render(&config).unwrap_err();
        assert!(format!("{err:#}").contains("conflicts"));
    }
}
