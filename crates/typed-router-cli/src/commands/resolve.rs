use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;
use typed_router::{Destination, MemoryHistory, Navigator, ParamValue, RouteTable};

use super::load_tree;
use crate::config::Config;

pub fn execute(config: &Config, href: &str) -> Result<()> {
    let table = Arc::new(RouteTable::new(load_tree(config)?));
    let navigator = Navigator::new(table, MemoryHistory::new()).with_options(config.matching);

    navigator
        .push(href)
        .with_context(|| format!("Cannot navigate to `{href}`"))?;

    let Some(action) = navigator.history().current() else {
        return Ok(());
    };

    match action.destination {
        Destination::External(url) => {
            println!("{} {}", "External:".yellow().bold(), url);
        }
        Destination::Route(result) => {
            println!("{} {}", "Route:".green().bold(), result.route);
            println!("{} {}", "Pathname:".green().bold(), result.pathname);
            println!("{} {}", "Href:".green().bold(), result.href());

            if !result.params.is_empty() {
                println!("{}", "Params:".green().bold());
                for (name, value) in &result.params {
                    println!("  {} = {}", name.cyan(), format_value(value));
                }
            }

            if !result.query.is_empty() {
                println!("{}", "Query:".green().bold());
                for (key, value) in &result.query {
                    println!("  {} = {:?}", key.cyan(), value);
                }
            }
        }
    }

    Ok(())
}

fn format_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Single(text) => format!("{text:?}"),
        ParamValue::Multiple(parts) => format!("{parts:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        fs::create_dir_all(app.join("files")).unwrap();
        fs::write(app.join("apple.tsx"), "").unwrap();
        fs::write(app.join("files/[...parts].tsx"), "").unwrap();

        let mut config = Config::default();
        config.routing.app_dir = app.to_string_lossy().to_string();
        (dir, config)
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let (_dir, config) = config();
        assert!(execute(&config, "/apple").is_ok());
        assert!(execute(&config, "/files/a/b?x=1").is_ok());
        assert!(execute(&config, "https://example.com").is_ok());
        assert!(execute(&config, "/banana").is_err());
        assert!(execute(&config, "banana").is_err());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&ParamValue::from("a")), "\"a\"");
        assert_eq!(format_value(&ParamValue::from(vec!["a", "b"])), "[\"a\", \"b\"]");
    }
}
