// File: src/config.rs
// Purpose: Configuration parsing from typed-router.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use typed_router::{EmitOptions, EmitTarget, MatchOptions};

pub const DEFAULT_CONFIG_FILE: &str = "typed-router.toml";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub emit: EmitConfig,

    #[serde(default)]
    pub matching: MatchOptions,
}

/// Where routes are declared
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Directory scanned for route files (default: "app")
    #[serde(default = "default_app_dir")]
    pub app_dir: String,

    /// File extensions that declare routes
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Generated artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitConfig {
    #[serde(default)]
    pub target: EmitTarget,

    /// Output path; derived from the target when unset
    #[serde(default)]
    pub out_file: Option<String>,

    #[serde(default = "default_module_name")]
    pub module_name: String,

    #[serde(default = "default_crate_path")]
    pub crate_path: String,
}

// Default values
fn default_app_dir() -> String {
    "app".to_string()
}

fn default_extensions() -> Vec<String> {
    ["tsx", "ts", "jsx", "js"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_module_name() -> String {
    EmitOptions::default().module_name
}

fn default_crate_path() -> String {
    EmitOptions::default().crate_path
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            app_dir: default_app_dir(),
            extensions: default_extensions(),
        }
    }
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            target: EmitTarget::default(),
            out_file: None,
            module_name: default_module_name(),
            crate_path: default_crate_path(),
        }
    }
}

impl EmitConfig {
    pub fn options(&self) -> EmitOptions {
        EmitOptions {
            module_name: self.module_name.clone(),
            crate_path: self.crate_path.clone(),
        }
    }

    /// Configured output path, or `routes.<extension>` for the target
    pub fn out_path(&self) -> PathBuf {
        match &self.out_file {
            Some(path) => PathBuf::from(path),
            None => {
                let extension = self.target.emitter(&self.options()).extension();
                PathBuf::from(format!("routes.{extension}"))
            }
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // A missing or empty file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }
}
