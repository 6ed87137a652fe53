/// Route declaration artifacts
///
/// Every emitter is a pure function of the tree and its contracts: the same
/// input always yields byte-identical output, so regenerated files diff
/// cleanly.
pub mod manifest;
pub mod rust;
pub mod typescript;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::contract::Contracts;
use crate::tree::RouteTree;

pub use manifest::ManifestEmitter;
pub use rust::RustEmitter;
pub use typescript::TypeScriptEmitter;

/// Renders a route tree into a textual artifact
pub trait Emitter {
    fn emit(&self, tree: &RouteTree, contracts: &Contracts) -> String;

    /// Conventional file extension of the artifact, without the dot
    fn extension(&self) -> &'static str;
}

/// Which artifact to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitTarget {
    #[default]
    TypeScript,
    Rust,
    Manifest,
}

impl EmitTarget {
    pub fn emitter(self, options: &EmitOptions) -> Box<dyn Emitter> {
        match self {
            Self::TypeScript => Box::new(TypeScriptEmitter::new(&options.module_name)),
            Self::Rust => Box::new(RustEmitter::new(&options.crate_path)),
            Self::Manifest => Box::new(ManifestEmitter),
        }
    }
}

impl fmt::Display for EmitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TypeScript => "typescript",
            Self::Rust => "rust",
            Self::Manifest => "manifest",
        })
    }
}

impl FromStr for EmitTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "rust" | "rs" => Ok(Self::Rust),
            "manifest" | "json" => Ok(Self::Manifest),
            other => Err(format!(
                "unknown emit target `{other}` (expected typescript, rust or manifest)"
            )),
        }
    }
}

/// Knobs shared by the emitters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Module the TypeScript declarations are attached to
    pub module_name: String,
    /// Path generated Rust code uses to reach this crate
    pub crate_path: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            module_name: "router".to_string(),
            crate_path: "::typed_router".to_string(),
        }
    }
}

/// TypeScript declarations for `tree` with the default module name
///
/// # Examples
///
/// ```
/// use typed_router::{contract::derive, emit::emit, RouteTree};
///
/// let tree = RouteTree::from_paths(["/apple", "/colors/[color]"]).unwrap();
/// let contracts = derive(&tree);
///
/// let first = emit(&tree, &contracts);
/// assert_eq!(first, emit(&tree, &contracts));
/// assert!(first.contains("`/colors/${SingleRoutePart<T>}`"));
/// ```
#[instrument(level = "debug", skip_all)]
pub fn emit(tree: &RouteTree, contracts: &Contracts) -> String {
    let out = TypeScriptEmitter::default().emit(tree, contracts);
    debug!(routes = tree.len(), bytes = out.len(), "declarations emitted");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_str() {
        assert_eq!("typescript".parse(), Ok(EmitTarget::TypeScript));
        assert_eq!("RS".parse(), Ok(EmitTarget::Rust));
        assert_eq!("json".parse(), Ok(EmitTarget::Manifest));
        assert!("yaml".parse::<EmitTarget>().is_err());
    }

    #[test]
    fn test_target_display_round_trips() {
        for target in [EmitTarget::TypeScript, EmitTarget::Rust, EmitTarget::Manifest] {
            assert_eq!(target.to_string().parse(), Ok(target));
        }
    }

    #[test]
    fn test_emitter_extensions() {
        let options = EmitOptions::default();
        assert_eq!(EmitTarget::TypeScript.emitter(&options).extension(), "d.ts");
        assert_eq!(EmitTarget::Rust.emitter(&options).extension(), "rs");
        assert_eq!(EmitTarget::Manifest.emitter(&options).extension(), "json");
    }
}
