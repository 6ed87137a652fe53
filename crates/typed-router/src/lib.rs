//! # Typed Router
//!
//! Static route typing and matching for file-system routers:
//! - Static routes (`/apple`)
//! - Dynamic segments (`/colors/[color]`)
//! - Catch-all segments (`/files/[...parts]`)
//! - Optional catch-all segments (`/docs/[[...slug]]`)
//! - Groups that organise routes without adding a segment (`/(shop)/cart`)
//!
//! ## Pipeline
//!
//! Declared paths are parsed into segment descriptors, inserted into an
//! arena-backed route tree, and matched by recursive descent with fixed
//! precedence: static, then dynamic, then catch-all. Each route's parameter
//! contract is derived from the tree, and emitters turn tree plus contracts
//! into TypeScript declarations, a Rust module or a JSON manifest.
//!
//! ## Hot Reload
//!
//! A built tree is immutable. `RouteTable` publishes rebuilt trees with a
//! single atomic swap; readers hold an `Arc` snapshot for the duration of a
//! navigation.
//!
//! ## Example
//!
//! ```
//! use typed_router::{matcher::match_path, MatchOptions, ParamValue, RouteTree};
//!
//! let tree = RouteTree::from_paths([
//!     "/apple",
//!     "/colors/red",
//!     "/colors/[color]",
//!     "/files/[...parts]",
//! ])
//! .unwrap();
//!
//! let result = match_path(&tree, "/colors/blue", MatchOptions::default()).unwrap();
//! assert_eq!(result.route, "/colors/[color]");
//! assert_eq!(result.params["color"], ParamValue::from("blue"));
//!
//! let result = match_path(&tree, "/colors/red", MatchOptions::default()).unwrap();
//! assert_eq!(result.route, "/colors/red");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod contract;
pub mod emit;
pub mod error;
pub mod href;
pub mod matcher;
pub mod navigation;
pub mod path;
pub mod route;
pub mod tree;

pub use contract::{Contracts, ParamContract, ParamKind, ParamSpec};
pub use emit::{
    EmitOptions, EmitTarget, Emitter, ManifestEmitter, RustEmitter, TypeScriptEmitter,
};
pub use error::{BuildError, MatchError, ParseError, Result, RouterError};
pub use href::{Href, HrefKind};
pub use matcher::{Backtracking, MatchOptions, MatchResult, ParamValue, Params};
pub use navigation::{
    use_global_search_params, use_global_search_params_for, use_search_params,
    use_search_params_for, use_segments, use_segments_for, Destination, History, MemoryHistory,
    NavigationAction, NavigationKind, Navigator, RouteContext, TypedRoute,
};
pub use route::{RoutePattern, SegmentDescriptor};
pub use tree::{NodeId, RouteTable, RouteTree, RouteTreeNode};
