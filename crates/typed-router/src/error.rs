/// Error types for parsing, building and matching routes
///
/// Parse and build errors are configuration errors: they abort tree
/// construction. Match errors are per-request and never retried.
use thiserror::Error;

/// Malformed route segment grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A catch-all was followed by another non-group segment
    #[error("catch-all segment `{segment}` must be the last segment in `{path}`")]
    MisplacedCatchAll { path: String, segment: String },

    /// Empty, unbalanced or otherwise unusable bracketed/grouped name
    #[error("invalid segment `{segment}` in `{path}`")]
    InvalidSegmentName { path: String, segment: String },

    /// The same parameter name is bound twice in one route
    #[error("parameter `{name}` is declared more than once in `{path}`")]
    DuplicateParamName { path: String, name: String },
}

/// Duplicate or conflicting routes in a route set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("route `{1}` duplicates `{0}`")]
    DuplicateRoute(String, String),

    #[error("dynamic segment `[{conflicting}]` in `{route}` conflicts with `[{existing}]` at the same position")]
    ConflictingDynamicName {
        route: String,
        existing: String,
        conflicting: String,
    },

    #[error("catch-all `{conflicting}` in `{route}` conflicts with `{existing}` at the same position")]
    ConflictingCatchAll {
        route: String,
        existing: String,
        conflicting: String,
    },
}

/// A navigation request that resolves to no route, or to the wrong shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("no route matches `{0}`")]
    NotFound(String),

    #[error(
        "params for `{pathname}` do not match its contract (missing: {missing:?}, unexpected: {unexpected:?}, mistyped: {mistyped:?})"
    )]
    ParamShapeMismatch {
        pathname: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
        mistyped: Vec<String>,
    },

    #[error("expected the current route to be `{expected}`, found `{actual}`")]
    RouteMismatch { expected: String, actual: String },

    #[error("`{0}` is not an absolute, relative or external href")]
    InvalidHref(String),
}

/// Anything that can go wrong while turning declared paths into a tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

pub type Result<T, E = RouterError> = std::result::Result<T, E>;
