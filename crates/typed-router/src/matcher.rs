/// Route matching
///
/// Recursive descent over the route tree with fixed precedence at every
/// level: static child, then dynamic child, then catch-all child. The first
/// branch that consumes the whole input and ends on a route wins.
use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::contract::ParamContract;
use crate::error::MatchError;
use crate::href::{Href, HrefKind};
use crate::path::split_path;
use crate::route::{classify_segment, RoutePattern, SegmentDescriptor};
use crate::tree::{NodeId, RouteTree};

/// A bound parameter value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Value of a `[name]` segment
    Single(String),
    /// Values of a `[...name]` or `[[...name]]` segment, in path order
    Multiple(Vec<String>),
}

impl ParamValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multiple(_) => None,
        }
    }

    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            Self::Single(_) => None,
            Self::Multiple(values) => Some(values),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for ParamValue {
    fn from(values: Vec<S>) -> Self {
        Self::Multiple(values.into_iter().map(Into::into).collect())
    }
}

/// Parameter name → bound value
pub type Params = BTreeMap<String, ParamValue>;

/// How far the matcher falls back after a deeper descent fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backtracking {
    /// A failed static descent falls back to the dynamic child, then to the
    /// catch-all child, at the same level
    #[default]
    Full,
    /// The first edge that accepts the current segment is final
    Committed,
}

impl FromStr for Backtracking {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "committed" => Ok(Self::Committed),
            other => Err(format!(
                "unknown backtracking policy `{other}` (expected full or committed)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchOptions {
    #[serde(default)]
    pub backtracking: Backtracking,
}

impl MatchOptions {
    pub fn with_backtracking(mut self, backtracking: Backtracking) -> Self {
        self.backtracking = backtracking;
        self
    }
}

/// The route an href resolved to and the values it bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Declared identity of the matched route
    pub route: String,
    /// Canonical pathname of the matched route
    pub pathname: String,
    pub params: Params,
    /// `?key=value` pairs of a string href, never route params
    pub query: Vec<(String, String)>,
}

impl MatchResult {
    fn new(pattern: &RoutePattern, params: Params) -> Self {
        Self {
            route: pattern.declared().to_string(),
            pathname: pattern.pathname(),
            params,
            query: Vec::new(),
        }
    }

    /// Single-valued params only; catch-all arrays are left out
    pub fn string_params(&self) -> BTreeMap<String, String> {
        self.params
            .iter()
            .filter_map(|(name, value)| value.as_single().map(|v| (name.clone(), v.to_string())))
            .collect()
    }

    /// Pattern segments of the matched route: `["colors", "[color]"]`
    pub fn segments(&self) -> Vec<String> {
        self.pathname
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Concrete path with every bound value substituted into the pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_router::{matcher::match_path, MatchOptions, RouteTree};
    ///
    /// let tree = RouteTree::from_paths(["/files/[...parts]"]).unwrap();
    /// let result = match_path(&tree, "/files/a%20b/c?v=1", MatchOptions::default()).unwrap();
    /// assert_eq!(result.href(), "/files/a%20b/c?v=1");
    /// ```
    pub fn href(&self) -> String {
        let mut path = String::new();

        for segment in self.segments() {
            let descriptor = classify_segment(&segment);
            let bound = descriptor
                .as_ref()
                .and_then(SegmentDescriptor::param_name)
                .and_then(|name| self.params.get(name));

            let values = match (bound, descriptor) {
                (Some(ParamValue::Single(value)), _) => vec![value.clone()],
                (Some(ParamValue::Multiple(values)), _) => values.clone(),
                (None, Some(SegmentDescriptor::OptionalCatchAll(_))) => Vec::new(),
                (None, _) => vec![segment],
            };

            for value in values {
                path.push('/');
                path.push_str(&urlencoding::encode(&value));
            }
        }

        if path.is_empty() {
            path.push('/');
        }

        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            path.push('?');
            path.push_str(&query);
        }

        path
    }
}

/// Matches already-split path segments against the tree
///
/// # Examples
///
/// ```
/// use typed_router::{matcher::match_segments, MatchOptions, ParamValue, RouteTree};
///
/// let tree = RouteTree::from_paths(["/colors/red", "/colors/[color]"]).unwrap();
///
/// let result = match_segments(&tree, &["colors", "red"], MatchOptions::default()).unwrap();
/// assert_eq!(result.route, "/colors/red");
///
/// let result = match_segments(&tree, &["colors", "blue"], MatchOptions::default()).unwrap();
/// assert_eq!(result.params["color"], ParamValue::from("blue"));
/// ```
pub fn match_segments<S: AsRef<str>>(
    tree: &RouteTree,
    segments: &[S],
    options: MatchOptions,
) -> Result<MatchResult, MatchError> {
    let segments: Vec<&str> = segments
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .collect();

    let mut bindings = Vec::new();
    let found = descend(tree, RouteTree::ROOT, &segments, &mut bindings, options.backtracking);

    trace!(input = ?segments, matched = ?found.map(RoutePattern::declared), "match attempt");

    found
        .map(|pattern| MatchResult::new(pattern, bindings.into_iter().collect()))
        .ok_or_else(|| MatchError::NotFound(format!("/{}", segments.join("/"))))
}

fn descend<'t>(
    tree: &'t RouteTree,
    id: NodeId,
    segments: &[&str],
    bindings: &mut Vec<(String, ParamValue)>,
    policy: Backtracking,
) -> Option<&'t RoutePattern> {
    let node = tree.node(id);

    let Some((head, rest)) = segments.split_first() else {
        if let Some(pattern) = node.terminal() {
            return Some(pattern);
        }

        // `/docs` reaches `/docs/[[...slug]]` with nothing to bind
        return match node.catch_all_child() {
            Some((SegmentDescriptor::OptionalCatchAll(name), child)) => {
                let pattern = tree.node(child).terminal()?;
                bindings.push((name.clone(), ParamValue::Multiple(Vec::new())));
                Some(pattern)
            }
            _ => None,
        };
    };

    let mark = bindings.len();

    if let Some(child) = node.static_child(head) {
        if let Some(pattern) = descend(tree, child, rest, bindings, policy) {
            return Some(pattern);
        }
        bindings.truncate(mark);

        if policy == Backtracking::Committed {
            return None;
        }
    }

    if let Some((name, child)) = node.dynamic_child() {
        bindings.push((name.to_string(), ParamValue::Single(head.to_string())));
        if let Some(pattern) = descend(tree, child, rest, bindings, policy) {
            return Some(pattern);
        }
        bindings.truncate(mark);

        if policy == Backtracking::Committed {
            return None;
        }
    }

    // Catch-alls take everything that is left; nothing hangs below them
    let (edge, child) = node.catch_all_child()?;
    let pattern = tree.node(child).terminal()?;
    let name = edge.param_name()?;
    bindings.push((
        name.to_string(),
        ParamValue::Multiple(segments.iter().map(|s| s.to_string()).collect()),
    ));
    Some(pattern)
}

/// Matches a raw absolute path string
///
/// The path is normalized, its query and fragment are split off, and each
/// segment is percent-decoded before matching. Query pairs are kept on the
/// result.
pub fn match_path(
    tree: &RouteTree,
    path: &str,
    options: MatchOptions,
) -> Result<MatchResult, MatchError> {
    let split = split_path(path);

    let mut result = match_segments(tree, &split.segments, options)
        .map_err(|_| MatchError::NotFound(path.to_string()))?;
    result.query = split.query;
    Ok(result)
}

/// Matches an object-form href: a declared pathname plus its params
///
/// # Examples
///
/// ```
/// use typed_router::{matcher::match_object, MatchError, ParamValue, Params, RouteTree};
///
/// let tree = RouteTree::from_paths(["/colors/[color]"]).unwrap();
///
/// let mut params = Params::new();
/// params.insert("color".to_string(), ParamValue::from("red"));
/// let result = match_object(&tree, "/colors/[color]", &params).unwrap();
/// assert_eq!(result.href(), "/colors/red");
///
/// let err = match_object(&tree, "/colors/[color]", &Params::new()).unwrap_err();
/// assert!(matches!(err, MatchError::ParamShapeMismatch { .. }));
/// ```
pub fn match_object(
    tree: &RouteTree,
    pathname: &str,
    params: &Params,
) -> Result<MatchResult, MatchError> {
    // Object-form pathnames follow the same rule as string hrefs
    if HrefKind::of(pathname) != HrefKind::Absolute {
        return Err(MatchError::InvalidHref(pathname.to_string()));
    }

    let pattern = tree
        .find(pathname)
        .ok_or_else(|| MatchError::NotFound(pathname.to_string()))?;

    ParamContract::for_pattern(pattern).check(params)?;

    Ok(MatchResult::new(pattern, params.clone()))
}

/// Resolves an absolute or object-form href
///
/// Relative and external hrefs need a navigation context and are rejected
/// here with `InvalidHref`; the navigation façade handles them.
pub fn resolve(
    tree: &RouteTree,
    href: &Href,
    options: MatchOptions,
) -> Result<MatchResult, MatchError> {
    match href {
        Href::Path(path) => match HrefKind::of(path) {
            HrefKind::Absolute => match_path(tree, path, options),
            HrefKind::Relative | HrefKind::External | HrefKind::Invalid => {
                Err(MatchError::InvalidHref(path.clone()))
            }
        },
        Href::Object { pathname, params } => match_object(tree, pathname, params),
    }
}
