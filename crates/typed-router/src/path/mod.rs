/// Href path handling
///
/// Canonical form, splitting into decoded segments, and relative resolution.
/// Nothing here touches the route tree.
use std::borrow::Cow;

/// Whether `path` is already canonical: a leading `/`, no empty segments,
/// no trailing `/` except for the root itself, no backslashes
///
/// # Examples
///
/// ```
/// use typed_router::path::is_canonical;
///
/// assert!(is_canonical("/"));
/// assert!(is_canonical("/colors/red"));
///
/// assert!(!is_canonical("colors"));
/// assert!(!is_canonical("/colors/"));
/// assert!(!is_canonical("/colors//red"));
/// assert!(!is_canonical("\\colors"));
/// ```
pub fn is_canonical(path: &str) -> bool {
    match path.strip_prefix('/') {
        Some("") => true,
        Some(rest) => !rest.contains('\\') && !rest.split('/').any(str::is_empty),
        None => false,
    }
}

/// Rewrites `path` into canonical form, borrowing when it already is
///
/// Backslashes count as separators; empty segments are dropped.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
/// use typed_router::path::canonicalize;
///
/// assert!(matches!(canonicalize("/apple"), Cow::Borrowed("/apple")));
/// assert_eq!(canonicalize("colors//red/"), "/colors/red");
/// assert_eq!(canonicalize("\\files\\a"), "/files/a");
/// ```
pub fn canonicalize(path: &str) -> Cow<'_, str> {
    if is_canonical(path) {
        return Cow::Borrowed(path);
    }

    let mut canonical = String::with_capacity(path.len() + 1);
    for segment in path.split(['/', '\\']).filter(|s| !s.is_empty()) {
        canonical.push('/');
        canonical.push_str(segment);
    }

    if canonical.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(canonical)
    }
}

/// A string href taken apart for matching
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitPath {
    /// Percent-decoded path segments
    pub segments: Vec<String>,
    /// Percent-decoded `?key=value` pairs in order of appearance
    pub query: Vec<(String, String)>,
    /// Raw `#fragment`, without the `#`
    pub fragment: Option<String>,
}

/// Splits a path href into decoded segments, query pairs and fragment
///
/// # Examples
///
/// ```
/// use typed_router::path::split_path;
///
/// let split = split_path("/files/a%20b/c/?sort=asc#top");
/// assert_eq!(split.segments, vec!["files", "a b", "c"]);
/// assert_eq!(split.query, vec![("sort".to_string(), "asc".to_string())]);
/// assert_eq!(split.fragment.as_deref(), Some("top"));
/// ```
pub fn split_path(href: &str) -> SplitPath {
    let (rest, fragment) = match href.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment.to_string())),
        None => (href, None),
    };
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

    let segments = canonicalize(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode_segment)
        .collect();

    let query = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_query(key), decode_query(value))
        })
        .collect();

    SplitPath {
        segments,
        query,
        fragment,
    }
}

/// Joins `relative` (`./x`, `../x`) onto the directory of `base`
///
/// # Examples
///
/// ```
/// use typed_router::path::resolve_relative;
///
/// assert_eq!(resolve_relative("/colors/red", "./blue"), "/colors/blue");
/// assert_eq!(resolve_relative("/colors/red", "../apple"), "/apple");
/// assert_eq!(resolve_relative("/", "../../apple"), "/apple");
/// ```
pub fn resolve_relative(base: &str, relative: &str) -> String {
    let (relative, suffix) = match relative.find(['?', '#']) {
        Some(idx) => relative.split_at(idx),
        None => (relative, ""),
    };

    let mut stack: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    stack.pop();

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    format!("/{}{}", stack.join("/"), suffix)
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

// Forms encode spaces as `+` in the query string only
fn decode_query(raw: &str) -> String {
    decode_segment(&raw.replace('+', " "))
}
