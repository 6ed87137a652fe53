/// Segment classification for file-based route paths
///
/// Pure parsing of a single path segment into a typed descriptor.
/// Same input → same output, no side effects.
use std::fmt;

/// One segment of a declared route path
///
/// Sum type for pattern matching route segments.
///
/// # Examples
///
/// ```
/// use typed_router::route::pattern::{classify_segment, SegmentDescriptor};
///
/// let seg = classify_segment("about").unwrap();
/// assert!(matches!(seg, SegmentDescriptor::Static(_)));
///
/// let seg = classify_segment("[id]").unwrap();
/// assert!(matches!(seg, SegmentDescriptor::Dynamic(_)));
///
/// let seg = classify_segment("[...slug]").unwrap();
/// assert!(matches!(seg, SegmentDescriptor::CatchAll(_)));
///
/// let seg = classify_segment("[[...slug]]").unwrap();
/// assert!(matches!(seg, SegmentDescriptor::OptionalCatchAll(_)));
///
/// let seg = classify_segment("(auth)").unwrap();
/// assert!(matches!(seg, SegmentDescriptor::Group(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentDescriptor {
    /// Literal text: `about`
    Static(String),
    /// Single captured segment: `[id]`
    Dynamic(String),
    /// One or more trailing segments: `[...slug]`
    CatchAll(String),
    /// Zero or more trailing segments: `[[...slug]]`
    OptionalCatchAll(String),
    /// Organizational folder, erased before matching: `(auth)`
    Group(String),
}

impl SegmentDescriptor {
    /// Name bound by this segment, if it binds one
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::Dynamic(name) | Self::CatchAll(name) | Self::OptionalCatchAll(name) => {
                Some(name)
            }
            Self::Static(_) | Self::Group(_) => None,
        }
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Self::CatchAll(_) | Self::OptionalCatchAll(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl fmt::Display for SegmentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.write_str(text),
            Self::Dynamic(name) => write!(f, "[{name}]"),
            Self::CatchAll(name) => write!(f, "[...{name}]"),
            Self::OptionalCatchAll(name) => write!(f, "[[...{name}]]"),
            Self::Group(label) => write!(f, "({label})"),
        }
    }
}

/// Classifies a segment into a descriptor (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Group**: `(label)`
/// 2. **Optional catch-all**: `[[...name]]`
/// 3. **Catch-all**: `[...name]`
/// 4. **Dynamic**: `[name]`
/// 5. **Static**: any text without brackets
///
/// Returns `None` when the segment uses brackets or parentheses but the
/// name inside is unusable; the caller turns that into a `ParseError`
/// carrying the full path.
pub fn classify_segment(segment: &str) -> Option<SegmentDescriptor> {
    if let Some(label) = segment.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        return (!label.is_empty() && !label.contains(['(', ')']))
            .then(|| SegmentDescriptor::Group(label.to_string()));
    }

    if let Some(inner) = segment.strip_prefix("[[").and_then(|s| s.strip_suffix("]]")) {
        // `[[name]]` without the spread is not part of the grammar
        return inner
            .strip_prefix("...")
            .and_then(valid_param_name)
            .map(SegmentDescriptor::OptionalCatchAll);
    }

    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => match inner.strip_prefix("...") {
            Some(name) => valid_param_name(name).map(SegmentDescriptor::CatchAll),
            None => valid_param_name(inner).map(SegmentDescriptor::Dynamic),
        },
        None if segment.contains(['[', ']']) => None,
        None => Some(SegmentDescriptor::Static(segment.to_string())),
    }
}

/// Accepts a bracketed name unless it is empty or could be confused with
/// another piece of the grammar
fn valid_param_name(name: &str) -> Option<String> {
    let usable = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '[', ']']);
    usable.then(|| name.to_string())
}
