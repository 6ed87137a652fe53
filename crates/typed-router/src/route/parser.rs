/// Route path parsing
///
/// Turns a declared route path into an ordered descriptor sequence and
/// validates the structural invariants a single path must satisfy.
use std::collections::HashSet;
use std::fmt;

use super::pattern::{classify_segment, SegmentDescriptor};
use crate::error::ParseError;

/// Parses a declared route path into segment descriptors (pure function)
///
/// Splits on `/`, discarding empty segments, classifies each one, then
/// checks that a catch-all is the last non-group segment and that no
/// parameter name is bound twice. Groups are kept in the output; erasing
/// them is the caller's decision.
///
/// # Examples
///
/// ```
/// use typed_router::route::parser::parse;
/// use typed_router::SegmentDescriptor;
///
/// let segments = parse("/(shop)/colors/[color]").unwrap();
/// assert_eq!(
///     segments,
///     vec![
///         SegmentDescriptor::Group("shop".to_string()),
///         SegmentDescriptor::Static("colors".to_string()),
///         SegmentDescriptor::Dynamic("color".to_string()),
///     ]
/// );
///
/// assert!(parse("/docs/[...slug]/edit").is_err());
/// ```
pub fn parse(path: &str) -> Result<Vec<SegmentDescriptor>, ParseError> {
    let segments = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            classify_segment(segment).ok_or_else(|| ParseError::InvalidSegmentName {
                path: path.to_string(),
                segment: segment.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    check_catch_all_position(path, &segments)?;
    check_unique_names(path, &segments)?;

    Ok(segments)
}

fn check_catch_all_position(path: &str, segments: &[SegmentDescriptor]) -> Result<(), ParseError> {
    let mut routable = segments.iter().filter(|s| !s.is_group()).peekable();

    while let Some(segment) = routable.next() {
        if segment.is_catch_all() && routable.peek().is_some() {
            return Err(ParseError::MisplacedCatchAll {
                path: path.to_string(),
                segment: segment.to_string(),
            });
        }
    }

    Ok(())
}

fn check_unique_names(path: &str, segments: &[SegmentDescriptor]) -> Result<(), ParseError> {
    let mut seen = HashSet::new();

    segments
        .iter()
        .filter_map(SegmentDescriptor::param_name)
        .try_for_each(|name| {
            if seen.insert(name) {
                Ok(())
            } else {
                Err(ParseError::DuplicateParamName {
                    path: path.to_string(),
                    name: name.to_string(),
                })
            }
        })
}

/// A parsed, group-erased route plus the path it was declared as
///
/// The declared string is the route's identity; two patterns with the
/// same group-erased segments are the same route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePattern {
    declared: String,
    segments: Vec<SegmentDescriptor>,
}

impl RoutePattern {
    /// Parses a declared route path
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_router::RoutePattern;
    ///
    /// let route = RoutePattern::parse("/(shop)/colors/[color]").unwrap();
    /// assert_eq!(route.declared(), "/(shop)/colors/[color]");
    /// assert_eq!(route.pathname(), "/colors/[color]");
    /// assert_eq!(route.segments().len(), 2);
    /// ```
    pub fn parse(declared: &str) -> Result<Self, ParseError> {
        let segments = parse(declared)?
            .into_iter()
            .filter(|s| !s.is_group())
            .collect();

        Ok(Self {
            declared: declared.to_string(),
            segments,
        })
    }

    /// The path string as it was declared, groups included
    pub fn declared(&self) -> &str {
        &self.declared
    }

    /// Group-erased descriptors in left-to-right order
    pub fn segments(&self) -> &[SegmentDescriptor] {
        &self.segments
    }

    /// Canonical group-erased form: `/colors/[color]`, or `/` for the root
    pub fn pathname(&self) -> String {
        render_pathname(&self.segments)
    }

    /// Whether any segment binds a parameter
    pub fn is_dynamic(&self) -> bool {
        self.segments.iter().any(|s| s.param_name().is_some())
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declared)
    }
}

/// Joins descriptors back into a canonical pathname
pub(crate) fn render_pathname(segments: &[SegmentDescriptor]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }

    segments.iter().fold(String::new(), |mut acc, segment| {
        acc.push('/');
        acc.push_str(&segment.to_string());
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static() {
        let segments = parse("/apple").unwrap();
        assert_eq!(segments, vec![SegmentDescriptor::Static("apple".to_string())]);
    }

    #[test]
    fn test_parse_root() {
        assert!(parse("/").unwrap().is_empty());
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_discards_empty_segments() {
        let segments = parse("//colors//[color]/").unwrap();
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_parse_catch_all_last() {
        let segments = parse("/files/[...parts]").unwrap();
        assert_eq!(
            segments.last(),
            Some(&SegmentDescriptor::CatchAll("parts".to_string()))
        );
    }

    #[test]
    fn test_parse_catch_all_followed_by_group_is_allowed() {
        assert!(parse("/files/[...parts]/(modal)").is_ok());
    }

    #[test]
    fn test_parse_misplaced_catch_all() {
        let err = parse("/docs/[[...slug]]/edit").unwrap_err();
        assert_eq!(
            err,
            ParseError::MisplacedCatchAll {
                path: "/docs/[[...slug]]/edit".to_string(),
                segment: "[[...slug]]".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_invalid_name() {
        let err = parse("/users/[]").unwrap_err();
        assert!(matches!(err, ParseError::InvalidSegmentName { .. }));
    }

    #[test]
    fn test_parse_slash_inside_brackets() {
        let err = parse("/users/[a/b]").unwrap_err();
        assert!(matches!(err, ParseError::InvalidSegmentName { segment, .. } if segment == "[a"));
    }

    #[test]
    fn test_parse_duplicate_param_name() {
        let err = parse("/[id]/posts/[id]").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateParamName {
                path: "/[id]/posts/[id]".to_string(),
                name: "id".to_string(),
            }
        );
    }

    #[test]
    fn test_route_pattern_erases_groups() {
        let route = RoutePattern::parse("/(a)/(b)/apple").unwrap();
        assert_eq!(route.segments(), &[SegmentDescriptor::Static("apple".to_string())]);
        assert_eq!(route.pathname(), "/apple");
        assert_eq!(route.declared(), "/(a)/(b)/apple");
    }

    #[test]
    fn test_route_pattern_root_pathname() {
        let route = RoutePattern::parse("/(tabs)").unwrap();
        assert_eq!(route.pathname(), "/");
        assert!(!route.is_dynamic());
    }
}
