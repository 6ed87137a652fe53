/// Navigation requests
use crate::matcher::{ParamValue, Params};

/// A navigation request: a path string or a pathname with params
///
/// # Examples
///
/// ```
/// use typed_router::Href;
///
/// let href = Href::from("/colors/red");
/// assert!(matches!(href, Href::Path(_)));
///
/// let href = Href::object("/colors/[color]").param("color", "red");
/// assert!(matches!(href, Href::Object { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Href {
    Path(String),
    Object { pathname: String, params: Params },
}

impl Href {
    /// Object-form href with no params yet
    pub fn object(pathname: impl Into<String>) -> Self {
        Self::Object {
            pathname: pathname.into(),
            params: Params::new(),
        }
    }

    /// Adds a param to an object-form href; a path href is returned as is
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        if let Self::Object { params, .. } = &mut self {
            params.insert(name.into(), value.into());
        }
        self
    }

    pub fn kind(&self) -> HrefKind {
        match self {
            Self::Path(path) | Self::Object { pathname: path, .. } => HrefKind::of(path),
        }
    }
}

impl From<&str> for Href {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for Href {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

/// How a string href is interpreted before matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HrefKind {
    /// `/apple`: matched against the route tree
    Absolute,
    /// `./apple`, `../apple`: resolved against the current location first
    Relative,
    /// `http://example.com`, `mailto:x`, `//cdn`: leaves the app untouched
    External,
    /// Anything else, e.g. a bare `apple`
    Invalid,
}

impl HrefKind {
    /// Classifies a string href
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_router::HrefKind;
    ///
    /// assert_eq!(HrefKind::of("/apple"), HrefKind::Absolute);
    /// assert_eq!(HrefKind::of("./"), HrefKind::Relative);
    /// assert_eq!(HrefKind::of("http://example.com"), HrefKind::External);
    /// assert_eq!(HrefKind::of("should-error"), HrefKind::Invalid);
    /// ```
    pub fn of(href: &str) -> Self {
        if href.starts_with("//") || has_scheme(href) {
            Self::External
        } else if href.starts_with('/') {
            Self::Absolute
        } else if href == "." || href == ".." || href.starts_with("./") || href.starts_with("../") {
            Self::Relative
        } else {
            Self::Invalid
        }
    }
}

/// `scheme:` per RFC 3986: a letter, then letters, digits, `+`, `-` or `.`
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
