// @generated by typed-router. Do not edit.

/// Every declared route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteId {
    /// `/`
    Root,
    /// `/[type]/x`
    TypeX,
    /// `/docs/[[...slug]]`
    DocsSlug,
    /// `/files/[...parts]`
    FilesParts,
    /// `/users/[self]`
    UsersSelf,
}

impl RouteId {
    pub const ALL: &'static [RouteId] = &[
        RouteId::Root,
        RouteId::TypeX,
        RouteId::DocsSlug,
        RouteId::FilesParts,
        RouteId::UsersSelf,
    ];

    /// Canonical pathname
    pub fn pathname(self) -> &'static str {
        match self {
            RouteId::Root => "/",
            RouteId::TypeX => "/[type]/x",
            RouteId::DocsSlug => "/docs/[[...slug]]",
            RouteId::FilesParts => "/files/[...parts]",
            RouteId::UsersSelf => "/users/[self]",
        }
    }

    pub fn from_pathname(pathname: &str) -> ::std::option::Option<Self> {
        match pathname {
            "/" => ::std::option::Option::Some(RouteId::Root),
            "/[type]/x" => ::std::option::Option::Some(RouteId::TypeX),
            "/docs/[[...slug]]" => ::std::option::Option::Some(RouteId::DocsSlug),
            "/files/[...parts]" => ::std::option::Option::Some(RouteId::FilesParts),
            "/users/[self]" => ::std::option::Option::Some(RouteId::UsersSelf),
            _ => ::std::option::Option::None,
        }
    }
}

/// Route, canonical pathname and parameter names, ordered by pathname
pub const ROUTES: &[(RouteId, &str, &[&str])] = &[
    (RouteId::Root, "/", &[]),
    (RouteId::TypeX, "/[type]/x", &["type"]),
    (RouteId::DocsSlug, "/docs/[[...slug]]", &["slug"]),
    (RouteId::FilesParts, "/files/[...parts]", &["parts"]),
    (RouteId::UsersSelf, "/users/[self]", &["self"]),
];

/// Params of `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root;

impl ::typed_router::TypedRoute for Root {
    const PATHNAME: &'static str = "/";

    fn from_params(_params: &::typed_router::Params) -> ::std::result::Result<Self, ::typed_router::MatchError> {
        ::std::result::Result::Ok(Self)
    }

    fn into_params(self) -> ::typed_router::Params {
        ::typed_router::Params::new()
    }
}

/// Params of `/[type]/x`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeX {
    pub r#type: ::std::string::String,
}

impl ::typed_router::TypedRoute for TypeX {
    const PATHNAME: &'static str = "/[type]/x";

    fn from_params(params: &::typed_router::Params) -> ::std::result::Result<Self, ::typed_router::MatchError> {
        ::std::result::Result::Ok(Self {
            r#type: ::typed_router::navigation::required_single(params, Self::PATHNAME, "type")?,
        })
    }

    fn into_params(self) -> ::typed_router::Params {
        let mut params = ::typed_router::Params::new();
        params.insert("type".into(), ::typed_router::ParamValue::Single(self.r#type));
        params
    }
}

/// Params of `/docs/[[...slug]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsSlug {
    pub slug: ::std::option::Option<::std::vec::Vec<::std::string::String>>,
}

impl ::typed_router::TypedRoute for DocsSlug {
    const PATHNAME: &'static str = "/docs/[[...slug]]";

    fn from_params(params: &::typed_router::Params) -> ::std::result::Result<Self, ::typed_router::MatchError> {
        ::std::result::Result::Ok(Self {
            slug: ::typed_router::navigation::optional_multiple(params, Self::PATHNAME, "slug")?,
        })
    }

    fn into_params(self) -> ::typed_router::Params {
        let mut params = ::typed_router::Params::new();
        if let ::std::option::Option::Some(values) = self.slug {
            params.insert("slug".into(), ::typed_router::ParamValue::Multiple(values));
        }
        params
    }
}

/// Params of `/files/[...parts]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesParts {
    pub parts: ::std::vec::Vec<::std::string::String>,
}

impl ::typed_router::TypedRoute for FilesParts {
    const PATHNAME: &'static str = "/files/[...parts]";

    fn from_params(params: &::typed_router::Params) -> ::std::result::Result<Self, ::typed_router::MatchError> {
        ::std::result::Result::Ok(Self {
            parts: ::typed_router::navigation::required_multiple(params, Self::PATHNAME, "parts")?,
        })
    }

    fn into_params(self) -> ::typed_router::Params {
        let mut params = ::typed_router::Params::new();
        params.insert("parts".into(), ::typed_router::ParamValue::Multiple(self.parts));
        params
    }
}

/// Params of `/users/[self]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersSelf {
    pub self_: ::std::string::String,
}

impl ::typed_router::TypedRoute for UsersSelf {
    const PATHNAME: &'static str = "/users/[self]";

    fn from_params(params: &::typed_router::Params) -> ::std::result::Result<Self, ::typed_router::MatchError> {
        ::std::result::Result::Ok(Self {
            self_: ::typed_router::navigation::required_single(params, Self::PATHNAME, "self")?,
        })
    }

    fn into_params(self) -> ::typed_router::Params {
        let mut params = ::typed_router::Params::new();
        params.insert("self".into(), ::typed_router::ParamValue::Single(self.self_));
        params
    }
}
