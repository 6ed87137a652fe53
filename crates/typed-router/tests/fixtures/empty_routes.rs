// @generated by typed-router. Do not edit.

/// Every declared route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteId {
}

impl RouteId {
    pub const ALL: &'static [RouteId] = &[
    ];

    /// Canonical pathname
    pub fn pathname(self) -> &'static str {
        match self {}
    }

    pub fn from_pathname(pathname: &str) -> ::std::option::Option<Self> {
        match pathname {
            _ => ::std::option::Option::None,
        }
    }
}

/// Route, canonical pathname and parameter names, ordered by pathname
pub const ROUTES: &[(RouteId, &str, &[&str])] = &[
];
