/// Parameter contracts derived from the route tree
///
/// A contract lists, in left-to-right segment order, the names a route binds
/// and whether each is a single value or a catch-all array. Only a trailing
/// optional catch-all makes a name optional.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::MatchError;
use crate::matcher::{ParamValue, Params};
use crate::route::{RoutePattern, SegmentDescriptor};
use crate::tree::RouteTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamKind {
    Single,
    CatchAllArray,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub optional: bool,
}

impl ParamSpec {
    /// Whether `value` has the shape this parameter needs
    ///
    /// Single values must be non-empty text; a required catch-all needs at
    /// least one non-empty segment; an optional catch-all accepts none.
    pub fn accepts(&self, value: &ParamValue) -> bool {
        match (self.kind, value) {
            (ParamKind::Single, ParamValue::Single(text)) => !text.is_empty(),
            (ParamKind::CatchAllArray, ParamValue::Multiple(parts)) => {
                (self.optional || !parts.is_empty()) && parts.iter().all(|p| !p.is_empty())
            }
            _ => false,
        }
    }
}

/// The parameter shape of one route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamContract {
    /// Declared identity of the route
    pub route: String,
    /// Canonical group-erased pathname
    pub pathname: String,
    pub params: Vec<ParamSpec>,
}

impl ParamContract {
    /// Contract of a single pattern, straight from its descriptors
    pub fn for_pattern(pattern: &RoutePattern) -> Self {
        Self::from_edges(pattern, pattern.segments().iter())
    }

    fn from_edges<'a>(
        pattern: &RoutePattern,
        edges: impl Iterator<Item = &'a SegmentDescriptor>,
    ) -> Self {
        let params = edges
            .filter_map(|edge| match edge {
                SegmentDescriptor::Dynamic(name) => Some(ParamSpec {
                    name: name.clone(),
                    kind: ParamKind::Single,
                    optional: false,
                }),
                SegmentDescriptor::CatchAll(name) => Some(ParamSpec {
                    name: name.clone(),
                    kind: ParamKind::CatchAllArray,
                    optional: false,
                }),
                SegmentDescriptor::OptionalCatchAll(name) => Some(ParamSpec {
                    name: name.clone(),
                    kind: ParamKind::CatchAllArray,
                    optional: true,
                }),
                SegmentDescriptor::Static(_) | SegmentDescriptor::Group(_) => None,
            })
            .collect();

        Self {
            route: pattern.declared().to_string(),
            pathname: pattern.pathname(),
            params,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }

    pub fn required(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|spec| !spec.optional)
    }

    pub fn optional(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|spec| spec.optional)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Validates an object-form param map against this contract
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_router::{MatchError, ParamContract, ParamValue, Params, RoutePattern};
    ///
    /// let contract = ParamContract::for_pattern(&RoutePattern::parse("/apple").unwrap());
    ///
    /// let mut params = Params::new();
    /// params.insert("a".to_string(), ParamValue::from("1"));
    ///
    /// let err = contract.check(&params).unwrap_err();
    /// assert!(matches!(err, MatchError::ParamShapeMismatch { unexpected, .. } if unexpected == ["a"]));
    /// ```
    pub fn check(&self, params: &Params) -> Result<(), MatchError> {
        let missing: Vec<String> = self
            .required()
            .filter(|spec| !params.contains_key(&spec.name))
            .map(|spec| spec.name.clone())
            .collect();

        let unexpected: Vec<String> = params
            .keys()
            .filter(|name| self.get(name).is_none())
            .cloned()
            .collect();

        let mistyped: Vec<String> = self
            .params
            .iter()
            .filter(|spec| {
                params
                    .get(&spec.name)
                    .is_some_and(|value| !spec.accepts(value))
            })
            .map(|spec| spec.name.clone())
            .collect();

        if missing.is_empty() && unexpected.is_empty() && mistyped.is_empty() {
            Ok(())
        } else {
            Err(MatchError::ParamShapeMismatch {
                pathname: self.pathname.clone(),
                missing,
                unexpected,
                mistyped,
            })
        }
    }
}

/// Contracts for every route, keyed by canonical pathname
pub type Contracts = BTreeMap<String, ParamContract>;

/// Derives every route's contract by walking its ancestor chain
///
/// Pure function of the tree; callers recompute it whenever the tree is
/// rebuilt.
///
/// # Examples
///
/// ```
/// use typed_router::{contract::derive, ParamKind, RouteTree};
///
/// let tree = RouteTree::from_paths(["/shop/[category]/[...rest]"]).unwrap();
/// let contracts = derive(&tree);
///
/// let contract = &contracts["/shop/[category]/[...rest]"];
/// let names: Vec<_> = contract.params.iter().map(|p| (p.name.as_str(), p.kind)).collect();
/// assert_eq!(
///     names,
///     vec![("category", ParamKind::Single), ("rest", ParamKind::CatchAllArray)]
/// );
/// ```
pub fn derive(tree: &RouteTree) -> Contracts {
    tree.routes()
        .map(|(id, pattern)| {
            let contract = ParamContract::from_edges(pattern, tree.edges_to(id).into_iter());
            (contract.pathname.clone(), contract)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(path: &str) -> ParamContract {
        ParamContract::for_pattern(&RoutePattern::parse(path).unwrap())
    }

    fn params(pairs: &[(&str, ParamValue)]) -> Params {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_static_route_has_empty_contract() {
        let c = contract("/apple");
        assert!(c.is_empty());
        assert!(c.check(&Params::new()).is_ok());
    }

    #[test]
    fn test_optional_catch_all_is_the_only_optional() {
        let c = contract("/docs/[version]/[[...slug]]");
        let required: Vec<_> = c.required().map(|p| p.name.as_str()).collect();
        let optional: Vec<_> = c.optional().map(|p| p.name.as_str()).collect();
        assert_eq!(required, vec!["version"]);
        assert_eq!(optional, vec!["slug"]);
    }

    #[test]
    fn test_check_missing_and_unexpected() {
        let c = contract("/colors/[color]");
        let err = c.check(&params(&[("fruit", "apple".into())])).unwrap_err();
        assert_eq!(
            err,
            MatchError::ParamShapeMismatch {
                pathname: "/colors/[color]".to_string(),
                missing: vec!["color".to_string()],
                unexpected: vec!["fruit".to_string()],
                mistyped: vec![],
            }
        );
    }

    #[test]
    fn test_check_mistyped_kinds() {
        let c = contract("/files/[...parts]");
        let err = c.check(&params(&[("parts", "a".into())])).unwrap_err();
        assert!(matches!(err, MatchError::ParamShapeMismatch { mistyped, .. } if mistyped == ["parts"]));

        let err = c
            .check(&params(&[("parts", ParamValue::Multiple(vec![]))]))
            .unwrap_err();
        assert!(matches!(err, MatchError::ParamShapeMismatch { mistyped, .. } if mistyped == ["parts"]));

        assert!(c
            .check(&params(&[("parts", vec!["a", "b"].into())]))
            .is_ok());
    }

    #[test]
    fn test_check_optional_catch_all_absent_or_empty() {
        let c = contract("/docs/[[...slug]]");
        assert!(c.check(&Params::new()).is_ok());
        assert!(c.check(&params(&[("slug", ParamValue::Multiple(vec![]))])).is_ok());
        assert!(c.check(&params(&[("slug", "intro".into())])).is_err());
    }

    #[test]
    fn test_derive_matches_pattern_contracts() {
        let tree = RouteTree::from_paths([
            "/apple",
            "/(shop)/colors/[color]",
            "/files/[...parts]",
            "/docs/[[...slug]]",
        ])
        .unwrap();

        let contracts = derive(&tree);
        assert_eq!(contracts.len(), 4);

        for (_, pattern) in tree.routes() {
            assert_eq!(contracts[&pattern.pathname()], ParamContract::for_pattern(pattern));
        }

        assert_eq!(contracts["/colors/[color]"].route, "/(shop)/colors/[color]");
    }
}
