/// Navigation façade
///
/// `push`/`replace` resolve an href against the current route tree and hand
/// the result to a history collaborator; the `use_*` readers observe the
/// route held by an explicit `RouteContext`.
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwapOption;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::error::MatchError;
use crate::href::{Href, HrefKind};
use crate::matcher::{self, MatchOptions, MatchResult, ParamValue, Params};
use crate::path::resolve_relative;
use crate::tree::{RouteTable, RouteTree};

/// A route known at build time
///
/// Implemented by the params structs the Rust emitter generates, one per
/// declared route; asking for a route that does not exist is a compile error.
pub trait TypedRoute: Sized {
    /// Canonical pathname, e.g. `/colors/[color]`
    const PATHNAME: &'static str;

    fn from_params(params: &Params) -> Result<Self, MatchError>;

    fn into_params(self) -> Params;

    /// Object-form href for this route
    fn href(self) -> Href {
        Href::Object {
            pathname: Self::PATHNAME.to_string(),
            params: self.into_params(),
        }
    }
}

fn shape_error(pathname: &str, missing: Option<&str>, mistyped: Option<&str>) -> MatchError {
    MatchError::ParamShapeMismatch {
        pathname: pathname.to_string(),
        missing: missing.into_iter().map(str::to_string).collect(),
        unexpected: Vec::new(),
        mistyped: mistyped.into_iter().map(str::to_string).collect(),
    }
}

/// Reads a required `[name]` value; used by generated `TypedRoute` impls
pub fn required_single(params: &Params, pathname: &str, name: &str) -> Result<String, MatchError> {
    match params.get(name) {
        Some(ParamValue::Single(value)) if !value.is_empty() => Ok(value.clone()),
        Some(_) => Err(shape_error(pathname, None, Some(name))),
        None => Err(shape_error(pathname, Some(name), None)),
    }
}

/// Reads a required `[...name]` value; used by generated `TypedRoute` impls
pub fn required_multiple(
    params: &Params,
    pathname: &str,
    name: &str,
) -> Result<Vec<String>, MatchError> {
    match params.get(name) {
        Some(ParamValue::Multiple(values)) if !values.is_empty() => Ok(values.clone()),
        Some(_) => Err(shape_error(pathname, None, Some(name))),
        None => Err(shape_error(pathname, Some(name), None)),
    }
}

/// Reads an optional `[[...name]]` value; used by generated `TypedRoute` impls
pub fn optional_multiple(
    params: &Params,
    pathname: &str,
    name: &str,
) -> Result<Option<Vec<String>>, MatchError> {
    match params.get(name) {
        Some(ParamValue::Multiple(values)) => Ok(Some(values.clone())),
        Some(ParamValue::Single(_)) => Err(shape_error(pathname, None, Some(name))),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    Push,
    Replace,
}

/// Where a navigation goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Route(MatchResult),
    /// Left to the platform; never matched
    External(String),
}

/// A structurally valid navigation handed to the history collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationAction {
    pub kind: NavigationKind,
    pub destination: Destination,
    /// Generation of the route tree the destination was resolved against
    pub generation: u64,
}

impl NavigationAction {
    pub fn href(&self) -> String {
        match &self.destination {
            Destination::Route(result) => result.href(),
            Destination::External(url) => url.clone(),
        }
    }
}

/// The navigation history collaborator
///
/// `dispatch` is fire-and-forget: the façade has already validated the
/// action and does not wait for the history to apply it.
pub trait History {
    fn dispatch(&self, action: NavigationAction);
}

impl History for UnboundedSender<NavigationAction> {
    fn dispatch(&self, action: NavigationAction) {
        if self.send(action).is_err() {
            warn!("navigation history receiver dropped; action discarded");
        }
    }
}

impl<H: History + ?Sized> History for Arc<H> {
    fn dispatch(&self, action: NavigationAction) {
        (**self).dispatch(action)
    }
}

/// In-process history stack
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<NavigationAction>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every entry currently on the stack, oldest first
    pub fn entries(&self) -> Vec<NavigationAction> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current(&self) -> Option<NavigationAction> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl History for MemoryHistory {
    fn dispatch(&self, action: NavigationAction) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if action.kind == NavigationKind::Replace {
            entries.pop();
        }
        entries.push(action);
    }
}

/// Resolves hrefs against a route table and dispatches them to a history
pub struct Navigator<H> {
    table: Arc<RouteTable>,
    history: H,
    options: MatchOptions,
    focused: ArcSwapOption<MatchResult>,
}

impl<H: History> Navigator<H> {
    pub fn new(table: Arc<RouteTable>, history: H) -> Self {
        Self {
            table,
            history,
            options: MatchOptions::default(),
            focused: ArcSwapOption::empty(),
        }
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Adds a new history entry for `href`
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use typed_router::{Href, MemoryHistory, Navigator, RouteTable};
    ///
    /// let table = Arc::new(RouteTable::from_paths(["/apple", "/colors/[color]"]).unwrap());
    /// let navigator = Navigator::new(table, MemoryHistory::new());
    ///
    /// navigator.push("/colors/red").unwrap();
    /// navigator.push(Href::object("/apple")).unwrap();
    /// assert!(navigator.push("/nonexistent").is_err());
    ///
    /// assert_eq!(navigator.history().entries().len(), 2);
    /// ```
    pub fn push(&self, href: impl Into<Href>) -> Result<(), MatchError> {
        self.navigate(NavigationKind::Push, href.into())
    }

    /// Replaces the current history entry with `href`
    pub fn replace(&self, href: impl Into<Href>) -> Result<(), MatchError> {
        self.navigate(NavigationKind::Replace, href.into())
    }

    fn navigate(&self, kind: NavigationKind, href: Href) -> Result<(), MatchError> {
        let tree = self.table.snapshot();

        let destination = self.destination(&tree, &href).inspect_err(|err| {
            warn!(?href, error = %err, "navigation rejected");
        })?;

        if let Destination::Route(result) = &destination {
            self.focused.store(Some(Arc::new(result.clone())));
        }

        let action = NavigationAction {
            kind,
            destination,
            generation: tree.generation(),
        };
        debug!(?kind, href = %action.href(), "navigation dispatched");
        self.history.dispatch(action);
        Ok(())
    }

    fn destination(&self, tree: &RouteTree, href: &Href) -> Result<Destination, MatchError> {
        let Href::Path(path) = href else {
            return matcher::resolve(tree, href, self.options).map(Destination::Route);
        };

        match HrefKind::of(path) {
            HrefKind::External => Ok(Destination::External(path.clone())),
            HrefKind::Absolute => matcher::match_path(tree, path, self.options).map(Destination::Route),
            HrefKind::Relative => {
                let base = self
                    .focused
                    .load_full()
                    .map(|current| current.href())
                    .unwrap_or_else(|| "/".to_string());
                let absolute = resolve_relative(&base, path);
                matcher::match_path(tree, &absolute, self.options).map(Destination::Route)
            }
            HrefKind::Invalid => Err(MatchError::InvalidHref(path.clone())),
        }
    }

    /// Context for the route at the top of this navigator's history
    pub fn context(&self) -> Option<RouteContext> {
        self.focused.load_full().map(|focused| RouteContext {
            local: focused.clone(),
            focused,
        })
    }

    /// Context for a route rendered inside the currently focused one
    pub fn context_for(&self, local: MatchResult) -> RouteContext {
        let local = Arc::new(local);
        let focused = self.focused.load_full().unwrap_or_else(|| local.clone());
        RouteContext { local, focused }
    }
}

/// The "current route" scope read by the `use_*` accessors
///
/// `local` is the route the caller renders; `focused` is the route at the
/// top of history. They differ for layouts and background screens.
#[derive(Debug, Clone)]
pub struct RouteContext {
    local: Arc<MatchResult>,
    focused: Arc<MatchResult>,
}

impl RouteContext {
    pub fn new(current: MatchResult) -> Self {
        let current = Arc::new(current);
        Self {
            local: current.clone(),
            focused: current,
        }
    }

    pub fn with_focused(mut self, focused: MatchResult) -> Self {
        self.focused = Arc::new(focused);
        self
    }

    pub fn local(&self) -> &MatchResult {
        &self.local
    }

    pub fn focused(&self) -> &MatchResult {
        &self.focused
    }

    /// Query pairs of the local route's href
    pub fn query(&self) -> &[(String, String)] {
        &self.local.query
    }

    /// All params of the local route as its generated struct
    pub fn params<R: TypedRoute>(&self) -> Result<R, MatchError> {
        expect_route::<R>(&self.local)?;
        R::from_params(&self.local.params)
    }
}

fn expect_route<R: TypedRoute>(result: &MatchResult) -> Result<(), MatchError> {
    if result.pathname == R::PATHNAME {
        Ok(())
    } else {
        Err(MatchError::RouteMismatch {
            expected: R::PATHNAME.to_string(),
            actual: result.pathname.clone(),
        })
    }
}

/// Single-valued params of the route the caller renders
pub fn use_search_params(ctx: &RouteContext) -> BTreeMap<String, String> {
    ctx.local.string_params()
}

/// Single-valued params of the focused route
pub fn use_global_search_params(ctx: &RouteContext) -> BTreeMap<String, String> {
    ctx.focused.string_params()
}

/// Pattern segments of the route the caller renders: `["colors", "[color]"]`
pub fn use_segments(ctx: &RouteContext) -> Vec<String> {
    ctx.local.segments()
}

/// `use_search_params`, checked against the route `R`
pub fn use_search_params_for<R: TypedRoute>(
    ctx: &RouteContext,
) -> Result<BTreeMap<String, String>, MatchError> {
    expect_route::<R>(&ctx.local)?;
    Ok(use_search_params(ctx))
}

/// `use_global_search_params`, checked against the route `R`
pub fn use_global_search_params_for<R: TypedRoute>(
    ctx: &RouteContext,
) -> Result<BTreeMap<String, String>, MatchError> {
    expect_route::<R>(&ctx.focused)?;
    Ok(use_global_search_params(ctx))
}

/// `use_segments`, checked against the route `R`
pub fn use_segments_for<R: TypedRoute>(ctx: &RouteContext) -> Result<Vec<String>, MatchError> {
    expect_route::<R>(&ctx.local)?;
    Ok(use_segments(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ColorsColor {
        color: String,
    }

    impl TypedRoute for ColorsColor {
        const PATHNAME: &'static str = "/colors/[color]";

        fn from_params(params: &Params) -> Result<Self, MatchError> {
            Ok(Self {
                color: required_single(params, Self::PATHNAME, "color")?,
            })
        }

        fn into_params(self) -> Params {
            Params::from([("color".to_string(), ParamValue::Single(self.color))])
        }
    }

    fn navigator() -> Navigator<MemoryHistory> {
        let table = RouteTable::from_paths(["/apple", "/colors/[color]", "/colors/red/light"])
            .unwrap();
        Navigator::new(Arc::new(table), MemoryHistory::new())
    }

    #[test]
    fn test_push_and_replace_shape_history() {
        let nav = navigator();
        nav.push("/apple").unwrap();
        nav.push("/colors/red").unwrap();
        nav.replace("/colors/blue").unwrap();

        let hrefs: Vec<String> = nav.history().entries().iter().map(|a| a.href()).collect();
        assert_eq!(hrefs, vec!["/apple", "/colors/blue"]);
    }

    #[test]
    fn test_failed_navigation_does_not_dispatch() {
        let nav = navigator();
        assert!(matches!(nav.push("/nonexistent"), Err(MatchError::NotFound(_))));
        assert!(matches!(nav.push("should-error"), Err(MatchError::InvalidHref(_))));
        assert!(nav.history().entries().is_empty());
        assert!(nav.context().is_none());
    }

    #[test]
    fn test_external_href_is_dispatched_untouched() {
        let nav = navigator();
        nav.push("https://example.com").unwrap();
        assert_eq!(
            nav.history().current().unwrap().destination,
            Destination::External("https://example.com".to_string())
        );
    }

    #[test]
    fn test_relative_href_resolves_against_focused_route() {
        let nav = navigator();
        nav.push("/colors/red").unwrap();
        nav.push("./blue").unwrap();
        assert_eq!(nav.history().current().unwrap().href(), "/colors/blue");

        nav.push("../apple").unwrap();
        assert_eq!(nav.history().current().unwrap().href(), "/apple");
    }

    #[test]
    fn test_relative_href_without_history_starts_at_root() {
        let nav = navigator();
        nav.push("./apple").unwrap();
        assert_eq!(nav.history().current().unwrap().href(), "/apple");
    }

    #[test]
    fn test_typed_route_href() {
        let nav = navigator();
        nav.push(ColorsColor { color: "green".to_string() }.href()).unwrap();
        assert_eq!(nav.history().current().unwrap().href(), "/colors/green");
    }

    #[test]
    fn test_context_readers() {
        let nav = navigator();
        nav.push("/colors/red").unwrap();
        let ctx = nav.context().unwrap();

        assert_eq!(use_search_params(&ctx)["color"], "red");
        assert_eq!(use_segments(&ctx), vec!["colors", "[color]"]);
        assert_eq!(ctx.params::<ColorsColor>().unwrap().color, "red");
        assert_eq!(use_search_params_for::<ColorsColor>(&ctx).unwrap()["color"], "red");
    }

    #[test]
    fn test_local_and_global_differ() {
        let nav = navigator();
        nav.push("/colors/red").unwrap();

        let tree = RouteTable::from_paths(["/apple"]).unwrap().snapshot();
        let apple = matcher::match_path(&tree, "/apple", MatchOptions::default()).unwrap();
        let ctx = nav.context_for(apple);

        assert!(use_search_params(&ctx).is_empty());
        assert_eq!(use_global_search_params(&ctx)["color"], "red");
        assert!(matches!(
            use_search_params_for::<ColorsColor>(&ctx),
            Err(MatchError::RouteMismatch { .. })
        ));
        assert!(use_global_search_params_for::<ColorsColor>(&ctx).is_ok());
        assert!(use_segments_for::<ColorsColor>(&ctx).is_err());
    }

    #[test]
    fn test_navigation_records_tree_generation() {
        let table = Arc::new(RouteTable::from_paths(["/apple"]).unwrap());
        let nav = Navigator::new(table.clone(), MemoryHistory::new());

        assert!(nav.push("/banana").is_err());
        table.reload(["/apple", "/banana"]).unwrap();
        nav.push("/banana").unwrap();

        assert_eq!(nav.history().current().unwrap().generation, 1);
    }

    #[test]
    fn test_required_helpers_report_shape() {
        let params = Params::from([("parts".to_string(), ParamValue::from("a"))]);
        assert!(matches!(
            required_multiple(&params, "/files/[...parts]", "parts"),
            Err(MatchError::ParamShapeMismatch { mistyped, .. }) if mistyped == ["parts"]
        ));
        assert!(matches!(
            required_single(&params, "/x/[id]", "id"),
            Err(MatchError::ParamShapeMismatch { missing, .. }) if missing == ["id"]
        ));
        assert_eq!(optional_multiple(&params, "/docs/[[...slug]]", "slug").unwrap(), None);
    }
}
