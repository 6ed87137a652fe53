/// Route tree construction and hot-swappable route tables
///
/// The tree is an arena: nodes live in one `Vec` and refer to each other by
/// index, each node remembering the edge that leads to it. A built tree is
/// never mutated; rebuilding produces a new tree that `RouteTable` swaps in
/// atomically.
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use tracing::{debug, instrument};

use crate::error::{BuildError, Result};
use crate::route::{RoutePattern, SegmentDescriptor};

/// Index of a node inside its `RouteTree`
pub type NodeId = usize;

/// A trie node keyed by descriptor kind
#[derive(Debug, Clone, Default)]
pub struct RouteTreeNode {
    parent: Option<(NodeId, SegmentDescriptor)>,
    statics: BTreeMap<String, NodeId>,
    dynamic: Option<(String, NodeId)>,
    catch_all: Option<(SegmentDescriptor, NodeId)>,
    terminal: Option<RoutePattern>,
}

impl RouteTreeNode {
    fn child_of(parent: NodeId, edge: SegmentDescriptor) -> Self {
        Self {
            parent: Some((parent, edge)),
            ..Self::default()
        }
    }

    /// Child reached by the literal `text`
    pub fn static_child(&self, text: &str) -> Option<NodeId> {
        self.statics.get(text).copied()
    }

    /// All literal children, ordered by text
    pub fn static_children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.statics.iter().map(|(text, id)| (text.as_str(), *id))
    }

    /// The `[name]` child and its bound name
    pub fn dynamic_child(&self) -> Option<(&str, NodeId)> {
        self.dynamic.as_ref().map(|(name, id)| (name.as_str(), *id))
    }

    /// The `[...name]` or `[[...name]]` child
    pub fn catch_all_child(&self) -> Option<(&SegmentDescriptor, NodeId)> {
        self.catch_all.as_ref().map(|(edge, id)| (edge, *id))
    }

    /// The route completed at this node, if any
    pub fn terminal(&self) -> Option<&RoutePattern> {
        self.terminal.as_ref()
    }

    /// Parent node and the edge leading from it to this node
    pub fn parent(&self) -> Option<(NodeId, &SegmentDescriptor)> {
        self.parent.as_ref().map(|(id, edge)| (*id, edge))
    }
}

/// Canonical route table: every declared route, keyed by segment structure
#[derive(Debug, Clone)]
pub struct RouteTree {
    nodes: Vec<RouteTreeNode>,
    by_pathname: BTreeMap<String, NodeId>,
    generation: u64,
}

impl RouteTree {
    pub const ROOT: NodeId = 0;

    /// Builds a tree from parsed patterns
    ///
    /// Fails on the first duplicate route or conflicting parameter edge;
    /// a partially built tree is never returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_router::{BuildError, RoutePattern, RouteTree};
    ///
    /// let patterns = vec![
    ///     RoutePattern::parse("/apple").unwrap(),
    ///     RoutePattern::parse("/(fruit)/apple").unwrap(),
    /// ];
    ///
    /// let err = RouteTree::build(patterns).unwrap_err();
    /// assert!(matches!(err, BuildError::DuplicateRoute(_, _)));
    /// ```
    #[instrument(level = "debug", skip_all)]
    pub fn build<I>(patterns: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = RoutePattern>,
    {
        let mut tree = Self::empty();

        for pattern in patterns {
            tree.insert(pattern)?;
        }

        debug!(routes = tree.by_pathname.len(), nodes = tree.nodes.len(), "route tree built");
        Ok(tree)
    }

    /// Parses and builds in one step
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_router::RouteTree;
    ///
    /// let tree = RouteTree::from_paths(["/apple", "/colors/[color]"]).unwrap();
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn from_paths<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = paths
            .into_iter()
            .map(|path| RoutePattern::parse(path.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self::build(patterns)?)
    }

    fn empty() -> Self {
        Self {
            nodes: vec![RouteTreeNode::default()],
            by_pathname: BTreeMap::new(),
            generation: 0,
        }
    }

    fn insert(&mut self, pattern: RoutePattern) -> Result<(), BuildError> {
        let mut current = Self::ROOT;

        for segment in pattern.segments() {
            current = match segment {
                SegmentDescriptor::Static(text) => self.static_edge(current, text),
                SegmentDescriptor::Dynamic(name) => self.dynamic_edge(current, name, &pattern)?,
                SegmentDescriptor::CatchAll(_) | SegmentDescriptor::OptionalCatchAll(_) => {
                    self.catch_all_edge(current, segment, &pattern)?
                }
                SegmentDescriptor::Group(_) => continue,
            };
        }

        if let Some(existing) = &self.nodes[current].terminal {
            return Err(BuildError::DuplicateRoute(
                existing.declared().to_string(),
                pattern.declared().to_string(),
            ));
        }

        self.by_pathname.insert(pattern.pathname(), current);
        self.nodes[current].terminal = Some(pattern);
        Ok(())
    }

    fn push_node(&mut self, parent: NodeId, edge: SegmentDescriptor) -> NodeId {
        self.nodes.push(RouteTreeNode::child_of(parent, edge));
        self.nodes.len() - 1
    }

    fn static_edge(&mut self, parent: NodeId, text: &str) -> NodeId {
        if let Some(id) = self.nodes[parent].static_child(text) {
            return id;
        }

        let id = self.push_node(parent, SegmentDescriptor::Static(text.to_string()));
        self.nodes[parent].statics.insert(text.to_string(), id);
        id
    }

    fn dynamic_edge(
        &mut self,
        parent: NodeId,
        name: &str,
        pattern: &RoutePattern,
    ) -> Result<NodeId, BuildError> {
        match &self.nodes[parent].dynamic {
            Some((existing, id)) if existing == name => Ok(*id),
            Some((existing, _)) => Err(BuildError::ConflictingDynamicName {
                route: pattern.declared().to_string(),
                existing: existing.clone(),
                conflicting: name.to_string(),
            }),
            None => {
                let id = self.push_node(parent, SegmentDescriptor::Dynamic(name.to_string()));
                self.nodes[parent].dynamic = Some((name.to_string(), id));
                Ok(id)
            }
        }
    }

    fn catch_all_edge(
        &mut self,
        parent: NodeId,
        edge: &SegmentDescriptor,
        pattern: &RoutePattern,
    ) -> Result<NodeId, BuildError> {
        match &self.nodes[parent].catch_all {
            Some((existing, id)) if existing == edge => Ok(*id),
            Some((existing, _)) => Err(BuildError::ConflictingCatchAll {
                route: pattern.declared().to_string(),
                existing: existing.to_string(),
                conflicting: edge.to_string(),
            }),
            None => {
                let id = self.push_node(parent, edge.clone());
                self.nodes[parent].catch_all = Some((edge.clone(), id));
                Ok(id)
            }
        }
    }

    pub fn node(&self, id: NodeId) -> &RouteTreeNode {
        &self.nodes[id]
    }

    pub fn root(&self) -> &RouteTreeNode {
        self.node(Self::ROOT)
    }

    /// Number of declared routes
    pub fn len(&self) -> usize {
        self.by_pathname.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pathname.is_empty()
    }

    /// Terminal nodes and their routes, ordered by canonical pathname
    pub fn routes(&self) -> impl Iterator<Item = (NodeId, &RoutePattern)> {
        self.by_pathname.values().filter_map(move |&id| {
            self.nodes[id].terminal.as_ref().map(|pattern| (id, pattern))
        })
    }

    /// Locates a declared route by its pathname
    ///
    /// Accepts the canonical form (`/colors/[color]`) or any spelling that
    /// erases to it (`/(shop)/colors/[color]`).
    pub fn find(&self, pathname: &str) -> Option<&RoutePattern> {
        let canonical = RoutePattern::parse(pathname).ok()?.pathname();
        self.by_pathname
            .get(&canonical)
            .and_then(|&id| self.nodes[id].terminal.as_ref())
    }

    /// Edges from the root down to `id`, left to right
    pub fn edges_to(&self, id: NodeId) -> Vec<&SegmentDescriptor> {
        let mut edges = Vec::new();
        let mut current = self.nodes[id].parent();

        while let Some((parent, edge)) = current {
            edges.push(edge);
            current = self.nodes[parent].parent();
        }

        edges.reverse();
        edges
    }

    /// Generation stamped by the `RouteTable` that published this tree
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Hot-swappable holder of the current route tree
///
/// Readers take an `Arc` snapshot and keep it for the whole navigation;
/// `replace`/`reload` publish a wholly new tree in one atomic store, so a
/// reader sees either the old tree or the new one, never a mix. Writers are
/// serialised so generations are published in order.
pub struct RouteTable {
    tree: ArcSwap<RouteTree>,
    writer: Mutex<()>,
}

impl RouteTable {
    pub fn new(tree: RouteTree) -> Self {
        Self {
            tree: ArcSwap::new(Arc::new(tree)),
            writer: Mutex::new(()),
        }
    }

    pub fn from_paths<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RouteTree::from_paths(paths).map(Self::new)
    }

    /// Current tree
    pub fn snapshot(&self) -> Arc<RouteTree> {
        self.tree.load_full()
    }

    /// Generation of the most recently published tree
    pub fn generation(&self) -> u64 {
        self.tree.load().generation
    }

    /// Publishes `tree` as the next generation and returns that generation
    pub fn replace(&self, mut tree: RouteTree) -> u64 {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = self.tree.load().generation + 1;
        tree.generation = generation;
        self.tree.store(Arc::new(tree));
        debug!(generation, "route tree swapped");
        generation
    }

    /// Rebuilds from `paths`; on error the current tree stays published
    pub fn reload<I, S>(&self, paths: I) -> Result<u64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RouteTree::from_paths(paths).map(|tree| self.replace(tree))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(RouteTree::empty())
    }
}
