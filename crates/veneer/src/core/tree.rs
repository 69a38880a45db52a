//! The mounted-view arena.
//!
//! `Tree` is the retained model of the native hierarchy: every mounted view,
//! arranged container, and spacer occupies a slot keyed by [`ViewId`]. Patch
//! operations are index lookups against this arena, never walks of an
//! ambient native tree. The host's layout engine and list host consume the
//! arena read-only.

use slotmap::SlotMap;

use crate::{
    core::{
        id::ViewId,
        node::{Arranged, Node, NodeKind, SpacerState},
    },
    error::{Error, Result},
    geom::{Axis, CrossAlignment, Distribution},
    layout::Constraint,
    widget::{Primitive, TapHandler},
};

/// Arena of mounted nodes plus the host root they hang under.
pub struct Tree {
    /// Node storage.
    nodes: SlotMap<ViewId, Node>,
    /// Host root node, created with the tree and never removed.
    root: ViewId,
}

impl Tree {
    /// Create an empty tree with a host root node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::plain());
        Self { nodes, root }
    }

    /// The host root node id.
    pub fn root(&self) -> ViewId {
        self.root
    }

    /// True if the node is in the arena.
    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the arena, including the host root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if only the host root remains.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Create a detached plain view node.
    pub fn create_plain(&mut self) -> ViewId {
        self.nodes.insert(Node::plain())
    }

    /// Create a detached leaf node carrying a host primitive.
    pub fn create_leaf(&mut self, primitive: Box<dyn Primitive>) -> ViewId {
        let mut node = Node::plain();
        node.primitive = Some(primitive);
        self.nodes.insert(node)
    }

    /// Create a detached arranged container.
    pub fn create_arranged(
        &mut self,
        axis: Axis,
        distribution: Distribution,
        alignment: CrossAlignment,
    ) -> ViewId {
        let mut node = Node::plain();
        node.kind = NodeKind::Arranged(Arranged::new(axis, distribution, alignment));
        self.nodes.insert(node)
    }

    /// Create a detached zero-footprint anchor node.
    pub(crate) fn create_anchor(&mut self) -> ViewId {
        let mut node = Node::plain();
        node.anchor = true;
        self.nodes.insert(node)
    }

    /// Attach a detached child under a parent.
    pub fn attach(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(Error::NodeNotFound(child));
        }
        if matches!(self.nodes[child].kind, NodeKind::Spacer(_)) {
            return Err(Error::Internal("spacer entries cannot be subviews".into()));
        }
        if self.nodes[child].parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].subviews.push(child);
        Ok(())
    }

    /// Detach a child from its parent if attached.
    ///
    /// Detaching an arranged child also drops its arrangement entry and any
    /// spacing directive attached after it.
    pub fn detach(&mut self, child: ViewId) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(Error::NodeNotFound(child));
        }
        let Some(parent) = self.nodes[child].parent else {
            return Ok(());
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.subviews.retain(|id| *id != child);
            if let NodeKind::Arranged(arr) = &mut node.kind {
                arr.children.retain(|id| *id != child);
                arr.spacing_after.remove(&child);
            }
        }
        self.nodes[child].parent = None;
        Ok(())
    }

    /// Remove a node and all descendants from the arena.
    ///
    /// Spacer records registered against removed arranged containers are
    /// removed along with them.
    pub fn remove_subtree(&mut self, id: ViewId) -> Result<()> {
        if id == self.root {
            return Err(Error::Internal("cannot remove the host root".into()));
        }
        if !self.nodes.contains_key(id) {
            return Err(Error::NodeNotFound(id));
        }
        self.detach(id)?;

        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            let Some(node) = self.nodes.remove(node_id) else {
                continue;
            };
            stack.extend(node.subviews);
            if let NodeKind::Arranged(arr) = node.kind {
                for spacer in arr.spacers {
                    self.nodes.remove(spacer);
                }
            }
        }
        Ok(())
    }

    /// Append a child to an arranged container's arrangement.
    pub fn append_arranged(&mut self, container: ViewId, child: ViewId) -> Result<()> {
        if !self.is_arranged(container) {
            return Err(Error::NotArranged(container));
        }
        self.attach(container, child)?;
        if let NodeKind::Arranged(arr) = &mut self.nodes[container].kind {
            arr.children.push(child);
        }
        Ok(())
    }

    /// Overwrite the "extra spacing after `child`" directive on a container.
    pub fn set_spacing_after(&mut self, container: ViewId, child: ViewId, gap: f64) -> Result<()> {
        let node = self
            .nodes
            .get_mut(container)
            .ok_or(Error::NodeNotFound(container))?;
        let NodeKind::Arranged(arr) = &mut node.kind else {
            return Err(Error::NotArranged(container));
        };
        if !arr.children.contains(&child) {
            return Err(Error::NodeNotFound(child));
        }
        arr.spacing_after.insert(child, gap);
        Ok(())
    }

    /// The spacing directive attached after an arranged child, if any.
    pub fn spacing_after(&self, container: ViewId, child: ViewId) -> Option<f64> {
        match &self.nodes.get(container)?.kind {
            NodeKind::Arranged(arr) => arr.spacing_after.get(&child).copied(),
            _ => None,
        }
    }

    /// Arranged children of a container in arrangement order.
    pub fn arranged_children(&self, container: ViewId) -> Option<&[ViewId]> {
        match &self.nodes.get(container)?.kind {
            NodeKind::Arranged(arr) => Some(&arr.children),
            _ => None,
        }
    }

    /// Axis, distribution, and alignment of an arranged container.
    pub fn arranged_config(&self, container: ViewId) -> Option<(Axis, Distribution, CrossAlignment)> {
        match &self.nodes.get(container)?.kind {
            NodeKind::Arranged(arr) => Some((arr.axis, arr.distribution, arr.alignment)),
            _ => None,
        }
    }

    /// The arranged entry immediately after `child`, if any.
    pub fn arranged_next(&self, container: ViewId, child: ViewId) -> Option<ViewId> {
        let children = self.arranged_children(container)?;
        let idx = children.iter().position(|id| *id == child)?;
        children.get(idx + 1).copied()
    }

    /// True if the node is an arranged container.
    pub fn is_arranged(&self, id: ViewId) -> bool {
        matches!(
            self.nodes.get(id).map(|n| &n.kind),
            Some(NodeKind::Arranged(_))
        )
    }

    /// Register a mounted spacer against a container and a predecessor.
    pub(crate) fn register_spacer(&mut self, container: ViewId, after: ViewId, gap: f64) -> ViewId {
        let mut node = Node::plain();
        node.kind = NodeKind::Spacer(SpacerState {
            container,
            after,
            gap,
        });
        let id = self.nodes.insert(node);
        if let Some(NodeKind::Arranged(arr)) = self.nodes.get_mut(container).map(|n| &mut n.kind) {
            arr.spacers.push(id);
        }
        id
    }

    /// The container, predecessor, and gap of a mounted spacer.
    pub fn spacer_record(&self, id: ViewId) -> Option<(ViewId, ViewId, f64)> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Spacer(s) => Some((s.container, s.after, s.gap)),
            _ => None,
        }
    }

    /// Update the stored gap on a mounted spacer.
    pub(crate) fn update_spacer_gap(&mut self, id: ViewId, gap: f64) {
        if let Some(NodeKind::Spacer(s)) = self.nodes.get_mut(id).map(|n| &mut n.kind) {
            s.gap = gap;
        }
    }

    /// The parent of a node, if attached.
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(id)?.parent
    }

    /// Subviews of a node in insertion order.
    pub fn subviews(&self, id: ViewId) -> &[ViewId] {
        self.nodes.get(id).map(|n| n.subviews.as_slice()).unwrap_or(&[])
    }

    /// True if the node is hidden.
    pub fn is_hidden(&self, id: ViewId) -> bool {
        self.nodes.get(id).map(|n| n.hidden).unwrap_or(false)
    }

    /// True if the node is a synthesized zero-footprint anchor.
    pub fn is_anchor(&self, id: ViewId) -> bool {
        self.nodes.get(id).map(|n| n.anchor).unwrap_or(false)
    }

    /// Set the raw hidden flag. Patch semantics live on `Context`.
    pub(crate) fn set_node_hidden(&mut self, id: ViewId, hidden: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.hidden = hidden;
        }
    }

    /// Record constraint declarations owned by a node.
    pub(crate) fn add_constraints(
        &mut self,
        owner: ViewId,
        constraints: impl IntoIterator<Item = Constraint>,
    ) {
        if let Some(node) = self.nodes.get_mut(owner) {
            node.constraints.extend(constraints);
        }
    }

    /// Constraint declarations owned by a node, for the layout engine.
    pub fn constraints(&self, id: ViewId) -> &[Constraint] {
        self.nodes
            .get(id)
            .map(|n| n.constraints.as_slice())
            .unwrap_or(&[])
    }

    /// The leaf primitive carried by a node, if any.
    pub fn primitive(&self, id: ViewId) -> Option<&dyn Primitive> {
        self.nodes.get(id)?.primitive.as_deref()
    }

    /// Attach a tap handler to a node.
    pub(crate) fn set_on_tap(&mut self, id: ViewId, handler: TapHandler) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.on_tap = Some(handler);
        }
    }

    /// Invoke the tap handler attached to a node, if any.
    ///
    /// Returns true if a handler ran. There is no bubbling: the handler is
    /// attached to the resolved renderable node at mount time.
    pub fn dispatch_tap(&mut self, id: ViewId) -> bool {
        match self.nodes.get_mut(id).and_then(|n| n.on_tap.as_mut()) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// True if `ancestor` is on the parent chain of `id`.
    fn is_ancestor(&self, ancestor: ViewId, id: ViewId) -> bool {
        let mut current = self.nodes.get(id).and_then(|n| n.parent);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.nodes.get(cur).and_then(|n| n.parent);
        }
        false
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
