use std::collections::HashMap;

use crate::{
    core::id::ViewId,
    geom::{Axis, CrossAlignment, Distribution},
    layout::Constraint,
    widget::{Primitive, TapHandler},
};

/// Node data stored in the arena.
pub struct Node {
    /// Parent in the retained view tree.
    pub parent: Option<ViewId>,
    /// Subviews in insertion order.
    pub subviews: Vec<ViewId>,
    /// What this node is.
    pub kind: NodeKind,
    /// Visibility flag, reported to the host.
    pub hidden: bool,
    /// True for zero-footprint anchors synthesized by the stack builder.
    pub anchor: bool,
    /// Constraints this node declares about itself and its descendants.
    pub constraints: Vec<Constraint>,
    /// Leaf payload, present on leaf nodes only.
    pub primitive: Option<Box<dyn Primitive>>,
    /// Tap callback, present when a gesture widget targeted this node.
    pub on_tap: Option<TapHandler>,
}

impl Node {
    /// A plain view node with no payload.
    pub fn plain() -> Self {
        Self {
            parent: None,
            subviews: Vec::new(),
            kind: NodeKind::Plain,
            hidden: false,
            anchor: false,
            constraints: Vec::new(),
            primitive: None,
            on_tap: None,
        }
    }
}

/// The role a node plays in the retained tree.
pub enum NodeKind {
    /// An ordinary view container.
    Plain,
    /// An arranged container holding an ordered child list plus spacing
    /// directives.
    Arranged(Arranged),
    /// A mounted spacer: bookkeeping only, never a subview.
    Spacer(SpacerState),
}

/// Arranged-container state.
pub struct Arranged {
    /// Main axis.
    pub axis: Axis,
    /// Main-axis distribution policy.
    pub distribution: Distribution,
    /// Cross-axis alignment policy.
    pub alignment: CrossAlignment,
    /// Arranged children in arrangement order.
    pub children: Vec<ViewId>,
    /// Extra spacing after a given arranged child. Directive-style: one
    /// value per child, later writes overwrite.
    pub spacing_after: HashMap<ViewId, f64>,
    /// Spacer records registered against this container.
    pub spacers: Vec<ViewId>,
}

impl Arranged {
    /// An empty arranged container with the given policies.
    pub fn new(axis: Axis, distribution: Distribution, alignment: CrossAlignment) -> Self {
        Self {
            axis,
            distribution,
            alignment,
            children: Vec::new(),
            spacing_after: HashMap::new(),
            spacers: Vec::new(),
        }
    }
}

/// Mounted-spacer state.
pub struct SpacerState {
    /// The arranged container the spacer was built into.
    pub container: ViewId,
    /// The arranged child the gap attaches after.
    pub after: ViewId,
    /// Current gap value.
    pub gap: f64,
}
