//! The declarative widget tree.
//!
//! A [`Widget`] is a plain value describing one node of a layout tree,
//! independent of any mounted native object. The type is a closed set of
//! variants rather than an open hierarchy, so mounting never downcasts:
//!
//! - [`Widget::Leaf`] - an opaque platform-rendered primitive.
//! - [`Widget::Single`] - exactly one owned child (padding, centering, sized
//!   box, app bar, gesture bridge).
//! - [`Widget::Stack`] - zero or more ordered children along one axis.
//! - [`Widget::Overlay`] - a base child with a target layered on top.
//! - [`Widget::Spacer`] - a gap marker, meaningful only inside a stack.

use std::any::Any;

use crate::geom::{Axis, CenterAxes, CrossAlignment, Distribution, EdgeInsets};

/// Opaque leaf payload rendered by the host toolkit.
///
/// The crate stores the value in the mounted arena and hands it back through
/// [`Tree::primitive`](crate::core::Tree::primitive); it never inspects it.
pub trait Primitive: Any + Send {}

/// Callback attached by a gesture widget and invoked on tap dispatch.
pub type TapHandler = Box<dyn FnMut() + Send>;

/// A node in the declarative layout tree.
pub enum Widget {
    /// An opaque platform primitive with no children known to the tree.
    Leaf(Leaf),
    /// A wrapper owning exactly one child.
    Single(Single),
    /// An ordered sequence of children arranged along one axis.
    Stack(Stack),
    /// A base child with a target child layered on top of it.
    Overlay(Overlay),
    /// Extra gap after the previous stack sibling.
    Spacer(Spacer),
}

/// Leaf widget state.
pub struct Leaf {
    /// Host-rendered payload.
    pub(crate) primitive: Box<dyn Primitive>,
    /// Optional patch-addressing key.
    pub(crate) key: Option<String>,
}

/// Single-child wrapper state.
pub struct Single {
    /// Which wrapper this is.
    pub(crate) kind: SingleKind,
    /// The owned child.
    pub(crate) child: Box<Widget>,
    /// Optional patch-addressing key.
    pub(crate) key: Option<String>,
}

/// The wrapper behaviors a [`Single`] can take.
pub enum SingleKind {
    /// Per-edge insets around the child; absent edges stay unconstrained.
    Padding(EdgeInsets),
    /// Center the child along the selected axes.
    Center(CenterAxes),
    /// Fix the child's width and/or height.
    SizedBox {
        /// Fixed width, if any.
        width: Option<f64>,
        /// Fixed height, if any.
        height: Option<f64>,
    },
    /// Screen chrome metadata, consumed by the host rather than mounted.
    AppBar(AppBar),
    /// Tap bridge attached to the resolved innermost renderable child.
    Gesture(TapHandler),
}

/// Chrome metadata carried by an app-bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppBar {
    /// Title shown by the hosting screen.
    pub title: Option<String>,
    /// Label of an optional trailing action item.
    pub trailing: Option<String>,
}

/// Stack widget state.
pub struct Stack {
    /// Main axis.
    pub(crate) axis: Axis,
    /// Main-axis distribution policy.
    pub(crate) distribution: Distribution,
    /// Cross-axis alignment policy.
    pub(crate) alignment: CrossAlignment,
    /// Children in arrangement order; may include spacers.
    pub(crate) children: Vec<Widget>,
    /// Optional patch-addressing key.
    pub(crate) key: Option<String>,
}

/// Overlay widget state.
pub struct Overlay {
    /// Child filling the container.
    pub(crate) base: Box<Widget>,
    /// Child layered on top of `base`.
    pub(crate) target: Box<Widget>,
    /// Axes on which the target is centered.
    pub(crate) axes: CenterAxes,
    /// Per-edge insets for the target; a present edge suppresses centering
    /// on that axis.
    pub(crate) insets: EdgeInsets,
    /// Optional patch-addressing key.
    pub(crate) key: Option<String>,
}

/// Spacer widget state.
pub struct Spacer {
    /// Gap injected after the previous stack sibling.
    pub(crate) gap: f64,
    /// Optional patch-addressing key.
    pub(crate) key: Option<String>,
}

impl Widget {
    /// A leaf wrapping a host-rendered primitive.
    pub fn leaf(primitive: impl Primitive + 'static) -> Self {
        Self::Leaf(Leaf {
            primitive: Box::new(primitive),
            key: None,
        })
    }

    /// A horizontal stack distributing proportionally, children aligned to
    /// the leading cross edge.
    pub fn row(children: Vec<Self>) -> Self {
        Self::stack_with(
            Axis::Horizontal,
            Distribution::FillProportionally,
            CrossAlignment::Leading,
            children,
        )
    }

    /// A vertical stack filling the main axis, children aligned to the
    /// leading cross edge.
    pub fn column(children: Vec<Self>) -> Self {
        Self::stack_with(
            Axis::Vertical,
            Distribution::Fill,
            CrossAlignment::Leading,
            children,
        )
    }

    /// A horizontal stack, dropping `None` entries.
    pub fn row_opt(children: Vec<Option<Self>>) -> Self {
        Self::row(children.into_iter().flatten().collect())
    }

    /// A vertical stack, dropping `None` entries.
    pub fn column_opt(children: Vec<Option<Self>>) -> Self {
        Self::column(children.into_iter().flatten().collect())
    }

    /// A stack along the given axis with default policies.
    pub fn stack(axis: Axis, children: Vec<Self>) -> Self {
        Self::Stack(Stack {
            axis,
            distribution: Distribution::default(),
            alignment: CrossAlignment::default(),
            children,
            key: None,
        })
    }

    /// A stack with explicit distribution and alignment policies.
    pub fn stack_with(
        axis: Axis,
        distribution: Distribution,
        alignment: CrossAlignment,
        children: Vec<Self>,
    ) -> Self {
        Self::Stack(Stack {
            axis,
            distribution,
            alignment,
            children,
            key: None,
        })
    }

    /// Wrap a child with per-edge insets.
    pub fn padding(insets: EdgeInsets, child: Self) -> Self {
        Self::single(SingleKind::Padding(insets), child)
    }

    /// Center a child along the selected axes.
    pub fn center(axes: CenterAxes, child: Self) -> Self {
        Self::single(SingleKind::Center(axes), child)
    }

    /// Fix a child's width and/or height.
    pub fn sized_box(width: Option<f64>, height: Option<f64>, child: Self) -> Self {
        Self::single(SingleKind::SizedBox { width, height }, child)
    }

    /// Attach app-bar chrome metadata to a subtree.
    pub fn app_bar(bar: AppBar, child: Self) -> Self {
        Self::single(SingleKind::AppBar(bar), child)
    }

    /// Attach a tap callback to the resolved innermost renderable child.
    pub fn gesture(on_tap: impl FnMut() + Send + 'static, child: Self) -> Self {
        Self::single(SingleKind::Gesture(Box::new(on_tap)), child)
    }

    /// Layer `target` on top of `base`, centered on `axes` except where an
    /// inset is present.
    pub fn overlay(base: Self, target: Self, axes: CenterAxes, insets: EdgeInsets) -> Self {
        Self::Overlay(Overlay {
            base: Box::new(base),
            target: Box::new(target),
            axes,
            insets,
            key: None,
        })
    }

    /// Extra gap after the previous stack sibling.
    pub fn spacer(gap: f64) -> Self {
        Self::Spacer(Spacer { gap, key: None })
    }

    /// Tag this widget with a key for patch addressing after mount.
    pub fn keyed(mut self, key: impl Into<String>) -> Self {
        let key = Some(key.into());
        match &mut self {
            Self::Leaf(w) => w.key = key,
            Self::Single(w) => w.key = key,
            Self::Stack(w) => w.key = key,
            Self::Overlay(w) => w.key = key,
            Self::Spacer(w) => w.key = key,
        }
        self
    }

    /// A single-child wrapper of the given kind.
    fn single(kind: SingleKind, child: Self) -> Self {
        Self::Single(Single {
            kind,
            child: Box::new(child),
            key: None,
        })
    }
}
