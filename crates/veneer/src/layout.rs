//! Constraint declarations consumed by the host's layout engine.
//!
//! This crate never solves geometry. Container widgets declare relationships
//! of the form "attribute A of view X relates to attribute B of view Y with a
//! multiplier and constant", and the host's layout engine reads them back
//! through [`Tree::constraints`](crate::core::Tree::constraints) during its
//! own layout pass.

use crate::core::ViewId;

/// A layout attribute of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    /// Leading horizontal edge.
    Left,
    /// Trailing horizontal edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
    /// Horizontal center.
    CenterX,
    /// Vertical center.
    CenterY,
}

/// How the two sides of a constraint relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relation {
    /// Left side equals right side.
    #[default]
    Equal,
    /// Left side is greater than or equal to the right side.
    AtLeast,
    /// Left side is less than or equal to the right side.
    AtMost,
}

/// A single constraint declaration.
///
/// Reads as `item.attr relation to.attr * multiplier + constant`, or, when
/// `to` is absent, `item.attr relation constant`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    /// The constrained view.
    pub item: ViewId,
    /// The constrained attribute.
    pub attr: Attr,
    /// Relation between the two sides.
    pub relation: Relation,
    /// The second view/attribute, absent for constant-only constraints.
    pub to: Option<(ViewId, Attr)>,
    /// Multiplier applied to the second attribute.
    pub multiplier: f64,
    /// Constant offset.
    pub constant: f64,
}

impl Constraint {
    /// An equality constraint between two view attributes with an offset.
    pub fn pin(item: ViewId, attr: Attr, to: ViewId, to_attr: Attr, constant: f64) -> Self {
        Self {
            item,
            attr,
            relation: Relation::Equal,
            to: Some((to, to_attr)),
            multiplier: 1.0,
            constant,
        }
    }

    /// Pin the same edge of `item` and `to` with an offset.
    pub fn edge(item: ViewId, attr: Attr, to: ViewId, constant: f64) -> Self {
        Self::pin(item, attr, to, attr, constant)
    }

    /// Fix an attribute to a constant, with no second view.
    pub fn fixed(item: ViewId, attr: Attr, constant: f64) -> Self {
        Self {
            item,
            attr,
            relation: Relation::Equal,
            to: None,
            multiplier: 1.0,
            constant,
        }
    }

    /// Center `item` on `to` horizontally.
    pub fn center_x(item: ViewId, to: ViewId) -> Self {
        Self::pin(item, Attr::CenterX, to, Attr::CenterX, 0.0)
    }

    /// Center `item` on `to` vertically.
    pub fn center_y(item: ViewId, to: ViewId) -> Self {
        Self::pin(item, Attr::CenterY, to, Attr::CenterY, 0.0)
    }

    /// Pin all four edges of `item` to `to` with no insets.
    pub fn fill(item: ViewId, to: ViewId) -> Vec<Self> {
        vec![
            Self::edge(item, Attr::Left, to, 0.0),
            Self::edge(item, Attr::Top, to, 0.0),
            Self::edge(item, Attr::Right, to, 0.0),
            Self::edge(item, Attr::Bottom, to, 0.0),
        ]
    }
}
