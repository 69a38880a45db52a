//! Geometry and alignment value types shared across widgets.

use serde::{Deserialize, Serialize};

/// Per-edge insets where each edge is independently optional.
///
/// An absent edge is not the same as a zero edge: an absent edge emits no
/// constraint at all, so the child may size intrinsically on that side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    /// Leading horizontal inset.
    pub left: Option<f64>,
    /// Top inset.
    pub top: Option<f64>,
    /// Trailing horizontal inset.
    pub right: Option<f64>,
    /// Bottom inset.
    pub bottom: Option<f64>,
}

impl EdgeInsets {
    /// Insets with only the given edges set.
    pub fn only(
        left: Option<f64>,
        top: Option<f64>,
        right: Option<f64>,
        bottom: Option<f64>,
    ) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Insets from left/top/right/bottom in that order.
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::only(Some(left), Some(top), Some(right), Some(bottom))
    }

    /// The same inset on all four edges.
    pub fn all(value: f64) -> Self {
        Self::from_ltrb(value, value, value, value)
    }

    /// Symmetric insets: `vertical` applies to top/bottom, `horizontal` to
    /// left/right. A `None` axis leaves both of its edges absent.
    pub fn symmetric(vertical: Option<f64>, horizontal: Option<f64>) -> Self {
        Self::only(horizontal, vertical, horizontal, vertical)
    }

    /// True if no edge is set.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.top.is_none() && self.right.is_none() && self.bottom.is_none()
    }
}

/// Main axis of an arranged container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Children laid out left to right.
    Horizontal,
    /// Children laid out top to bottom.
    Vertical,
}

/// Main-axis distribution policy for an arranged container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Distribution {
    /// Resize children to fill along the axis.
    #[default]
    Fill,
    /// Give every child the same main-axis length.
    FillEqually,
    /// Size children proportionally to their intrinsic length.
    FillProportionally,
    /// Equal spacing between children.
    EqualSpacing,
    /// Equal spacing between child centers.
    EqualCentering,
}

/// Cross-axis alignment policy for an arranged container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrossAlignment {
    /// Stretch children across the cross axis.
    #[default]
    Fill,
    /// Align children to the leading cross-axis edge.
    Leading,
    /// Center children on the cross axis.
    Center,
    /// Align children to the trailing cross-axis edge.
    Trailing,
}

/// Axes along which a `Center` widget (or overlay target) is centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CenterAxes {
    /// Center horizontally and vertically.
    #[default]
    Both,
    /// Center vertically only.
    Vertical,
    /// Center horizontally only.
    Horizontal,
}

impl CenterAxes {
    /// True if the horizontal axis is centered.
    pub fn horizontal(&self) -> bool {
        matches!(self, Self::Both | Self::Horizontal)
    }

    /// True if the vertical axis is centered.
    pub fn vertical(&self) -> bool {
        matches!(self, Self::Both | Self::Vertical)
    }
}
