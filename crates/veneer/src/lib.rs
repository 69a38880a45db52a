mod core;

pub mod error;
pub mod geom;
pub mod layout;
pub mod list;
pub mod widget;

pub use crate::core::{Context, Handle, Task, Tree, ViewId};
pub use error::{Error, Result};
pub use geom::{Axis, CenterAxes, CrossAlignment, Distribution, EdgeInsets};
pub use layout::{Attr, Constraint, Relation};
pub use list::{IndexPath, ListAdapter, ListRow, ListSection};
pub use widget::{AppBar, Primitive, TapHandler, Widget};
