//! Mounted-tree core: the arena, the mount pass, and the patch machinery.

mod context;
mod dispatch;
mod id;
mod mount;
mod node;
mod stack;
mod tree;

pub use mount::Mounter;

pub use context::Context;
pub use dispatch::{Handle, Task};
pub use id::ViewId;
pub use tree::Tree;
