use std::result::Result as StdResult;

use thiserror::Error;

use crate::core::ViewId;

/// Result type for veneer operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Only structural mutations of the mounted arena can fail; patch operations
/// degrade to no-ops when their preconditions are missing and never surface
/// here.
#[derive(PartialEq, Error, Debug, Clone)]
pub enum Error {
    /// The referenced node is not in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(ViewId),

    /// The node is already attached to a parent.
    #[error("node already attached: {0:?}")]
    AlreadyAttached(ViewId),

    /// Attaching the child under the parent would create a cycle.
    #[error("attach would create a cycle: parent {parent:?}, child {child:?}")]
    WouldCreateCycle {
        /// Intended parent.
        parent: ViewId,
        /// Intended child.
        child: ViewId,
    },

    /// The index path does not name a row in the list model.
    #[error("no row at section {section}, row {row}")]
    NoSuchRow {
        /// Section index.
        section: usize,
        /// Row index within the section.
        row: usize,
    },

    /// The target node is not an arranged container.
    #[error("not an arranged container: {0:?}")]
    NotArranged(ViewId),

    /// Internal error.
    #[error("internal: {0}")]
    Internal(String),
}
