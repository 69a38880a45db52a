use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a node stored in the mounted arena.
    ///
    /// Spacer entries occupy `ViewId` slots too, even though they never
    /// become subviews, so patch operations address them uniformly.
    pub struct ViewId;
}
