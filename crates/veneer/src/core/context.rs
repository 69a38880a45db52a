//! The mount / rebuild / patch state machine.
//!
//! A [`Context`] owns a builder closure producing a widget tree, the arena
//! the tree mounts into, and the mount-time key index used to address nodes
//! for patching. The lifecycle is Unmounted -> Mounted, cycled by
//! [`Context::rebuild`], which is a full replacement with no diffing. The
//! patch operations [`Context::set_hidden`] and [`Context::set_spacing`] are
//! the incremental path: arena index lookups that never detach subtrees.

use std::{collections::HashMap, sync::mpsc};

use crate::{
    core::{
        dispatch::{Handle, Task},
        id::ViewId,
        mount::Mounter,
        tree::Tree,
    },
    error::Result,
    layout::Constraint,
    widget::{AppBar, Widget},
};

/// Owner of a mounted widget tree: builds, patches, and rebuilds it.
pub struct Context {
    /// Arena holding the mounted hierarchy.
    tree: Tree,
    /// Produces the widget tree on every mount.
    builder: Box<dyn FnMut() -> Widget + Send>,
    /// Mounted root, present in the Mounted state.
    root: Option<ViewId>,
    /// Widget keys registered during the last mount.
    keys: HashMap<String, ViewId>,
    /// App-bar chrome recorded during the last mount.
    chrome: Option<AppBar>,
    /// Sender cloned into [`Handle`]s.
    tasks_tx: mpsc::Sender<Task>,
    /// Queue drained by [`Context::drain_pending`].
    tasks_rx: mpsc::Receiver<Task>,
}

impl Context {
    /// A fresh unmounted context around a builder closure.
    ///
    /// The builder is retained and re-invoked on every [`Context::mount`] and
    /// [`Context::rebuild`], so state it captures drives what gets built.
    pub fn new(builder: impl FnMut() -> Widget + Send + 'static) -> Self {
        let (tasks_tx, tasks_rx) = mpsc::channel();
        Self {
            tree: Tree::new(),
            builder: Box::new(builder),
            root: None,
            keys: HashMap::new(),
            chrome: None,
            tasks_tx,
            tasks_rx,
        }
    }

    /// Invoke the builder and mount the resulting tree full-bleed under the
    /// arena's host root.
    ///
    /// Mounting while already mounted is a programmer error; release builds
    /// tolerate it by unmounting first.
    pub fn mount(&mut self) -> Result<ViewId> {
        if self.root.is_some() {
            debug_assert!(false, "mount while already mounted");
            tracing::warn!("mount while already mounted; unmounting first");
            self.unmount()?;
        }
        tracing::debug!("mounting");

        let widget = (self.builder)();
        let mut keys = HashMap::new();
        let mut chrome = None;
        let mounted = Mounter {
            tree: &mut self.tree,
            keys: &mut keys,
            chrome: Some(&mut chrome),
        }
        .mount(widget)?;

        let host = self.tree.root();
        self.tree.attach(host, mounted.root)?;
        // The mounted root owns its fill constraints so unmounting drops
        // them with the subtree.
        self.tree
            .add_constraints(mounted.root, Constraint::fill(mounted.root, host));

        self.keys = keys;
        self.chrome = chrome;
        self.root = Some(mounted.root);
        Ok(mounted.root)
    }

    /// Apply a caller state change, then replace the whole mounted tree.
    ///
    /// No diffing: the old subtree is removed and the builder runs again.
    pub fn rebuild(&mut self, mutate: impl FnOnce()) -> Result<ViewId> {
        tracing::debug!("rebuilding");
        mutate();
        self.unmount()?;
        self.mount()
    }

    /// Remove the mounted subtree and return to the unmounted state.
    ///
    /// Idempotent: unmounting an unmounted context does nothing.
    pub fn unmount(&mut self) -> Result<()> {
        if let Some(root) = self.root.take() {
            tracing::debug!("unmounting");
            self.tree.remove_subtree(root)?;
            self.keys.clear();
            self.chrome = None;
        }
        Ok(())
    }

    /// True between a successful mount and the next unmount.
    pub fn is_mounted(&self) -> bool {
        self.root.is_some()
    }

    /// The mounted native root, if mounted.
    pub fn root_view(&self) -> Option<ViewId> {
        self.root
    }

    /// Read-only view of the mounted arena, for the host's layout and render
    /// passes.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Resolve a widget key registered during the last mount.
    pub fn node(&self, key: &str) -> Option<ViewId> {
        self.keys.get(key).copied()
    }

    /// Resolve a widget key to a mounted spacer.
    ///
    /// `None` if the key is unregistered or names a non-spacer node.
    pub fn spacer(&self, key: &str) -> Option<ViewId> {
        let id = self.node(key)?;
        self.tree.spacer_record(id).map(|_| id)
    }

    /// Toggle visibility of an arranged child.
    ///
    /// A no-op unless the node's parent is an arranged container. The flag
    /// also propagates to a synthetic anchor immediately after the node in
    /// arrangement order, so an anchor carrying the node's trailing gap
    /// collapses with it.
    pub fn set_hidden(&mut self, id: ViewId, hidden: bool) {
        let Some(parent) = self.tree.parent(id) else {
            return;
        };
        if !self.tree.is_arranged(parent) {
            return;
        }
        self.tree.set_node_hidden(id, hidden);
        if let Some(next) = self.tree.arranged_next(parent, id)
            && self.tree.is_anchor(next)
        {
            self.tree.set_node_hidden(next, hidden);
        }
    }

    /// Update the gap carried by a mounted spacer.
    ///
    /// Re-attaches the spacing directive after the spacer's recorded
    /// predecessor. A no-op if the id is not a mounted spacer.
    pub fn set_spacing(&mut self, id: ViewId, gap: f64) {
        let Some((container, after, _)) = self.tree.spacer_record(id) else {
            return;
        };
        self.tree.update_spacer_gap(id, gap);
        if let Err(err) = self.tree.set_spacing_after(container, after, gap) {
            tracing::warn!(%err, "spacer record out of sync with its container");
        }
    }

    /// Invoke the tap handler attached to a node, if any.
    pub fn dispatch_tap(&mut self, id: ViewId) -> bool {
        self.tree.dispatch_tap(id)
    }

    /// App-bar chrome recorded during the last mount.
    pub fn app_bar(&self) -> Option<&AppBar> {
        self.chrome.as_ref()
    }

    /// A cloneable handle other threads can post tasks through.
    pub fn handle(&self) -> Handle {
        Handle::new(self.tasks_tx.clone())
    }

    /// Run all queued tasks in posting order. Returns how many ran.
    ///
    /// The screen host calls this on the UI thread.
    pub fn drain_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.tasks_rx.try_recv() {
            task(self);
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    };

    use super::*;
    use crate::{
        geom::EdgeInsets,
        widget::Primitive,
    };

    struct Label(&'static str);
    impl Primitive for Label {}

    fn two_labels_with_gap(gap: f64) -> Widget {
        Widget::column(vec![
            Widget::leaf(Label("a")).keyed("a"),
            Widget::spacer(gap).keyed("gap"),
            Widget::leaf(Label("b")).keyed("b"),
        ])
    }

    #[test]
    fn mount_attaches_root_full_bleed() -> Result<()> {
        let mut ctx = Context::new(|| two_labels_with_gap(4.0));
        let root = ctx.mount()?;
        assert!(ctx.is_mounted());
        assert_eq!(ctx.root_view(), Some(root));
        assert_eq!(ctx.tree().parent(root), Some(ctx.tree().root()));
        assert_eq!(
            ctx.tree().constraints(root),
            Constraint::fill(root, ctx.tree().root())
        );
        Ok(())
    }

    #[test]
    fn hidden_round_trip_leaves_no_residue() -> Result<()> {
        let mut ctx = Context::new(|| two_labels_with_gap(4.0));
        let root = ctx.mount()?;
        let a = ctx.node("a").unwrap();

        let before: Vec<ViewId> = ctx.tree().arranged_children(root).unwrap().to_vec();
        ctx.set_hidden(a, true);
        assert!(ctx.tree().is_hidden(a));
        ctx.set_hidden(a, false);
        assert!(!ctx.tree().is_hidden(a));
        assert_eq!(ctx.tree().arranged_children(root).unwrap(), before);
        assert_eq!(ctx.tree().spacing_after(root, a), Some(4.0));
        Ok(())
    }

    #[test]
    fn hidden_is_noop_outside_arranged_containers() -> Result<()> {
        let mut ctx = Context::new(|| {
            Widget::padding(EdgeInsets::all(2.0), Widget::leaf(Label("a")).keyed("a"))
        });
        ctx.mount()?;
        let a = ctx.node("a").unwrap();
        ctx.set_hidden(a, true);
        assert!(!ctx.tree().is_hidden(a));
        Ok(())
    }

    #[test]
    fn set_spacing_patches_only_the_recorded_directive() -> Result<()> {
        let mut ctx = Context::new(|| {
            Widget::column(vec![
                Widget::leaf(Label("a")).keyed("a"),
                Widget::spacer(4.0).keyed("first"),
                Widget::leaf(Label("b")).keyed("b"),
                Widget::spacer(6.0).keyed("second"),
                Widget::leaf(Label("c")),
            ])
        });
        let root = ctx.mount()?;
        let a = ctx.node("a").unwrap();
        let b = ctx.node("b").unwrap();
        let gap = ctx.node("first").unwrap();

        let before: Vec<ViewId> = ctx.tree().arranged_children(root).unwrap().to_vec();
        ctx.set_spacing(gap, 12.0);
        assert_eq!(ctx.tree().spacing_after(root, a), Some(12.0));
        assert_eq!(ctx.tree().spacing_after(root, b), Some(6.0));
        assert_eq!(ctx.tree().arranged_children(root).unwrap(), before);
        Ok(())
    }

    #[test]
    fn spacer_lookup_filters_to_mounted_spacers() -> Result<()> {
        let mut ctx = Context::new(|| two_labels_with_gap(4.0));
        ctx.mount()?;
        let id = ctx.spacer("gap").unwrap();
        assert_eq!(ctx.node("gap"), Some(id));
        assert!(ctx.tree().spacer_record(id).is_some());
        // Keys naming non-spacer nodes do not resolve as spacers.
        assert_eq!(ctx.spacer("a"), None);
        assert_eq!(ctx.spacer("missing"), None);
        Ok(())
    }

    #[test]
    fn set_spacing_on_non_spacer_is_noop() -> Result<()> {
        // A spacer outside a stack mounts as an inert plain view; patching
        // it changes nothing.
        let mut ctx = Context::new(|| {
            Widget::padding(EdgeInsets::all(2.0), Widget::spacer(4.0).keyed("loose"))
        });
        ctx.mount()?;
        let loose = ctx.node("loose").unwrap();
        let len = ctx.tree().len();
        ctx.set_spacing(loose, 9.0);
        assert_eq!(ctx.tree().len(), len);
        assert!(ctx.tree().spacer_record(loose).is_none());
        Ok(())
    }

    #[test]
    fn rebuild_replaces_without_leaking() -> Result<()> {
        let gap = Arc::new(Mutex::new(4.0));
        let builder_gap = Arc::clone(&gap);
        let mut ctx = Context::new(move || two_labels_with_gap(*builder_gap.lock().unwrap()));
        ctx.mount()?;
        let old_a = ctx.node("a").unwrap();

        let root = ctx.rebuild(|| *gap.lock().unwrap() = 9.0)?;
        let a = ctx.node("a").unwrap();
        assert_ne!(a, old_a);
        assert!(!ctx.tree().contains(old_a));
        assert_eq!(ctx.tree().spacing_after(root, a), Some(9.0));

        // Observably equal to building fresh with the new parameter.
        let mut fresh = Context::new(|| two_labels_with_gap(9.0));
        fresh.mount()?;
        assert_eq!(ctx.tree().len(), fresh.tree().len());
        Ok(())
    }

    #[test]
    fn unmount_clears_keys_and_chrome() -> Result<()> {
        let mut ctx = Context::new(|| {
            Widget::app_bar(
                AppBar {
                    title: Some("Home".into()),
                    trailing: None,
                },
                two_labels_with_gap(4.0),
            )
        });
        ctx.mount()?;
        assert_eq!(ctx.app_bar().and_then(|b| b.title.as_deref()), Some("Home"));
        assert!(ctx.node("a").is_some());

        ctx.unmount()?;
        assert!(!ctx.is_mounted());
        assert!(ctx.node("a").is_none());
        assert!(ctx.app_bar().is_none());
        assert!(ctx.tree().is_empty());
        Ok(())
    }

    #[test]
    fn drain_runs_posted_tasks_in_fifo_order() -> Result<()> {
        let mut ctx = Context::new(|| two_labels_with_gap(4.0));
        ctx.mount()?;

        let order = Arc::new(Mutex::new(Vec::new()));
        let handle = ctx.handle();
        for n in 1..=3 {
            let order = Arc::clone(&order);
            assert!(handle.post(move |_ctx| order.lock().unwrap().push(n)));
        }
        assert_eq!(ctx.drain_pending(), 3);
        assert_eq!(*order.lock().unwrap(), [1, 2, 3]);
        assert_eq!(ctx.drain_pending(), 0);
        Ok(())
    }

    #[test]
    fn posted_tasks_can_patch_the_context() -> Result<()> {
        let taps = Arc::new(AtomicU32::new(0));
        let tap_count = Arc::clone(&taps);
        let mut ctx = Context::new(move || {
            let tap_count = Arc::clone(&tap_count);
            Widget::column(vec![Widget::gesture(
                move || {
                    tap_count.fetch_add(1, Ordering::SeqCst);
                },
                Widget::leaf(Label("button")).keyed("button"),
            )])
        });
        ctx.mount()?;

        let handle = ctx.handle();
        handle.post(|ctx| {
            if let Some(id) = ctx.node("button") {
                ctx.dispatch_tap(id);
            }
        });
        ctx.drain_pending();
        assert_eq!(taps.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn post_fails_after_context_drop() -> Result<()> {
        let ctx = Context::new(|| two_labels_with_gap(4.0));
        let handle = ctx.handle();
        drop(ctx);
        assert!(!handle.post(|_ctx| {}));
        Ok(())
    }
}
