//! Recursive mounting of a widget tree into the arena.
//!
//! Mounting materializes one arena node per renderable widget, emits the
//! constraint declarations each container owes the layout engine, and
//! registers widget keys in the mount-time index. Trailing-edge constraint
//! constants are negative insets, matching the usual "child trails parent"
//! sign convention.

use std::collections::HashMap;

use crate::{
    core::{
        id::ViewId,
        stack::{self, MountChild},
        tree::Tree,
    },
    error::Result,
    layout::{Attr, Constraint},
    widget::{AppBar, Overlay, Single, SingleKind, Widget},
};

/// Result of mounting one widget.
pub struct Mounted {
    /// Outermost materialized view.
    pub root: ViewId,
    /// Innermost renderable view per the resolution rule: descend through
    /// single-child wrappers until a leaf, a stack container, or an overlay
    /// wrapper.
    pub resolved: ViewId,
}

/// Mount-pass state: the arena, the key index, and an optional chrome sink.
pub struct Mounter<'a> {
    /// Arena being mounted into.
    pub tree: &'a mut Tree,
    /// Key index for patch addressing.
    pub keys: &'a mut HashMap<String, ViewId>,
    /// Where app-bar metadata lands; absent outside a screen context.
    pub chrome: Option<&'a mut Option<AppBar>>,
}

impl MountChild for Mounter<'_> {
    fn tree(&mut self) -> &mut Tree {
        self.tree
    }

    fn mount_child(&mut self, widget: Widget) -> Result<ViewId> {
        self.mount(widget).map(|m| m.root)
    }
}

impl Mounter<'_> {
    /// Mount a widget subtree and return its root and resolved views.
    pub fn mount(&mut self, widget: Widget) -> Result<Mounted> {
        match widget {
            Widget::Leaf(leaf) => {
                let id = self.tree.create_leaf(leaf.primitive);
                self.register(leaf.key, id);
                Ok(Mounted {
                    root: id,
                    resolved: id,
                })
            }
            Widget::Spacer(spacer) => {
                // A spacer outside a stack carries no gap to attach; it
                // degrades to an empty view.
                let id = self.tree.create_plain();
                self.register(spacer.key, id);
                Ok(Mounted {
                    root: id,
                    resolved: id,
                })
            }
            Widget::Stack(st) => {
                let container =
                    self.tree
                        .create_arranged(st.axis, st.distribution, st.alignment);
                let built = stack::build_stack(self, container, st.children)?;
                for (key, id) in built.spacers {
                    self.register(key, id);
                }
                self.register(st.key, container);
                Ok(Mounted {
                    root: container,
                    resolved: container,
                })
            }
            Widget::Single(single) => self.mount_single(single),
            Widget::Overlay(overlay) => self.mount_overlay(overlay),
        }
    }

    /// Mount a single-child wrapper.
    fn mount_single(&mut self, single: Single) -> Result<Mounted> {
        let Single { kind, child, key } = single;
        match kind {
            SingleKind::Padding(insets) => {
                let wrapper = self.tree.create_plain();
                let inner = self.mount(*child)?;
                self.tree.attach(wrapper, inner.root)?;

                let mut cs = Vec::new();
                if let Some(left) = insets.left {
                    cs.push(Constraint::edge(inner.root, Attr::Left, wrapper, left));
                }
                if let Some(top) = insets.top {
                    cs.push(Constraint::edge(inner.root, Attr::Top, wrapper, top));
                }
                if let Some(right) = insets.right {
                    cs.push(Constraint::edge(inner.root, Attr::Right, wrapper, -right));
                }
                if let Some(bottom) = insets.bottom {
                    cs.push(Constraint::edge(inner.root, Attr::Bottom, wrapper, -bottom));
                }
                self.tree.add_constraints(wrapper, cs);

                self.register(key, wrapper);
                Ok(Mounted {
                    root: wrapper,
                    resolved: inner.resolved,
                })
            }
            SingleKind::Center(axes) => {
                let wrapper = self.tree.create_plain();
                let inner = self.mount(*child)?;
                self.tree.attach(wrapper, inner.root)?;

                let mut cs = Vec::new();
                if axes.horizontal() {
                    cs.push(Constraint::center_x(inner.root, wrapper));
                }
                if axes.vertical() {
                    cs.push(Constraint::center_y(inner.root, wrapper));
                }
                self.tree.add_constraints(wrapper, cs);

                self.register(key, wrapper);
                Ok(Mounted {
                    root: wrapper,
                    resolved: inner.resolved,
                })
            }
            SingleKind::SizedBox { width, height } => {
                let wrapper = self.tree.create_plain();
                let inner = self.mount(*child)?;
                self.tree.attach(wrapper, inner.root)?;

                let mut cs = Constraint::fill(inner.root, wrapper);
                if let Some(width) = width {
                    cs.push(Constraint::fixed(inner.root, Attr::Width, width));
                }
                if let Some(height) = height {
                    cs.push(Constraint::fixed(inner.root, Attr::Height, height));
                }
                self.tree.add_constraints(wrapper, cs);

                self.register(key, wrapper);
                Ok(Mounted {
                    root: wrapper,
                    resolved: inner.resolved,
                })
            }
            SingleKind::AppBar(bar) => {
                match self.chrome.as_deref_mut() {
                    Some(slot) => {
                        if slot.is_some() {
                            tracing::warn!("multiple app bars in one mount; last wins");
                        }
                        *slot = Some(bar);
                    }
                    None => {
                        tracing::debug!("app bar outside a screen context is ignored");
                    }
                }
                let inner = self.mount(*child)?;
                self.register(key, inner.root);
                Ok(inner)
            }
            SingleKind::Gesture(handler) => {
                let inner = self.mount(*child)?;
                // The tap target is the resolved renderable, so padding and
                // centering wrappers stay transparent to tap sizing.
                self.tree.set_on_tap(inner.resolved, handler);
                self.register(key, inner.resolved);
                Ok(inner)
            }
        }
    }

    /// Mount an overlay: base fills the wrapper, target layers above it.
    fn mount_overlay(&mut self, overlay: Overlay) -> Result<Mounted> {
        let Overlay {
            base,
            target,
            axes,
            insets,
            key,
        } = overlay;

        let wrapper = self.tree.create_plain();
        let base = self.mount(*base)?;
        self.tree.attach(wrapper, base.root)?;
        self.tree
            .add_constraints(wrapper, Constraint::fill(base.root, wrapper));

        let target = self.mount(*target)?;
        self.tree.attach(base.root, target.root)?;

        // An inset on an edge takes precedence over centering on that axis.
        let mut cs = Vec::new();
        if axes.horizontal() && insets.left.is_none() && insets.right.is_none() {
            cs.push(Constraint::center_x(target.root, base.root));
        }
        if axes.vertical() && insets.top.is_none() && insets.bottom.is_none() {
            cs.push(Constraint::center_y(target.root, base.root));
        }
        if let Some(left) = insets.left {
            cs.push(Constraint::edge(target.root, Attr::Left, base.root, left));
        }
        if let Some(top) = insets.top {
            cs.push(Constraint::edge(target.root, Attr::Top, base.root, top));
        }
        if let Some(right) = insets.right {
            cs.push(Constraint::edge(target.root, Attr::Right, base.root, -right));
        }
        if let Some(bottom) = insets.bottom {
            cs.push(Constraint::edge(target.root, Attr::Bottom, base.root, -bottom));
        }
        self.tree.add_constraints(wrapper, cs);

        self.register(key, wrapper);
        Ok(Mounted {
            root: wrapper,
            resolved: wrapper,
        })
    }

    /// Register a widget key in the mount index.
    fn register(&mut self, key: Option<String>, id: ViewId) {
        let Some(key) = key else {
            return;
        };
        if self.keys.contains_key(&key) {
            debug_assert!(false, "duplicate widget key: {key}");
            tracing::warn!(key = %key, "duplicate widget key; later mount wins");
        }
        self.keys.insert(key, id);
    }
}
