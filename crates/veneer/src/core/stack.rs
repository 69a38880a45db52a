//! Stack building: expanding an ordered widget sequence, spacers included,
//! into an arranged container's child list and spacing directives.

use crate::{
    core::{id::ViewId, tree::Tree},
    error::Result,
    widget::Widget,
};

/// Recursive child mounting as seen by the stack builder.
pub trait MountChild {
    /// The arena being mounted into.
    fn tree(&mut self) -> &mut Tree;

    /// Mount a non-spacer widget and return the view to arrange.
    fn mount_child(&mut self, widget: Widget) -> Result<ViewId>;
}

/// Output of a stack build.
pub struct StackBuild {
    /// Mounted spacer records paired with their widget keys.
    pub spacers: Vec<(Option<String>, ViewId)>,
}

/// Populate `container` from `children`.
///
/// Non-spacer children are mounted through the mounter and appended in
/// sequence order. A spacer attaches its gap as the "extra spacing after"
/// directive on the most recently appended element; adjacent spacers
/// overwrite rather than accumulate. A leading spacer has no predecessor, so
/// a zero-footprint anchor is appended first to carry the gap. Malformed
/// input degrades: an all-spacer sequence yields one anchor whose directive
/// holds the final gap.
pub fn build_stack<M: MountChild>(
    mounter: &mut M,
    container: ViewId,
    children: Vec<Widget>,
) -> Result<StackBuild> {
    let mut previous: Option<ViewId> = None;
    let mut spacers = Vec::new();

    for child in children {
        match child {
            Widget::Spacer(spacer) => {
                let after = match previous {
                    Some(id) => id,
                    None => {
                        let anchor = mounter.tree().create_anchor();
                        mounter.tree().append_arranged(container, anchor)?;
                        previous = Some(anchor);
                        anchor
                    }
                };
                mounter.tree().set_spacing_after(container, after, spacer.gap)?;
                let id = mounter.tree().register_spacer(container, after, spacer.gap);
                spacers.push((spacer.key, id));
            }
            widget => {
                let mounted = mounter.mount_child(widget)?;
                mounter.tree().append_arranged(container, mounted)?;
                previous = Some(mounted);
            }
        }
    }

    Ok(StackBuild { spacers })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::geom::{Axis, CrossAlignment, Distribution};

    /// Mounts every non-spacer child as a bare plain view.
    struct PlainMounter<'a> {
        tree: &'a mut Tree,
    }

    impl MountChild for PlainMounter<'_> {
        fn tree(&mut self) -> &mut Tree {
            self.tree
        }

        fn mount_child(&mut self, _widget: Widget) -> Result<ViewId> {
            Ok(self.tree.create_plain())
        }
    }

    fn arranged(tree: &mut Tree) -> ViewId {
        tree.create_arranged(
            Axis::Vertical,
            Distribution::default(),
            CrossAlignment::default(),
        )
    }

    /// Any non-spacer widget works here; `PlainMounter` materializes a
    /// plain view regardless.
    fn item() -> Widget {
        Widget::column(vec![])
    }

    fn build(tree: &mut Tree, container: ViewId, children: Vec<Widget>) -> Result<StackBuild> {
        build_stack(&mut PlainMounter { tree }, container, children)
    }

    #[test]
    fn no_spacers_preserves_order_without_directives() -> Result<()> {
        let mut tree = Tree::new();
        let container = arranged(&mut tree);
        build(&mut tree, container, vec![item(), item(), item()])?;

        let children: Vec<ViewId> = tree.arranged_children(container).unwrap().to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(children, tree.subviews(container));
        for child in children {
            assert_eq!(tree.spacing_after(container, child), None);
            assert!(!tree.is_anchor(child));
        }
        Ok(())
    }

    #[test]
    fn leading_spacer_synthesizes_anchor() -> Result<()> {
        let mut tree = Tree::new();
        let container = arranged(&mut tree);
        build(&mut tree, container, vec![Widget::spacer(7.0), item()])?;

        let children = tree.arranged_children(container).unwrap();
        assert_eq!(children.len(), 2);
        let anchor = children[0];
        assert!(tree.is_anchor(anchor));
        assert_eq!(tree.spacing_after(container, anchor), Some(7.0));
        Ok(())
    }

    #[test]
    fn spacer_between_items_attaches_after_predecessor() -> Result<()> {
        let mut tree = Tree::new();
        let container = arranged(&mut tree);
        build(
            &mut tree,
            container,
            vec![item(), Widget::spacer(10.0), item()],
        )?;

        let children = tree.arranged_children(container).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(tree.spacing_after(container, children[0]), Some(10.0));
        assert_eq!(tree.spacing_after(container, children[1]), None);
        Ok(())
    }

    #[test]
    fn adjacent_spacers_overwrite_not_accumulate() -> Result<()> {
        let mut tree = Tree::new();
        let container = arranged(&mut tree);
        build(
            &mut tree,
            container,
            vec![item(), Widget::spacer(5.0), Widget::spacer(8.0), item()],
        )?;

        let children = tree.arranged_children(container).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(tree.spacing_after(container, children[0]), Some(8.0));
        Ok(())
    }

    #[test]
    fn all_spacer_sequence_degrades_to_one_anchor() -> Result<()> {
        let mut tree = Tree::new();
        let container = arranged(&mut tree);
        build(
            &mut tree,
            container,
            vec![Widget::spacer(1.0), Widget::spacer(2.0), Widget::spacer(3.0)],
        )?;

        let children = tree.arranged_children(container).unwrap();
        assert_eq!(children.len(), 1);
        assert!(tree.is_anchor(children[0]));
        assert_eq!(tree.spacing_after(container, children[0]), Some(3.0));
        Ok(())
    }

    #[test]
    fn spacer_records_carry_predecessor_and_gap() -> Result<()> {
        let mut tree = Tree::new();
        let container = arranged(&mut tree);
        let built = build(
            &mut tree,
            container,
            vec![item(), Widget::spacer(4.0).keyed("gap"), item()],
        )?;

        assert_eq!(built.spacers.len(), 1);
        let (key, id) = &built.spacers[0];
        assert_eq!(key.as_deref(), Some("gap"));
        let first = tree.arranged_children(container).unwrap()[0];
        assert_eq!(tree.spacer_record(*id), Some((container, first, 4.0)));
        Ok(())
    }

    /// A sequence entry for the quantified properties: `None` is a
    /// renderable item, `Some(gap)` a spacer.
    fn entries() -> impl Strategy<Value = Vec<Option<f64>>> {
        prop::collection::vec(
            prop_oneof![Just(None), (0.0f64..64.0).prop_map(Some)],
            0..12,
        )
    }

    proptest! {
        #[test]
        fn arranged_order_and_directives_match_model(entries in entries()) {
            let mut tree = Tree::new();
            let container = arranged(&mut tree);
            let widgets: Vec<Widget> = entries
                .iter()
                .map(|e| match e {
                    Some(gap) => Widget::spacer(*gap),
                    None => item(),
                })
                .collect();
            build(&mut tree, container, widgets).unwrap();

            let leading_anchor = matches!(entries.first(), Some(Some(_)));
            let item_count = entries.iter().filter(|e| e.is_none()).count();
            let children: Vec<ViewId> =
                tree.arranged_children(container).unwrap().to_vec();
            prop_assert_eq!(
                children.len(),
                item_count + usize::from(leading_anchor)
            );
            if leading_anchor {
                prop_assert!(tree.is_anchor(children[0]));
            }

            // Each arranged element's directive is the last gap of the
            // spacer run that follows it in the input, or absent when no
            // spacer follows it.
            let mut expected: Vec<Option<f64>> = Vec::new();
            for entry in &entries {
                match entry {
                    None => expected.push(None),
                    Some(gap) => {
                        if expected.is_empty() {
                            expected.push(Some(*gap));
                        } else {
                            *expected.last_mut().unwrap() = Some(*gap);
                        }
                    }
                }
            }
            prop_assert_eq!(expected.len(), children.len());
            for (child, want) in children.iter().zip(expected) {
                prop_assert_eq!(tree.spacing_after(container, *child), want);
            }
        }
    }
}
