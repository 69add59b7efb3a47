//! Lookups over a UI node tree.
//!
//! The tree itself belongs to the UI layer; these functions only walk it
//! through the [`UiTree`] capability. Two class markers steer
//! [`get_rep_object`]: [`REP_TARGET_CLASS`] marks a node as an explicit
//! target, [`REP_IGNORE_CLASS`] makes a node's object invisible unless a
//! target was seen below it.

/// Marks a node as an explicit representation target.
pub const REP_TARGET_CLASS: &str = "repTarget";

/// Hides a node's represented object from ancestor lookups.
pub const REP_IGNORE_CLASS: &str = "repIgnore";

/// Parent/sibling traversal plus sparse per-node metadata.
pub trait UiTree {
    /// Node handle.
    type Node: Copy + PartialEq;
    /// Represented object attached to a node.
    type Object: PartialEq;
    /// Panel owning a node.
    type Panel;

    /// Parent of `node`, `None` at the root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// First child of `node`.
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Next sibling of `node`.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether `node` carries the given class.
    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    /// Object represented by `node`, if any.
    fn rep_object(&self, node: Self::Node) -> Option<&Self::Object>;

    /// Panel that owns `node`, if recorded on it.
    fn owner_panel(&self, node: Self::Node) -> Option<&Self::Panel>;
}

/// Iterates from `node` up to the root, `node` included.
fn ancestors<T: UiTree>(tree: &T, node: T::Node) -> impl Iterator<Item = T::Node> {
    std::iter::successors(Some(node), move |n| tree.parent(*n))
}

/// Finds the object represented by `node` or its nearest ancestor that has
/// one, honoring the target and ignore markers.
pub fn get_rep_object<T: UiTree>(tree: &T, node: T::Node) -> Option<&T::Object> {
    let mut target = None;
    for child in ancestors(tree, node) {
        if tree.has_class(child, REP_TARGET_CLASS) {
            target = Some(child);
        }

        if let Some(object) = tree.rep_object(child) {
            if target.is_none() && tree.has_class(child, REP_IGNORE_CLASS) {
                return None;
            }
            return Some(object);
        }
    }
    None
}

/// Nearest node, starting at `node` and walking up, that represents an
/// object.
pub fn get_rep_node<T: UiTree>(tree: &T, node: T::Node) -> Option<T::Node> {
    ancestors(tree, node).find(|n| tree.rep_object(*n).is_some())
}

/// Direct child of `element` that represents `object`.
pub fn get_element_by_rep_object<T: UiTree>(
    tree: &T,
    element: T::Node,
    object: &T::Object,
) -> Option<T::Node> {
    std::iter::successors(tree.first_child(element), |n| tree.next_sibling(*n))
        .find(|n| tree.rep_object(*n) == Some(object))
}

/// Panel owning `element` or its nearest ancestor.
pub fn get_element_panel<T: UiTree>(tree: &T, element: T::Node) -> Option<&T::Panel> {
    ancestors(tree, element).find_map(|n| tree.owner_panel(n))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Default)]
    struct Node {
        parent: Option<usize>,
        children: Vec<usize>,
        classes: Vec<&'static str>,
        object: Option<&'static str>,
        panel: Option<&'static str>,
    }

    #[derive(Debug, Default)]
    struct Tree {
        nodes: HashMap<usize, Node>,
    }

    impl Tree {
        fn add(&mut self, id: usize, parent: Option<usize>) -> &mut Node {
            if let Some(p) = parent
                && let Some(node) = self.nodes.get_mut(&p)
            {
                node.children.push(id);
            }
            self.nodes.entry(id).or_insert_with(|| Node {
                parent,
                ..Node::default()
            })
        }
    }

    impl UiTree for Tree {
        type Node = usize;
        type Object = &'static str;
        type Panel = &'static str;

        fn parent(&self, node: usize) -> Option<usize> {
            self.nodes.get(&node).and_then(|n| n.parent)
        }

        fn first_child(&self, node: usize) -> Option<usize> {
            self.nodes.get(&node).and_then(|n| n.children.first().copied())
        }

        fn next_sibling(&self, node: usize) -> Option<usize> {
            let parent = self.parent(node)?;
            let siblings = &self.nodes.get(&parent)?.children;
            let index = siblings.iter().position(|s| *s == node)?;
            siblings.get(index + 1).copied()
        }

        fn has_class(&self, node: usize, class: &str) -> bool {
            self.nodes
                .get(&node)
                .is_some_and(|n| n.classes.iter().any(|c| *c == class))
        }

        fn rep_object(&self, node: usize) -> Option<&&'static str> {
            self.nodes.get(&node).and_then(|n| n.object.as_ref())
        }

        fn owner_panel(&self, node: usize) -> Option<&&'static str> {
            self.nodes.get(&node).and_then(|n| n.panel.as_ref())
        }
    }

    /// 0 (panel "net") > 1 (object "row") > 2 > 3
    fn sample() -> Tree {
        let mut tree = Tree::default();
        tree.add(0, None).panel = Some("net");
        tree.add(1, Some(0)).object = Some("row");
        tree.add(2, Some(1));
        tree.add(3, Some(2));
        tree
    }

    #[test]
    fn rep_object_found_on_ancestor() {
        let tree = sample();
        assert_eq!(get_rep_object(&tree, 3), Some(&"row"));
        assert_eq!(get_rep_node(&tree, 3), Some(1));
    }

    #[test]
    fn ignore_marker_hides_object() {
        let mut tree = sample();
        if let Some(node) = tree.nodes.get_mut(&1) {
            node.classes.push(REP_IGNORE_CLASS);
        }
        assert_eq!(get_rep_object(&tree, 3), None);
        // get_rep_node does not look at markers
        assert_eq!(get_rep_node(&tree, 3), Some(1));
    }

    #[test]
    fn target_marker_overrides_ignore() {
        let mut tree = sample();
        if let Some(node) = tree.nodes.get_mut(&1) {
            node.classes.push(REP_IGNORE_CLASS);
        }
        if let Some(node) = tree.nodes.get_mut(&2) {
            node.classes.push(REP_TARGET_CLASS);
        }
        assert_eq!(get_rep_object(&tree, 3), Some(&"row"));
    }

    #[test]
    fn nothing_found_at_root() {
        let tree = sample();
        assert_eq!(get_rep_object(&tree, 0), None);
        assert_eq!(get_rep_node(&tree, 0), None);
    }

    #[test]
    fn element_by_rep_object_scans_children() {
        let mut tree = sample();
        tree.add(4, Some(0)).object = Some("other");
        assert_eq!(get_element_by_rep_object(&tree, 0, &"other"), Some(4));
        assert_eq!(get_element_by_rep_object(&tree, 0, &"row"), Some(1));
        assert_eq!(get_element_by_rep_object(&tree, 0, &"missing"), None);
        // only direct children are considered
        assert_eq!(get_element_by_rep_object(&tree, 1, &"row"), None);
    }

    #[test]
    fn element_panel_walks_up() {
        let tree = sample();
        assert_eq!(get_element_panel(&tree, 3), Some(&"net"));
        let mut detached = Tree::default();
        detached.add(9, None);
        assert_eq!(get_element_panel(&detached, 9), None);
    }
}
