//! Owned document with mutation helpers and insertion observers.

use crate::traverse::{ancestors_of, assign_node_ids, collect_ids, find_node_by_id, find_node_by_id_mut};
use crate::{Id, Node, NodeId};
use bus::{DomEvent, Observers};
use core_types::SubscriptionId;
use std::sync::mpsc::Receiver;

/// An element tree plus the bookkeeping needed to mutate it safely:
/// id allocation for inserted subtrees and observer notification.
#[derive(Debug)]
pub struct Document {
    root: Node,
    next_id: NodeId,
    observers: Observers,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::from_children(Vec::new())
    }

    pub fn from_children(children: Vec<Node>) -> Self {
        let mut root = Node::Document {
            id: Id::UNASSIGNED,
            children,
        };
        let mut next_id = 1;
        assign_node_ids(&mut root, &mut next_id);
        Self {
            root,
            next_id,
            observers: Observers::new(),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> Id {
        self.root.id()
    }

    pub fn get(&self, id: Id) -> Option<&Node> {
        find_node_by_id(&self.root, id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.get(id).is_some()
    }

    pub fn attr(&self, id: Id, name: &str) -> Option<&str> {
        self.get(id)?.attr(name)
    }

    pub fn has_attr(&self, id: Id, name: &str) -> bool {
        self.get(id).is_some_and(|n| n.has_attr(name))
    }

    pub fn set_attr(&mut self, id: Id, name: &str, value: &str) -> bool {
        self.with_node(id, |n| n.set_attr(name, Some(value)))
    }

    pub fn remove_attr(&mut self, id: Id, name: &str) -> bool {
        self.with_node(id, |n| n.remove_attr(name))
    }

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.get(id).is_some_and(|n| n.has_class(class))
    }

    pub fn add_class(&mut self, id: Id, class: &str) -> bool {
        self.with_node(id, |n| n.add_class(class))
    }

    pub fn remove_class(&mut self, id: Id, class: &str) -> bool {
        self.with_node(id, |n| n.remove_class(class))
    }

    pub fn text_content(&self, id: Id) -> Option<String> {
        self.get(id).map(Node::text_content)
    }

    /// Replace all children of `id` with a single text node.
    pub fn set_text(&mut self, id: Id, text: &str) -> bool {
        let children = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        self.replace_children(id, children)
    }

    /// Replace all children of `id`. New nodes get fresh ids; the swap is not
    /// reported to observers (it is a content update, not an insertion).
    pub fn replace_children(&mut self, id: Id, mut children: Vec<Node>) -> bool {
        for c in &mut children {
            assign_node_ids(c, &mut self.next_id);
        }
        let Some(slot) = find_node_by_id_mut(&mut self.root, id).and_then(Node::children_mut)
        else {
            return false;
        };
        *slot = children;
        true
    }

    /// Append `node` (with its subtree) under `parent` and notify observers.
    ///
    /// Returns the id of the inserted node, or `None` if `parent` is missing or
    /// cannot have children.
    pub fn append_child(&mut self, parent: Id, mut node: Node) -> Option<Id> {
        assign_node_ids(&mut node, &mut self.next_id);
        let id = node.id();
        let children = find_node_by_id_mut(&mut self.root, parent).and_then(Node::children_mut)?;
        children.push(node);
        log::trace!(target: "dom", "inserted {id:?} under {parent:?}");
        self.observers.publish(DomEvent::Inserted {
            parent: parent.0,
            node: id.0,
        });
        Some(id)
    }

    /// Detach `id` from the tree and return it.
    pub fn remove(&mut self, id: Id) -> Option<Node> {
        let parent = *ancestors_of(&self.root, id)?.last()?;
        let children = find_node_by_id_mut(&mut self.root, parent).and_then(Node::children_mut)?;
        let pos = children.iter().position(|c| c.id() == id)?;
        let node = children.remove(pos);
        log::trace!(target: "dom", "removed {id:?} from {parent:?}");
        self.observers.publish(DomEvent::Removed {
            parent: parent.0,
            node: id.0,
        });
        Some(node)
    }

    /// First element whose `id` attribute equals `dom_id`.
    pub fn element_by_dom_id(&self, dom_id: &str) -> Option<Id> {
        let mut found = Vec::new();
        collect_ids(
            &self.root,
            &mut |n| matches!(n, Node::Element { .. }) && n.attr("id") == Some(dom_id),
            &mut found,
        );
        found.first().copied()
    }

    /// Nearest element named `tag`, starting at `id` itself.
    pub fn closest(&self, id: Id, tag: &str) -> Option<Id> {
        if self.get(id)?.is_element(tag) {
            return Some(id);
        }
        let ancestors = ancestors_of(&self.root, id)?;
        ancestors
            .into_iter()
            .rev()
            .find(|a| self.get(*a).is_some_and(|n| n.is_element(tag)))
    }

    /// `true` if `id` is `ancestor` or lies inside its subtree.
    pub fn is_inclusive_descendant(&self, ancestor: Id, id: Id) -> bool {
        if ancestor == id {
            return self.contains(id);
        }
        ancestors_of(&self.root, id).is_some_and(|path| path.contains(&ancestor))
    }

    /// Pre-order ids within `root` (inclusive) matching `pred`.
    pub fn descendants<F>(&self, root: Id, mut pred: F) -> Vec<Id>
    where
        F: FnMut(&Node) -> bool,
    {
        let mut out = Vec::new();
        if let Some(node) = self.get(root) {
            collect_ids(node, &mut pred, &mut out);
        }
        out
    }

    /// Subscribe to structural changes. Drop the receiver or call
    /// [`Document::unobserve`] to stop.
    pub fn observe(&mut self) -> (SubscriptionId, Receiver<DomEvent>) {
        self.observers.subscribe()
    }

    pub fn unobserve(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn with_node<F>(&mut self, id: Id, f: F) -> bool
    where
        F: FnOnce(&mut Node) -> bool,
    {
        find_node_by_id_mut(&mut self.root, id).is_some_and(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> Document {
        Document::from_children(vec![Node::element("form").with_attr("id", "signup").with_child(
            Node::element("div").with_child(
                Node::element("input")
                    .with_attr("id", "cpf")
                    .with_attr("name", "cpf"),
            ),
        )])
    }

    #[test]
    fn closest_walks_up_to_form() {
        let doc = signup();
        let input = doc.element_by_dom_id("cpf").unwrap();
        let form = doc.element_by_dom_id("signup").unwrap();
        assert_eq!(doc.closest(input, "form"), Some(form));
        assert_eq!(doc.closest(form, "form"), Some(form));
        assert_eq!(doc.closest(doc.root_id(), "form"), None);
    }

    #[test]
    fn append_child_assigns_fresh_ids_and_notifies() {
        let mut doc = signup();
        let (_sub, rx) = doc.observe();
        let form = doc.element_by_dom_id("signup").unwrap();

        let added = doc
            .append_child(
                form,
                Node::element("div").with_child(Node::element("input").with_attr("name", "x")),
            )
            .unwrap();

        let ids = doc.descendants(added, |_| true);
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|id| *id != Id::UNASSIGNED));
        assert_eq!(
            rx.try_recv(),
            Ok(DomEvent::Inserted {
                parent: form.0,
                node: added.0
            })
        );
    }

    #[test]
    fn append_to_missing_parent_fails_without_notifying() {
        let mut doc = signup();
        let (_sub, rx) = doc.observe();
        assert_eq!(doc.append_child(Id(999), Node::element("p")), None);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut doc = signup();
        let input = doc.element_by_dom_id("cpf").unwrap();
        let removed = doc.remove(input).unwrap();
        assert_eq!(removed.attr("name"), Some("cpf"));
        assert!(!doc.contains(input));
        assert!(doc.remove(doc.root_id()).is_none());
    }

    #[test]
    fn set_text_replaces_children() {
        let mut doc = Document::from_children(vec![
            Node::element("small")
                .with_attr("id", "msg")
                .with_child(Node::element("i"))
                .with_child(Node::text(" old")),
        ]);
        let msg = doc.element_by_dom_id("msg").unwrap();
        assert!(doc.set_text(msg, "new"));
        assert_eq!(doc.text_content(msg).as_deref(), Some("new"));
        assert_eq!(doc.get(msg).unwrap().children().len(), 1);
    }

    #[test]
    fn inclusive_descendant_checks() {
        let doc = signup();
        let form = doc.element_by_dom_id("signup").unwrap();
        let input = doc.element_by_dom_id("cpf").unwrap();
        assert!(doc.is_inclusive_descendant(form, input));
        assert!(doc.is_inclusive_descendant(input, input));
        assert!(!doc.is_inclusive_descendant(input, form));
    }
}
