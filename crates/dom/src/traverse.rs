use crate::{Id, Node, NodeId};

/// Assign fresh ids to every node still carrying [`Id::UNASSIGNED`].
///
/// `next` is the next id to hand out and is advanced past every id used.
pub fn assign_node_ids(root: &mut Node, next: &mut NodeId) {
    // only assign if currently unset
    if root.id() == Id::UNASSIGNED {
        let id = Id(*next);
        *next = next.wrapping_add(1).max(1);
        root.set_id(id);
    }

    if let Some(children) = root.children_mut() {
        for c in children {
            assign_node_ids(c, next);
        }
    }
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|c| find_node_by_id(c, id))
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_node_by_id_mut(c, id))
}

/// Ids of the ancestors of `id`, root first. `None` if `id` is not in the tree.
pub fn ancestors_of(root: &Node, id: Id) -> Option<Vec<Id>> {
    fn walk(node: &Node, id: Id, path: &mut Vec<Id>) -> bool {
        if node.id() == id {
            return true;
        }
        path.push(node.id());
        for c in node.children() {
            if walk(c, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

/// Pre-order ids of `node` and its descendants that satisfy `pred`.
pub fn collect_ids<F>(node: &Node, pred: &mut F, out: &mut Vec<Id>)
where
    F: FnMut(&Node) -> bool,
{
    if pred(node) {
        out.push(node.id());
    }
    for c in node.children() {
        collect_ids(c, pred, out);
    }
}
