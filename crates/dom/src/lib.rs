//! # dom
//!
//! A small, owned element tree used by the form layer in place of a browser
//! DOM. Nodes carry stable [`Id`]s, attributes are kept in document order and
//! compared case-insensitively, and structural changes are published to
//! observers as [`bus::DomEvent`]s.
//!
//! Trees are usually built with the [`Node`] builder helpers and then handed
//! to a [`Document`], which assigns ids:
//!
//! ```
//! use dom::{Document, Node};
//!
//! let doc = Document::from_children(vec![
//!     Node::element("form").with_attr("id", "signup").with_child(
//!         Node::element("input")
//!             .with_attr("name", "cpf")
//!             .with_attr("data-mask", "cpf"),
//!     ),
//! ]);
//!
//! let form = doc.element_by_dom_id("signup").unwrap();
//! assert_eq!(doc.descendants(form, |n| n.is_element("input")).len(), 1);
//! ```

mod document;
mod traverse;
mod types;

pub use document::Document;
pub use traverse::{ancestors_of, assign_node_ids, collect_ids, find_node_by_id, find_node_by_id_mut};
pub use types::{Id, Node, NodeId};
