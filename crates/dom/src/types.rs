pub use core_types::NodeId;

/// Stable node identifier. `Id(0)` means "not yet assigned".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const UNASSIGNED: Id = Id(0);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document {
        id: Id,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
}

impl Node {
    pub fn element(name: &str) -> Self {
        Node::Element {
            id: Id::UNASSIGNED,
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: &str) -> Self {
        Node::Text {
            id: Id::UNASSIGNED,
            text: text.to_string(),
        }
    }

    /// Builder: set an attribute with a value.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, Some(value));
        self
    }

    /// Builder: set a valueless (boolean) attribute such as `disabled`.
    pub fn with_flag(mut self, name: &str) -> Self {
        self.set_attr(name, None);
        self
    }

    /// Builder: append a child. No-op on text nodes.
    pub fn with_child(mut self, child: Node) -> Self {
        if let Some(children) = self.children_mut() {
            children.push(child);
        }
        self
    }

    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Document { id, .. } => *id = new_id,
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } => Some(children),
            Node::Element { children, .. } => Some(children),
            Node::Text { .. } => None,
        }
    }

    /// Element tag name, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, tag: &str) -> bool {
        self.tag().is_some_and(|n| n.eq_ignore_ascii_case(tag))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        match self {
            Node::Element { attributes, .. } => {
                attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
            }
            _ => false,
        }
    }

    /// Set or overwrite an attribute. Returns `false` on non-elements.
    pub fn set_attr(&mut self, name: &str, value: Option<&str>) -> bool {
        let Node::Element { attributes, .. } = self else {
            return false;
        };
        let value = value.map(str::to_string);
        match attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value,
            None => attributes.push((name.to_string(), value)),
        }
        true
    }

    /// Returns `true` if the attribute was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let Node::Element { attributes, .. } = self else {
            return false;
        };
        let before = attributes.len();
        attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        attributes.len() != before
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|t| t == class))
    }

    /// Returns `true` if the class was added.
    pub fn add_class(&mut self, class: &str) -> bool {
        if !matches!(self, Node::Element { .. }) || self.has_class(class) {
            return false;
        }
        let joined = match self.attr("class").map(str::trim).filter(|c| !c.is_empty()) {
            Some(existing) => format!("{existing} {class}"),
            None => class.to_string(),
        };
        self.set_attr("class", Some(&joined))
    }

    /// Returns `true` if the class was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        if !self.has_class(class) {
            return false;
        }
        let remaining: Vec<&str> = self
            .attr("class")
            .unwrap_or("")
            .split_ascii_whitespace()
            .filter(|t| *t != class)
            .collect();
        let joined = remaining.join(" ");
        self.set_attr("class", Some(&joined))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        fn walk(node: &Node, out: &mut String) {
            match node {
                Node::Text { text, .. } => out.push_str(text),
                Node::Element { children, .. } | Node::Document { children, .. } => {
                    for c in children {
                        walk(c, out);
                    }
                }
            }
        }

        let mut out = String::new();
        walk(self, &mut out);
        out
    }
}
