use dom::{Document, Id, Node};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputControlType {
    Text,
    Password,
    Hidden,
    File,
    Other,
}

pub fn input_control_type(node: &Node) -> InputControlType {
    if !node.is_element("input") {
        return InputControlType::Other;
    }

    let ty = node.attr("type").map(str::trim).filter(|s| !s.is_empty());
    match ty {
        None => InputControlType::Text, // missing type defaults to text
        Some(t) if t.eq_ignore_ascii_case("text") => InputControlType::Text,
        Some(t) if t.eq_ignore_ascii_case("tel") => InputControlType::Text,
        Some(t) if t.eq_ignore_ascii_case("password") => InputControlType::Password,
        Some(t) if t.eq_ignore_ascii_case("hidden") => InputControlType::Hidden,
        Some(t) if t.eq_ignore_ascii_case("file") => InputControlType::File,
        _ => InputControlType::Other,
    }
}

/// `name` attribute, trimmed; `None` when absent or blank.
pub(crate) fn field_name(doc: &Document, id: Id) -> Option<String> {
    doc.attr(id, "name")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Hide or show via Bootstrap's `d-none`.
pub(crate) fn set_hidden(doc: &mut Document, id: Id, hidden: bool) {
    if hidden {
        doc.add_class(id, "d-none");
    } else {
        doc.remove_class(id, "d-none");
    }
}

pub(crate) fn set_disabled(doc: &mut Document, id: Id, disabled: bool) {
    if disabled {
        doc.set_attr(id, "disabled", "");
    } else {
        doc.remove_attr(id, "disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_types() {
        assert_eq!(input_control_type(&Node::element("input")), InputControlType::Text);
        assert_eq!(
            input_control_type(&Node::element("input").with_attr("type", " PASSWORD ")),
            InputControlType::Password
        );
        assert_eq!(
            input_control_type(&Node::element("input").with_attr("type", "file")),
            InputControlType::File
        );
        assert_eq!(input_control_type(&Node::element("select")), InputControlType::Other);
        assert_eq!(input_control_type(&Node::text("x")), InputControlType::Other);
    }

    #[test]
    fn blank_names_are_ignored() {
        let doc = Document::from_children(vec![
            Node::element("input").with_attr("id", "a").with_attr("name", "  "),
            Node::element("input").with_attr("id", "b").with_attr("name", " cpf "),
        ]);
        let a = doc.element_by_dom_id("a").unwrap();
        let b = doc.element_by_dom_id("b").unwrap();
        assert_eq!(field_name(&doc, a), None);
        assert_eq!(field_name(&doc, b).as_deref(), Some("cpf"));
    }
}
