use crate::dom_ext::{InputControlType, field_name, input_control_type};
use dom::{Document, Id, Node};
use input_core::{InputId, InputStore};

/// Suffix of the hidden field carrying a clean value.
pub const UNMASKED_SUFFIX: &str = "_unmasked";

/// Create `<name>_unmasked` in `form`, or update it if an earlier submit
/// already created it.
pub(crate) fn inject_hidden(doc: &mut Document, form: Id, name: &str, value: &str) -> Option<Id> {
    let field = format!("{name}{UNMASKED_SUFFIX}");
    let existing = doc
        .descendants(form, |n| {
            n.is_element("input")
                && input_control_type(n) == InputControlType::Hidden
                && n.attr("name") == Some(field.as_str())
        })
        .first()
        .copied();

    match existing {
        Some(id) => {
            doc.set_attr(id, "value", value);
            log::trace!(target: "forms", "refreshed hidden field {field:?}");
            Some(id)
        }
        None => {
            let hidden = Node::element("input")
                .with_attr("type", "hidden")
                .with_attr("name", &field)
                .with_attr("value", value);
            let id = doc.append_child(form, hidden);
            log::trace!(target: "forms", "injected hidden field {field:?} as {id:?}");
            id
        }
    }
}

/// `(name, value)` pairs the form would submit, in document order.
///
/// Values come from the store when it tracks the input, otherwise from the
/// `value` attribute. Unnamed, disabled and file inputs are left out.
pub fn collect_form_data<S: InputStore>(
    doc: &Document,
    store: &S,
    form: Id,
) -> Vec<(String, String)> {
    let fields = doc.descendants(form, |n| {
        (n.is_element("input") && input_control_type(n) != InputControlType::File)
            || n.is_element("textarea")
    });

    fields
        .into_iter()
        .filter(|id| !doc.has_attr(*id, "disabled"))
        .filter_map(|id| {
            let name = field_name(doc, id)?;
            let value = store
                .value(InputId::from(id))
                .or_else(|| doc.attr(id, "value"))
                .unwrap_or("")
                .to_string();
            Some((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_core::InputValueStore;

    fn form_doc() -> (Document, Id) {
        let doc = Document::from_children(vec![
            Node::element("form")
                .with_attr("id", "f")
                .with_child(Node::element("input").with_attr("name", "a").with_attr("value", "1"))
                .with_child(
                    Node::element("input")
                        .with_attr("name", "off")
                        .with_flag("disabled"),
                )
                .with_child(Node::element("input").with_attr("type", "file").with_attr("name", "up"))
                .with_child(Node::element("input").with_attr("id", "b").with_attr("name", "b")),
        ]);
        let form = doc.element_by_dom_id("f").unwrap();
        (doc, form)
    }

    #[test]
    fn inject_twice_updates_in_place() {
        let (mut doc, form) = form_doc();
        let first = inject_hidden(&mut doc, form, "cpf", "1").unwrap();
        let second = inject_hidden(&mut doc, form, "cpf", "2").unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.attr(first, "value"), Some("2"));
        assert_eq!(doc.attr(first, "type"), Some("hidden"));
    }

    #[test]
    fn form_data_prefers_store_values() {
        let (doc, form) = form_doc();
        let mut store = InputValueStore::new();
        let b = doc.element_by_dom_id("b").unwrap();
        store.set(InputId::from(b), "typed".to_string());

        assert_eq!(
            collect_form_data(&doc, &store, form),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "typed".to_string()),
            ]
        );
    }
}
