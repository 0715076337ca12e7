//! Keystroke simulation for the `type` subcommands: one bound input inside a
//! throwaway form, driven the way a browser host would drive it.

use core_types::KeyPress;
use decimal::DecimalConfig;
use dom::{Document, Id, Node};
use forms::{BindError, BindingContext, MaskOptions, UiEvent, collect_form_data};
use input_core::{InputId, InputValueStore};

const FORM_ID: &str = "cli-form";
const FIELD_NAME: &str = "field";

pub enum FieldKind<'a> {
    /// Preset name or raw pattern.
    Mask(&'a str),
    Decimal(&'a DecimalConfig),
}

/// Press every key of `keys` into a fresh field, print the display after
/// each one, then blur, submit and print what the form would send.
pub fn simulate(kind: FieldKind<'_>, keys: &str) -> Result<(), BindError> {
    let mut doc = Document::from_children(vec![
        Node::element("form").with_attr("id", FORM_ID).with_child(
            Node::element("input")
                .with_attr("id", FIELD_NAME)
                .with_attr("name", FIELD_NAME),
        ),
    ]);
    let mut store = InputValueStore::new();
    let mut ctx = BindingContext::new();

    let form = find(&doc, FORM_ID)?;
    let field = find(&doc, FIELD_NAME)?;
    match kind {
        FieldKind::Mask(pattern) => {
            ctx.bind_mask(&mut doc, &mut store, field, pattern, MaskOptions { unmask: true })?
        }
        FieldKind::Decimal(cfg) => ctx.bind_decimal(&mut doc, &mut store, field, cfg.clone())?,
    };

    for key in keys.chars() {
        let outcome = ctx.press_key(&mut doc, &mut store, field, KeyPress::char(key));
        let shown = store.get(InputId::from(field)).unwrap_or("");
        if outcome.default_prevented {
            println!("{key} -> {shown} (rejected)");
        } else {
            println!("{key} -> {shown}");
        }
        if let Some(clean) = outcome.completed {
            println!("  complete: {clean}");
        }
    }

    ctx.dispatch(&mut doc, &mut store, field, UiEvent::Blur);
    let submitted = ctx.dispatch(&mut doc, &mut store, form, UiEvent::Submit);
    log::debug!("submit injected {} hidden field(s)", submitted.injected.len());
    for (name, value) in collect_form_data(&doc, &store, form) {
        println!("{name}={value}");
    }
    Ok(())
}

fn find(doc: &Document, dom_id: &str) -> Result<Id, BindError> {
    doc.element_by_dom_id(dom_id)
        .ok_or_else(|| BindError::ElementNotFound(dom_id.to_string()))
}
