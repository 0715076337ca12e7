//! # forms
//!
//! Headless form controllers over a [`dom::Document`] and an
//! [`input_core::InputValueStore`].
//!
//! The host owns the document and the store. It applies raw edits to the
//! store (what the browser would do), then tells a [`BindingContext`] what
//! happened with [`BindingContext::dispatch`]. The context reformats the value,
//! places the caret, and on submit injects `<name>_unmasked` hidden fields
//! into the form.
//!
//! Elements can also declare what they want (`data-mask="CPF"`,
//! `data-decimal`) and be picked up by [`BindingContext::discover`] or a
//! [`DiscoverySubscription`]. [`PasswordFeedback`] and [`CropModal`] drive
//! the password meter and the photo crop dialog over the same document.
//!
//! ```
//! use dom::{Document, Node};
//! use forms::{BindingContext, MaskOptions, UiEvent};
//! use input_core::{InputId, InputValueStore};
//!
//! let mut doc = Document::from_children(vec![
//!     Node::element("form").with_child(
//!         Node::element("input").with_attr("id", "cpf").with_attr("name", "cpf"),
//!     ),
//! ]);
//! let mut store = InputValueStore::new();
//! let mut ctx = BindingContext::new();
//!
//! let cpf = doc.element_by_dom_id("cpf").unwrap();
//! ctx.bind_mask(&mut doc, &mut store, cpf, "CPF", MaskOptions { unmask: true }).unwrap();
//!
//! store.insert_text(InputId::from(cpf), "12345678901");
//! ctx.dispatch(&mut doc, &mut store, cpf, UiEvent::Input);
//! assert_eq!(store.get(InputId::from(cpf)), Some("123.456.789-01"));
//!
//! let form = doc.closest(cpf, "form").unwrap();
//! let outcome = ctx.dispatch(&mut doc, &mut store, form, UiEvent::Submit);
//! assert_eq!(doc.attr(outcome.injected[0], "value"), Some("12345678901"));
//! ```

mod context;
mod crop_modal;
mod decimal_binding;
mod discovery;
mod dom_ext;
mod error;
mod event;
mod mask_binding;
mod password_feedback;
mod submit;

pub use context::{BindingContext, BindingKind, BindingState, MaskOptions, Rebind};
pub use crop_modal::{CropModal, CropModalIds};
pub use discovery::{DiscoverySubscription, decimal_config_from_attrs};
pub use dom_ext::{InputControlType, input_control_type};
pub use error::BindError;
pub use event::{DispatchOutcome, UiEvent};
pub use password_feedback::{
    PasswordFeedback, PasswordFeedbackConfig, RequirementIds, toggle_visibility,
};
pub use submit::{UNMASKED_SUFFIX, collect_form_data};
