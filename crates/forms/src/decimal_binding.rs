use crate::event::{DispatchOutcome, UiEvent};
use core_types::{Key, KeyPress};
use decimal::DecimalConfig;
use decimal::live::{caret_after_live_format, live_format, paste_format};
use dom::{Document, Id};
use input_core::{InputId, InputStore};

pub(crate) const DECIMAL_CLASS: &str = "decimal-mask";
pub(crate) const DECIMAL_SUBMIT_MARKER: &str = "data-decimal-submit-bound";

#[derive(Clone, Debug)]
pub(crate) struct DecimalBinding {
    pub config: DecimalConfig,
    pub form: Option<Id>,
}

impl DecimalBinding {
    pub fn attach<S: InputStore>(
        doc: &mut Document,
        store: &mut S,
        element: Id,
        config: DecimalConfig,
    ) -> Self {
        doc.add_class(element, DECIMAL_CLASS);

        let id = InputId::from(element);
        store.ensure_initial(id, doc.attr(element, "value").unwrap_or("").to_string());
        let current = store.value(id).unwrap_or("").to_string();
        if !current.trim().is_empty() {
            // Initial values come from the server in canonical form.
            let value = decimal::parse_canonical(&current).unwrap_or(0.0);
            let shown = decimal::format(value, &config);
            let caret = caret_after_live_format(&shown, &config);
            store.set_value(id, shown, caret);
        }

        let form = doc.closest(element, "form");
        if let Some(form) = form
            && !doc.has_attr(form, DECIMAL_SUBMIT_MARKER)
        {
            doc.set_attr(form, DECIMAL_SUBMIT_MARKER, "true");
        }

        Self { config, form }
    }

    pub fn detach(&self, doc: &mut Document, element: Id) {
        doc.remove_class(element, DECIMAL_CLASS);
    }

    pub fn handle<S: InputStore>(
        &self,
        store: &mut S,
        element: Id,
        event: &UiEvent,
    ) -> DispatchOutcome {
        let id = InputId::from(element);
        match event {
            UiEvent::Input => {
                let raw = store.value(id).unwrap_or("").to_string();
                self.write(store, id, live_format(&raw, &self.config))
            }
            UiEvent::KeyDown(press) => {
                // A selection starting at 0 is replaced by the key, so the
                // minus lands at the start too.
                let at_start = store.caret_chars(id) == Some(0)
                    || store.selection(id).is_some_and(|sel| sel.start == 0);
                if self.allows_key(*press, at_start) {
                    DispatchOutcome::default()
                } else {
                    DispatchOutcome::prevented()
                }
            }
            UiEvent::Paste(text) => {
                let mut outcome = self.write(store, id, paste_format(text, &self.config));
                outcome.default_prevented = true;
                outcome
            }
            UiEvent::Blur => {
                let empty = store.value(id).is_none_or(|v| v.trim().is_empty());
                if empty {
                    self.write(store, id, decimal::format(0.0, &self.config))
                } else {
                    DispatchOutcome::default()
                }
            }
            UiEvent::Focus | UiEvent::Submit => DispatchOutcome::default(),
        }
    }

    fn write<S: InputStore>(&self, store: &mut S, id: InputId, shown: String) -> DispatchOutcome {
        let caret = caret_after_live_format(&shown, &self.config);
        DispatchOutcome {
            value_changed: store.set_value(id, shown, caret),
            ..DispatchOutcome::default()
        }
    }

    /// Digits, editing/navigation keys and shortcuts pass; a minus only at
    /// the very start and only when negatives are allowed.
    fn allows_key(&self, press: KeyPress, caret_at_start: bool) -> bool {
        if press.key.is_navigation_or_edit() || press.modifiers.is_shortcut() {
            return true;
        }
        match press.key {
            Key::Char(c) if c.is_ascii_digit() => true,
            Key::Char('-') => self.config.allow_negative && caret_at_start,
            _ => false,
        }
    }
}
