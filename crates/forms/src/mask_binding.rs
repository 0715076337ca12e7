use crate::event::{DispatchOutcome, UiEvent};
use dom::{Document, Id};
use input_core::{InputId, InputStore};
use mask::MaskPattern;

pub(crate) const MASK_CLASS: &str = "input-mask";

/// A mask attached to one input.
#[derive(Clone, Debug)]
pub(crate) struct MaskBinding {
    pub pattern: MaskPattern,
    pub unmask: bool,
    /// Owning form; only tracked when the unmasked value is submitted.
    pub form: Option<Id>,
}

impl MaskBinding {
    pub fn attach<S: InputStore>(
        doc: &mut Document,
        store: &mut S,
        element: Id,
        pattern: MaskPattern,
        unmask: bool,
    ) -> Self {
        doc.add_class(element, MASK_CLASS);

        let id = InputId::from(element);
        store.ensure_initial(id, doc.attr(element, "value").unwrap_or("").to_string());
        let current = store.value(id).unwrap_or("").to_string();
        if !current.is_empty() {
            let shown = pattern.apply(&current);
            let caret = shown.chars().count();
            store.set_value(id, shown, caret);
        }

        let form = if unmask {
            doc.closest(element, "form")
        } else {
            None
        };

        Self {
            pattern,
            unmask,
            form,
        }
    }

    pub fn detach(&self, doc: &mut Document, element: Id) {
        doc.remove_class(element, MASK_CLASS);
    }

    pub fn handle<S: InputStore>(
        &self,
        store: &mut S,
        element: Id,
        event: &UiEvent,
    ) -> DispatchOutcome {
        match event {
            UiEvent::Input => self.reformat(store, element),
            // Nothing is filtered: out-of-class characters are dropped by the
            // reformat that follows.
            UiEvent::KeyDown(_) => DispatchOutcome::default(),
            UiEvent::Paste(text) => {
                let id = InputId::from(element);
                let before = store.value_revision(id);
                let shown = self.pattern.apply(text);
                let caret = shown.chars().count();
                store.set_value(id, shown, caret);

                let mut outcome = DispatchOutcome::prevented();
                outcome.merge(self.reformat(store, element));
                outcome.value_changed = store.value_revision(id) != before;
                outcome
            }
            UiEvent::Focus | UiEvent::Blur | UiEvent::Submit => DispatchOutcome::default(),
        }
    }

    fn reformat<S: InputStore>(&self, store: &mut S, element: Id) -> DispatchOutcome {
        let id = InputId::from(element);
        let raw = store.value(id).unwrap_or("").to_string();
        let old_len = raw.chars().count();
        let cursor = store.caret_chars(id).unwrap_or(old_len);

        let shown = self.pattern.apply(&raw);
        let caret = caret_after_mask(&self.pattern, old_len, &shown, cursor);
        let completed = (!self.pattern.is_empty() && self.pattern.is_complete(&shown))
            .then(|| self.pattern.unmask(&shown));
        let value_changed = store.set_value(id, shown, caret);

        DispatchOutcome {
            value_changed,
            completed,
            ..DispatchOutcome::default()
        }
    }
}

/// Caret after reformatting: shifted by however much the value grew, then
/// pushed past any literal sitting just before it.
pub(crate) fn caret_after_mask(
    pattern: &MaskPattern,
    old_len: usize,
    shown: &str,
    cursor: usize,
) -> usize {
    let new_len = shown.chars().count();
    let mut pos = if new_len > old_len {
        cursor + (new_len - old_len)
    } else {
        cursor
    };

    while pos > 0 && pos < new_len && pos < pattern.len() && pattern.is_literal_at(pos - 1) {
        pos += 1;
    }

    pos.min(new_len)
}
