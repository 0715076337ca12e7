use core_types::KeyPress;
use dom::Id;

/// What happened to an element, as reported by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// The value in the store was edited; reformat it.
    Input,
    /// Sent before the host applies a key. Check `default_prevented`.
    KeyDown(KeyPress),
    /// Clipboard text about to be pasted. Bound fields always take over.
    Paste(String),
    /// Focus entered the field; any stale selection collapses.
    Focus,
    Blur,
    /// Sent to a form element just before it is submitted.
    Submit,
}

/// What the controllers did with an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The host must not perform its default action (insert the key, paste).
    pub default_prevented: bool,
    pub value_changed: bool,
    /// Set when a mask is filled; carries the unmasked value.
    pub completed: Option<String>,
    /// Hidden fields created or refreshed by a submit.
    pub injected: Vec<Id>,
}

impl DispatchOutcome {
    pub(crate) fn prevented() -> Self {
        Self {
            default_prevented: true,
            ..Self::default()
        }
    }

    pub(crate) fn merge(&mut self, other: DispatchOutcome) {
        self.default_prevented |= other.default_prevented;
        self.value_changed |= other.value_changed;
        if other.completed.is_some() {
            self.completed = other.completed;
        }
        self.injected.extend(other.injected);
    }
}
