use crate::decimal_binding::{DECIMAL_SUBMIT_MARKER, DecimalBinding};
use crate::dom_ext::field_name;
use crate::error::BindError;
use crate::event::{DispatchOutcome, UiEvent};
use crate::mask_binding::MaskBinding;
use crate::submit::inject_hidden;
use core_types::{Key, KeyPress};
use decimal::DecimalConfig;
use dom::{Document, Id, Node};
use input_core::{InputId, InputStore};
use mask::MaskRegistry;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaskOptions {
    /// Submit `<name>_unmasked` alongside the formatted value.
    pub unmask: bool,
}

/// Result of a bind call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rebind {
    /// The element had no live binding.
    Fresh,
    /// A previous binding on the element was torn down first.
    Replaced,
}

/// Lifecycle of an element the context has seen. Unbound elements have none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingState {
    Bound,
    Destroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    Mask,
    Decimal,
}

#[derive(Clone, Debug)]
enum Binding {
    Mask(MaskBinding),
    Decimal(DecimalBinding),
}

impl Binding {
    fn kind(&self) -> BindingKind {
        match self {
            Binding::Mask(_) => BindingKind::Mask,
            Binding::Decimal(_) => BindingKind::Decimal,
        }
    }
}

/// Owns every live binding of one UI surface plus the named-mask table.
///
/// Independent contexts never see each other's bindings, so tests and
/// separate page regions can each have their own.
#[derive(Clone, Debug, Default)]
pub struct BindingContext {
    registry: MaskRegistry,
    bindings: HashMap<Id, Binding>,
    destroyed: HashSet<Id>,
}

impl BindingContext {
    pub fn new() -> Self {
        Self::with_registry(MaskRegistry::new())
    }

    pub fn with_registry(registry: MaskRegistry) -> Self {
        Self {
            registry,
            bindings: HashMap::new(),
            destroyed: HashSet::new(),
        }
    }

    pub fn registry(&self) -> &MaskRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MaskRegistry {
        &mut self.registry
    }

    pub fn state(&self, element: Id) -> Option<BindingState> {
        if self.bindings.contains_key(&element) {
            Some(BindingState::Bound)
        } else if self.destroyed.contains(&element) {
            Some(BindingState::Destroyed)
        } else {
            None
        }
    }

    pub fn kind(&self, element: Id) -> Option<BindingKind> {
        self.bindings.get(&element).map(Binding::kind)
    }

    pub fn is_bound(&self, element: Id) -> bool {
        self.bindings.contains_key(&element)
    }

    /// Bound elements in id order.
    pub fn bound_elements(&self) -> Vec<Id> {
        let mut ids: Vec<Id> = self.bindings.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Attach a mask. `pattern_spec` is a preset/registered name or a raw
    /// pattern.
    pub fn bind_mask<S: InputStore>(
        &mut self,
        doc: &mut Document,
        store: &mut S,
        element: Id,
        pattern_spec: &str,
        options: MaskOptions,
    ) -> Result<Rebind, BindError> {
        check_element(doc, element)?;
        let rebind = self.teardown_for_rebind(doc, element);
        let pattern = self.registry.resolve(pattern_spec);
        log::debug!(
            target: "forms",
            "mask {:?} bound to {element:?} (unmask: {})",
            pattern.as_str(),
            options.unmask
        );
        let binding = MaskBinding::attach(doc, store, element, pattern, options.unmask);
        self.bindings.insert(element, Binding::Mask(binding));
        Ok(rebind)
    }

    pub fn bind_decimal<S: InputStore>(
        &mut self,
        doc: &mut Document,
        store: &mut S,
        element: Id,
        config: DecimalConfig,
    ) -> Result<Rebind, BindError> {
        check_element(doc, element)?;
        let rebind = self.teardown_for_rebind(doc, element);
        log::debug!(target: "forms", "decimal field bound to {element:?}: {config:?}");
        let binding = DecimalBinding::attach(doc, store, element, config);
        self.bindings.insert(element, Binding::Decimal(binding));
        Ok(rebind)
    }

    /// [`bind_mask`](Self::bind_mask) by `id` attribute.
    pub fn bind_mask_by_dom_id<S: InputStore>(
        &mut self,
        doc: &mut Document,
        store: &mut S,
        dom_id: &str,
        pattern_spec: &str,
        options: MaskOptions,
    ) -> Result<Rebind, BindError> {
        let element = lookup(doc, dom_id)?;
        self.bind_mask(doc, store, element, pattern_spec, options)
    }

    pub fn bind_decimal_by_dom_id<S: InputStore>(
        &mut self,
        doc: &mut Document,
        store: &mut S,
        dom_id: &str,
        config: DecimalConfig,
    ) -> Result<Rebind, BindError> {
        let element = lookup(doc, dom_id)?;
        self.bind_decimal(doc, store, element, config)
    }

    /// Detach whatever is bound to `element`. `false` if nothing was.
    pub fn unbind(&mut self, doc: &mut Document, element: Id) -> bool {
        let Some(binding) = self.bindings.remove(&element) else {
            return false;
        };

        match &binding {
            Binding::Mask(m) => m.detach(doc, element),
            Binding::Decimal(d) => {
                d.detach(doc, element);
                if let Some(form) = d.form
                    && !self.form_has_decimal(form)
                {
                    doc.remove_attr(form, DECIMAL_SUBMIT_MARKER);
                }
            }
        }

        self.destroyed.insert(element);
        log::debug!(target: "forms", "unbound {element:?}");
        true
    }

    fn teardown_for_rebind(&mut self, doc: &mut Document, element: Id) -> Rebind {
        self.destroyed.remove(&element);
        if self.unbind(doc, element) {
            self.destroyed.remove(&element);
            log::debug!(target: "forms", "rebinding {element:?}");
            Rebind::Replaced
        } else {
            Rebind::Fresh
        }
    }

    fn form_has_decimal(&self, form: Id) -> bool {
        self.bindings
            .values()
            .any(|b| matches!(b, Binding::Decimal(d) if d.form == Some(form)))
    }

    /// Drop bindings whose element has left the document, and forget
    /// removed elements that were already unbound. Returns the number of
    /// bindings dropped.
    pub fn release_detached<S: InputStore>(&mut self, doc: &Document, store: &mut S) -> usize {
        let gone: Vec<Id> = self
            .bindings
            .keys()
            .copied()
            .filter(|id| !doc.contains(*id))
            .collect();
        for id in &gone {
            self.bindings.remove(id);
            store.forget(InputId::from(*id));
            log::debug!(target: "forms", "released binding of detached {id:?}");
        }
        self.destroyed.retain(|id| doc.contains(*id));
        gone.len()
    }

    /// Route one event. Unbound (or destroyed) targets get a default outcome
    /// and nothing is touched.
    pub fn dispatch<S: InputStore>(
        &mut self,
        doc: &mut Document,
        store: &mut S,
        target: Id,
        event: UiEvent,
    ) -> DispatchOutcome {
        if event == UiEvent::Submit {
            return self.submit(doc, store, target);
        }

        let Some(binding) = self.bindings.get(&target) else {
            return DispatchOutcome::default();
        };
        match event {
            UiEvent::Focus => store.focus(InputId::from(target)),
            UiEvent::Blur => store.blur(InputId::from(target)),
            _ => {}
        }
        match binding {
            Binding::Mask(m) => m.handle(store, target, &event),
            Binding::Decimal(d) => d.handle(store, target, &event),
        }
    }

    fn submit<S: InputStore>(
        &mut self,
        doc: &mut Document,
        store: &mut S,
        form: Id,
    ) -> DispatchOutcome {
        let fields = doc.descendants(form, |n| n.is_element("input"));
        let mut pending = Vec::new();

        for id in fields {
            let value = store.value(InputId::from(id)).unwrap_or("");
            let clean = match self.bindings.get(&id) {
                Some(Binding::Mask(m)) if m.unmask && m.form == Some(form) => {
                    m.pattern.unmask(value)
                }
                Some(Binding::Decimal(d)) if d.form == Some(form) => {
                    decimal::parse(value, &d.config).to_string()
                }
                _ => continue,
            };
            match field_name(doc, id) {
                Some(name) => pending.push((name, clean)),
                None => log::warn!(target: "forms", "bound field {id:?} has no name, nothing submitted"),
            }
        }

        let mut outcome = DispatchOutcome::default();
        for (name, clean) in pending {
            if let Some(hidden) = inject_hidden(doc, form, &name, &clean) {
                outcome.injected.push(hidden);
            }
        }
        outcome
    }

    /// Simulate one key: `KeyDown`, then (unless prevented) the edit the
    /// browser would make and an `Input` event.
    pub fn press_key<S: InputStore>(
        &mut self,
        doc: &mut Document,
        store: &mut S,
        target: Id,
        press: KeyPress,
    ) -> DispatchOutcome {
        let mut outcome = self.dispatch(doc, store, target, UiEvent::KeyDown(press));
        if outcome.default_prevented || press.modifiers.is_shortcut() {
            return outcome;
        }

        let id = InputId::from(target);
        match press.key {
            Key::Char(c) => {
                let mut buf = [0u8; 4];
                store.insert_text(id, c.encode_utf8(&mut buf));
            }
            Key::Backspace => store.backspace(id),
            Key::Delete => store.delete(id),
            _ => return outcome,
        }

        outcome.merge(self.dispatch(doc, store, target, UiEvent::Input));
        outcome
    }

    /// [`press_key`](Self::press_key) for every character of `text`.
    pub fn type_text<S: InputStore>(
        &mut self,
        doc: &mut Document,
        store: &mut S,
        target: Id,
        text: &str,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        for c in text.chars() {
            outcome.merge(self.press_key(doc, store, target, KeyPress::char(c)));
        }
        outcome
    }

    /// Paste `text`; unbound fields get a plain insertion.
    pub fn paste<S: InputStore>(
        &mut self,
        doc: &mut Document,
        store: &mut S,
        target: Id,
        text: &str,
    ) -> DispatchOutcome {
        let outcome = self.dispatch(doc, store, target, UiEvent::Paste(text.to_string()));
        if outcome.default_prevented {
            return outcome;
        }
        store.insert_text(InputId::from(target), text);
        let mut outcome = outcome;
        outcome.value_changed = true;
        outcome.merge(self.dispatch(doc, store, target, UiEvent::Input));
        outcome
    }
}

fn check_element(doc: &Document, element: Id) -> Result<(), BindError> {
    match doc.get(element) {
        Some(Node::Element { .. }) => Ok(()),
        Some(_) => Err(BindError::NotAnElement(element)),
        None => {
            log::error!(target: "forms", "element {element:?} not found");
            Err(BindError::ElementNotFound(format!("{element:?}")))
        }
    }
}

fn lookup(doc: &Document, dom_id: &str) -> Result<Id, BindError> {
    doc.element_by_dom_id(dom_id).ok_or_else(|| {
        log::error!(target: "forms", "field with id {dom_id:?} not found");
        BindError::ElementNotFound(dom_id.to_string())
    })
}
