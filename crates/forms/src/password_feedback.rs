//! Live strength meter and confirmation message for a password form.

use crate::error::BindError;
use crate::event::UiEvent;
use dom::{Document, Id, Node};
use input_core::{InputId, InputStore};
use password::{MatchState, PasswordPolicy, Requirement, Strength, confirmation, evaluate};

/// Element ids of the requirement checklist items. Unset items are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequirementIds {
    pub length: Option<String>,
    pub uppercase: Option<String>,
    pub lowercase: Option<String>,
    pub number: Option<String>,
    pub special: Option<String>,
}

impl RequirementIds {
    pub fn get(&self, req: Requirement) -> Option<&str> {
        match req {
            Requirement::Length => self.length.as_deref(),
            Requirement::Uppercase => self.uppercase.as_deref(),
            Requirement::Lowercase => self.lowercase.as_deref(),
            Requirement::Number => self.number.as_deref(),
            Requirement::Special => self.special.as_deref(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordFeedbackConfig {
    pub password_field_id: String,
    pub confirm_field_id: Option<String>,
    pub strength_bar_id: Option<String>,
    pub strength_text_id: Option<String>,
    pub match_message_id: Option<String>,
    pub requirements: RequirementIds,
    pub policy: PasswordPolicy,
    /// Meter is updated only when set and both bar and text exist.
    pub show_strength: bool,
    pub show_requirements: bool,
}

impl PasswordFeedbackConfig {
    pub fn new(password_field_id: impl Into<String>) -> Self {
        Self {
            password_field_id: password_field_id.into(),
            ..Self::default()
        }
    }
}

/// Resolved element ids. Purely visual: nothing here blocks a submit.
#[derive(Clone, Debug)]
pub struct PasswordFeedback {
    policy: PasswordPolicy,
    password: Id,
    confirm: Option<Id>,
    meter: Option<(Id, Id)>,
    match_message: Option<Id>,
    requirement_items: Vec<(Requirement, Id)>,
}

impl PasswordFeedback {
    pub fn attach(doc: &Document, config: &PasswordFeedbackConfig) -> Result<Self, BindError> {
        let Some(password) = doc.element_by_dom_id(&config.password_field_id) else {
            log::error!(
                target: "forms",
                "password field with id {:?} not found",
                config.password_field_id
            );
            return Err(BindError::ElementNotFound(config.password_field_id.clone()));
        };

        let find = |id: &Option<String>| id.as_deref().and_then(|id| doc.element_by_dom_id(id));

        let meter = if config.show_strength {
            find(&config.strength_bar_id).zip(find(&config.strength_text_id))
        } else {
            None
        };

        let confirm = find(&config.confirm_field_id);
        let match_message = confirm.and_then(|_| find(&config.match_message_id));

        let requirement_items = if config.show_requirements {
            Requirement::ALL
                .iter()
                .filter_map(|req| {
                    let id = doc.element_by_dom_id(config.requirements.get(*req)?)?;
                    Some((*req, id))
                })
                .collect()
        } else {
            Vec::new()
        };

        log::debug!(
            target: "forms",
            "password feedback on {password:?} (meter: {}, match: {}, requirements: {})",
            meter.is_some(),
            match_message.is_some(),
            requirement_items.len()
        );

        Ok(Self {
            policy: config.policy.clone(),
            password,
            confirm,
            meter,
            match_message,
            requirement_items,
        })
    }

    pub fn password_field(&self) -> Id {
        self.password
    }

    pub fn confirm_field(&self) -> Option<Id> {
        self.confirm
    }

    /// React to an `Input` on the password field (meter) or the confirmation
    /// field (match message). Returns whether anything was refreshed.
    pub fn handle<S: InputStore>(
        &self,
        doc: &mut Document,
        store: &S,
        target: Id,
        event: &UiEvent,
    ) -> bool {
        if *event != UiEvent::Input {
            return false;
        }
        if target == self.password && self.meter.is_some() {
            self.refresh_strength(doc, store);
            return true;
        }
        if Some(target) == self.confirm && self.match_message.is_some() {
            self.refresh_match(doc, store);
            return true;
        }
        false
    }

    pub fn strength<S: InputStore>(&self, doc: &Document, store: &S) -> Strength {
        evaluate(&field_value(doc, store, self.password), &self.policy)
    }

    /// `true` when there is no confirmation field.
    pub fn passwords_match<S: InputStore>(&self, doc: &Document, store: &S) -> bool {
        match self.confirm {
            Some(confirm) => field_value(doc, store, self.password) == field_value(doc, store, confirm),
            None => true,
        }
    }

    /// Update the meter and the checklist.
    pub fn refresh_strength<S: InputStore>(&self, doc: &mut Document, store: &S) -> Strength {
        let strength = self.strength(doc, store);

        for (req, item) in &self.requirement_items {
            mark_requirement(doc, *item, strength.requirements.is_met(*req));
        }

        if let Some((bar, text)) = self.meter {
            let tone = strength.level.tone();
            doc.set_attr(bar, "style", &format!("width: {}%", strength.score));
            doc.set_attr(bar, "class", &format!("progress-bar bg-{tone}"));
            doc.set_text(text, strength.level.label());
            doc.set_attr(text, "class", &format!("text-{tone}"));
        }

        strength
    }

    pub fn refresh_match<S: InputStore>(&self, doc: &mut Document, store: &S) -> MatchState {
        let (Some(confirm), Some(message)) = (self.confirm, self.match_message) else {
            return MatchState::Empty;
        };

        let state = confirmation(
            &field_value(doc, store, self.password),
            &field_value(doc, store, confirm),
        );
        let (class, icon, text) = match state {
            MatchState::Empty => {
                doc.set_text(message, "");
                return state;
            }
            MatchState::Matches => ("text-success", "bi bi-check-circle", " As senhas coincidem"),
            MatchState::Differs => ("text-danger", "bi bi-x-circle", " As senhas nao coincidem"),
        };

        doc.replace_children(
            message,
            vec![
                Node::element("span")
                    .with_attr("class", class)
                    .with_child(Node::element("i").with_attr("class", icon))
                    .with_child(Node::text(text)),
            ],
        );
        state
    }
}

fn field_value<S: InputStore>(doc: &Document, store: &S, id: Id) -> String {
    store
        .value(InputId::from(id))
        .or_else(|| doc.attr(id, "value"))
        .unwrap_or("")
        .to_string()
}

// The label is whatever text the item holds, minus a previous icon's spacing.
fn mark_requirement(doc: &mut Document, item: Id, met: bool) {
    let label = doc.text_content(item).unwrap_or_default().trim().to_string();
    if met {
        doc.replace_children(
            item,
            vec![
                Node::element("i").with_attr("class", "bi bi-check-circle-fill"),
                Node::text(&format!(" {label}")),
            ],
        );
        doc.add_class(item, "text-success");
    } else {
        doc.set_text(item, &label);
        doc.remove_class(item, "text-success");
    }
}

/// Flip a password field between hidden and shown, swapping the eye icon on
/// `icon_<field_dom_id>` if present. Returns `true` when the text is now
/// visible.
pub fn toggle_visibility(doc: &mut Document, field_dom_id: &str) -> Result<bool, BindError> {
    let Some(field) = doc.element_by_dom_id(field_dom_id) else {
        log::error!(target: "forms", "field with id {field_dom_id:?} not found");
        return Err(BindError::ElementNotFound(field_dom_id.to_string()));
    };
    let icon = doc.element_by_dom_id(&format!("icon_{field_dom_id}"));

    let shown = doc.attr(field, "type") == Some("password");
    let (ty, from, to) = if shown {
        ("text", "bi-eye", "bi-eye-slash")
    } else {
        ("password", "bi-eye-slash", "bi-eye")
    };

    doc.set_attr(field, "type", ty);
    if let Some(icon) = icon {
        doc.remove_class(icon, from);
        doc.add_class(icon, to);
    }
    Ok(shown)
}
