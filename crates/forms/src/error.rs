use dom::Id;

/// Why an element could not be bound. Never fatal: callers log and move on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("element {0:?} not found")]
    ElementNotFound(String),
    #[error("node {0:?} is not an element")]
    NotAnElement(Id),
}
