/// Per-input state held by [`InputValueStore`](crate::InputValueStore).
#[derive(Clone, Debug, Default)]
pub(crate) struct InputState {
    pub value: String,

    /// Bumped on every text change.
    pub value_rev: u64,

    /// Byte index into `value`, always on a char boundary.
    pub caret: usize,

    /// When `Some`, the selection spans `min(anchor, caret)..max(anchor, caret)`.
    pub selection_anchor: Option<usize>,
}

impl InputState {
    pub fn with_value(value: String) -> Self {
        let caret = value.len();
        Self {
            value,
            caret,
            ..Self::default()
        }
    }
}
