//! Identifier for inputs tracked by an [`InputValueStore`](crate::InputValueStore).

/// Opaque key for one input. It carries no meaning beyond identity.
///
/// Form controllers key their state by [`dom::Id`]; the `From` impls below
/// make the hop between the two free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputId(u64);

impl InputId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<dom::Id> for InputId {
    #[inline]
    fn from(id: dom::Id) -> Self {
        Self::from_raw(u64::from(id.0))
    }
}

impl From<u64> for InputId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}
