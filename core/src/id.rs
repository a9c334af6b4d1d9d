use crate::version::{SavedDefaultVersion, SavedVersion};

/// An opaque handle to an element of a slot map
///
/// Ids are plain values: they can be copied and compared, but they don't own
/// the element they refer to. Once the element is removed the id becomes
/// stale, and the slot it pointed to may later be reused for an unrelated
/// element. The numeric value inside of an id is not part of its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id<S = SavedDefaultVersion> {
    index: usize,
    version: S,
}

/// An id that will not pass any validity check
pub const INVALID_ID: Id = Id::<SavedDefaultVersion>::INVALID;

impl<S: SavedVersion> Id<S> {
    /// An id that will not pass any validity check
    ///
    /// It never compares equal to an id handed out by a slot map.
    pub const INVALID: Self = Self {
        index: usize::MAX,
        version: S::DETACHED,
    };

    /// Returns true if this is the [`INVALID`](Self::INVALID) id
    pub fn is_invalid(&self) -> bool { self.index == usize::MAX }

    /// Overwrite this id with the [`INVALID`](Self::INVALID) id
    pub fn invalidate(&mut self) { *self = Self::INVALID; }
}

impl<S> Id<S> {
    /// Used by slot maps to hand out ids, not part of the stable api
    #[doc(hidden)]
    pub const fn from_raw_parts(index: usize, version: S) -> Self { Self { index, version } }

    /// The slot this id refers to
    #[doc(hidden)]
    pub const fn index(&self) -> usize { self.index }

    /// The saved version of the slot when this id was handed out
    #[doc(hidden)]
    pub const fn version(&self) -> &S { &self.version }
}

impl<S: SavedVersion> Default for Id<S> {
    fn default() -> Self { Self::INVALID }
}
