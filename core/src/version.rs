//! The versioning strategy, see [`Version`] for details

use core::{fmt::Debug, hash::Hash};

/// The versioning strategy
///
/// Every slot of a slot map stores a version alongside the position of its
/// value, and every [`Id`](crate::Id) stores the saved version its slot had
/// when the id was handed out. An id is only accepted while the two agree.
///
/// # Slot Exhaustion
///
/// If a slot's version is exhausted, then that slot is retired and will not be
/// reused until the container resets its bookkeeping. For [`DefaultVersion`]
/// this will only happen after about 2 billion insertion/removal pairs *per slot*.
///
/// You can avoid version exhaustion by using [`Unversioned`], but this suffers
/// from the [ABA problem](https://en.wikipedia.org/wiki/ABA_problem):
///
/// ```
/// use fiv_core::version::{Unversioned, Version};
///
/// let empty = Unversioned::EMPTY;
/// let full = empty.mark_full();
/// let saved = full.save();
/// // remove the value, then insert a new one into the same slot
/// let reused = full.mark_empty().unwrap_or_else(|v| v).mark_full();
/// // the old saved version still matches
/// assert!(reused.equals_saved(saved));
/// ```
///
/// With [`DefaultVersion`] the last assertion would fail, so a recycled slot
/// reports the old id as stale instead of handing out the new value.
pub trait Version: Copy {
    /// Represents a full version
    type Save: SavedVersion;

    /// The initial empty version
    const EMPTY: Self;

    /// Convert a full version to an empty version
    ///
    /// returns `Err` if there are no more versions, the slot must then be retired
    fn mark_empty(self) -> Result<Self, Self>;

    /// Convert an empty version to a full version
    fn mark_full(self) -> Self;

    /// Check if the version is exhausted
    fn is_exhausted(&self) -> bool;
    /// Check if the version is empty
    fn is_empty(self) -> bool { !self.is_full() }
    /// Check if the version is full
    fn is_full(self) -> bool;

    /// Save the current version, only meaningful on a full version
    fn save(self) -> Self::Save;

    /// Check if the saved version matches the current version
    ///
    /// In particular, this can only be true if the current version is full.
    fn equals_saved(self, saved: Self::Save) -> bool;

    /// Of two empty versions, the one that was reached later
    ///
    /// Slot maps use this to pick the starting version of slots created after
    /// a reset, so that ids saved before the reset never match them.
    fn latest(self, other: Self) -> Self;
}

/// A saved version, as stored inside of an [`Id`](crate::Id)
pub trait SavedVersion: Copy + Eq + Hash + Debug {
    /// The saved version carried by [`Id::INVALID`](crate::Id::INVALID)
    const DETACHED: Self;
}

/// The default versioning strategy, that's backed by a [`u32`], that avoids the
/// [`ABA problem`](https://en.wikipedia.org/wiki/ABA_problem)
///
/// Odd values are empty, even values are full. This can track up to 2^31
/// insertion-removal pairs before exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultVersion(u32);
/// `<DefaultVersion as Version>::Save`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SavedDefaultVersion(u32);

impl SavedVersion for SavedDefaultVersion {
    // never produced by `mark_full`, versions start at 1
    const DETACHED: Self = Self(0);
}

impl Version for DefaultVersion {
    type Save = SavedDefaultVersion;

    const EMPTY: Self = Self(1);

    fn mark_empty(self) -> Result<Self, Self> {
        let next = Self(self.0 | 1);
        match self.0.checked_add(2) {
            Some(_) => Ok(next),
            None => Err(next),
        }
    }

    fn mark_full(self) -> Self { Self(self.0.wrapping_add(1)) }

    fn is_exhausted(&self) -> bool { self.0 == u32::MAX }

    fn is_full(self) -> bool { self.0 & 1 == 0 }

    fn save(self) -> Self::Save { SavedDefaultVersion(self.0) }

    fn equals_saved(self, saved: Self::Save) -> bool { self.0 == saved.0 }

    fn latest(self, other: Self) -> Self { Self(self.0.max(other.0)) }
}

/// A versioning strategy that doesn't actually track versions,
/// just the state of the slot. This strategy can fall prey
/// to the [`ABA problem`](https://en.wikipedia.org/wiki/ABA_problem)
///
/// This matches a slot map whose ids are plain indices: an id stays
/// valid for as long as *some* value occupies its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unversioned {
    /// The slot is empty
    Empty,
    /// The slot is full
    Full,
}
/// `<Unversioned as Version>::Save`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnversionedFull(());

impl SavedVersion for UnversionedFull {
    const DETACHED: Self = Self(());
}

impl Version for Unversioned {
    type Save = UnversionedFull;

    const EMPTY: Self = Self::Empty;

    fn mark_empty(self) -> Result<Self, Self> { Ok(Self::Empty) }

    fn mark_full(self) -> Self { Self::Full }

    fn is_exhausted(&self) -> bool { false }

    fn is_full(self) -> bool { matches!(self, Self::Full) }

    fn save(self) -> Self::Save { UnversionedFull(()) }

    fn equals_saved(self, UnversionedFull(()): Self::Save) -> bool { self.is_full() }

    fn latest(self, _: Self) -> Self { Self::Empty }
}
