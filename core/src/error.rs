use core::fmt;

/// The reason an [`Id`](crate::Id) was rejected by a slot map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessError {
    /// The id's index is outside of the slot map's slots, it was never handed
    /// out by this container (or the container was reset since)
    Unknown,
    /// The id's slot exists, but the element it referred to has been removed
    Stale,
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown `Id`, it is out of bounds of the slot map",
            Self::Stale => "stale `Id`, the element it refers to has been removed",
        })
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for AccessError {}
