#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The handle types shared by every `fiv` container
//!
//! An [`Id`] is an opaque reference to an element of a slot map. It stays
//! valid while the element moves around inside the container, and becomes
//! stale once the element is removed. How stale handles are detected is
//! decided by the [`Version`](version::Version) strategy of the container.

mod error;
mod id;
pub mod version;

pub use error::AccessError;
pub use id::{Id, INVALID_ID};
