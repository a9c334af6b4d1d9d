#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(missing_docs)]
#![deny(clippy::missing_safety_doc)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A dense slot map: values are stored contiguously, and every value is
//! reachable through an [`Id`] that stays valid while the value moves around.
//!
//! Removal either keeps the relative order of the remaining values, or swaps
//! the last value into the hole, see [`RemovalPolicy`]. Stale ids are detected
//! according to the [`Version`] strategy of the slot map, see
//! [`fiv_core::version`] for details.
//!
//! # Features
//!
//! `std` (default) - implements `std::error::Error` for [`AccessError`]
//!
//! `log` - reports allocation, removal and bookkeeping resets through the
//! [`log`](https://docs.rs/log) facade
//!

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[macro_use]
mod log;

mod dense;
mod iter;
mod policy;

pub use dense::{SlotMap, VacantEntry};
pub use iter::{Drain, Entries, EntriesMut, Ids};
pub use policy::RemovalPolicy;

pub use fiv_core::{
    version,
    version::{DefaultVersion, Unversioned, Version},
    AccessError, Id, INVALID_ID,
};
