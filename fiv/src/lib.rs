#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Dense slot maps with stable, recyclable ids
//!
//! ```
//! use fiv::{RemovalPolicy, SlotMap};
//!
//! let mut map = SlotMap::with_policy(RemovalPolicy::SwapRemove);
//! let a = map.push("a");
//! let b = map.push("b");
//!
//! map.remove(a);
//! assert!(!map.contains(a));
//! assert_eq!(map[b], "b");
//! ```

pub use fiv_core as core;
pub use fiv_slotmap as slotmap;

pub use fiv_slotmap::{AccessError, Id, RemovalPolicy, SlotMap, INVALID_ID};
