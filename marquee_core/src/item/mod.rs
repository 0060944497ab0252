// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay item data model.
//!
//! An *item* is one piece of overlay text. Each item has:
//!
//! - An identity ([`ItemId`]): a generational handle that becomes stale when
//!   the item is destroyed, preventing use-after-free bugs at the API level.
//! - **Properties** set by the caller: category, measured paint size, start
//!   time, lifetime, and the `outside` flag.
//! - **Layout state** written by placement: the committed `left`/`top` origin
//!   and the `shown` flag (see [`ItemStore::layout`]).
//!
//! Items are stored in struct-of-arrays layout. Oracles never see the store
//! itself, only [`ItemView`] snapshots.

mod id;
mod store;
mod view;

pub use id::ItemId;
pub use store::{ItemDesc, ItemFlags, ItemStore, UNPLACED_TOP};
pub use view::ItemView;
