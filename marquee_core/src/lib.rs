// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lane assignment and collision avoidance for scrolling overlay comments.
//!
//! `marquee_core` decides where on a rectangular surface each piece of
//! overlay text ("item") is drawn so that items sharing a horizontal band do
//! not overlap while they move. It is `no_std` compatible (with `alloc`),
//! stores items in struct-of-arrays layout behind generational handles, and
//! never fails: every degenerate layout state is recovered by discarding the
//! affected lanes.
//!
//! # Architecture
//!
//! Placement runs once per item per frame:
//!
//! ```text
//!   ItemStore (category, size, start, duration, flags)
//!       │
//!       ▼
//!   Dispatcher::fix() ──► route by MotionCategory
//!                             │
//!          ┌──────────────────┼──────────────────┐
//!          ▼                  ▼                  ▼
//!   Retainer (scroll)  Retainer (fixed-top)  Retainer (fixed-bottom)
//!          │                  │                  │
//!          └──── CollisionOracle::will_collide() per scanned lane
//!                             │
//!                             ▼
//!   ItemStore::layout(left, top) + LaneSet update ──► Tracer
//! ```
//!
//! **[`item`]**: Struct-of-arrays item store with generational handles and
//! the [`ItemView`](item::ItemView) snapshot oracles read.
//!
//! **[`dispatch`]**: Session-owned [`Dispatcher`](dispatch::Dispatcher)
//! routing items to one lazily created retainer per laned category.
//!
//! **[`retainer`]**: The placement algorithm, parameterized by a
//! [`LanePolicy`](retainer::LanePolicy).
//!
//! **[`lane_set`]**: Ordered lane occupants keyed by committed `top`.
//!
//! **[`oracle`]**: The [`CollisionOracle`](oracle::CollisionOracle) seam and
//! the stock trajectory-based implementation.
//!
//! **[`trajectory`]**: Horizontal position of an item at a media time.
//!
//! **[`category`]**, **[`surface`]**, **[`time`]**: Small shared types.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! placement instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod category;
pub mod dispatch;
pub mod item;
pub mod lane_set;
pub mod oracle;
pub mod retainer;
pub mod surface;
pub mod time;
pub mod trace;
pub mod trajectory;
