// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON-lines export for marquee placement traces.
//!
//! This crate provides [`TraceSink`](marquee_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`json::JsonLinesSink`]: one JSON object per event, for feeding into
//!   `jq` or a notebook.

pub mod json;
pub mod pretty;
