// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines trace output.
//!
//! [`JsonLinesSink`] writes one JSON object per event, newline separated.
//! Every object carries an `"event"` tag (`placement`, `eviction`, `reset`,
//! `cleared`) and the event's fields; item handles are written as
//! `{"index": .., "generation": ..}`.
//!
//! Sink methods cannot fail, so the first write error is kept and returned
//! from [`JsonLinesSink::finish`]. Events after a failed write are dropped.

use std::io::{self, Write};

use serde_json::{Value, json};

use marquee_core::item::ItemId;
use marquee_core::trace::{
    EvictionEvent, LaneResetEvent, LanesClearedEvent, PlacementEvent, TraceSink,
};

use crate::pretty::{category_name, outcome_name, reason_name};

/// Writes trace events as JSON lines.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
    written: u64,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink")
            .field("error", &self.error)
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
            written: 0,
        }
    }

    /// Number of events written so far.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flushes the writer and returns it, or the first error encountered.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn emit(&mut self, value: &Value) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, value)
            .map_err(io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        match result {
            Ok(()) => self.written += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

fn handle(id: ItemId) -> Value {
    json!({ "index": id.index(), "generation": id.generation() })
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_placement(&mut self, e: &PlacementEvent) {
        self.emit(&json!({
            "event": "placement",
            "item": handle(e.item),
            "category": category_name(e.category),
            "left": e.left,
            "top": e.top,
            "lanes": e.lanes,
            "outcome": outcome_name(e.outcome),
        }));
    }

    fn on_eviction(&mut self, e: &EvictionEvent) {
        self.emit(&json!({
            "event": "eviction",
            "evicted": handle(e.evicted),
            "by": handle(e.by),
            "category": category_name(e.category),
            "top": e.top,
        }));
    }

    fn on_lane_reset(&mut self, e: &LaneResetEvent) {
        self.emit(&json!({
            "event": "reset",
            "trigger": handle(e.trigger),
            "category": category_name(e.category),
            "cleared": e.cleared,
            "reason": reason_name(e.reason),
        }));
    }

    fn on_lanes_cleared(&mut self, e: &LanesClearedEvent) {
        self.emit(&json!({
            "event": "cleared",
            "category": category_name(e.category),
            "cleared": e.cleared,
            "released": e.released,
        }));
    }
}
