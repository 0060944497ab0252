// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use marquee_core::category::MotionCategory;
use marquee_core::trace::{
    EvictionEvent, LaneResetEvent, LanesClearedEvent, PlacementEvent, PlacementOutcome,
    ResetReason, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub(crate) fn category_name(category: MotionCategory) -> &'static str {
    match category {
        MotionCategory::ScrollRightToLeft => "rl",
        MotionCategory::ScrollLeftToRight => "lr",
        MotionCategory::FixedTop => "top",
        MotionCategory::FixedBottom => "bottom",
        MotionCategory::Special => "special",
        MotionCategory::Other => "other",
    }
}

pub(crate) fn outcome_name(outcome: PlacementOutcome) -> &'static str {
    match outcome {
        PlacementOutcome::Kept => "kept",
        PlacementOutcome::Reentered => "reentered",
        PlacementOutcome::ReusedLane => "reused",
        PlacementOutcome::Stacked => "stacked",
        PlacementOutcome::Overwrote => "overwrote",
        PlacementOutcome::Displaced => "displaced",
        PlacementOutcome::Origin => "origin",
        PlacementOutcome::Special => "special",
    }
}

pub(crate) fn reason_name(reason: ResetReason) -> &'static str {
    match reason {
        ResetReason::NegativeTop => "negative-top",
        ResetReason::Gap => "gap",
        ResetReason::Overflow => "overflow",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_placement(&mut self, e: &PlacementEvent) {
        let _ = writeln!(
            self.writer,
            "[place] {:?} {} {} at ({:.1}, {:.1}) lanes={}",
            e.item,
            category_name(e.category),
            outcome_name(e.outcome),
            e.left,
            e.top,
            e.lanes,
        );
    }

    fn on_eviction(&mut self, e: &EvictionEvent) {
        let _ = writeln!(
            self.writer,
            "[evict] {:?} {} top={:.1} by {:?}",
            e.evicted,
            category_name(e.category),
            e.top,
            e.by,
        );
    }

    fn on_lane_reset(&mut self, e: &LaneResetEvent) {
        let _ = writeln!(
            self.writer,
            "[reset] {} {} cleared={} trigger={:?}",
            category_name(e.category),
            reason_name(e.reason),
            e.cleared,
            e.trigger,
        );
    }

    fn on_lanes_cleared(&mut self, e: &LanesClearedEvent) {
        let verb = if e.released { "release" } else { "clear" };
        let _ = writeln!(
            self.writer,
            "[{verb}] {} cleared={}",
            category_name(e.category),
            e.cleared,
        );
    }
}
