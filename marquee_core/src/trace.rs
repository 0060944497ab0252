// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for lane placement.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! retainers call as they place, evict, and reset. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::category::MotionCategory;
use crate::item::ItemId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a retainer arrived at an item's committed position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementOutcome {
    /// The item was already shown; its position was re-applied unchanged.
    Kept,
    /// The item was found in its own lane set and keeps its lane.
    Reentered,
    /// A lane whose occupant will not collide was taken over.
    ReusedLane,
    /// Every scanned lane collides; the item was stacked past them.
    Stacked,
    /// The surface is full; the item shares or takes the lane that frees up
    /// first.
    Overwrote,
    /// The first lane's occupant was displaced.
    Displaced,
    /// The item was placed at the category's origin.
    Origin,
    /// A self-positioning item was laid out at `(0, 0)`.
    Special,
}

/// Why a lane set was discarded wholesale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResetReason {
    /// The computed position was above the surface.
    NegativeTop,
    /// The lanes no longer start at the anchoring edge.
    Gap,
    /// The computed position runs past the surface's bottom edge.
    Overflow,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after an item's position is committed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementEvent {
    /// The placed item.
    pub item: ItemId,
    /// Its motion category.
    pub category: MotionCategory,
    /// Committed left edge.
    pub left: f64,
    /// Committed top edge.
    pub top: f64,
    /// Lane set size after placement (zero for special items).
    pub lanes: usize,
    /// How the position was chosen.
    pub outcome: PlacementOutcome,
}

/// Emitted when an occupant loses its lane to a candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvictionEvent {
    /// The occupant that was removed.
    pub evicted: ItemId,
    /// The candidate it was removed for.
    pub by: ItemId,
    /// Category of both items.
    pub category: MotionCategory,
    /// Top of the vacated lane.
    pub top: f64,
}

/// Emitted when a retainer's edge check discards its whole lane set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneResetEvent {
    /// The item whose placement triggered the reset.
    pub trigger: ItemId,
    /// Its motion category.
    pub category: MotionCategory,
    /// Number of occupants discarded.
    pub cleared: usize,
    /// Why the reset happened.
    pub reason: ResetReason,
}

/// Emitted when a lane set is emptied from outside the placement path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LanesClearedEvent {
    /// Category whose retainer was cleared.
    pub category: MotionCategory,
    /// Number of occupants discarded.
    pub cleared: usize,
    /// Whether the retainer was dropped as well.
    pub released: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the placement engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after an item's position is committed.
    fn on_placement(&mut self, e: &PlacementEvent) {
        _ = e;
    }

    /// Called when an occupant is evicted from its lane.
    fn on_eviction(&mut self, e: &EvictionEvent) {
        _ = e;
    }

    /// Called when an edge check discards a lane set.
    fn on_lane_reset(&mut self, e: &LaneResetEvent) {
        _ = e;
    }

    /// Called when a lane set is cleared or released by the owner.
    fn on_lanes_cleared(&mut self, e: &LanesClearedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// Built-in sinks
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// A [`TraceSink`] that tallies events, e.g. for per-frame statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementCounts {
    /// Placements per [`PlacementOutcome`], indexed by [`outcome_index`].
    pub placements: [u32; 8],
    /// Evictions.
    pub evictions: u32,
    /// Edge-check resets.
    pub resets: u32,
    /// Occupants discarded by resets, clears, and releases together.
    pub discarded: u32,
}

impl PlacementCounts {
    /// Placements recorded with the given outcome.
    #[must_use]
    pub const fn placed(&self, outcome: PlacementOutcome) -> u32 {
        self.placements[outcome_index(outcome)]
    }

    /// Total placements of any outcome.
    #[must_use]
    pub fn total_placements(&self) -> u32 {
        self.placements
            .iter()
            .fold(0_u32, |total, &n| total.saturating_add(n))
    }
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl TraceSink for PlacementCounts {
    fn on_placement(&mut self, e: &PlacementEvent) {
        let slot = &mut self.placements[outcome_index(e.outcome)];
        *slot = slot.saturating_add(1);
    }

    fn on_eviction(&mut self, _: &EvictionEvent) {
        self.evictions = self.evictions.saturating_add(1);
    }

    fn on_lane_reset(&mut self, e: &LaneResetEvent) {
        self.resets = self.resets.saturating_add(1);
        self.discarded = self.discarded.saturating_add(saturate(e.cleared));
    }

    fn on_lanes_cleared(&mut self, e: &LanesClearedEvent) {
        self.discarded = self.discarded.saturating_add(saturate(e.cleared));
    }
}

/// Maps a [`PlacementOutcome`] to an array index.
#[must_use]
pub const fn outcome_index(outcome: PlacementOutcome) -> usize {
    match outcome {
        PlacementOutcome::Kept => 0,
        PlacementOutcome::Reentered => 1,
        PlacementOutcome::ReusedLane => 2,
        PlacementOutcome::Stacked => 3,
        PlacementOutcome::Overwrote => 4,
        PlacementOutcome::Displaced => 5,
        PlacementOutcome::Origin => 6,
        PlacementOutcome::Special => 7,
    }
}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PlacementEvent`].
    #[inline]
    pub fn placement(&mut self, e: &PlacementEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_placement(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`EvictionEvent`].
    #[inline]
    pub fn eviction(&mut self, e: &EvictionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_eviction(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LaneResetEvent`].
    #[inline]
    pub fn lane_reset(&mut self, e: &LaneResetEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lane_reset(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LanesClearedEvent`].
    #[inline]
    pub fn lanes_cleared(&mut self, e: &LanesClearedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lanes_cleared(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
