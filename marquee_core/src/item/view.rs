// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only snapshot of an item, as handed to collision oracles.

use kurbo::Rect;

use crate::category::MotionCategory;
use crate::time::{Duration, MediaTime};

use super::id::ItemId;

/// A copy of everything an oracle may look at for one item.
///
/// Taken with [`ItemStore::view`](super::ItemStore::view). The bounds are the
/// committed layout rectangle at the time the view was taken.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemView {
    /// The item this view was taken from.
    pub id: ItemId,
    /// Motion category.
    pub category: MotionCategory,
    /// Committed layout rectangle (`left, top, right, bottom`).
    pub bounds: Rect,
    /// When the item becomes due on the timeline.
    pub start: MediaTime,
    /// Planned visible lifetime.
    pub duration: Duration,
    /// Whether the item is currently ineligible for display.
    pub outside: bool,
}

impl ItemView {
    /// Paint width.
    #[inline]
    #[must_use]
    pub fn paint_width(&self) -> f64 {
        self.bounds.width()
    }

    /// Paint height.
    #[inline]
    #[must_use]
    pub fn paint_height(&self) -> f64 {
        self.bounds.height()
    }

    /// Left edge.
    #[inline]
    #[must_use]
    pub fn left(&self) -> f64 {
        self.bounds.x0
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub fn top(&self) -> f64 {
        self.bounds.y0
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.bounds.x1
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bounds.y1
    }

    /// Timeline position at which the item's lifetime ends.
    #[inline]
    #[must_use]
    pub fn end(&self) -> MediaTime {
        self.start + self.duration
    }

    /// Returns `true` once `now` is at or past the end of the lifetime.
    #[inline]
    #[must_use]
    pub fn is_timed_out(&self, now: MediaTime) -> bool {
        now.millis_since(self.start) >= i64::try_from(self.duration.0).unwrap_or(i64::MAX)
    }
}
