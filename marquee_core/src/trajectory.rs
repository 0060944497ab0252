// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal motion of overlay items.
//!
//! Scrolling items travel the full surface width plus their own paint width
//! over their lifetime, at a constant step:
//!
//! ```text
//! step = (surface_width + paint_width) / duration      (units per ms)
//!
//! right-to-left:  left(t) = surface_width - elapsed(t) * step
//! left-to-right:  left(t) = elapsed(t) * step - paint_width
//! ```
//!
//! Once the lifetime has elapsed the item is parked just past the exit edge.
//! Fixed items are horizontally centered. Vertical position is never
//! derived here; that is the retainers' job.

use kurbo::Rect;

use crate::category::MotionCategory;
use crate::item::ItemView;
use crate::time::{Duration, MediaTime};

/// Returns the left edge of an item at `time`, or `None` for categories that
/// do not follow a trajectory ([`Special`](MotionCategory::Special) and
/// [`Other`](MotionCategory::Other)).
#[must_use]
pub fn left_at(
    category: MotionCategory,
    surface_width: f64,
    paint_width: f64,
    start: MediaTime,
    duration: Duration,
    time: MediaTime,
) -> Option<f64> {
    let elapsed = time.millis_since(start) as f64;
    let lifetime = duration.0 as f64;
    match category {
        MotionCategory::ScrollRightToLeft => {
            if elapsed >= lifetime {
                Some(-paint_width)
            } else {
                Some(surface_width - elapsed * step(surface_width, paint_width, lifetime))
            }
        }
        MotionCategory::ScrollLeftToRight => {
            if elapsed >= lifetime {
                Some(surface_width)
            } else {
                Some(elapsed * step(surface_width, paint_width, lifetime) - paint_width)
            }
        }
        MotionCategory::FixedTop | MotionCategory::FixedBottom => {
            Some((surface_width - paint_width) / 2.0)
        }
        MotionCategory::Special | MotionCategory::Other => None,
    }
}

/// Returns the rectangle `view` occupies at `time`, keeping its committed top.
#[must_use]
pub fn rect_at(view: &ItemView, surface_width: f64, time: MediaTime) -> Option<Rect> {
    let left = left_at(
        view.category,
        surface_width,
        view.paint_width(),
        view.start,
        view.duration,
        time,
    )?;
    Some(Rect::new(
        left,
        view.top(),
        left + view.paint_width(),
        view.bottom(),
    ))
}

fn step(surface_width: f64, paint_width: f64, lifetime: f64) -> f64 {
    if lifetime <= 0.0 {
        0.0
    } else {
        (surface_width + paint_width) / lifetime
    }
}
