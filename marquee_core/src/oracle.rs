// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision prediction between a lane occupant and a candidate.
//!
//! Retainers ask a [`CollisionOracle`] once per scanned lane whether the
//! occupant and the candidate would overlap on screen at some instant while
//! both are visible. Oracles must be deterministic and free of side effects.
//!
//! [`TrajectoryOracle`] is the stock implementation. Any closure with the
//! right signature is an oracle as well, which is mostly useful in tests.

use kurbo::Size;

use crate::category::MotionCategory;
use crate::item::ItemView;
use crate::time::{Duration, MediaTime};
use crate::trajectory;

/// Predicts whether two items overlap while both are visible.
pub trait CollisionOracle {
    /// Returns `true` if `candidate`, shown for `duration` from `now`, would
    /// overlap `occupant` if placed in the occupant's lane.
    fn will_collide(
        &self,
        surface: Size,
        occupant: &ItemView,
        candidate: &ItemView,
        duration: Duration,
        now: MediaTime,
    ) -> bool;
}

impl<F> CollisionOracle for F
where
    F: Fn(Size, &ItemView, &ItemView, Duration, MediaTime) -> bool,
{
    #[inline]
    fn will_collide(
        &self,
        surface: Size,
        occupant: &ItemView,
        candidate: &ItemView,
        duration: Duration,
        now: MediaTime,
    ) -> bool {
        self(surface, occupant, candidate, duration, now)
    }
}

/// Collision test based on the items' horizontal trajectories.
///
/// - Items of different categories never collide.
/// - An occupant that is outside never collides.
/// - A candidate due *before* the occupant always collides.
/// - Items due `duration` or more apart, or either already timed out, do not
///   collide.
/// - Fixed items collide whenever their lifetimes overlap.
/// - Scrolling items collide if their rectangles touch at `now` or at the
///   moment the occupant leaves the surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrajectoryOracle;

impl TrajectoryOracle {
    fn hit_at(surface: Size, occupant: &ItemView, candidate: &ItemView, time: MediaTime) -> bool {
        let (Some(a), Some(b)) = (
            trajectory::rect_at(occupant, surface.width, time),
            trajectory::rect_at(candidate, surface.width, time),
        ) else {
            return false;
        };
        match occupant.category {
            MotionCategory::ScrollRightToLeft => b.x0 < a.x1,
            MotionCategory::ScrollLeftToRight => b.x1 > a.x0,
            _ => false,
        }
    }
}

impl CollisionOracle for TrajectoryOracle {
    fn will_collide(
        &self,
        surface: Size,
        occupant: &ItemView,
        candidate: &ItemView,
        duration: Duration,
        now: MediaTime,
    ) -> bool {
        if occupant.category != candidate.category || occupant.outside {
            return false;
        }
        let delta = candidate.start.millis_since(occupant.start);
        if delta < 0 {
            return true;
        }
        if delta.unsigned_abs() >= duration.0
            || occupant.is_timed_out(now)
            || candidate.is_timed_out(now)
        {
            return false;
        }
        if occupant.category.is_fixed() {
            return true;
        }
        Self::hit_at(surface, occupant, candidate, now)
            || Self::hit_at(surface, occupant, candidate, occupant.end())
    }
}
