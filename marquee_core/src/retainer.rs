// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lane assignment for one motion category.
//!
//! A [`Retainer`] owns the [`LaneSet`] of one category and decides, once per
//! item per frame, which lane an item goes into. The decision is driven by a
//! [`LanePolicy`]:
//!
//! - [`ScanOrder::Downward`] stacks lanes from the top edge. Lanes are scanned
//!   top to bottom; the first lane whose occupant will not collide with the
//!   candidate is taken over, otherwise the candidate goes below the last
//!   colliding lane. When the surface is full the lane that frees up first
//!   (smallest right edge) is overwritten.
//! - [`ScanOrder::Upward`] stacks lanes from the bottom edge. Lanes are scanned
//!   bottom to top and the candidate climbs one lane per colliding occupant.
//!
//! After a position is chosen an edge check runs. If the position is off the
//! surface, or the lanes no longer start at the anchoring edge, the whole lane
//! set is discarded and the candidate goes to the origin. This is the only
//! recovery path; placement never fails.

use kurbo::Size;

use crate::item::{ItemId, ItemStore, ItemView};
use crate::lane_set::{LaneOrder, LaneSet};
use crate::oracle::CollisionOracle;
use crate::surface::Surface;
use crate::trace::{
    EvictionEvent, LaneResetEvent, PlacementEvent, PlacementOutcome, ResetReason, Tracer,
};

/// Distance below which an edge counts as touching the surface's bottom.
pub const EDGE_EPSILON: f64 = 1e-6;

/// Direction lanes are stacked and scanned in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanOrder {
    /// Stack from the top edge; origin is `0`.
    Downward,
    /// Stack from the bottom edge; origin is `height - paint_height`.
    Upward,
}

/// Placement strategy of a [`Retainer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LanePolicy {
    /// Direction lanes are stacked and scanned in.
    pub scan: ScanOrder,
    /// Reset when the lanes do not start flush at the anchoring edge (and,
    /// for downward stacking, when the position goes negative).
    pub require_contiguous: bool,
}

impl LanePolicy {
    /// Horizontally moving items, either direction.
    pub const SCROLL: Self = Self {
        scan: ScanOrder::Downward,
        require_contiguous: true,
    };

    /// Top-anchored items. The stack may start below the top edge.
    pub const FIXED_TOP: Self = Self {
        scan: ScanOrder::Downward,
        require_contiguous: false,
    };

    /// Bottom-anchored items.
    pub const FIXED_BOTTOM: Self = Self {
        scan: ScanOrder::Upward,
        require_contiguous: true,
    };

    /// Sort order of the lane set this policy scans.
    #[must_use]
    pub const fn lane_order(self) -> LaneOrder {
        match self.scan {
            ScanOrder::Downward => LaneOrder::TopAscending,
            ScanOrder::Upward => LaneOrder::TopDescending,
        }
    }

    /// Where an item goes after a reset or into an empty lane set.
    #[must_use]
    pub fn origin(self, surface_height: f64, paint_height: f64) -> f64 {
        match self.scan {
            ScanOrder::Downward => 0.0,
            ScanOrder::Upward => surface_height - paint_height,
        }
    }

    /// Edge check for a chosen `top`. `first` is the first lane visited by
    /// the scan, if any.
    #[must_use]
    pub fn reset_reason(
        self,
        top: f64,
        paint_height: f64,
        surface_height: f64,
        first: Option<&ItemView>,
    ) -> Option<ResetReason> {
        match self.scan {
            ScanOrder::Downward => {
                if self.require_contiguous {
                    if top < 0.0 {
                        return Some(ResetReason::NegativeTop);
                    }
                    if first.is_some_and(|lane| lane.top() > 0.0) {
                        return Some(ResetReason::Gap);
                    }
                }
                (top + paint_height > surface_height).then_some(ResetReason::Overflow)
            }
            ScanOrder::Upward => {
                if top < 0.0 {
                    return Some(ResetReason::NegativeTop);
                }
                let gap = first.is_some_and(|lane| !touches(lane.bottom(), surface_height));
                (self.require_contiguous && gap).then_some(ResetReason::Gap)
            }
        }
    }
}

fn touches(edge: f64, at: f64) -> bool {
    let d = edge - at;
    d <= EDGE_EPSILON && d >= -EDGE_EPSILON
}

/// Lane assignment state for one motion category.
#[derive(Clone, Debug)]
pub struct Retainer {
    policy: LanePolicy,
    lanes: LaneSet,
}

impl Retainer {
    /// Creates a retainer with an empty lane set.
    #[must_use]
    pub const fn new(policy: LanePolicy) -> Self {
        Self {
            policy,
            lanes: LaneSet::new(policy.lane_order()),
        }
    }

    /// Returns the placement policy.
    #[must_use]
    pub const fn policy(&self) -> LanePolicy {
        self.policy
    }

    /// Returns the current lane occupants.
    #[must_use]
    pub const fn lanes(&self) -> &LaneSet {
        &self.lanes
    }

    /// Discards every lane occupant. Returns how many there were.
    pub fn clear(&mut self) -> usize {
        let cleared = self.lanes.len();
        self.lanes.clear();
        cleared
    }

    /// Assigns or confirms the position of `id`. See [`fix_traced`](Self::fix_traced).
    pub fn fix<S, O>(&mut self, id: ItemId, items: &mut ItemStore, surface: &S, oracle: &O)
    where
        S: Surface + ?Sized,
        O: CollisionOracle + ?Sized,
    {
        self.fix_traced(id, items, surface, oracle, &mut Tracer::none());
    }

    /// Assigns or confirms the position of `id`, reporting to `tracer`.
    ///
    /// Items that are outside are skipped. Shown items keep their current
    /// origin. Everything else gets a lane and a committed `top`; the item's
    /// `left` is never changed here.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn fix_traced<S, O>(
        &mut self,
        id: ItemId,
        items: &mut ItemStore,
        surface: &S,
        oracle: &O,
        tracer: &mut Tracer<'_>,
    ) where
        S: Surface + ?Sized,
        O: CollisionOracle + ?Sized,
    {
        if items.is_outside(id) {
            return;
        }
        self.lanes.retain(|occupant| items.is_alive(occupant));
        let surface = surface.size();
        match self.policy.scan {
            ScanOrder::Downward => self.fix_downward(id, items, surface, oracle, tracer),
            ScanOrder::Upward => self.fix_upward(id, items, surface, oracle, tracer),
        }
    }

    fn fix_downward<O: CollisionOracle + ?Sized>(
        &mut self,
        id: ItemId,
        items: &mut ItemStore,
        surface: Size,
        oracle: &O,
        tracer: &mut Tracer<'_>,
    ) {
        let candidate = items.view(id);
        if items.is_shown(id) {
            self.commit(id, items, candidate.top(), PlacementOutcome::Kept, tracer);
            return;
        }

        let paint_height = candidate.paint_height();
        let now = items.now();

        let mut reentered = false;
        let mut overwrite = false;
        let mut free: Option<ItemView> = None;
        let mut first: Option<ItemView> = None;
        let mut last: Option<ItemView> = None;
        let mut min_right: Option<ItemView> = None;

        for occupant in self.lanes.items() {
            if occupant == id {
                reentered = true;
                last = None;
                break;
            }
            let lane = items.view(occupant);
            if first.is_none() {
                first = Some(lane);
            }
            if paint_height + lane.top() > surface.height {
                overwrite = true;
                break;
            }
            if min_right.is_none_or(|min| min.right() >= lane.right()) {
                min_right = Some(lane);
            }
            if !oracle.will_collide(surface, &lane, &candidate, candidate.duration, now) {
                free = Some(lane);
                break;
            }
            last = Some(lane);
        }

        let mut evict: Option<ItemView> = None;
        let (mut top, mut outcome) = if reentered {
            (candidate.top(), PlacementOutcome::Reentered)
        } else if let Some(free) = free {
            evict = Some(free);
            let top = last.map_or(free.top(), |last| last.bottom());
            (top, PlacementOutcome::ReusedLane)
        } else if overwrite {
            match min_right {
                Some(min) => {
                    // A narrower occupant would be overtaken; a wider one may
                    // keep sharing the lane.
                    if min.paint_width() < candidate.paint_width() {
                        evict = Some(min);
                    }
                    (min.top(), PlacementOutcome::Overwrote)
                }
                None => (0.0, PlacementOutcome::Overwrote),
            }
        } else if let Some(last) = last {
            (last.bottom(), PlacementOutcome::Stacked)
        } else if let Some(first) = first {
            evict = Some(first);
            (first.top(), PlacementOutcome::Displaced)
        } else {
            (0.0, PlacementOutcome::Origin)
        };

        if let Some(evicted) = evict {
            self.evict(&evicted, id, tracer);
        }

        let reason = self
            .policy
            .reset_reason(top, paint_height, surface.height, first.as_ref());
        if let Some(reason) = reason {
            top = self.policy.origin(surface.height, paint_height);
            outcome = PlacementOutcome::Origin;
            self.reset(id, items, reason, tracer);
        }

        self.commit(id, items, top, outcome, tracer);
    }

    fn fix_upward<O: CollisionOracle + ?Sized>(
        &mut self,
        id: ItemId,
        items: &mut ItemStore,
        surface: Size,
        oracle: &O,
        tracer: &mut Tracer<'_>,
    ) {
        let candidate = items.view(id);
        let paint_height = candidate.paint_height();
        let mut top = candidate.top();
        if top < 0.0 {
            top = self.policy.origin(surface.height, paint_height);
        }
        if items.is_shown(id) {
            self.commit(id, items, top, PlacementOutcome::Kept, tracer);
            return;
        }

        let now = items.now();
        let mut outcome = PlacementOutcome::Origin;
        let mut remove: Option<ItemView> = None;
        let mut first: Option<ItemView> = None;

        for occupant in self.lanes.items() {
            if occupant == id {
                remove = None;
                outcome = PlacementOutcome::Reentered;
                break;
            }
            let lane = items.view(occupant);
            if first.is_none() {
                first = Some(lane);
                if !touches(lane.bottom(), surface.height) {
                    break;
                }
            }
            if top < 0.0 {
                remove = None;
                break;
            }
            if !oracle.will_collide(surface, &lane, &candidate, candidate.duration, now) {
                remove = Some(lane);
                outcome = PlacementOutcome::ReusedLane;
                break;
            }
            top = lane.top() - paint_height;
            outcome = PlacementOutcome::Stacked;
        }

        let reason = self
            .policy
            .reset_reason(top, paint_height, surface.height, first.as_ref());
        if let Some(reason) = reason {
            top = self.policy.origin(surface.height, paint_height);
            outcome = PlacementOutcome::Origin;
            remove = None;
            self.reset(id, items, reason, tracer);
        }

        if let Some(removed) = remove {
            self.evict(&removed, id, tracer);
        }
        self.commit(id, items, top, outcome, tracer);
    }

    /// Lays the item out at `top` and makes sure it holds its lane.
    fn commit(
        &mut self,
        id: ItemId,
        items: &mut ItemStore,
        top: f64,
        outcome: PlacementOutcome,
        tracer: &mut Tracer<'_>,
    ) {
        let left = items.left(id);
        items.layout(id, left, top);
        if outcome != PlacementOutcome::Kept {
            self.lanes.insert(id, top);
        }
        tracer.placement(&PlacementEvent {
            item: id,
            category: items.category(id),
            left,
            top,
            lanes: self.lanes.len(),
            outcome,
        });
    }

    fn evict(&mut self, occupant: &ItemView, by: ItemId, tracer: &mut Tracer<'_>) {
        if self.lanes.remove(occupant.id) {
            tracer.eviction(&EvictionEvent {
                evicted: occupant.id,
                by,
                category: occupant.category,
                top: occupant.top(),
            });
        }
    }

    fn reset(
        &mut self,
        trigger: ItemId,
        items: &ItemStore,
        reason: ResetReason,
        tracer: &mut Tracer<'_>,
    ) {
        let cleared = self.clear();
        tracer.lane_reset(&LaneResetEvent {
            trigger,
            category: items.category(trigger),
            cleared,
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use kurbo::Size;

    use super::*;
    use crate::category::MotionCategory;
    use crate::item::ItemDesc;
    use crate::lane_set::Lane;
    use crate::oracle::TrajectoryOracle;
    use crate::time::{Duration, MediaTime};
    use crate::trace::PlacementCounts;

    const SURFACE: Size = Size::new(400.0, 100.0);

    fn always(_: Size, _: &ItemView, _: &ItemView, _: Duration, _: MediaTime) -> bool {
        true
    }

    fn never(_: Size, _: &ItemView, _: &ItemView, _: Duration, _: MediaTime) -> bool {
        false
    }

    fn item(items: &mut ItemStore, category: MotionCategory, width: f64, height: f64) -> ItemId {
        items.create_item(ItemDesc {
            category,
            size: Size::new(width, height),
            start: MediaTime(0),
            duration: Duration(4_000),
        })
    }

    fn lane_tops(retainer: &Retainer) -> Vec<f64> {
        retainer.lanes().iter().map(|lane| lane.top).collect()
    }

    // -- Downward (scrolling) --------------------------------------------

    #[test]
    fn empty_lanes_place_at_origin() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);

        retainer.fix(a, &mut items, &SURFACE, &always);

        assert_eq!(items.top(a), 0.0);
        assert!(items.is_shown(a));
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn colliding_item_stacks_below() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);

        retainer.fix(a, &mut items, &SURFACE, &always);
        retainer.fix(b, &mut items, &SURFACE, &always);

        assert_eq!(items.top(b), 20.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn free_first_lane_is_taken_over() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);

        retainer.fix(a, &mut items, &SURFACE, &always);
        retainer.fix(b, &mut items, &SURFACE, &never);

        assert_eq!(items.top(b), 0.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn free_lane_after_colliding_lane_is_reused_below_it() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        let c = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        retainer.fix(a, &mut items, &SURFACE, &always);
        retainer.fix(b, &mut items, &SURFACE, &always);

        // Only `a` still blocks.
        let blocks_a = move |_: Size, occupant: &ItemView, _: &ItemView, _: Duration, _: MediaTime| {
            occupant.id == a
        };
        retainer.fix(c, &mut items, &SURFACE, &blocks_a);

        assert_eq!(items.top(c), 20.0);
        assert!(!retainer.lanes().contains(b), "b was superseded");
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![a, c]);
    }

    /// Fills the 100-unit surface with five 20-unit lanes whose right edges
    /// are `rights[i]`.
    fn fill_five_lanes(
        items: &mut ItemStore,
        retainer: &mut Retainer,
        rights: [f64; 5],
    ) -> Vec<ItemId> {
        let mut placed = Vec::new();
        for right in rights {
            let id = item(items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
            items.layout(id, right - 50.0, -1.0);
            items.set_shown(id, false);
            retainer.fix(id, items, &SURFACE, &always);
            placed.push(id);
        }
        assert_eq!(lane_tops(retainer), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
        placed
    }

    #[test]
    fn equal_height_item_past_last_lane_resets() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        fill_five_lanes(
            &mut items,
            &mut retainer,
            [150.0, 160.0, 170.0, 180.0, 190.0],
        );

        // Fits at every existing lane's top, so it stacks at 100 and trips
        // the edge check instead of overwriting.
        let f = item(&mut items, MotionCategory::ScrollRightToLeft, 80.0, 20.0);
        retainer.fix(f, &mut items, &SURFACE, &always);

        assert_eq!(items.top(f), 0.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![f]);
    }

    #[test]
    fn overflow_evicts_narrower_min_right_lane() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let placed = fill_five_lanes(
            &mut items,
            &mut retainer,
            [150.0, 160.0, 170.0, 180.0, 190.0],
        );

        // Too tall for the lane at 80. Lane 0 ends first and is narrower.
        let f = item(&mut items, MotionCategory::ScrollRightToLeft, 80.0, 30.0);
        retainer.fix(f, &mut items, &SURFACE, &always);

        assert_eq!(items.top(f), 0.0);
        assert!(!retainer.lanes().contains(placed[0]));
        assert!(retainer.lanes().contains(f));
        assert_eq!(retainer.lanes().len(), 5);
    }

    #[test]
    fn overflow_tolerates_wider_min_right_lane() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let placed = fill_five_lanes(
            &mut items,
            &mut retainer,
            [250.0, 240.0, 230.0, 220.0, 210.0],
        );

        // Lane 80 is never visited past the height check, so lane 60 ends
        // first among the candidates. It is as wide as the newcomer: both
        // share it without another collision check.
        let f = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 30.0);
        retainer.fix(f, &mut items, &SURFACE, &always);

        assert_eq!(items.top(f), 60.0);
        assert!(retainer.lanes().contains(placed[3]));
        assert!(retainer.lanes().contains(f));
        assert_eq!(retainer.lanes().len(), 6);
        assert_eq!(
            lane_tops(&retainer),
            vec![0.0, 20.0, 40.0, 60.0, 60.0, 80.0]
        );
    }

    #[test]
    fn overflow_on_first_lane_without_candidates_resets() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        retainer.fix(a, &mut items, &SURFACE, &always);

        let tall = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 120.0);
        retainer.fix(tall, &mut items, &SURFACE, &always);

        assert_eq!(items.top(tall), 0.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![tall]);
    }

    #[test]
    fn shown_item_keeps_position() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        retainer.fix(a, &mut items, &SURFACE, &always);
        retainer.fix(b, &mut items, &SURFACE, &always);

        let before = items.origin(b);
        retainer.fix(b, &mut items, &SURFACE, &never);
        retainer.fix(b, &mut items, &SURFACE, &never);

        assert_eq!(items.origin(b), before);
        assert_eq!(retainer.lanes().len(), 2);
    }

    #[test]
    fn reentering_member_keeps_its_lane() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        retainer.fix(a, &mut items, &SURFACE, &always);
        retainer.fix(b, &mut items, &SURFACE, &always);

        // New visibility session for `b` while it still holds its lane.
        items.set_shown(b, false);
        retainer.fix(b, &mut items, &SURFACE, &always);

        assert_eq!(items.top(b), 20.0);
        assert!(items.is_shown(b));
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn gap_from_origin_resets_scroll_lanes() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let stale = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        let other = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        items.layout(stale, 0.0, 5.0);
        retainer.lanes.insert(stale, 5.0);
        items.layout(other, 0.0, 25.0);
        retainer.lanes.insert(other, 25.0);

        let c = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        retainer.fix(c, &mut items, &SURFACE, &always);

        assert_eq!(items.top(c), 0.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn fixed_top_tolerates_gap_from_origin() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_TOP);
        let a = item(&mut items, MotionCategory::FixedTop, 50.0, 20.0);
        items.layout(a, 0.0, 5.0);
        retainer.lanes.insert(a, 5.0);

        let b = item(&mut items, MotionCategory::FixedTop, 50.0, 20.0);
        retainer.fix(b, &mut items, &SURFACE, &always);

        assert_eq!(items.top(b), 25.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn fixed_top_overflow_resets() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_TOP);
        let a = item(&mut items, MotionCategory::FixedTop, 50.0, 20.0);
        retainer.fix(a, &mut items, &SURFACE, &always);
        let b = item(&mut items, MotionCategory::FixedTop, 50.0, 90.0);
        retainer.fix(b, &mut items, &SURFACE, &always);

        assert_eq!(items.top(b), 0.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn destroyed_occupants_are_pruned() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        retainer.fix(a, &mut items, &SURFACE, &always);
        retainer.fix(b, &mut items, &SURFACE, &always);
        items.destroy_item(b);

        let c = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        retainer.fix(c, &mut items, &SURFACE, &always);

        assert_eq!(items.top(c), 20.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn outside_items_are_skipped() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        items.set_outside(a, true);

        retainer.fix(a, &mut items, &SURFACE, &always);

        assert!(!items.is_shown(a));
        assert!(retainer.lanes().is_empty());
    }

    #[test]
    fn scroll_lanes_stay_collision_free() {
        // Items arrive every 300ms in four widths; the stock oracle decides
        // who collides. Every lane above the new item must collide with it,
        // and the lane it lands in must not.
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let surface = Size::new(400.0, 200.0);
        let oracle = TrajectoryOracle;
        let (mut stacked, mut reused) = (0, 0);
        for i in 0..24_i32 {
            let now = MediaTime(i64::from(i) * 300);
            items.set_now(now);
            let id = items.create_item(ItemDesc {
                category: MotionCategory::ScrollRightToLeft,
                size: Size::new(60.0 + f64::from(i % 4) * 30.0, 20.0),
                start: now,
                duration: Duration(4_000),
            });
            items.advance(id, &surface);
            let before: Vec<Lane> = retainer.lanes().iter().collect();
            retainer.fix(id, &mut items, &surface, &oracle);

            let top = items.top(id);
            let candidate = items.view(id);
            let collides = |occupant: ItemId| {
                oracle.will_collide(
                    surface,
                    &items.view(occupant),
                    &candidate,
                    candidate.duration,
                    now,
                )
            };
            for lane in &before {
                if lane.top < top {
                    assert!(
                        collides(lane.item),
                        "{id:?} skipped free lane {} held by {:?}",
                        lane.top,
                        lane.item
                    );
                } else if lane.top == top {
                    assert!(
                        !collides(lane.item),
                        "{id:?} shares lane {top} with {:?}",
                        lane.item
                    );
                    assert!(!retainer.lanes().contains(lane.item));
                }
            }
            if before.iter().any(|lane| lane.top == top) {
                reused += 1;
            } else if !before.is_empty() {
                let below_last = before.last().map_or(0.0, |lane| lane.top + 20.0);
                assert_eq!(top, below_last, "{id:?} left a gap");
                stacked += 1;
            }

            let tops = lane_tops(&retainer);
            assert!(
                tops.windows(2).all(|pair| pair[0] < pair[1]),
                "two members share a lane: {tops:?}"
            );
        }
        // Four lanes fill up, after which every arrival finds one free again.
        assert_eq!((stacked, reused), (3, 20));
        assert_eq!(lane_tops(&retainer), vec![0.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn both_scroll_directions_place_identically() {
        let mut tops = Vec::new();
        for category in [
            MotionCategory::ScrollRightToLeft,
            MotionCategory::ScrollLeftToRight,
        ] {
            let mut items = ItemStore::new();
            let mut retainer = Retainer::new(LanePolicy::SCROLL);
            let mut run = Vec::new();
            for _ in 0..7 {
                let id = item(&mut items, category, 50.0, 20.0);
                retainer.fix(id, &mut items, &SURFACE, &always);
                run.push(items.top(id));
            }
            tops.push(run);
        }
        assert_eq!(tops[0], tops[1]);
    }

    // -- Upward (fixed bottom) -------------------------------------------

    #[test]
    fn bottom_empty_lanes_place_flush_with_bottom() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_BOTTOM);
        let a = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);

        retainer.fix(a, &mut items, &SURFACE, &always);

        assert_eq!(items.top(a), 80.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn bottom_colliding_items_climb() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_BOTTOM);
        let a = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        let c = item(&mut items, MotionCategory::FixedBottom, 50.0, 30.0);

        retainer.fix(a, &mut items, &SURFACE, &always);
        retainer.fix(b, &mut items, &SURFACE, &always);
        retainer.fix(c, &mut items, &SURFACE, &always);

        assert_eq!(items.top(b), 60.0);
        assert_eq!(items.top(c), 30.0);
        assert_eq!(lane_tops(&retainer), vec![80.0, 60.0, 30.0]);
    }

    #[test]
    fn bottom_free_lane_is_taken_over() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_BOTTOM);
        let a = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        let c = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        retainer.fix(a, &mut items, &SURFACE, &always);
        retainer.fix(b, &mut items, &SURFACE, &always);

        let blocks_a = move |_: Size, occupant: &ItemView, _: &ItemView, _: Duration, _: MediaTime| {
            occupant.id == a
        };
        retainer.fix(c, &mut items, &SURFACE, &blocks_a);

        assert_eq!(items.top(c), 60.0);
        assert!(!retainer.lanes().contains(b));
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn bottom_free_first_lane_is_taken_over() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_BOTTOM);
        let a = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        retainer.fix(a, &mut items, &SURFACE, &never);
        retainer.fix(b, &mut items, &SURFACE, &never);

        assert_eq!(items.top(a), 80.0);
        assert_eq!(items.top(b), 80.0);
        assert!(!retainer.lanes().contains(a));
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn bottom_climb_stops_once_above_the_surface() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_BOTTOM);
        let a = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::FixedBottom, 50.0, 60.0);
        let d = item(&mut items, MotionCategory::FixedBottom, 50.0, 10.0);
        for id in [a, b, d] {
            retainer.fix(id, &mut items, &SURFACE, &always);
        }
        assert_eq!(lane_tops(&retainer), vec![80.0, 20.0, 10.0]);

        // Climbing over b leaves c at -10, so d's lane is never looked at.
        let consulted = Cell::new(false);
        let watch_d = |_: Size, occupant: &ItemView, _: &ItemView, _: Duration, _: MediaTime| {
            if occupant.id == d {
                consulted.set(true);
            }
            true
        };
        let c = item(&mut items, MotionCategory::FixedBottom, 50.0, 30.0);
        retainer.fix(c, &mut items, &SURFACE, &watch_d);

        assert!(!consulted.get());
        assert_eq!(items.top(c), 70.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn bottom_running_out_of_room_resets() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_BOTTOM);
        let mut last = None;
        for _ in 0..5 {
            let id = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
            retainer.fix(id, &mut items, &SURFACE, &always);
            last = Some(id);
        }
        assert_eq!(last.map(|id| items.top(id)), Some(0.0));
        assert_eq!(retainer.lanes().len(), 5);

        let f = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        retainer.fix(f, &mut items, &SURFACE, &always);

        assert_eq!(items.top(f), 80.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![f]);
    }

    #[test]
    fn bottom_gap_resets() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_BOTTOM);
        let a = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        items.layout(a, 0.0, 70.0);
        retainer.lanes.insert(a, 70.0);

        let b = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        retainer.fix(b, &mut items, &SURFACE, &always);

        assert_eq!(items.top(b), 80.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn bottom_reentering_member_keeps_its_lane() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_BOTTOM);
        let a = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.0);
        retainer.fix(a, &mut items, &SURFACE, &always);
        retainer.fix(b, &mut items, &SURFACE, &always);

        items.set_shown(b, false);
        retainer.fix(b, &mut items, &SURFACE, &always);

        assert_eq!(items.top(b), 60.0);
        assert_eq!(retainer.lanes().items().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn fractional_heights_still_read_as_flush() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::FIXED_BOTTOM);
        let surface = Size::new(400.0, 100.3);
        let a = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.1);
        let b = item(&mut items, MotionCategory::FixedBottom, 50.0, 20.1);
        retainer.fix(a, &mut items, &surface, &always);
        retainer.fix(b, &mut items, &surface, &always);

        assert_eq!(retainer.lanes().len(), 2);
        assert!(items.top(b) < items.top(a));
    }

    // -- Policy ------------------------------------------------------------

    #[test]
    fn policy_origins() {
        assert_eq!(LanePolicy::SCROLL.origin(100.0, 20.0), 0.0);
        assert_eq!(LanePolicy::FIXED_TOP.origin(100.0, 20.0), 0.0);
        assert_eq!(LanePolicy::FIXED_BOTTOM.origin(100.0, 20.0), 80.0);
        assert_eq!(LanePolicy::FIXED_BOTTOM.lane_order(), LaneOrder::TopDescending);
        assert_eq!(LanePolicy::SCROLL.lane_order(), LaneOrder::TopAscending);
    }

    #[test]
    fn reset_reasons_by_policy() {
        let scroll = LanePolicy::SCROLL;
        assert_eq!(
            scroll.reset_reason(-1.0, 20.0, 100.0, None),
            Some(ResetReason::NegativeTop)
        );
        assert_eq!(
            scroll.reset_reason(90.0, 20.0, 100.0, None),
            Some(ResetReason::Overflow)
        );
        assert_eq!(scroll.reset_reason(80.0, 20.0, 100.0, None), None);
        assert_eq!(LanePolicy::FIXED_TOP.reset_reason(-1.0, 20.0, 100.0, None), None);
        assert_eq!(
            LanePolicy::FIXED_BOTTOM.reset_reason(-0.5, 20.0, 100.0, None),
            Some(ResetReason::NegativeTop)
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn traced_fix_reports_outcomes() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let mut counts = PlacementCounts::default();
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        let b = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        let c = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        {
            let mut tracer = Tracer::new(&mut counts);
            retainer.fix_traced(a, &mut items, &SURFACE, &always, &mut tracer);
            retainer.fix_traced(b, &mut items, &SURFACE, &always, &mut tracer);
            retainer.fix_traced(c, &mut items, &SURFACE, &never, &mut tracer);
            retainer.fix_traced(c, &mut items, &SURFACE, &never, &mut tracer);
        }
        assert_eq!(counts.placed(PlacementOutcome::Origin), 1);
        assert_eq!(counts.placed(PlacementOutcome::Stacked), 1);
        assert_eq!(counts.placed(PlacementOutcome::ReusedLane), 1);
        assert_eq!(counts.placed(PlacementOutcome::Kept), 1);
        assert_eq!(counts.evictions, 1);
    }

    #[cfg(not(feature = "trace"))]
    #[test]
    fn untraced_fix_reports_nothing() {
        let mut items = ItemStore::new();
        let mut retainer = Retainer::new(LanePolicy::SCROLL);
        let mut counts = PlacementCounts::default();
        let a = item(&mut items, MotionCategory::ScrollRightToLeft, 50.0, 20.0);
        retainer.fix_traced(a, &mut items, &SURFACE, &always, &mut Tracer::new(&mut counts));
        assert_eq!(counts, PlacementCounts::default());
    }
}
