// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays item storage with allocation, timing, and layout state.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::category::MotionCategory;
use crate::surface::Surface;
use crate::time::{Duration, MediaTime};
use crate::trajectory;

use super::id::ItemId;
use super::view::ItemView;

/// `top` of an item that has never been laid out.
pub const UNPLACED_TOP: f64 = -1.0;

/// Everything needed to create an item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemDesc {
    /// Motion category.
    pub category: MotionCategory,
    /// Measured paint size.
    pub size: Size,
    /// When the item becomes due on the timeline.
    pub start: MediaTime,
    /// Planned visible lifetime.
    pub duration: Duration,
}

/// Per-item visibility flags.
///
/// [`shown`](Self::shown) is set by [`ItemStore::layout`] and cleared by the
/// caller when a new visibility session starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemFlags {
    /// A position has been committed for the current visibility session.
    pub shown: bool,
    /// The item is not eligible for display; placement skips it.
    pub outside: bool,
}

/// Struct-of-arrays storage for all overlay items.
///
/// Items are addressed by [`ItemId`] handles. Destroyed items are recycled via
/// a free list, and generation counters prevent stale handle access. The store
/// also carries the shared playback timer that collision checks are measured
/// against.
#[derive(Debug)]
pub struct ItemStore {
    // -- Properties (set by callers) --
    pub(crate) category: Vec<MotionCategory>,
    pub(crate) size: Vec<Size>,
    pub(crate) start: Vec<MediaTime>,
    pub(crate) duration: Vec<Duration>,
    pub(crate) flags: Vec<ItemFlags>,

    // -- Layout (written by placement) --
    pub(crate) origin: Vec<Point>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Timer --
    pub(crate) now: MediaTime,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    /// Creates an empty item store with the timer at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            category: Vec::new(),
            size: Vec::new(),
            start: Vec::new(),
            duration: Vec::new(),
            flags: Vec::new(),
            origin: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            now: MediaTime::default(),
        }
    }

    // -- Allocation API --

    /// Creates a new item and returns its handle.
    ///
    /// The item starts unplaced (`top` is [`UNPLACED_TOP`]), not shown, and
    /// not outside.
    pub fn create_item(&mut self, desc: ItemDesc) -> ItemId {
        let origin = Point::new(0.0, UNPLACED_TOP);
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.category[i] = desc.category;
            self.size[i] = desc.size;
            self.start[i] = desc.start;
            self.duration[i] = desc.duration;
            self.flags[i] = ItemFlags::default();
            self.origin[i] = origin;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.category.push(desc.category);
            self.size.push(desc.size);
            self.start.push(desc.start);
            self.duration.push(desc.duration);
            self.flags.push(ItemFlags::default());
            self.origin.push(origin);
            self.generation.push(0);
            idx
        };

        ItemId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys an item, freeing its slot for reuse.
    ///
    /// Lane sets still holding the handle drop it on their next scan.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_item(&mut self, id: ItemId) {
        self.validate(id);
        // Bump generation so old handles immediately fail validation.
        self.generation[id.idx as usize] += 1;
        self.free_list.push(id.idx);
    }

    /// Returns whether the given handle refers to a live item.
    #[must_use]
    pub fn is_alive(&self, id: ItemId) -> bool {
        id.idx < self.len && self.generation[id.idx as usize] == id.generation
    }

    /// Number of live items.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Timer --

    /// The shared playback time that collision checks are measured from.
    #[must_use]
    pub fn now(&self) -> MediaTime {
        self.now
    }

    /// Moves the shared playback timer.
    pub fn set_now(&mut self, now: MediaTime) {
        self.now = now;
    }

    // -- Property getters --

    /// Returns the motion category of an item.
    #[must_use]
    pub fn category(&self, id: ItemId) -> MotionCategory {
        self.validate(id);
        self.category[id.idx as usize]
    }

    /// Returns the measured paint size of an item.
    #[must_use]
    pub fn size(&self, id: ItemId) -> Size {
        self.validate(id);
        self.size[id.idx as usize]
    }

    /// Returns the paint width of an item.
    #[must_use]
    pub fn paint_width(&self, id: ItemId) -> f64 {
        self.size(id).width
    }

    /// Returns the paint height of an item.
    #[must_use]
    pub fn paint_height(&self, id: ItemId) -> f64 {
        self.size(id).height
    }

    /// Returns when an item becomes due.
    #[must_use]
    pub fn start(&self, id: ItemId) -> MediaTime {
        self.validate(id);
        self.start[id.idx as usize]
    }

    /// Returns the planned visible lifetime of an item.
    #[must_use]
    pub fn duration(&self, id: ItemId) -> Duration {
        self.validate(id);
        self.duration[id.idx as usize]
    }

    /// Returns the flags of an item.
    #[must_use]
    pub fn flags(&self, id: ItemId) -> ItemFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns whether a position has been committed in this session.
    #[must_use]
    pub fn is_shown(&self, id: ItemId) -> bool {
        self.flags(id).shown
    }

    /// Returns whether the item is ineligible for display.
    #[must_use]
    pub fn is_outside(&self, id: ItemId) -> bool {
        self.flags(id).outside
    }

    /// Returns the committed layout origin (`left`, `top`).
    #[must_use]
    pub fn origin(&self, id: ItemId) -> Point {
        self.validate(id);
        self.origin[id.idx as usize]
    }

    /// Left edge.
    #[must_use]
    pub fn left(&self, id: ItemId) -> f64 {
        self.origin(id).x
    }

    /// Top edge.
    #[must_use]
    pub fn top(&self, id: ItemId) -> f64 {
        self.origin(id).y
    }

    /// Right edge, `left + paint_width`.
    #[must_use]
    pub fn right(&self, id: ItemId) -> f64 {
        self.bounds(id).x1
    }

    /// Bottom edge, `top + paint_height`.
    #[must_use]
    pub fn bottom(&self, id: ItemId) -> f64 {
        self.bounds(id).y1
    }

    /// Committed layout rectangle.
    #[must_use]
    pub fn bounds(&self, id: ItemId) -> Rect {
        self.validate(id);
        let i = id.idx as usize;
        Rect::from_origin_size(self.origin[i], self.size[i])
    }

    /// Returns `true` once the shared timer is at or past the item's end.
    #[must_use]
    pub fn is_timed_out(&self, id: ItemId) -> bool {
        self.view(id).is_timed_out(self.now)
    }

    /// Takes a read-only snapshot of an item.
    #[must_use]
    pub fn view(&self, id: ItemId) -> ItemView {
        self.validate(id);
        let i = id.idx as usize;
        ItemView {
            id,
            category: self.category[i],
            bounds: Rect::from_origin_size(self.origin[i], self.size[i]),
            start: self.start[i],
            duration: self.duration[i],
            outside: self.flags[i].outside,
        }
    }

    // -- Mutation API --

    /// Replaces the measured paint size, e.g. after re-measuring text.
    pub fn set_size(&mut self, id: ItemId, size: Size) {
        self.validate(id);
        self.size[id.idx as usize] = size;
    }

    /// Marks the item shown or starts a new visibility session.
    pub fn set_shown(&mut self, id: ItemId, shown: bool) {
        self.validate(id);
        self.flags[id.idx as usize].shown = shown;
    }

    /// Marks the item ineligible (or eligible again) for display.
    pub fn set_outside(&mut self, id: ItemId, outside: bool) {
        self.validate(id);
        self.flags[id.idx as usize].outside = outside;
    }

    /// Commits a layout origin and marks the item shown.
    pub fn layout(&mut self, id: ItemId, left: f64, top: f64) {
        self.validate(id);
        let i = id.idx as usize;
        self.origin[i] = Point::new(left, top);
        self.flags[i].shown = true;
    }

    /// Moves the item's left edge along its trajectory to the shared timer.
    ///
    /// Returns the new left edge, or `None` (leaving the item untouched) for
    /// categories without a trajectory.
    pub fn advance(&mut self, id: ItemId, surface: &impl Surface) -> Option<f64> {
        self.validate(id);
        let i = id.idx as usize;
        let left = trajectory::left_at(
            self.category[i],
            surface.width(),
            self.size[i].width,
            self.start[i],
            self.duration[i],
            self.now,
        )?;
        self.origin[i].x = left;
        Some(left)
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: ItemId) {
        assert!(
            self.is_alive(id),
            "stale ItemId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(category: MotionCategory) -> ItemDesc {
        ItemDesc {
            category,
            size: Size::new(80.0, 20.0),
            start: MediaTime(1_000),
            duration: Duration(4_000),
        }
    }

    #[test]
    fn create_and_destroy() {
        let mut store = ItemStore::new();
        let id = store.create_item(desc(MotionCategory::ScrollRightToLeft));
        assert!(store.is_alive(id));
        assert_eq!(store.live_count(), 1);
        store.destroy_item(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = ItemStore::new();
        let id1 = store.create_item(desc(MotionCategory::FixedTop));
        store.destroy_item(id1);
        let id2 = store.create_item(desc(MotionCategory::FixedBottom));
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
        assert_eq!(store.category(id2), MotionCategory::FixedBottom);
    }

    #[test]
    fn new_items_are_unplaced() {
        let mut store = ItemStore::new();
        let id = store.create_item(desc(MotionCategory::ScrollRightToLeft));
        assert_eq!(store.top(id), UNPLACED_TOP);
        assert!(!store.is_shown(id));
        assert!(!store.is_outside(id));
    }

    #[test]
    fn reused_slot_is_reset() {
        let mut store = ItemStore::new();
        let id1 = store.create_item(desc(MotionCategory::ScrollRightToLeft));
        store.layout(id1, 10.0, 40.0);
        store.set_outside(id1, true);
        store.destroy_item(id1);

        let id2 = store.create_item(desc(MotionCategory::ScrollRightToLeft));
        assert_eq!(store.top(id2), UNPLACED_TOP);
        assert_eq!(store.flags(id2), ItemFlags::default());
    }

    #[test]
    fn layout_commits_origin_and_marks_shown() {
        let mut store = ItemStore::new();
        let id = store.create_item(desc(MotionCategory::FixedTop));
        store.layout(id, 5.0, 30.0);
        assert!(store.is_shown(id));
        assert_eq!(store.bounds(id), Rect::new(5.0, 30.0, 85.0, 50.0));
        assert_eq!(store.right(id), 85.0);
        assert_eq!(store.bottom(id), 50.0);
    }

    #[test]
    fn set_size_remeasures_committed_bounds() {
        let mut store = ItemStore::new();
        let id = store.create_item(desc(MotionCategory::FixedTop));
        store.layout(id, 5.0, 30.0);
        store.set_size(id, Size::new(120.0, 30.0));
        assert_eq!(store.size(id), Size::new(120.0, 30.0));
        assert_eq!(store.paint_width(id), 120.0);
        assert_eq!(store.paint_height(id), 30.0);
        // The committed origin is untouched.
        assert_eq!(store.bounds(id), Rect::new(5.0, 30.0, 125.0, 60.0));
        assert_eq!(store.view(id).bottom(), 60.0);
    }

    #[test]
    fn view_matches_store() {
        let mut store = ItemStore::new();
        let id = store.create_item(desc(MotionCategory::ScrollLeftToRight));
        store.layout(id, -80.0, 20.0);
        store.set_outside(id, true);
        let view = store.view(id);
        assert_eq!(view.id, id);
        assert_eq!(view.category, MotionCategory::ScrollLeftToRight);
        assert_eq!(view.top(), 20.0);
        assert_eq!(view.bottom(), 40.0);
        assert_eq!(view.paint_width(), 80.0);
        assert!(view.outside);
        assert_eq!(view.end(), MediaTime(5_000));
    }

    #[test]
    fn timeout_follows_shared_timer() {
        let mut store = ItemStore::new();
        let id = store.create_item(desc(MotionCategory::FixedBottom));
        store.set_now(MediaTime(4_999));
        assert!(!store.is_timed_out(id));
        store.set_now(MediaTime(5_000));
        assert!(store.is_timed_out(id));
    }

    #[test]
    fn advance_moves_scrolling_items_only() {
        let surface = Size::new(400.0, 300.0);
        let mut store = ItemStore::new();
        let scroll = store.create_item(desc(MotionCategory::ScrollRightToLeft));
        let special = store.create_item(desc(MotionCategory::Special));

        store.set_now(MediaTime(1_000));
        assert_eq!(store.advance(scroll, &surface), Some(400.0));
        assert_eq!(store.left(scroll), 400.0);
        assert_eq!(store.advance(special, &surface), None);
        assert_eq!(store.left(special), 0.0);
    }

    #[test]
    #[should_panic(expected = "stale ItemId")]
    fn destroyed_handle_panics_on_top() {
        let mut store = ItemStore::new();
        let id = store.create_item(desc(MotionCategory::FixedTop));
        store.destroy_item(id);
        let _ = store.top(id);
    }

    #[test]
    #[should_panic(expected = "stale ItemId")]
    fn destroyed_handle_panics_on_layout() {
        let mut store = ItemStore::new();
        let id = store.create_item(desc(MotionCategory::FixedTop));
        store.destroy_item(id);
        store.layout(id, 0.0, 0.0);
    }
}
