// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered set of items currently holding a lane.
//!
//! A [`LaneSet`] keys each member by the `top` it was committed at and keeps
//! members sorted by that key, ascending or descending depending on which
//! edge the category stacks from. Members with equal keys keep insertion
//! order, so two items sharing a lane are visited oldest first.

use alloc::vec::Vec;

use crate::item::ItemId;

/// Sort direction of a [`LaneSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneOrder {
    /// Smallest `top` first; used by categories stacking down from the top.
    TopAscending,
    /// Largest `top` first; used by categories stacking up from the bottom.
    TopDescending,
}

/// One occupied lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lane {
    /// The occupant.
    pub item: ItemId,
    /// `top` the occupant was committed at.
    pub top: f64,
}

/// Ordered container of lane occupants for one category.
#[derive(Clone, Debug)]
pub struct LaneSet {
    order: LaneOrder,
    lanes: Vec<Lane>,
}

impl LaneSet {
    /// Creates an empty set with the given ordering.
    #[must_use]
    pub const fn new(order: LaneOrder) -> Self {
        Self {
            order,
            lanes: Vec::new(),
        }
    }

    /// Returns the ordering of this set.
    #[must_use]
    pub const fn order(&self) -> LaneOrder {
        self.order
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Returns `true` if no lane is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Returns whether `item` is a member.
    #[must_use]
    pub fn contains(&self, item: ItemId) -> bool {
        self.position(item).is_some()
    }

    /// Returns the first lane in scan order.
    #[must_use]
    pub fn first(&self) -> Option<Lane> {
        self.lanes.first().copied()
    }

    /// Iterates over the lanes in scan order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Lane> + '_ {
        self.lanes.iter().copied()
    }

    /// Iterates over the members in scan order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = ItemId> + '_ {
        self.lanes.iter().map(|lane| lane.item)
    }

    /// Inserts `item` keyed by `top`.
    ///
    /// An existing member is moved to its new key instead of being added
    /// twice. Returns `true` if `item` was not a member before.
    pub fn insert(&mut self, item: ItemId, top: f64) -> bool {
        let existed = match self.position(item) {
            Some(pos) => {
                self.lanes.remove(pos);
                true
            }
            None => false,
        };
        let at = match self.order {
            LaneOrder::TopAscending => self.lanes.partition_point(|lane| lane.top <= top),
            LaneOrder::TopDescending => self.lanes.partition_point(|lane| lane.top >= top),
        };
        self.lanes.insert(at, Lane { item, top });
        !existed
    }

    /// Removes `item`. Removing a non-member is a no-op returning `false`.
    pub fn remove(&mut self, item: ItemId) -> bool {
        match self.position(item) {
            Some(pos) => {
                self.lanes.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Keeps only the members for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(ItemId) -> bool) {
        self.lanes.retain(|lane| keep(lane.item));
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.lanes.clear();
    }

    fn position(&self, item: ItemId) -> Option<usize> {
        self.lanes.iter().position(|lane| lane.item == item)
    }
}
