// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing of items to per-category retainers.
//!
//! A [`Dispatcher`] owns one lazily created [`Retainer`] per laned category
//! and is meant to live as long as the rendering session that owns it. There
//! is no global state: two dispatchers never share lanes.
//!
//! Categories are routed as follows:
//!
//! | Category            | Handling                                  |
//! |---------------------|-------------------------------------------|
//! | `ScrollRightToLeft` | own retainer, [`DispatcherConfig::scroll`] |
//! | `ScrollLeftToRight` | own retainer, [`DispatcherConfig::scroll`] |
//! | `FixedTop`          | [`DispatcherConfig::fixed_top`]            |
//! | `FixedBottom`       | [`DispatcherConfig::fixed_bottom`]         |
//! | `Special`           | laid out at `(0, 0)`, no lanes             |
//! | `Other`             | ignored                                   |

use crate::category::MotionCategory;
use crate::item::{ItemId, ItemStore};
use crate::oracle::CollisionOracle;
use crate::retainer::{LanePolicy, Retainer};
use crate::surface::Surface;
use crate::trace::{LanesClearedEvent, PlacementEvent, PlacementOutcome, Tracer};

/// Lane policy per laned category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Policy shared by both scrolling directions. Each direction still gets
    /// its own retainer.
    pub scroll: LanePolicy,
    /// Policy for top-anchored items.
    pub fixed_top: LanePolicy,
    /// Policy for bottom-anchored items.
    pub fixed_bottom: LanePolicy,
}

impl DispatcherConfig {
    /// The stock configuration.
    pub const STANDARD: Self = Self {
        scroll: LanePolicy::SCROLL,
        fixed_top: LanePolicy::FIXED_TOP,
        fixed_bottom: LanePolicy::FIXED_BOTTOM,
    };

    /// Returns the policy for `category`, or `None` if it is not laned.
    #[must_use]
    pub const fn policy_for(&self, category: MotionCategory) -> Option<LanePolicy> {
        match category {
            MotionCategory::ScrollRightToLeft | MotionCategory::ScrollLeftToRight => {
                Some(self.scroll)
            }
            MotionCategory::FixedTop => Some(self.fixed_top),
            MotionCategory::FixedBottom => Some(self.fixed_bottom),
            MotionCategory::Special | MotionCategory::Other => None,
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Entry point for placing items, one retainer per laned category.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    config: DispatcherConfig,
    retainers: [Option<Retainer>; MotionCategory::LANED],
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Creates a dispatcher with [`DispatcherConfig::STANDARD`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(DispatcherConfig::STANDARD)
    }

    /// Creates a dispatcher with the given policies.
    #[must_use]
    pub const fn with_config(config: DispatcherConfig) -> Self {
        Self {
            config,
            retainers: [None, None, None, None],
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    // -- Placement ----------------------------------------------------------

    /// Places one item. See [`fix_traced`](Self::fix_traced).
    pub fn fix<S, O>(&mut self, id: ItemId, items: &mut ItemStore, surface: &S, oracle: &O)
    where
        S: Surface + ?Sized,
        O: CollisionOracle + ?Sized,
    {
        self.fix_traced(id, items, surface, oracle, &mut Tracer::none());
    }

    /// Places one item, reporting to `tracer`.
    ///
    /// Outside items and [`MotionCategory::Other`] are left untouched.
    /// [`MotionCategory::Special`] items are laid out at the surface origin.
    /// Everything else is handed to the category's retainer, which is created
    /// on first use.
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
        let category = items.category(id);
        match category {
            MotionCategory::Special => {
                items.layout(id, 0.0, 0.0);
                tracer.placement(&PlacementEvent {
                    item: id,
                    category,
                    left: 0.0,
                    top: 0.0,
                    lanes: 0,
                    outcome: PlacementOutcome::Special,
                });
            }
            MotionCategory::Other => {}
            MotionCategory::ScrollRightToLeft
            | MotionCategory::ScrollLeftToRight
            | MotionCategory::FixedTop
            | MotionCategory::FixedBottom => {
                if let Some(retainer) = self.retainer_mut(category) {
                    retainer.fix_traced(id, items, surface, oracle, tracer);
                }
            }
        }
    }

    /// Places every item of a frame, in order.
    pub fn fix_all<I, S, O>(&mut self, ids: I, items: &mut ItemStore, surface: &S, oracle: &O)
    where
        I: IntoIterator<Item = ItemId>,
        S: Surface + ?Sized,
        O: CollisionOracle + ?Sized,
    {
        self.fix_all_traced(ids, items, surface, oracle, &mut Tracer::none());
    }

    /// Places every item of a frame, in order, reporting to `tracer`.
    pub fn fix_all_traced<I, S, O>(
        &mut self,
        ids: I,
        items: &mut ItemStore,
        surface: &S,
        oracle: &O,
        tracer: &mut Tracer<'_>,
    ) where
        I: IntoIterator<Item = ItemId>,
        S: Surface + ?Sized,
        O: CollisionOracle + ?Sized,
    {
        for id in ids {
            self.fix_traced(id, items, surface, oracle, tracer);
        }
    }

    // -- Lifecycle ------------------------------------------------------------

    /// Empties every instantiated retainer's lanes.
    pub fn clear(&mut self) {
        self.clear_traced(&mut Tracer::none());
    }

    /// Empties every instantiated retainer's lanes, reporting to `tracer`.
    pub fn clear_traced(&mut self, tracer: &mut Tracer<'_>) {
        self.drain(false, tracer);
    }

    /// Clears and then drops every retainer. The next placement in a
    /// category starts from a fresh retainer.
    pub fn release(&mut self) {
        self.release_traced(&mut Tracer::none());
    }

    /// Like [`release`](Self::release), reporting to `tracer`.
    pub fn release_traced(&mut self, tracer: &mut Tracer<'_>) {
        self.drain(true, tracer);
    }

    fn drain(&mut self, release: bool, tracer: &mut Tracer<'_>) {
        for (slot, entry) in self.retainers.iter_mut().enumerate() {
            let Some(retainer) = entry else {
                continue;
            };
            let cleared = retainer.clear();
            if let Some(category) = MotionCategory::from_lane_slot(slot) {
                tracer.lanes_cleared(&LanesClearedEvent {
                    category,
                    cleared,
                    released: release,
                });
            }
            if release {
                *entry = None;
            }
        }
    }

    // -- Inspection -----------------------------------------------------------

    /// Returns the retainer of `category` if it has been created.
    #[must_use]
    pub fn retainer(&self, category: MotionCategory) -> Option<&Retainer> {
        self.retainers[category.lane_slot()?].as_ref()
    }

    /// Returns `true` if the retainer of `category` has been created.
    #[must_use]
    pub fn is_instantiated(&self, category: MotionCategory) -> bool {
        self.retainer(category).is_some()
    }

    fn retainer_mut(&mut self, category: MotionCategory) -> Option<&mut Retainer> {
        let policy = self.config.policy_for(category)?;
        let slot = category.lane_slot()?;
        Some(self.retainers[slot].get_or_insert_with(|| Retainer::new(policy)))
    }
}
