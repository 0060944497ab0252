// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion categories of overlay items.

/// How an overlay item moves across the surface.
///
/// The category decides which lane retainer (if any) places the item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionCategory {
    /// Enters at the right edge and scrolls to the left.
    ScrollRightToLeft,
    /// Enters at the left edge and scrolls to the right.
    ScrollLeftToRight,
    /// Horizontally centered, stacked downward from the top edge.
    FixedTop,
    /// Horizontally centered, stacked upward from the bottom edge.
    FixedBottom,
    /// Positions itself; always laid out at the origin.
    Special,
    /// Anything else. Never placed.
    Other,
}

impl MotionCategory {
    /// Number of categories that own a lane retainer.
    pub const LANED: usize = 4;

    /// Maps a classic bullet-comment type code to a category.
    ///
    /// `1` scrolls right-to-left, `4` is bottom-anchored, `5` is top-anchored,
    /// `6` scrolls left-to-right and `7` is special. Every other code is
    /// [`Other`](Self::Other).
    #[must_use]
    pub const fn from_type_code(code: i32) -> Self {
        match code {
            1 => Self::ScrollRightToLeft,
            4 => Self::FixedBottom,
            5 => Self::FixedTop,
            6 => Self::ScrollLeftToRight,
            7 => Self::Special,
            _ => Self::Other,
        }
    }

    /// Returns the classic type code, or `None` for [`Other`](Self::Other).
    #[must_use]
    pub const fn type_code(self) -> Option<i32> {
        match self {
            Self::ScrollRightToLeft => Some(1),
            Self::FixedBottom => Some(4),
            Self::FixedTop => Some(5),
            Self::ScrollLeftToRight => Some(6),
            Self::Special => Some(7),
            Self::Other => None,
        }
    }

    /// Returns the retainer slot for categories that are placed in lanes.
    #[must_use]
    pub const fn lane_slot(self) -> Option<usize> {
        match self {
            Self::ScrollRightToLeft => Some(0),
            Self::ScrollLeftToRight => Some(1),
            Self::FixedTop => Some(2),
            Self::FixedBottom => Some(3),
            Self::Special | Self::Other => None,
        }
    }

    /// Inverse of [`lane_slot`](Self::lane_slot).
    #[must_use]
    pub const fn from_lane_slot(slot: usize) -> Option<Self> {
        match slot {
            0 => Some(Self::ScrollRightToLeft),
            1 => Some(Self::ScrollLeftToRight),
            2 => Some(Self::FixedTop),
            3 => Some(Self::FixedBottom),
            _ => None,
        }
    }

    /// Returns `true` for the two horizontally moving categories.
    #[must_use]
    pub const fn is_scrolling(self) -> bool {
        matches!(self, Self::ScrollRightToLeft | Self::ScrollLeftToRight)
    }

    /// Returns `true` for the two anchored, non-moving categories.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::FixedTop | Self::FixedBottom)
    }
}
