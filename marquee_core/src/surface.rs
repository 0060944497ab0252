// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering surface as seen by the placement engine.
//!
//! Only the dimensions matter here; drawing belongs to the caller.

use kurbo::Size;

/// A drawable area that overlay items are placed on.
pub trait Surface {
    /// Width in surface units.
    fn width(&self) -> f64;

    /// Height in surface units.
    fn height(&self) -> f64;

    /// Both dimensions as a [`Size`].
    #[inline]
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl Surface for Size {
    #[inline]
    fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    fn size(&self) -> Size {
        *self
    }
}

impl<S: Surface + ?Sized> Surface for &S {
    #[inline]
    fn width(&self) -> f64 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> f64 {
        (**self).height()
    }
}
