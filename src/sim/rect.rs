//! Axis-aligned screen rectangles
//!
//! Screen coordinates: x grows to the right, y grows downward. A rectangle
//! covers the half-open ranges `[x, x + w)` and `[y, y + h)`, so rectangles
//! that merely touch along an edge do not intersect.

use glam::IVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Overlap test. Empty rectangles never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x() < other.right()
            && other.x() < self.right()
            && self.y() < other.bottom()
            && other.y() < self.bottom()
    }

    /// True once the right edge has passed the left boundary of the play area
    pub fn is_past_left_edge(&self) -> bool {
        self.right() < 0
    }

    pub fn translated(&self, delta: IVec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }
}
