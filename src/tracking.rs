// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Geometry of the region handed to the external object tracker.
//!
//! Blob detection and tracking run on the vision host. This module only models the box placed
//! around a detected ball and the pixel corners used to draw it.

/// Side length of the box seeded around a detected keypoint (pixels).
pub const SEED_BOX_SIZE: f32 = 60.0;

/// Axis-aligned box in frame pixels, origin at the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TrackBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Seed box of [`SEED_BOX_SIZE`] centered on a keypoint.
    pub fn around(cx: f32, cy: f32) -> Self {
        let half = SEED_BOX_SIZE / 2.0;
        Self::new(cx - half, cy - half, SEED_BOX_SIZE, SEED_BOX_SIZE)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Top-left and bottom-right corners, truncated to whole pixels.
    pub fn corners(&self) -> ((i32, i32), (i32, i32)) {
        let p1 = (self.x as i32, self.y as i32);
        let p2 = ((self.x + self.width) as i32, (self.y + self.height) as i32);
        (p1, p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_box_is_centered_on_the_keypoint() {
        let b = TrackBox::around(100.0, 80.0);
        assert_eq!(b, TrackBox::new(70.0, 50.0, 60.0, 60.0));
        assert_eq!(b.center(), (100.0, 80.0));
        assert_eq!(b.corners(), ((70, 50), (130, 110)));
    }

    #[test]
    fn corners_truncate_toward_zero() {
        let b = TrackBox::new(10.7, 20.2, 30.5, 40.9);
        assert_eq!(b.corners(), ((10, 20), (41, 61)));

        let edge = TrackBox::around(12.5, 4.0);
        assert_eq!(edge.corners(), ((-17, -26), (42, 34)));
    }
}
