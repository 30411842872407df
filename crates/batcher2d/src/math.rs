//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so users don't need to
//! depend on it directly. 2D affine transforms are plain [`Mat3`] values in
//! homogeneous form; [`Rect`] is the axis-aligned rectangle every shape
//! builder and the camera bounds work with.
//!
//! All screen-facing code uses window pixel coordinates:
//! origin at the top-left, X right, Y down.

pub use glam::{Mat3, Vec2, Vec3};

/// An axis-aligned rectangle stored as two corners.
///
/// In screen space `min` is the top-left corner and `max` the bottom-right.
/// The same type doubles as a UV rectangle, where (0,0) is the top-left of
/// the texture and (1,1) the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// The full texture (0,0) to (1,1).
    pub const FULL: Self = Self {
        min: Vec2::ZERO,
        max: Vec2::ONE,
    };

    /// Build from the top-left corner and a size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Build from two arbitrary corners; the result is normalized so that
    /// `min <= max` on both axes.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Build from a center point and a full size.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Build from pixel coordinates and texture dimensions (UV space).
    pub fn from_pixels(x: f32, y: f32, w: f32, h: f32, tex_w: f32, tex_h: f32) -> Self {
        Self {
            min: Vec2::new(x / tex_w, y / tex_h),
            max: Vec2::new((x + w) / tex_w, (y + h) / tex_h),
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn top_left(&self) -> Vec2 {
        self.min
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.max.x, self.min.y)
    }

    pub fn bottom_right(&self) -> Vec2 {
        self.max
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.min.x, self.max.y)
    }

    /// Corners in clockwise screen order: TL, TR, BR, BL.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    /// Grow each side outward by `dx` horizontally and `dy` vertically.
    /// Negative amounts shrink the rectangle.
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        let d = Vec2::new(dx, dy);
        Self {
            min: self.min - d,
            max: self.max + d,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::FULL
    }
}
