//! # Camera — World Space to Clip Space
//!
//! [`Camera2d`] is plain data: where the camera looks, how far it is rotated
//! and how far it is zoomed in. The matrices are free functions of the camera
//! and the viewport size, so nothing needs to be kept in sync when the window
//! is resized.
//!
//! ```text
//! world ──view_matrix──▶ pixels (y-down) ──pixel_to_ndc──▶ clip space
//!
//! view_matrix = T(viewport / 2) · S(zoom) · R(-rotation) · T(-position)
//! ```
//!
//! The camera's `position` ends up in the middle of the viewport. Pass
//! [`view_projection`] to [`Batcher::set_camera`](super::Batcher::set_camera)
//! once per frame.

use serde::{Deserialize, Serialize};

use crate::math::{Mat3, Rect, Vec2};

/// Smallest zoom `zoom_by`/`zoom_to` will accept.
pub const MIN_ZOOM: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera2d {
    /// World point shown at the center of the viewport.
    pub position: Vec2,
    /// Radians, clockwise on screen.
    pub rotation: f32,
    /// Screen pixels per world unit.
    pub zoom: f32,
}

impl Default for Camera2d {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera2d {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn rotate_by(&mut self, radians: f32) {
        self.rotation += radians;
    }

    pub fn rotate_to(&mut self, radians: f32) {
        self.rotation = radians;
    }

    /// Multiply the zoom by `factor`.
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).max(MIN_ZOOM);
    }

    pub fn zoom_to(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
    }
}

/// World space to window pixels.
pub fn view_matrix(camera: &Camera2d, viewport: Vec2) -> Mat3 {
    Mat3::from_translation(viewport * 0.5)
        * Mat3::from_scale(Vec2::splat(camera.zoom))
        * Mat3::from_angle(-camera.rotation)
        * Mat3::from_translation(-camera.position)
}

/// Window pixels (origin top-left, y down) to normalized device coordinates
/// (origin center, y up).
pub fn pixel_to_ndc(viewport: Vec2) -> Mat3 {
    let w = viewport.x.max(1.0);
    let h = viewport.y.max(1.0);
    Mat3::from_cols_array(&[
        2.0 / w, 0.0, 0.0, //
        0.0, -2.0 / h, 0.0, //
        -1.0, 1.0, 1.0,
    ])
}

/// The matrix to hand to [`Batcher::set_camera`](super::Batcher::set_camera).
pub fn view_projection(camera: &Camera2d, viewport: Vec2) -> Mat3 {
    pixel_to_ndc(viewport) * view_matrix(camera, viewport)
}

/// Window pixel to world position.
pub fn screen_to_world(camera: &Camera2d, viewport: Vec2, pixel: Vec2) -> Vec2 {
    view_matrix(camera, viewport).inverse().transform_point2(pixel)
}

/// The axis-aligned world rectangle that covers everything on screen. With a
/// rotated camera this is larger than the viewport itself.
pub fn visible_bounds(camera: &Camera2d, viewport: Vec2) -> Rect {
    let inverse = view_matrix(camera, viewport).inverse();
    let corners = Rect::new(0.0, 0.0, viewport.x, viewport.y)
        .corners()
        .map(|c| inverse.transform_point2(c));
    let (min, max) = corners[1..]
        .iter()
        .fold((corners[0], corners[0]), |(lo, hi), &c| (lo.min(c), hi.max(c)));
    Rect { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn position_lands_in_the_middle() {
        let cam = Camera2d::new(Vec2::new(100.0, 50.0));
        let p = view_matrix(&cam, VIEWPORT).transform_point2(cam.position);
        assert_relative_eq!(p.x, 400.0);
        assert_relative_eq!(p.y, 300.0);
    }

    #[test]
    fn pixel_corners_map_to_ndc_corners() {
        let m = pixel_to_ndc(VIEWPORT);
        let tl = m.transform_point2(Vec2::ZERO);
        let br = m.transform_point2(VIEWPORT);
        assert_relative_eq!(tl.x, -1.0);
        assert_relative_eq!(tl.y, 1.0);
        assert_relative_eq!(br.x, 1.0);
        assert_relative_eq!(br.y, -1.0);
    }

    #[test]
    fn zoom_scales_around_the_center() {
        let mut cam = Camera2d::default();
        cam.zoom_to(2.0);
        let p = view_matrix(&cam, VIEWPORT).transform_point2(Vec2::new(10.0, 0.0));
        assert_relative_eq!(p.x, 420.0);

        cam.zoom_by(0.0);
        assert_eq!(cam.zoom, MIN_ZOOM);
    }

    #[test]
    fn default_camera_sees_viewport_around_origin() {
        let bounds = visible_bounds(&Camera2d::default(), VIEWPORT);
        assert_relative_eq!(bounds.min.x, -400.0);
        assert_relative_eq!(bounds.min.y, -300.0);
        assert_relative_eq!(bounds.max.x, 400.0);
        assert_relative_eq!(bounds.max.y, 300.0);
    }

    #[test]
    fn zoom_shrinks_visible_bounds() {
        let mut cam = Camera2d::new(Vec2::new(1000.0, 0.0));
        cam.zoom_by(2.0);
        let bounds = visible_bounds(&cam, VIEWPORT);
        assert_relative_eq!(bounds.width(), 400.0, epsilon = 1e-3);
        assert_relative_eq!(bounds.center().x, 1000.0, epsilon = 1e-3);
    }

    #[test]
    fn quarter_turn_swaps_bounds_extent() {
        let mut cam = Camera2d::default();
        cam.rotate_to(FRAC_PI_2);
        let bounds = visible_bounds(&cam, VIEWPORT);
        assert_relative_eq!(bounds.width(), 600.0, epsilon = 1e-3);
        assert_relative_eq!(bounds.height(), 800.0, epsilon = 1e-3);
    }

    #[test]
    fn screen_to_world_inverts_view() {
        let mut cam = Camera2d::new(Vec2::new(-30.0, 12.0));
        cam.rotate_by(0.4);
        cam.zoom_by(1.5);
        let world = Vec2::new(7.0, -3.0);
        let pixel = view_matrix(&cam, VIEWPORT).transform_point2(world);
        let back = screen_to_world(&cam, VIEWPORT, pixel);
        assert_relative_eq!(back.x, world.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, world.y, epsilon = 1e-3);
    }

    #[test]
    fn view_projection_puts_camera_at_ndc_origin() {
        let cam = Camera2d::new(Vec2::new(5.0, 5.0));
        let p = view_projection(&cam, VIEWPORT).transform_point2(cam.position);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
    }
}
