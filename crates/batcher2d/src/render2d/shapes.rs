//! # Shapes — Decomposing Primitives into Vertices and Indices
//!
//! Each builder follows the same recipe: validate the input, reserve the
//! whole vertex/index budget, [`submit`](Batcher::submit) a render state, then
//! emit vertices and indices. Because validation and reservation come first,
//! a rejected call writes nothing.
//!
//! ## Winding
//!
//! Screen space is Y-down. Filled rectangles are split into
//! `(TL, TR, BL)` and `(BL, TR, BR)`, both clockwise on screen, and fans and
//! strips keep the same orientation. Anything that culls back faces elsewhere
//! in the renderer can rely on it.
//!
//! ```text
//!  TL ──── TR        fan around a hub:       circle samples (sides = 4):
//!   │ ╲  1  │            p1                     θ = start, start+step, ...
//!   │  ╲    │           ╱  ╲                    plus one explicit point
//!   │ 0  ╲  │       hub ── p2                   at exactly θ = end
//!  BL ──── BR           ╲  ╱
//!                         p3
//! ```
//!
//! Lines are always emitted as line *lists*, even for polylines. A real line
//! strip would be joined to the next strip in the same batch; pairs of
//! indices never are.
//!
//! ## Comparison
//!
//! - **MonoGame.Extended** `ShapeExtensions`: the same circle sampling (with a
//!   closing point) and rectangle decomposition, drawn through `SpriteBatch`
//!   with stretched 1px textures instead of real line primitives.
//! - **lyon**: full path tessellation with joins and caps. Far more general;
//!   these builders only cover what a jam game needs.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::batcher::Batcher;
use super::error::BatchError;
use super::sprite::Sprite;
use super::state::{RenderState, TextureHandle};
use super::Color;
use crate::math::{Rect, Vec2};

/// Full-texture UVs in TL, TR, BR, BL order.
const FULL_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

impl Batcher {
    // ── Lines ────────────────────────────────────────────────────────────

    /// A single line segment.
    pub fn draw_line(&mut self, p1: Vec2, p2: Vec2, color: Color, width: f32) -> Result<(), BatchError> {
        self.reserve(2, 2)?;
        self.submit(RenderState::line(self.effect(), TextureHandle::WHITE, width));
        let a = self.add_vertex(p1, color, Vec2::ZERO)?;
        let b = self.add_vertex(p2, color, Vec2::ZERO)?;
        self.add_index(a)?;
        self.add_index(b)
    }

    /// An open polyline through `points`, one segment per consecutive pair.
    pub fn draw_lines(&mut self, points: &[Vec2], color: Color, width: f32) -> Result<(), BatchError> {
        if points.len() < 2 {
            return Err(BatchError::NotEnoughPoints {
                shape: "polyline",
                required: 2,
                got: points.len(),
            });
        }
        self.reserve(points.len(), (points.len() - 1) * 2)?;
        self.submit(RenderState::line(self.effect(), TextureHandle::WHITE, width));

        let mut prev = self.add_vertex(points[0], color, Vec2::ZERO)?;
        for &p in &points[1..] {
            let next = self.add_vertex(p, color, Vec2::ZERO)?;
            self.add_index(prev)?;
            self.add_index(next)?;
            prev = next;
        }
        Ok(())
    }

    /// A closed outline through `points`; the last point connects back to
    /// the first.
    pub fn draw_polygon(&mut self, points: &[Vec2], color: Color, width: f32) -> Result<(), BatchError> {
        if points.len() < 3 {
            return Err(BatchError::NotEnoughPoints {
                shape: "polygon",
                required: 3,
                got: points.len(),
            });
        }
        self.reserve(points.len(), points.len() * 2)?;
        self.submit(RenderState::line(self.effect(), TextureHandle::WHITE, width));

        let first = self.add_vertex(points[0], color, Vec2::ZERO)?;
        let mut prev = first;
        for &p in &points[1..] {
            let next = self.add_vertex(p, color, Vec2::ZERO)?;
            self.add_index(prev)?;
            self.add_index(next)?;
            prev = next;
        }
        self.add_index(prev)?;
        self.add_index(first)
    }

    // ── Rectangles ───────────────────────────────────────────────────────

    /// Rectangle outline: TL → TR → BR → BL → TL.
    pub fn draw_rect(&mut self, rect: Rect, color: Color, width: f32) -> Result<(), BatchError> {
        self.reserve(4, 8)?;
        self.submit(RenderState::line(self.effect(), TextureHandle::WHITE, width));
        let mut v = [0u32; 4];
        for (slot, corner) in v.iter_mut().zip(rect.corners()) {
            *slot = self.add_vertex(corner, color, Vec2::ZERO)?;
        }
        for i in 0..4 {
            self.add_index(v[i])?;
            self.add_index(v[(i + 1) % 4])?;
        }
        Ok(())
    }

    /// Solid rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), BatchError> {
        self.fill_rect_colors(rect, [color; 4])
    }

    /// Rectangle with one color per corner, in TL, TR, BR, BL order.
    pub fn fill_rect_colors(&mut self, rect: Rect, colors: [Color; 4]) -> Result<(), BatchError> {
        let state = RenderState::fill(self.effect(), TextureHandle::WHITE);
        self.quad(state, rect.corners(), colors, [Vec2::ZERO; 4])
    }

    /// Rectangle showing the whole of `texture`, multiplied by `tint`.
    pub fn fill_rect_texture(&mut self, rect: Rect, texture: TextureHandle, tint: Color) -> Result<(), BatchError> {
        let state = RenderState::fill(self.effect(), texture);
        self.quad(state, rect.corners(), [tint; 4], FULL_UVS)
    }

    /// Rectangle showing `sprite`'s region of its texture.
    pub fn fill_rect_sprite(&mut self, rect: Rect, sprite: &Sprite, tint: Color) -> Result<(), BatchError> {
        let state = RenderState::fill(self.effect(), sprite.texture);
        self.quad(state, rect.corners(), [tint; 4], sprite.uvs)
    }

    /// Two clockwise triangles from corners given in TL, TR, BR, BL order.
    fn quad(
        &mut self,
        state: RenderState,
        corners: [Vec2; 4],
        colors: [Color; 4],
        uvs: [Vec2; 4],
    ) -> Result<(), BatchError> {
        self.reserve(4, 6)?;
        self.submit(state);
        let mut v = [0u32; 4];
        for i in 0..4 {
            v[i] = self.add_vertex(corners[i], colors[i], uvs[i])?;
        }
        let [tl, tr, br, bl] = v;
        for i in [tl, tr, bl, bl, tr, br] {
            self.add_index(i)?;
        }
        Ok(())
    }

    /// Rounded rectangle outline. The arcs are sampled with `segments` steps
    /// per corner.
    pub fn draw_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        segments: u32,
        color: Color,
        width: f32,
    ) -> Result<(), BatchError> {
        if radius <= 0.0 {
            return self.draw_rect(rect, color, width);
        }
        let points = rounded_rect_points(rect, radius, segments)?;
        self.draw_polygon(&points, color, width)
    }

    /// Filled rounded rectangle: the inner rectangle, four edge strips and
    /// four quarter-circle fans. No area is covered twice, so translucent
    /// colors blend evenly.
    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        segments: u32,
        color: Color,
    ) -> Result<(), BatchError> {
        check_radius(rect, radius)?;
        if radius <= 0.0 {
            return self.fill_rect(rect, color);
        }
        if segments == 0 {
            return Err(BatchError::InvalidSegments {
                shape: "rounded rectangle",
            });
        }

        let inner = rect.inflate(-radius, -radius);
        let mut quads = Vec::with_capacity(5);
        if inner.width() > 0.0 && inner.height() > 0.0 {
            quads.push(inner);
        }
        if inner.width() > 0.0 {
            quads.push(Rect::new(inner.left(), rect.top(), inner.width(), radius));
            quads.push(Rect::new(inner.left(), inner.bottom(), inner.width(), radius));
        }
        if inner.height() > 0.0 {
            quads.push(Rect::new(rect.left(), inner.top(), radius, inner.height()));
            quads.push(Rect::new(inner.right(), inner.top(), radius, inner.height()));
        }

        let fan_vertices = segments as usize + 2;
        let fan_indices = segments as usize * 3;
        self.reserve(quads.len() * 4 + fan_vertices * 4, quads.len() * 6 + fan_indices * 4)?;

        for q in quads {
            self.fill_rect(q, color)?;
        }
        for (center, start, end) in corner_arcs(inner) {
            self.fill_circle_segment(center, radius, start, end, segments, color)?;
        }
        Ok(())
    }

    // ── Circles ──────────────────────────────────────────────────────────

    /// Circle outline with `sides` segments.
    pub fn draw_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        sides: u32,
        color: Color,
        width: f32,
    ) -> Result<(), BatchError> {
        self.draw_circle_segment(center, radius, 0.0, TAU, sides, color, width)
    }

    /// Arc from `start` to `end` (radians; swapped if reversed).
    pub fn draw_circle_segment(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        sides: u32,
        color: Color,
        width: f32,
    ) -> Result<(), BatchError> {
        if sides == 0 {
            return Err(BatchError::InvalidSegments { shape: "circle" });
        }
        let points = circle_points(center, radius, sides, start, end);
        self.draw_lines(&points, color, width)
    }

    /// Solid circle.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, sides: u32, color: Color) -> Result<(), BatchError> {
        self.fill_circle_segment(center, radius, 0.0, TAU, sides, color)
    }

    /// Solid pie slice from `start` to `end`, as a fan around `center`.
    pub fn fill_circle_segment(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        sides: u32,
        color: Color,
    ) -> Result<(), BatchError> {
        if sides == 0 {
            return Err(BatchError::InvalidSegments { shape: "circle" });
        }
        let mut points = Vec::with_capacity(sides as usize + 2);
        points.push(center);
        points.extend(circle_points(center, radius, sides, start, end));
        self.fill_triangle_fan(&points, color)
    }

    // ── Low level ────────────────────────────────────────────────────────

    /// Triangle fan: `points[0]` is the hub, every consecutive pair of the
    /// remaining points forms a triangle with it.
    pub fn fill_triangle_fan(&mut self, points: &[Vec2], color: Color) -> Result<(), BatchError> {
        if points.len() < 3 {
            return Err(BatchError::NotEnoughPoints {
                shape: "triangle fan",
                required: 3,
                got: points.len(),
            });
        }
        self.reserve(points.len(), (points.len() - 2) * 3)?;
        self.submit(RenderState::fill(self.effect(), TextureHandle::WHITE));

        let hub = self.add_vertex(points[0], color, Vec2::ZERO)?;
        let mut prev = self.add_vertex(points[1], color, Vec2::ZERO)?;
        for &p in &points[2..] {
            let next = self.add_vertex(p, color, Vec2::ZERO)?;
            self.add_index(hub)?;
            self.add_index(prev)?;
            self.add_index(next)?;
            prev = next;
        }
        Ok(())
    }

    /// Triangle strip, emitted as a triangle list. Every other triangle has
    /// its first two indices swapped so all triangles keep the winding of
    /// the first one.
    pub fn fill_triangle_strip(&mut self, points: &[Vec2], color: Color) -> Result<(), BatchError> {
        if points.len() < 3 {
            return Err(BatchError::NotEnoughPoints {
                shape: "triangle strip",
                required: 3,
                got: points.len(),
            });
        }
        self.reserve(points.len(), (points.len() - 2) * 3)?;
        self.submit(RenderState::fill(self.effect(), TextureHandle::WHITE));

        let mut v = Vec::with_capacity(points.len());
        for &p in points {
            v.push(self.add_vertex(p, color, Vec2::ZERO)?);
        }
        for i in 0..v.len() - 2 {
            let tri = if i % 2 == 0 {
                [v[i], v[i + 1], v[i + 2]]
            } else {
                [v[i + 1], v[i], v[i + 2]]
            };
            for idx in tri {
                self.add_index(idx)?;
            }
        }
        Ok(())
    }
}

fn check_radius(rect: Rect, radius: f32) -> Result<(), BatchError> {
    let max = rect.width().min(rect.height()) / 2.0;
    if radius > max {
        return Err(BatchError::RadiusTooLarge { radius, max });
    }
    Ok(())
}

/// Corner centers and arc ranges in clockwise order: TL, TR, BR, BL.
fn corner_arcs(inner: Rect) -> [(Vec2, f32, f32); 4] {
    [
        (inner.top_left(), PI, 3.0 * FRAC_PI_2),
        (inner.top_right(), 3.0 * FRAC_PI_2, TAU),
        (inner.bottom_right(), 0.0, FRAC_PI_2),
        (inner.bottom_left(), FRAC_PI_2, PI),
    ]
}

/// Sample `sides` equal steps of a circle from `start` to `end`, plus a
/// final point at exactly `end`. `start` and `end` are swapped if reversed.
pub fn circle_points(center: Vec2, radius: f32, sides: u32, start: f32, end: f32) -> Vec<Vec2> {
    ellipse_points(center, Vec2::splat(radius), sides, start, end)
}

/// Like [`circle_points`] with separate X and Y radii.
pub fn ellipse_points(center: Vec2, radii: Vec2, sides: u32, start: f32, end: f32) -> Vec<Vec2> {
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    let mut points = Vec::with_capacity(sides as usize + 1);
    if sides > 0 {
        let step = (end - start) / sides as f32;
        let mut theta = start;
        for _ in 0..sides {
            points.push(center + radii * Vec2::new(theta.cos(), theta.sin()));
            theta += step;
        }
    }
    // Sampled separately so accumulated step error never leaves a seam.
    points.push(center + radii * Vec2::new(end.cos(), end.sin()));
    points
}

/// The closed outline of a rounded rectangle, clockwise from the left end
/// of the top-left arc. Each corner contributes `segments + 1` points.
pub fn rounded_rect_points(rect: Rect, radius: f32, segments: u32) -> Result<Vec<Vec2>, BatchError> {
    check_radius(rect, radius)?;
    if segments == 0 {
        return Err(BatchError::InvalidSegments {
            shape: "rounded rectangle",
        });
    }
    let inner = rect.inflate(-radius, -radius);
    let mut points = Vec::with_capacity((segments as usize + 1) * 4);
    for (center, start, end) in corner_arcs(inner) {
        points.extend(circle_points(center, radius, segments, start, end));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render2d::rasterizer::CommandLog;
    use crate::render2d::state::Topology;
    use approx::assert_relative_eq;

    fn batcher() -> Batcher {
        Batcher::with_capacity(1024, 2048).unwrap()
    }

    #[test]
    fn circle_has_sides_plus_one_points() {
        let pts = circle_points(Vec2::ZERO, 1.0, 4, 0.0, TAU);
        assert_eq!(pts.len(), 5);
        let last = pts[4];
        assert_relative_eq!(last.x, TAU.cos(), epsilon = 1e-6);
        assert_relative_eq!(last.y, TAU.sin(), epsilon = 1e-6);
        assert_relative_eq!(pts[1].y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn reversed_range_is_swapped() {
        let forward = circle_points(Vec2::ZERO, 1.0, 8, 0.0, PI);
        let reversed = circle_points(Vec2::ZERO, 1.0, 8, PI, 0.0);
        assert_eq!(forward, reversed);

        // Sweep is non-negative: angles never decrease along the samples.
        let angles: Vec<f32> = reversed.iter().map(|p| p.y.atan2(p.x).rem_euclid(TAU)).collect();
        for pair in angles[..angles.len() - 1].windows(2) {
            assert!(pair[1] >= pair[0] - 1e-5, "{angles:?}");
        }
    }

    #[test]
    fn ellipse_uses_both_radii() {
        let pts = ellipse_points(Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0), 4, 0.0, TAU);
        assert_relative_eq!(pts[0].x, 3.0, epsilon = 1e-6);
        assert_relative_eq!(pts[1].y, 4.0, epsilon = 1e-6);
    }

    #[test]
    fn fill_rect_index_order_is_clockwise() {
        let mut b = batcher();
        b.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED).unwrap();
        // Corners were written TL, TR, BR, BL → slots 0, 1, 2, 3.
        assert_eq!(b.indices(), &[0, 1, 3, 3, 1, 2]);

        // Y-down screen space: clockwise means positive cross product.
        let pos: Vec<Vec2> = b.vertices().iter().map(|v| v.position()).collect();
        for tri in b.indices().chunks(3) {
            let (a, c, d) = (pos[tri[0] as usize], pos[tri[1] as usize], pos[tri[2] as usize]);
            assert!((c - a).perp_dot(d - a) > 0.0);
        }
    }

    #[test]
    fn draw_rect_is_four_segments() {
        let mut b = batcher();
        b.draw_rect(Rect::new(0.0, 0.0, 4.0, 2.0), Color::WHITE, 1.0).unwrap();
        assert_eq!(b.vertices().len(), 4);
        assert_eq!(b.indices(), &[0, 1, 1, 2, 2, 3, 3, 0]);
        assert_eq!(b.vertices()[1].position(), Vec2::new(4.0, 0.0));
        assert_eq!(b.vertices()[2].position(), Vec2::new(4.0, 2.0));
    }

    #[test]
    fn line_needs_two_points() {
        let mut b = batcher();
        let err = b.draw_lines(&[Vec2::ZERO], Color::WHITE, 1.0).unwrap_err();
        assert_eq!(
            err,
            BatchError::NotEnoughPoints {
                shape: "polyline",
                required: 2,
                got: 1
            }
        );
        assert!(b.vertices().is_empty());
    }

    #[test]
    fn polyline_chains_pairs() {
        let mut b = batcher();
        let pts = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        b.draw_lines(&pts, Color::WHITE, 1.0).unwrap();
        assert_eq!(b.indices(), &[0, 1, 1, 2, 2, 3]);
    }

    #[test]
    fn fan_and_strip_need_three_points() {
        let mut b = batcher();
        assert!(matches!(
            b.fill_triangle_fan(&[Vec2::ZERO, Vec2::X], Color::WHITE),
            Err(BatchError::NotEnoughPoints { required: 3, got: 2, .. })
        ));
        assert!(matches!(
            b.fill_triangle_strip(&[Vec2::ZERO], Color::WHITE),
            Err(BatchError::NotEnoughPoints { required: 3, got: 1, .. })
        ));
        assert!(b.indices().is_empty());
    }

    #[test]
    fn fan_triangles_share_the_hub() {
        let mut b = batcher();
        let pts = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        b.fill_triangle_fan(&pts, Color::WHITE).unwrap();
        assert_eq!(b.indices(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn strip_keeps_winding() {
        let mut b = batcher();
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ];
        b.fill_triangle_strip(&pts, Color::WHITE).unwrap();
        assert_eq!(b.indices(), &[0, 1, 2, 2, 1, 3]);

        let pos: Vec<Vec2> = b.vertices().iter().map(|v| v.position()).collect();
        let signs: Vec<bool> = b
            .indices()
            .chunks(3)
            .map(|t| {
                let (a, c, d) = (pos[t[0] as usize], pos[t[1] as usize], pos[t[2] as usize]);
                (c - a).perp_dot(d - a) > 0.0
            })
            .collect();
        assert_eq!(signs[0], signs[1]);
    }

    #[test]
    fn rounded_rect_radius_over_half_side_fails() {
        let mut b = batcher();
        let err = b
            .fill_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 6.0, 4, Color::WHITE)
            .unwrap_err();
        assert_eq!(err, BatchError::RadiusTooLarge { radius: 6.0, max: 5.0 });
        assert!(b.vertices().is_empty());
    }

    #[test]
    fn rounded_rect_zero_radius_is_plain_rect() {
        let mut b = batcher();
        b.fill_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, 4, Color::WHITE)
            .unwrap();
        assert_eq!(b.vertices().len(), 4);
        assert_eq!(b.indices().len(), 6);
    }

    #[test]
    fn rounded_rect_fill_is_one_batch() {
        let mut b = batcher();
        let mut log = CommandLog::new();
        b.fill_rounded_rect(Rect::new(0.0, 0.0, 20.0, 10.0), 2.0, 3, Color::WHITE)
            .unwrap();
        // 5 quads + 4 fans of (3 + 1) rim points and a hub.
        assert_eq!(b.vertices().len(), 5 * 4 + 4 * 5);
        assert_eq!(b.indices().len(), 5 * 6 + 4 * 9);
        let stats = b.flush(&mut log);
        assert_eq!(stats.batches, 1);
        assert_eq!(log.draws()[0].topology, Topology::TriangleList);
    }

    #[test]
    fn rounded_rect_area_is_exact() {
        let mut b = batcher();
        let (w, h, r) = (20.0f32, 10.0f32, 2.0f32);
        b.fill_rounded_rect(Rect::new(0.0, 0.0, w, h), r, 64, Color::WHITE)
            .unwrap();
        let pos: Vec<Vec2> = b.vertices().iter().map(|v| v.position()).collect();
        let area: f32 = b
            .indices()
            .chunks(3)
            .map(|t| {
                let (a, c, d) = (pos[t[0] as usize], pos[t[1] as usize], pos[t[2] as usize]);
                (c - a).perp_dot(d - a) * 0.5
            })
            .sum();
        let expected = w * h - (4.0 - PI) * r * r;
        assert_relative_eq!(area, expected, epsilon = 0.05);
    }

    #[test]
    fn rounded_rect_outline_is_closed_path() {
        let pts = rounded_rect_points(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0, 2).unwrap();
        assert_eq!(pts.len(), 12);
        assert_relative_eq!(pts[0].x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(pts[0].y, 2.0, epsilon = 1e-5);

        let mut b = batcher();
        b.draw_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0, 2, Color::WHITE, 1.0)
            .unwrap();
        assert_eq!(b.indices().len(), 24);
        assert_eq!(b.indices()[23], 0);
    }

    #[test]
    fn filled_circle_is_a_fan_around_center() {
        let mut b = batcher();
        b.fill_circle(Vec2::new(5.0, 5.0), 2.0, 8, Color::WHITE).unwrap();
        // hub + 8 samples + closing sample
        assert_eq!(b.vertices().len(), 10);
        assert_eq!(b.indices().len(), 8 * 3);
        assert_eq!(b.vertices()[0].position(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn zero_sides_is_rejected() {
        let mut b = batcher();
        assert!(matches!(
            b.fill_circle(Vec2::ZERO, 1.0, 0, Color::WHITE),
            Err(BatchError::InvalidSegments { .. })
        ));
        assert!(matches!(
            b.draw_circle(Vec2::ZERO, 1.0, 0, Color::WHITE, 1.0),
            Err(BatchError::InvalidSegments { .. })
        ));
    }

    #[test]
    fn capacity_failure_writes_nothing() {
        let mut b = Batcher::with_capacity(6, 64).unwrap();
        b.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE).unwrap();
        let err = b.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE).unwrap_err();
        assert_eq!(err, BatchError::VertexCapacity { requested: 8, max: 6 });
        assert_eq!(b.vertices().len(), 4);
        assert_eq!(b.indices().len(), 6);
    }

    #[test]
    fn sprite_fill_uses_sprite_texture_and_uvs() {
        let tex = TextureHandle::from_raw(3);
        let sprite = Sprite::new(tex);
        let mut b = batcher();
        let mut log = CommandLog::new();
        b.fill_rect_sprite(Rect::new(0.0, 0.0, 2.0, 2.0), &sprite, Color::WHITE)
            .unwrap();
        assert_eq!(b.vertices()[2].uv(), Vec2::ONE);
        b.flush(&mut log);
        assert!(log.commands.contains(&crate::render2d::RasterCommand::BindTextures {
            primary: Some(tex),
            secondary: None,
        }));
    }
}
