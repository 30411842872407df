//! Whole-frame behavior of the batcher, observed through the recording
//! rasterizer.

use approx::assert_relative_eq;
use batcher2d::prelude::*;
use batcher2d::render2d::{DrawCall, RasterCommand};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tex(raw: u32) -> TextureHandle {
    TextureHandle::from_raw(raw)
}

/// Submit one triangle under `state`.
fn triangle(b: &mut Batcher, state: RenderState) {
    b.submit(state);
    for p in [Vec2::ZERO, Vec2::X, Vec2::Y] {
        let v = b.add_vertex(p, Color::WHITE, Vec2::ZERO).unwrap();
        b.add_index(v).unwrap();
    }
}

fn state_a() -> RenderState {
    RenderState::fill(EffectId::BASIC, tex(1))
}

fn state_b() -> RenderState {
    RenderState::fill(EffectId::BASIC, tex(2))
}

#[test]
fn fill_then_wide_line_is_two_batches_with_one_width_change() {
    init_logger();
    let mut b = Batcher::default();
    let mut log = CommandLog::new();

    b.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED).unwrap();
    b.draw_line(Vec2::ZERO, Vec2::new(5.0, 5.0), Color::WHITE, 2.0)
        .unwrap();
    let stats = b.flush(&mut log);

    assert_eq!(stats.batches, 2);
    assert_eq!(stats.draw_calls, 2);
    assert_eq!(stats.line_width_changes, 1);

    let draws = log.draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].topology, Topology::TriangleList);
    assert_eq!(draws[0].primitive_count, 2);
    assert_eq!(draws[1].topology, Topology::LineList);
    assert_eq!(draws[1].primitive_count, 1);

    // The width change sits between the two draws.
    let width_at = log
        .commands
        .iter()
        .position(|c| *c == RasterCommand::SetLineWidth(2.0))
        .unwrap();
    let draw_at: Vec<usize> = log
        .commands
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, RasterCommand::Draw(_)))
        .map(|(i, _)| i)
        .collect();
    assert!(draw_at[0] < width_at && width_at < draw_at[1]);
    assert_eq!(log.line_widths(), vec![2.0]);
}

#[test]
fn state_switch_back_starts_a_new_batch() {
    let mut b = Batcher::default();
    let mut log = CommandLog::new();
    triangle(&mut b, state_a());
    triangle(&mut b, state_a());
    triangle(&mut b, state_b());
    triangle(&mut b, state_a());
    let stats = b.flush(&mut log);

    assert_eq!(stats.batches, 3);
    let draws = log.draws();
    assert_eq!(draws[0].index_range(), 0..6);
    assert_eq!(draws[1].index_range(), 6..9);
    assert_eq!(draws[2].index_range(), 9..12);
}

#[test]
fn batch_count_is_one_plus_incompatible_neighbors() {
    let states = [
        state_a(),
        state_b(),
        state_b(),
        RenderState::line(EffectId::BASIC, tex(2), 1.0),
        RenderState::line(EffectId::BASIC, tex(2), 3.0),
        RenderState::line(EffectId::BASIC, tex(2), 3.0),
        state_a(),
    ];
    let mut b = Batcher::default();
    let mut log = CommandLog::new();
    for s in states {
        b.submit(s);
        let v0 = b.add_vertex(Vec2::ZERO, Color::WHITE, Vec2::ZERO).unwrap();
        let v1 = b.add_vertex(Vec2::ONE, Color::WHITE, Vec2::ZERO).unwrap();
        let v2 = b.add_vertex(Vec2::X, Color::WHITE, Vec2::ZERO).unwrap();
        b.add_index(v0).unwrap();
        b.add_index(v1).unwrap();
        if s.topology == Topology::TriangleList {
            b.add_index(v2).unwrap();
        }
    }
    let switches = states
        .windows(2)
        .filter(|w| !w[0].compatible_with(&w[1]))
        .count();
    assert_eq!(b.flush(&mut log).batches as usize, 1 + switches);
    assert_eq!(switches, 4);
}

#[test]
fn batches_tile_the_index_buffer() {
    let mut b = Batcher::default();
    let mut log = CommandLog::new();
    b.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE).unwrap();
    b.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE, 1.0).unwrap();
    b.fill_circle(Vec2::new(2.0, 2.0), 1.0, 12, Color::BLUE).unwrap();
    b.fill_rect_texture(Rect::new(0.0, 0.0, 1.0, 1.0), tex(4), Color::WHITE)
        .unwrap();
    b.draw_circle(Vec2::ZERO, 3.0, 10, Color::GREEN, 1.0).unwrap();
    let stats = b.flush(&mut log);

    let draws: Vec<DrawCall> = log.draws();
    let mut cursor = 0;
    for d in &draws {
        assert_eq!(d.start_index, cursor);
        cursor = d.index_range().end;
        assert_eq!(d.vertex_count, stats.vertices);
    }
    assert_eq!(cursor as usize, log.indices.len());
    assert_eq!(stats.indices as usize, log.indices.len());
}

#[test]
fn every_index_points_at_an_uploaded_vertex() {
    let mut b = Batcher::default();
    let mut log = CommandLog::new();
    b.fill_rounded_rect(Rect::new(10.0, 10.0, 100.0, 40.0), 8.0, 5, Color::WHITE)
        .unwrap();
    b.draw_lines(&[Vec2::ZERO, Vec2::X, Vec2::ONE], Color::WHITE, 1.0)
        .unwrap();
    b.flush(&mut log);
    assert!(log.indices.iter().all(|&i| (i as usize) < log.vertices.len()));
}

#[test]
fn second_flush_emits_nothing() {
    let mut b = Batcher::default();
    let mut log = CommandLog::new();
    b.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE).unwrap();
    b.flush(&mut log);
    log.clear();

    let stats = b.flush(&mut log);
    assert_eq!(stats, FrameStats::default());
    assert!(log.commands.is_empty());
}

#[test]
fn untextured_shapes_share_one_batch() {
    let mut b = Batcher::default();
    let mut log = CommandLog::new();
    b.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED).unwrap();
    b.fill_circle(Vec2::ZERO, 2.0, 16, Color::GREEN).unwrap();
    b.fill_rounded_rect(Rect::new(0.0, 0.0, 8.0, 8.0), 2.0, 4, Color::BLUE)
        .unwrap();
    b.fill_triangle_strip(&[Vec2::ZERO, Vec2::Y, Vec2::X], Color::WHITE)
        .unwrap();
    assert_eq!(b.flush(&mut log).batches, 1);
}

#[test]
fn wildcard_texture_bridges_incompatible_neighbors() {
    let mut b = Batcher::default();
    let mut log = CommandLog::new();
    let wildcard = RenderState {
        texture: None,
        ..state_a()
    };
    triangle(&mut b, state_a());
    triangle(&mut b, wildcard);
    triangle(&mut b, state_b());
    let stats = b.flush(&mut log);

    // Each state is only compared with the one before it, so A and B end up
    // in one batch drawn with the latest state's texture.
    assert_eq!(stats.batches, 1);
    assert!(!state_a().compatible_with(&state_b()));
    assert!(log.commands.contains(&RasterCommand::BindTextures {
        primary: Some(tex(2)),
        secondary: None,
    }));
}

#[test]
fn capacity_error_keeps_earlier_geometry_drawable() {
    let mut b = Batcher::with_capacity(16, 64).unwrap();
    let mut log = CommandLog::new();
    b.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE).unwrap();
    let err = b
        .fill_circle(Vec2::ZERO, 1.0, 32, Color::WHITE)
        .unwrap_err();
    assert!(matches!(err, BatchError::VertexCapacity { max: 16, .. }));
    assert!(err.to_string().contains("16"));

    let stats = b.flush(&mut log);
    assert_eq!(stats.vertices, 4);
    assert_eq!(stats.draw_calls, 1);
}

#[test]
fn transforms_and_camera_reach_the_upload() {
    let mut b = Batcher::default();
    let mut log = CommandLog::new();
    let viewport = Vec2::new(200.0, 100.0);
    b.set_camera(batcher2d::render2d::pixel_to_ndc(viewport));
    b.push_transform(Mat3::from_translation(Vec2::new(100.0, 50.0)));
    b.fill_rect(Rect::from_center(Vec2::ZERO, Vec2::new(200.0, 100.0)), Color::WHITE)
        .unwrap();
    b.pop_transform();
    b.flush(&mut log);

    let tl = log.vertices[0].position();
    let br = log.vertices[2].position();
    assert_relative_eq!(tl.x, -1.0, epsilon = 1e-6);
    assert_relative_eq!(tl.y, 1.0, epsilon = 1e-6);
    assert_relative_eq!(br.x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(br.y, -1.0, epsilon = 1e-6);
}

#[test]
fn config_file_sizes_the_batcher() {
    let config = BatcherConfig::from_json_str(r#"{ "max_vertices": 8, "max_indices": 12 }"#).unwrap();
    let b = Batcher::new(config).unwrap();
    assert_eq!(b.capacity(), (8, 12));
    assert!(b.fits(8, 12));
    assert!(!b.fits(9, 0));
}

#[test]
fn configured_min_depth_stops_pop_transform() {
    let config = BatcherConfig {
        min_transform_depth: 1,
        ..BatcherConfig::default()
    };
    let mut b = Batcher::new(config).unwrap();
    let base = Mat3::from_translation(Vec2::new(10.0, 0.0));
    b.push_transform(base);
    b.push_transform(Mat3::from_scale(Vec2::splat(2.0)));

    assert_eq!(b.transforms().depth(), 2);
    b.pop_transform();
    assert_eq!(b.pop_transform(), Mat3::IDENTITY);
    assert_eq!(b.transforms().depth(), 1);
    assert_eq!(b.transforms().peek(), base);
}

#[test]
fn replaced_stack_keeps_its_base() {
    let mut b = Batcher::default();
    let mut log = CommandLog::new();
    b.set_transforms(TransformStack::with_base(Mat3::from_translation(Vec2::new(
        5.0, 0.0,
    ))));
    b.pop_transform();
    b.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE).unwrap();
    b.flush(&mut log);

    assert_relative_eq!(log.vertices[0].position().x, 5.0);
    assert_eq!(b.transforms().depth(), 1);
}
