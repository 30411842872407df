//! A jam-game frame: a scrolling mountain line, a character, a rounded HUD
//! panel with a health bar, and a breathing sun. Arrow keys (or A/D) pan,
//! Q/E zoom, R rotates the camera. Stats are logged once a second with
//! `RUST_LOG=info`.

use std::f32::consts::TAU;
use std::sync::Arc;
use std::time::Instant;

use batcher2d::prelude::*;
use batcher2d::render2d::pixel_to_ndc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Action {
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    Rotate,
}

struct Gfx {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: BatchRenderer,
}

struct JamFrame {
    gfx: Option<Gfx>,
    batcher: Batcher,
    camera: Camera2d,
    input: InputState<KeyCode>,
    actions: ActionMap<Action, KeyCode>,
    start: Instant,
    last_frame: Instant,
    last_report: Instant,
    frames: u32,
}

impl JamFrame {
    fn new() -> Result<Self, ConfigError> {
        let mut actions = ActionMap::new();
        actions
            .bind(Action::PanLeft, KeyCode::ArrowLeft)
            .bind(Action::PanLeft, KeyCode::KeyA)
            .bind(Action::PanRight, KeyCode::ArrowRight)
            .bind(Action::PanRight, KeyCode::KeyD)
            .bind(Action::ZoomIn, KeyCode::KeyE)
            .bind(Action::ZoomOut, KeyCode::KeyQ)
            .bind(Action::Rotate, KeyCode::KeyR);

        let now = Instant::now();
        Ok(Self {
            gfx: None,
            batcher: Batcher::with_capacity(8192, 16384)?,
            camera: Camera2d::default(),
            input: InputState::new(),
            actions,
            start: now,
            last_frame: now,
            last_report: now,
            frames: 0,
        })
    }

    fn update(&mut self, dt: f32) {
        let snap = self.input.snapshot();
        let speed = 300.0 / self.camera.zoom;
        if self.actions.down(&snap, &Action::PanLeft) {
            self.camera.move_by(Vec2::new(-speed * dt, 0.0));
        }
        if self.actions.down(&snap, &Action::PanRight) {
            self.camera.move_by(Vec2::new(speed * dt, 0.0));
        }
        if self.actions.down(&snap, &Action::ZoomIn) {
            self.camera.zoom_by(1.0 + dt);
        }
        if self.actions.down(&snap, &Action::ZoomOut) {
            self.camera.zoom_by(1.0 / (1.0 + dt));
        }
        if self.actions.pressed(&snap, &Action::Rotate) {
            self.camera.rotate_by(TAU / 16.0);
        }
    }

    fn draw(&mut self, viewport: Vec2, t: f32) -> Result<(), BatchError> {
        let b = &mut self.batcher;

        // World space.
        b.set_camera(view_projection(&self.camera, viewport));
        let bounds = visible_bounds(&self.camera, viewport);

        let step = 16.0;
        let first = (bounds.left() / step).floor() as i32 - 1;
        let last = (bounds.right() / step).ceil() as i32 + 1;
        let ridge: Vec<Vec2> = (first..=last)
            .map(|i| {
                let x = i as f32 * step;
                let y = 120.0 + 60.0 * (x * 0.004).sin() + 25.0 * (x * 0.013).sin();
                Vec2::new(x, y)
            })
            .collect();
        b.draw_lines(&ridge, Color::rgb(0.55, 0.6, 0.7), 2.0)?;

        let sun = Vec2::new(-200.0, -160.0);
        let breathe = 40.0 + 4.0 * (t * 2.0).sin();
        b.fill_circle(sun, breathe, 48, Color::rgba(1.0, 0.8, 0.3, 0.9))?;
        b.draw_circle(sun, breathe + 8.0, 48, Color::rgba(1.0, 0.8, 0.3, 0.4), 1.0)?;

        // The character bobs in its own frame of reference.
        b.push_transform(
            Mat3::from_translation(Vec2::new(0.0, 80.0 + 4.0 * (t * 6.0).sin()))
                * Mat3::from_angle(0.1 * (t * 3.0).sin()),
        );
        b.fill_rect(Rect::from_center(Vec2::ZERO, Vec2::new(20.0, 32.0)), Color::rgb(0.9, 0.3, 0.35))?;
        b.draw_rect(Rect::from_center(Vec2::ZERO, Vec2::new(20.0, 32.0)), Color::BLACK, 1.0)?;
        b.pop_transform();

        // Screen space HUD.
        b.set_camera(pixel_to_ndc(viewport));
        let panel = Rect::new(16.0, 16.0, 260.0, 72.0);
        b.fill_rounded_rect(panel, 10.0, 6, Color::rgba(0.0, 0.0, 0.0, 0.55))?;
        b.draw_rounded_rect(panel, 10.0, 6, Color::rgba(1.0, 1.0, 1.0, 0.3), 1.0)?;

        let health = 0.5 + 0.5 * (t * 0.5).sin();
        let bar = Rect::new(32.0, 40.0, 228.0, 20.0);
        b.fill_rect(bar, Color::rgb(0.2, 0.05, 0.05))?;
        let filled = Rect::new(bar.left(), bar.top(), bar.width() * health, bar.height());
        b.fill_rect_colors(
            filled,
            [
                Color::rgb(0.9, 0.2, 0.2),
                Color::rgb(0.3, 0.9, 0.3),
                Color::rgb(0.3, 0.9, 0.3),
                Color::rgb(0.9, 0.2, 0.2),
            ],
        )?;
        b.draw_rect(bar, Color::WHITE, 2.0)?;
        Ok(())
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.update(dt);

        let Some(gfx) = &self.gfx else {
            return;
        };
        let viewport = gfx.gpu.viewport();
        let t = now.duration_since(self.start).as_secs_f32();

        if let Err(err) = self.draw(viewport, t) {
            log::warn!("frame geometry dropped: {err}");
            self.batcher.reset();
            return;
        }

        let Some(gfx) = &self.gfx else {
            return;
        };
        match render_frame(&gfx.gpu, &gfx.renderer, &mut self.batcher, ClearColor::default()) {
            Ok(stats) => {
                self.frames += 1;
                if now.duration_since(self.last_report).as_secs_f32() >= 1.0 {
                    log::info!(
                        "{} fps, {} batches, {} draw calls, {} vertices",
                        self.frames,
                        stats.batches,
                        stats.draw_calls,
                        stats.vertices
                    );
                    self.frames = 0;
                    self.last_report = now;
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = gfx.gpu.surface_size();
                if let Some(gfx) = &mut self.gfx {
                    gfx.gpu.resize(w, h);
                }
            }
            Err(err) => log::warn!("surface error: {err}"),
        }
    }
}

impl ApplicationHandler for JamFrame {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("batcher2d: jam frame")
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));
        let gfx = event_loop
            .create_window(attrs)
            .map_err(|e| e.to_string())
            .and_then(|window| {
                let window = Arc::new(window);
                let gpu = GpuContext::new(window.clone()).map_err(|e| e.to_string())?;
                let renderer = BatchRenderer::new(&gpu).map_err(|e| e.to_string())?;
                Ok(Gfx { window, gpu, renderer })
            });
        match gfx {
            Ok(gfx) => self.gfx = Some(gfx),
            Err(err) => {
                log::error!("failed to start renderer: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gfx) = &mut self.gfx {
                    gfx.gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => self.input.release_all(),
            WindowEvent::KeyboardInput { event, .. } => self.input.handle_key_event(&event),
            WindowEvent::CursorMoved { position, .. } => {
                self.input
                    .set_cursor(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(gfx) = &self.gfx {
                    gfx.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let mut app = JamFrame::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
