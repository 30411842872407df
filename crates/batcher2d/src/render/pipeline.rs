//! # Pipeline — One Render Pipeline per Effect, Pass and Topology
//!
//! wgpu bakes the primitive topology into the render pipeline, so every
//! effect pass is compiled four times, once per [`Topology`]. The batcher
//! only ever asks for an `(effect, pass, topology)` triple, and
//! [`BatchRenderer::pipeline`] looks it up.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ BatchRenderer                                               │
//! │                                                             │
//! │  effects[0] BASIC ── pass 0 ── [LineList, LineStrip,        │
//! │                                 TriangleList, TriangleStrip]│
//! │  effects[1] "glow" ── pass 0 ── [...]                       │
//! │                   └── pass 1 ── [...]                       │
//! │                                                             │
//! │  Bind group layouts                                         │
//! │    group 0: primary texture + sampler (fragment-only)       │
//! │    group 1: secondary texture + sampler (fragment-only)     │
//! │                                                             │
//! │  Blend state ─── ALPHA_BLENDING                             │
//! │  Primitive ───── no culling, no depth buffer                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Vertex positions arrive in clip space (the batcher applies the camera on
//! the CPU), so there is no camera uniform. Submission order is draw order,
//! which is why there is no depth buffer either.
//!
//! ## Writing an Effect
//!
//! An effect is WGSL with a `vs_main` and an `fs_main` entry point, taking
//! the [`Vertex`](crate::render2d::Vertex) layout at locations 0..=2. It may
//! sample `@group(1)` for the secondary texture. Registering several sources
//! makes a multi-pass effect; each batch is drawn once per pass.

use super::gpu::{GpuContext, GpuError};
use super::texture::TextureStore;
use crate::render2d::{EffectId, Topology, Vertex};

const TOPOLOGIES: [Topology; 4] = [
    Topology::LineList,
    Topology::LineStrip,
    Topology::TriangleList,
    Topology::TriangleStrip,
];

fn slot(topology: Topology) -> usize {
    match topology {
        Topology::LineList => 0,
        Topology::LineStrip => 1,
        Topology::TriangleList => 2,
        Topology::TriangleStrip => 3,
    }
}

fn primitive_state(topology: Topology) -> wgpu::PrimitiveState {
    let (topology, strip_index_format) = match topology {
        Topology::LineList => (wgpu::PrimitiveTopology::LineList, None),
        Topology::LineStrip => (wgpu::PrimitiveTopology::LineStrip, Some(wgpu::IndexFormat::Uint32)),
        Topology::TriangleList => (wgpu::PrimitiveTopology::TriangleList, None),
        Topology::TriangleStrip => (
            wgpu::PrimitiveTopology::TriangleStrip,
            Some(wgpu::IndexFormat::Uint32),
        ),
    };
    wgpu::PrimitiveState {
        topology,
        strip_index_format,
        front_face: wgpu::FrontFace::Cw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

struct Effect {
    passes: Vec<[wgpu::RenderPipeline; 4]>,
}

/// GPU resources for drawing batches: textures and every effect pipeline.
pub struct BatchRenderer {
    pub textures: TextureStore,
    pipeline_layout: wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    effects: Vec<Effect>,
}

impl BatchRenderer {
    /// Create the renderer with the built-in [`EffectId::BASIC`] effect and
    /// the white default texture.
    pub fn new(gpu: &GpuContext) -> Result<Self, GpuError> {
        let textures = TextureStore::new(gpu);

        let pipeline_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("batch pipeline layout"),
                bind_group_layouts: &[textures.layout(), textures.layout()],
                push_constant_ranges: &[],
            });

        let mut renderer = Self {
            textures,
            pipeline_layout,
            format: gpu.surface_format(),
            effects: Vec::new(),
        };
        let basic = renderer.register_effect(gpu, "basic", &[include_str!("shader.wgsl")])?;
        debug_assert_eq!(basic, EffectId::BASIC);
        Ok(renderer)
    }

    /// Compile an effect from one WGSL source per pass.
    ///
    /// Shader validation errors are caught and returned instead of reaching
    /// the device's uncaptured error handler.
    pub fn register_effect(&mut self, gpu: &GpuContext, label: &str, passes: &[&str]) -> Result<EffectId, GpuError> {
        if passes.is_empty() {
            return Err(GpuError::EmptyEffect(label.to_string()));
        }

        gpu.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let compiled: Vec<[wgpu::RenderPipeline; 4]> = passes
            .iter()
            .enumerate()
            .map(|(i, source)| self.build_pass(gpu, &format!("{label} pass {i}"), source))
            .collect();
        if let Some(err) = pollster::block_on(gpu.device.pop_error_scope()) {
            log::warn!("shader error in effect '{}': {}", label, err);
            return Err(GpuError::Shader {
                label: label.to_string(),
                message: err.to_string(),
            });
        }

        let id = EffectId::from_raw(self.effects.len() as u32);
        self.effects.push(Effect { passes: compiled });
        log::debug!("effect '{}' registered as {:?} ({} passes)", label, id, passes.len());
        Ok(id)
    }

    /// Number of passes of `effect`; unknown effects count as one pass.
    pub fn pass_count(&self, effect: EffectId) -> u32 {
        self.effects
            .get(effect.raw() as usize)
            .map_or(1, |e| e.passes.len() as u32)
    }

    /// The pipeline for one pass of `effect`, falling back to the basic
    /// effect when the effect or pass does not exist.
    pub fn pipeline(&self, effect: EffectId, pass: u32, topology: Topology) -> &wgpu::RenderPipeline {
        let passes = self
            .effects
            .get(effect.raw() as usize)
            .and_then(|e| e.passes.get(pass as usize));
        match passes {
            Some(p) => &p[slot(topology)],
            None => &self.effects[EffectId::BASIC.raw() as usize].passes[0][slot(topology)],
        }
    }

    fn build_pass(&self, gpu: &GpuContext, label: &str, source: &str) -> [wgpu::RenderPipeline; 4] {
        let shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        TOPOLOGIES.map(|topology| {
            gpu.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&self.pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: primitive_state(topology),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        })
    }
}
