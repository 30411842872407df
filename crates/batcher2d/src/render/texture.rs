//! # Texture — Image Data on the GPU
//!
//! Shapes refer to textures through [`TextureHandle`], a copyable index into
//! the [`TextureStore`]. The store owns the GPU textures and one bind group
//! per texture, so binding a texture for a batch is a single
//! `set_bind_group` call.
//!
//! ```text
//! TextureStore
//! ┌───────────────────────────────────────────────┐
//! │ entries: Vec<TextureEntry>                    │
//! │   [0] 1x1 white (default)   ◄── always here  │
//! │   [1] "hud.png"                               │
//! │   [2] "tiles.png"                             │
//! │                                               │
//! │ path_cache: HashMap<PathBuf, TextureHandle>   │
//! │   "hud.png"   → Handle(1)                     │
//! │   "tiles.png" → Handle(2)                     │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Entry 0 is a single white pixel. Untextured shapes sample it and multiply
//! by the vertex color, which yields a flat fill through the same
//! `texture × color` shader path as everything else.
//!
//! The same bind group layout serves the primary (group 0) and secondary
//! (group 1) slot, so any texture can be bound to either.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use wgpu::util::DeviceExt;

use super::gpu::GpuContext;
use crate::render2d::TextureHandle;

/// Failures while creating or loading a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("failed to load texture '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture data is {got} bytes, expected {expected} for {width}x{height} RGBA8")]
    DataSize {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },

    #[error("texture size {width}x{height} is empty")]
    Empty { width: u32, height: u32 },
}

pub(crate) struct TextureEntry {
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

/// Owns every texture the renderer can bind.
pub struct TextureStore {
    entries: Vec<TextureEntry>,
    path_cache: HashMap<PathBuf, TextureHandle>,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl TextureStore {
    /// Create a new store with a 1x1 white default texture at index 0.
    pub fn new(gpu: &GpuContext) -> Self {
        let layout = gpu
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("texture bind group layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let mut store = Self {
            entries: Vec::new(),
            path_cache: HashMap::new(),
            layout,
            sampler,
        };
        let white = store.create_entry(gpu, "white 1x1", 1, 1, &[255u8, 255, 255, 255]);
        store.entries.push(white);
        store
    }

    pub(crate) fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group for `handle`, or for the white texture if the handle is
    /// unknown.
    pub(crate) fn bind_group(&self, handle: TextureHandle) -> &wgpu::BindGroup {
        match self.entries.get(handle.raw() as usize) {
            Some(entry) => &entry.bind_group,
            None => {
                log::warn!("unknown texture handle {}, binding white", handle.raw());
                &self.entries[TextureHandle::WHITE.raw() as usize].bind_group
            }
        }
    }

    /// Pixel size of `handle`, if it exists.
    pub fn size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.entries
            .get(handle.raw() as usize)
            .map(|e| (e.width, e.height))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Upload raw RGBA8 pixels and return a handle.
    pub fn create_texture_from_rgba(
        &mut self,
        gpu: &GpuContext,
        label: &str,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Result<TextureHandle, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(TextureError::DataSize {
                width,
                height,
                expected,
                got: data.len(),
            });
        }

        let entry = self.create_entry(gpu, label, width, height, data);
        let handle = TextureHandle::from_raw(self.entries.len() as u32);
        self.entries.push(entry);
        log::debug!("texture '{}' ({}x{}) → {:?}", label, width, height, handle);
        Ok(handle)
    }

    /// Load a PNG or JPEG from disk and return a handle.
    ///
    /// The texture is cached by path; loading the same path twice returns
    /// the same handle without a second upload.
    pub fn load_texture(&mut self, gpu: &GpuContext, path: impl AsRef<Path>) -> Result<TextureHandle, TextureError> {
        let path = path.as_ref();
        if let Some(&handle) = self.path_cache.get(path) {
            return Ok(handle);
        }

        let img = image::open(path)
            .map_err(|source| TextureError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let label = path.display().to_string();
        let handle = self.create_texture_from_rgba(gpu, &label, width, height, img.as_raw())?;

        self.path_cache.insert(path.to_path_buf(), handle);
        log::info!("loaded texture {}", label);
        Ok(handle)
    }

    fn create_entry(&self, gpu: &GpuContext, label: &str, width: u32, height: u32, data: &[u8]) -> TextureEntry {
        let texture = gpu.device.create_texture_with_data(
            &gpu.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        TextureEntry {
            bind_group,
            width,
            height,
        }
    }
}
