//! # State — What Decides Whether Two Shapes Share a Draw Call
//!
//! A [`RenderState`] is everything the rasterizer has to switch between two
//! draw calls: the effect (shader), the primitive topology, the bound
//! textures, and for line lists the line width. Two shapes can go into the
//! same [`Batch`] only when their states are [compatible](RenderState::compatible_with).
//!
//! ## Wildcard Textures
//!
//! A texture slot set to `None` matches anything. The relation is therefore
//! not transitive: `None` is compatible with both `A` and `B`, while `A` and
//! `B` are not compatible with each other. Because the batcher only compares
//! neighbours, a wildcard shape between an `A` and a `B` shape can bridge
//! them into one batch. The built-in shape builders never submit wildcards
//! (untextured shapes use [`TextureHandle::WHITE`]), so this only matters for
//! callers that build a `RenderState` by hand.

/// Handle to a texture owned by the rasterizer backend.
///
/// Handle 0 is always the 1×1 white texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub(crate) u32);

impl TextureHandle {
    /// The built-in 1×1 white texture.
    pub const WHITE: Self = Self(0);

    /// Wrap a raw backend index.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Identity of a shader/effect known to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(pub(crate) u32);

impl EffectId {
    /// Textured, vertex-colored, alpha-blended. Every backend provides it.
    pub const BASIC: Self = Self(0);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// How indices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Topology {
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
}

impl Topology {
    /// Number of primitives `index_count` indices produce.
    pub fn primitive_count(self, index_count: u32) -> u32 {
        match self {
            Topology::LineList => index_count / 2,
            Topology::LineStrip => index_count.saturating_sub(1),
            Topology::TriangleList => index_count / 3,
            Topology::TriangleStrip => index_count.saturating_sub(2),
        }
    }

    /// Number of indices needed for `primitives` primitives.
    pub fn index_count(self, primitives: u32) -> u32 {
        if primitives == 0 {
            return 0;
        }
        match self {
            Topology::LineList => primitives * 2,
            Topology::LineStrip => primitives + 1,
            Topology::TriangleList => primitives * 3,
            Topology::TriangleStrip => primitives + 2,
        }
    }
}

/// The state a batch is rasterized with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub effect: EffectId,
    pub topology: Topology,
    pub texture: Option<TextureHandle>,
    /// Reserved second texture slot, bound alongside `texture`.
    pub secondary: Option<TextureHandle>,
    /// Only meaningful for [`Topology::LineList`].
    pub line_width: f32,
}

impl RenderState {
    /// Line-list state with the given texture and width.
    pub fn line(effect: EffectId, texture: TextureHandle, width: f32) -> Self {
        Self {
            effect,
            topology: Topology::LineList,
            texture: Some(texture),
            secondary: None,
            line_width: width,
        }
    }

    /// Triangle-list state with the given texture.
    pub fn fill(effect: EffectId, texture: TextureHandle) -> Self {
        Self {
            effect,
            topology: Topology::TriangleList,
            texture: Some(texture),
            secondary: None,
            line_width: 1.0,
        }
    }

    pub fn with_secondary(mut self, texture: TextureHandle) -> Self {
        self.secondary = Some(texture);
        self
    }

    /// Whether geometry in `other` may join a batch drawn with `self`.
    pub fn compatible_with(&self, other: &RenderState) -> bool {
        fn slot_matches(a: Option<TextureHandle>, b: Option<TextureHandle>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
        }

        self.effect == other.effect
            && self.topology == other.topology
            && slot_matches(self.texture, other.texture)
            && slot_matches(self.secondary, other.secondary)
            && (self.topology != Topology::LineList || self.line_width == other.line_width)
    }
}

/// A closed run of indices that shares one [`RenderState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Batch {
    pub state: RenderState,
    /// First index in the shared index buffer.
    pub start: u32,
    pub index_count: u32,
}

impl Batch {
    pub fn primitive_count(&self) -> u32 {
        self.state.topology.primitive_count(self.index_count)
    }

    /// Range into the shared index buffer.
    pub fn index_range(&self) -> std::ops::Range<u32> {
        self.start..self.start + self.index_count
    }
}
