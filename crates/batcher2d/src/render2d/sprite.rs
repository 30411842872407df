//! Sprites: a texture plus the UV corners of the region to show.
//!
//! [`SpriteSheet`] describes a uniform grid of frames. Frame indices are
//! row-major (left-to-right, top-to-bottom), with optional padding between
//! frames and an offset from the top-left corner of the texture.

use serde::{Deserialize, Serialize};

use super::state::TextureHandle;
use crate::math::{Rect, Vec2};

/// A region of a texture, ready for [`Batcher::fill_rect_sprite`](super::Batcher::fill_rect_sprite).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureHandle,
    /// UVs in TL, TR, BR, BL order.
    pub uvs: [Vec2; 4],
}

impl Sprite {
    /// The whole texture.
    pub fn new(texture: TextureHandle) -> Self {
        Self::from_uv_rect(texture, Rect::FULL)
    }

    /// The region `uv` of the texture, in normalized coordinates.
    pub fn from_uv_rect(texture: TextureHandle, uv: Rect) -> Self {
        Self {
            texture,
            uvs: uv.corners(),
        }
    }

    /// Mirror horizontally.
    pub fn flipped_x(self) -> Self {
        let [tl, tr, br, bl] = self.uvs;
        Self {
            uvs: [tr, tl, bl, br],
            ..self
        }
    }

    /// Mirror vertically.
    pub fn flipped_y(self) -> Self {
        let [tl, tr, br, bl] = self.uvs;
        Self {
            uvs: [bl, br, tr, tl],
            ..self
        }
    }
}

/// A uniform grid of frames in one texture.
///
/// Deserializing rejects sheets with zero columns or rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SheetData")]
pub struct SpriteSheet {
    pub columns: u32,
    pub rows: u32,
    /// Size of one frame in pixels.
    pub tile_size: Vec2,
    /// Space between frames in pixels.
    pub padding: Vec2,
    /// Top-left margin in pixels.
    pub offset: Vec2,
    /// Total texture dimensions in pixels.
    pub texture_size: Vec2,
}

#[derive(Deserialize)]
struct SheetData {
    columns: u32,
    rows: u32,
    tile_size: Vec2,
    #[serde(default)]
    padding: Vec2,
    #[serde(default)]
    offset: Vec2,
    texture_size: Vec2,
}

impl TryFrom<SheetData> for SpriteSheet {
    type Error = String;

    fn try_from(data: SheetData) -> Result<Self, Self::Error> {
        if data.columns == 0 || data.rows == 0 {
            return Err(format!(
                "sprite sheet needs at least one column and row, got {}x{}",
                data.columns, data.rows
            ));
        }
        Ok(Self {
            columns: data.columns,
            rows: data.rows,
            tile_size: data.tile_size,
            padding: data.padding,
            offset: data.offset,
            texture_size: data.texture_size,
        })
    }
}

impl SpriteSheet {
    /// A sheet that divides the whole texture into `columns × rows` frames.
    pub fn new(columns: u32, rows: u32, texture_size: Vec2) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            columns,
            rows,
            tile_size: texture_size / Vec2::new(columns as f32, rows as f32),
            padding: Vec2::ZERO,
            offset: Vec2::ZERO,
            texture_size,
        }
    }

    pub fn with_padding(mut self, padding: Vec2) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn frame_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// UV rectangle of the frame at `column`, `row`.
    pub fn frame_rect_at(&self, column: u32, row: u32) -> Rect {
        let step = self.tile_size + self.padding;
        let x = self.offset.x + column as f32 * step.x;
        let y = self.offset.y + row as f32 * step.y;
        Rect::from_pixels(
            x,
            y,
            self.tile_size.x,
            self.tile_size.y,
            self.texture_size.x,
            self.texture_size.y,
        )
    }

    /// UV rectangle of frame `index` (row-major). Indices past the end wrap.
    /// An empty grid yields the whole texture.
    pub fn frame_rect(&self, index: u32) -> Rect {
        if self.frame_count() == 0 {
            return Rect::FULL;
        }
        let index = index % self.frame_count();
        self.frame_rect_at(index % self.columns, index / self.columns)
    }

    pub fn sprite(&self, texture: TextureHandle, index: u32) -> Sprite {
        Sprite::from_uv_rect(texture, self.frame_rect(index))
    }

    pub fn sprite_at(&self, texture: TextureHandle, column: u32, row: u32) -> Sprite {
        Sprite::from_uv_rect(texture, self.frame_rect_at(column, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn whole_texture_sprite() {
        let s = Sprite::new(TextureHandle::WHITE);
        assert_eq!(s.uvs[0], Vec2::ZERO);
        assert_eq!(s.uvs[2], Vec2::ONE);
    }

    #[test]
    fn flips_swap_the_right_corners() {
        let s = Sprite::new(TextureHandle::WHITE).flipped_x();
        assert_eq!(s.uvs[0], Vec2::new(1.0, 0.0));
        assert_eq!(s.uvs[3], Vec2::new(1.0, 1.0));

        let s = Sprite::new(TextureHandle::WHITE).flipped_y();
        assert_eq!(s.uvs[0], Vec2::new(0.0, 1.0));
        assert_eq!(s.uvs[2], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn frames_are_row_major() {
        let sheet = SpriteSheet::new(4, 2, Vec2::new(128.0, 64.0));
        // Frame 5 is column 1, row 1.
        let r = sheet.frame_rect(5);
        assert_relative_eq!(r.min.x, 0.25);
        assert_relative_eq!(r.min.y, 0.5);
        assert_relative_eq!(r.max.x, 0.5);
        assert_relative_eq!(r.max.y, 1.0);
        assert_eq!(sheet.frame_rect(5), sheet.frame_rect_at(1, 1));
    }

    #[test]
    fn columns_and_rows_are_not_swapped() {
        let sheet = SpriteSheet::new(4, 1, Vec2::new(64.0, 16.0));
        let r = sheet.frame_rect_at(3, 0);
        assert_relative_eq!(r.min.x, 0.75);
        assert_relative_eq!(r.min.y, 0.0);
    }

    #[test]
    fn padding_and_offset_shift_frames() {
        let sheet = SpriteSheet::new(2, 2, Vec2::new(100.0, 100.0))
            .with_padding(Vec2::splat(2.0))
            .with_offset(Vec2::splat(1.0));
        let r = sheet.frame_rect_at(1, 0);
        // x = 1 + (50 + 2) = 53 px
        assert_relative_eq!(r.min.x, 0.53);
    }

    #[test]
    fn index_wraps() {
        let sheet = SpriteSheet::new(2, 2, Vec2::splat(32.0));
        assert_eq!(sheet.frame_rect(4), sheet.frame_rect(0));
        let s = sheet.sprite(TextureHandle::from_raw(2), 1);
        assert_eq!(s.texture.raw(), 2);
    }

    #[test]
    fn loaded_sheet_rejects_empty_grid() {
        let json = r#"{"columns":0,"rows":2,"tile_size":[16,16],"texture_size":[64,64]}"#;
        let err = serde_json::from_str::<SpriteSheet>(json).unwrap_err();
        assert!(err.to_string().contains("0x2"));

        let json = r#"{"columns":4,"rows":4,"tile_size":[16,16],"texture_size":[64,64]}"#;
        let sheet: SpriteSheet = serde_json::from_str(json).unwrap();
        assert_eq!(sheet.frame_count(), 16);
        assert_eq!(sheet.padding, Vec2::ZERO);
    }

    #[test]
    fn emptied_grid_falls_back_to_whole_texture() {
        let mut sheet = SpriteSheet::new(2, 2, Vec2::splat(32.0));
        sheet.columns = 0;
        assert_eq!(sheet.frame_rect(1), Rect::FULL);
    }
}
