//! 字体排版：测量单词尺寸、把单词光栅化为覆盖率蒙版

use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont};
use image::GrayImage;
use std::path::Path;
use tracing::{debug, info};

use crate::error::RenderError;

/// 未指定字体时依次尝试的路径（需要包含韩文字形）
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "C:/Windows/Fonts/malgun.ttf",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
];

/// 排版接口
///
/// `rasterize` 返回的蒙版尺寸必须与 `measure` 一致。
pub trait Typesetter: Send + Sync {
    /// 水平排版时的 (宽, 高)
    fn measure(&self, word: &str, font_size: u32) -> (u32, u32);

    /// 水平排版的覆盖率蒙版（0 透明，255 完全覆盖）
    fn rasterize(&self, word: &str, font_size: u32) -> GrayImage;
}

/// 基于 TrueType/OpenType 字体的排版器
pub struct FontTypesetter {
    font: FontVec,
    path: String,
}

impl FontTypesetter {
    /// 从字体文件加载（.ttc 取第一个字体）
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let data = std::fs::read(path).map_err(|source| RenderError::FontRead {
            path: display.clone(),
            source,
        })?;
        let font = FontVec::try_from_vec_and_index(data, 0)
            .map_err(|_| RenderError::FontParse {
                path: display.clone(),
            })?;

        debug!("字体已加载: {}", path.display());
        Ok(Self {
            font,
            path: display,
        })
    }

    /// 优先使用指定字体，否则在常见路径中查找
    pub fn discover(explicit: Option<&str>) -> Result<Self, RenderError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let found = FONT_CANDIDATES
            .iter()
            .find(|p| Path::new(p).exists())
            .ok_or(RenderError::FontNotFound)?;
        info!("🔤 使用字体: {}", found);
        Self::from_file(found)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 排布字形，返回字形列表及整体尺寸
    fn layout_glyphs(&self, word: &str, font_size: u32) -> (Vec<Glyph>, f32, f32) {
        let scale = PxScale::from(font_size as f32);
        let scaled = self.font.as_scaled(scale);

        let mut caret = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(word.len());

        for c in word.chars() {
            let id = scaled.glyph_id(c);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            glyphs.push(id.with_scale_and_position(scale, point(caret, scaled.ascent())));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }

        let height = scaled.ascent() - scaled.descent();
        (glyphs, caret, height)
    }
}

impl Typesetter for FontTypesetter {
    fn measure(&self, word: &str, font_size: u32) -> (u32, u32) {
        let (_, width, height) = self.layout_glyphs(word, font_size);
        (width.ceil().max(1.0) as u32, height.ceil().max(1.0) as u32)
    }

    fn rasterize(&self, word: &str, font_size: u32) -> GrayImage {
        let (glyphs, width, height) = self.layout_glyphs(word, font_size);
        let w = width.ceil().max(1.0) as u32;
        let h = height.ceil().max(1.0) as u32;
        let mut mask = GrayImage::new(w, h);

        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
                    return;
                }
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let pixel = mask.get_pixel_mut(x as u32, y as u32);
                pixel.0[0] = pixel.0[0].max(value);
            });
        }

        mask
    }
}
