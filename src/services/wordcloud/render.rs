//! 词云渲染：按布局把单词蒙版着色后合成到画布上

use image::{imageops, ImageFormat, Rgb, RgbImage};
use rustc_hash::FxHasher;
use std::hash::Hasher;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

use crate::error::RenderError;
use crate::models::{Colormap, NounFrequencyMap, RenderOptions};
use crate::services::wordcloud::layout::{layout, PlacedWord};
use crate::services::wordcloud::typesetter::Typesetter;

/// 渲染好的词云
#[derive(Debug, Clone)]
pub struct WordCloudImage {
    pub image: RgbImage,
    pub words: Vec<PlacedWord>,
    pub colormap: Colormap,
}

impl WordCloudImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// 编码为 PNG 字节
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Cursor::new(Vec::new());
        self.image.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// 保存为 PNG 文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        self.image.save_with_format(path, ImageFormat::Png)?;
        info!("💾 词云已保存: {}", path.display());
        Ok(())
    }
}

/// 单词在色带上的位置，同一个词每次都得到同一种颜色
pub fn color_position(word: &str) -> f32 {
    let mut hasher = FxHasher::default();
    hasher.write(word.as_bytes());
    (hasher.finish() % 1001) as f32 / 1000.0
}

/// 渲染词云
///
/// 频率表为空或一个词都放不下时返回 `None`。
pub fn render(
    frequencies: &NounFrequencyMap,
    options: &RenderOptions,
    typesetter: &dyn Typesetter,
) -> Option<WordCloudImage> {
    if frequencies.is_empty() || options.width == 0 || options.height == 0 {
        return None;
    }

    let words = layout(frequencies, options, typesetter);
    if words.is_empty() {
        return None;
    }

    let mut image = RgbImage::from_pixel(options.width, options.height, Rgb(options.background));
    for word in &words {
        let mut mask = typesetter.rasterize(&word.word, word.font_size);
        if word.vertical {
            mask = imageops::rotate270(&mask);
        }
        let color = options.colormap.sample(color_position(&word.word));
        blend_mask(&mut image, &mask, word.x, word.y, color);
    }

    debug!(
        "词云渲染完成: {}x{}, {} 个词",
        options.width,
        options.height,
        words.len()
    );
    Some(WordCloudImage {
        image,
        words,
        colormap: options.colormap,
    })
}

/// 以蒙版覆盖率为透明度，把颜色混合到画布上
fn blend_mask(canvas: &mut RgbImage, mask: &image::GrayImage, x: u32, y: u32, color: [u8; 3]) {
    for (mx, my, coverage) in mask.enumerate_pixels() {
        let alpha = coverage.0[0] as u32;
        if alpha == 0 {
            continue;
        }
        let (px, py) = (x + mx, y + my);
        if px >= canvas.width() || py >= canvas.height() {
            continue;
        }
        let pixel = canvas.get_pixel_mut(px, py);
        for (channel, &fg) in pixel.0.iter_mut().zip(color.iter()) {
            let bg = *channel as u32;
            *channel = ((fg as u32 * alpha + bg * (255 - alpha) + 127) / 255) as u8;
        }
    }
}
