//! 词云布局
//!
//! 字号按频率从大到小递推，位置沿椭圆阿基米德螺线从画布中心向外搜索，
//! 用二维前缀和判断矩形区域是否已被占用。

use serde::Serialize;
use std::f32::consts::TAU;
use tracing::debug;

use crate::models::{NounFrequencyMap, RenderOptions};
use crate::services::wordcloud::typesetter::Typesetter;

/// 螺线每圈半径增量（像素）
const SPIRAL_SPACING: f32 = 4.0;
/// 螺线上相邻采样点的弧长（像素）
const SPIRAL_STEP: f32 = 2.0;

/// 已放置的单词
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: u32,
    /// 左上角坐标
    pub x: u32,
    pub y: u32,
    /// 占用区域尺寸（竖排时已交换宽高）
    pub width: u32,
    pub height: u32,
    pub vertical: bool,
}

/// 画布占用情况
struct OccupancyMap {
    width: u32,
    height: u32,
    occupied: Vec<bool>,
    free_cells: usize,
    /// (width + 1) * (height + 1) 的二维前缀和
    integral: Vec<u32>,
}

impl OccupancyMap {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            occupied: vec![false; (width as usize) * (height as usize)],
            free_cells: (width as usize) * (height as usize),
            integral: vec![0; (width as usize + 1) * (height as usize + 1)],
        }
    }

    fn integral_at(&self, x: u32, y: u32) -> u32 {
        self.integral[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// 矩形 [x, x+w) × [y, y+h) 内是否全部空闲
    fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        if x + w > self.width || y + h > self.height {
            return false;
        }
        let sum = self.integral_at(x + w, y + h) + self.integral_at(x, y)
            - self.integral_at(x + w, y)
            - self.integral_at(x, y + h);
        sum == 0
    }

    /// 标记矩形为已占用（超出画布的部分忽略）
    fn mark(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for row in y..y_end {
            let base = row as usize * self.width as usize;
            for col in x..x_end {
                let cell = &mut self.occupied[base + col as usize];
                if !*cell {
                    *cell = true;
                    self.free_cells -= 1;
                }
            }
        }
        self.rebuild_from_row(y);
    }

    /// 从第 `y` 行开始重建前缀和（上方的行不受影响）
    fn rebuild_from_row(&mut self, y: u32) {
        let stride = self.width as usize + 1;
        for row in (y as usize + 1)..=(self.height as usize) {
            let mut row_sum = 0u32;
            for col in 1..=(self.width as usize) {
                row_sum += self.occupied[(row - 1) * self.width as usize + (col - 1)] as u32;
                self.integral[row * stride + col] = self.integral[(row - 1) * stride + col] + row_sum;
            }
        }
    }

    /// 沿螺线寻找能放下 w×h 矩形的左上角
    fn find_position(&self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w > self.width || h > self.height || (w as usize) * (h as usize) > self.free_cells {
            return None;
        }

        let origin_x = (self.width - w) as f32 / 2.0;
        let origin_y = (self.height - h) as f32 / 2.0;
        let (scale_x, scale_y) = if self.width >= self.height {
            (self.width as f32 / self.height as f32, 1.0)
        } else {
            (1.0, self.height as f32 / self.width as f32)
        };
        let max_radius =
            (self.width as f32 / scale_x).max(self.height as f32 / scale_y) * 0.75 + SPIRAL_SPACING;

        let mut theta = 0.0f32;
        loop {
            let radius = SPIRAL_SPACING * theta / TAU;
            if radius > max_radius {
                return None;
            }

            let x = (origin_x + radius * theta.cos() * scale_x).round();
            let y = (origin_y + radius * theta.sin() * scale_y).round();
            if x >= 0.0 && y >= 0.0 && self.is_free(x as u32, y as u32, w, h) {
                return Some((x as u32, y as u32));
            }

            theta += (SPIRAL_STEP / radius.max(1.0)).min(0.5);
        }
    }
}

/// 计算词云布局
///
/// 只取频率最高的 `max_words` 个词；字号降到 `min_font_size` 以下时停止。
pub fn layout(
    frequencies: &NounFrequencyMap,
    options: &RenderOptions,
    typesetter: &dyn Typesetter,
) -> Vec<PlacedWord> {
    let words: Vec<(&str, usize)> = frequencies
        .sorted()
        .into_iter()
        .take(options.max_words)
        .collect();
    let Some(&(_, max_count)) = words.first() else {
        return Vec::new();
    };

    let mut occupancy = OccupancyMap::new(options.width, options.height);
    let mut placed = Vec::with_capacity(words.len());

    let rs = options.relative_scaling.clamp(0.0, 1.0);
    let step = options.font_step.max(1);
    let margin = options.margin;
    let mut font_size = options.max_font_size.unwrap_or(options.height / 2);
    let mut last_freq = 1.0f32;

    'words: for (i, (word, count)) in words.into_iter().enumerate() {
        let freq = count as f32 / max_count as f32;
        if rs != 0.0 && i > 0 {
            font_size = ((rs * freq / last_freq + (1.0 - rs)) * font_size as f32).round() as u32;
        }

        loop {
            if font_size < options.min_font_size {
                debug!("字号已低于 {}，停止布局", options.min_font_size);
                break 'words;
            }

            let (w, h) = typesetter.measure(word, font_size);
            let mut orientations = vec![false];
            if options.allow_vertical {
                orientations.push(true);
            }

            let spot = orientations.into_iter().find_map(|vertical| {
                let (bw, bh) = if vertical { (h, w) } else { (w, h) };
                occupancy
                    .find_position(bw + 2 * margin, bh + 2 * margin)
                    .map(|(x, y)| (x + margin, y + margin, bw, bh, vertical))
            });

            if let Some((x, y, bw, bh, vertical)) = spot {
                occupancy.mark(x - margin, y - margin, bw + 2 * margin, bh + 2 * margin);
                placed.push(PlacedWord {
                    word: word.to_string(),
                    count,
                    font_size,
                    x,
                    y,
                    width: bw,
                    height: bh,
                    vertical,
                });
                break;
            }

            font_size = font_size.saturating_sub(step);
        }

        last_freq = freq;
    }

    debug!("已放置 {} 个词", placed.len());
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    /// 每个字符占 size×size 的方块
    struct BlockTypesetter;

    impl Typesetter for BlockTypesetter {
        fn measure(&self, word: &str, font_size: u32) -> (u32, u32) {
            (word.chars().count() as u32 * font_size, font_size)
        }

        fn rasterize(&self, word: &str, font_size: u32) -> GrayImage {
            let (w, h) = self.measure(word, font_size);
            GrayImage::from_pixel(w, h, image::Luma([255]))
        }
    }

    fn options(width: u32, height: u32) -> RenderOptions {
        RenderOptions {
            width,
            height,
            ..RenderOptions::default()
        }
    }

    fn overlaps(a: &PlacedWord, b: &PlacedWord) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    #[test]
    fn test_empty_map_has_no_layout() {
        let placed = layout(&NounFrequencyMap::new(), &options(200, 100), &BlockTypesetter);
        assert!(placed.is_empty());
    }

    #[test]
    fn test_occupancy_integral() {
        let mut occ = OccupancyMap::new(10, 8);
        assert!(occ.is_free(0, 0, 10, 8));
        occ.mark(2, 3, 4, 2);
        assert!(!occ.is_free(0, 0, 10, 8));
        assert!(!occ.is_free(5, 4, 1, 1));
        assert!(occ.is_free(6, 3, 4, 5));
        assert!(occ.is_free(0, 5, 10, 3));
        assert!(!occ.is_free(8, 0, 3, 1));
    }

    #[test]
    fn test_words_do_not_overlap_and_stay_inside() {
        let freqs: NounFrequencyMap = [
            ("정부", 20usize),
            ("국회", 15),
            ("예산", 12),
            ("경제", 9),
            ("대통령", 7),
            ("여당", 5),
            ("야당", 5),
            ("민생", 3),
            ("회의", 2),
            ("합의", 1),
        ]
        .into_iter()
        .collect();
        let opts = options(400, 200);
        let placed = layout(&freqs, &opts, &BlockTypesetter);

        assert!(!placed.is_empty());
        assert_eq!(placed[0].word, "정부");
        for (i, a) in placed.iter().enumerate() {
            assert!(a.x + a.width <= opts.width);
            assert!(a.y + a.height <= opts.height);
            for b in &placed[i + 1..] {
                assert!(!overlaps(a, b), "{} 与 {} 重叠", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_font_sizes_follow_frequency() {
        let freqs: NounFrequencyMap = [("정부", 100usize), ("국회", 50), ("예산", 10)]
            .into_iter()
            .collect();
        let placed = layout(&freqs, &options(800, 400), &BlockTypesetter);
        assert_eq!(placed.len(), 3);
        assert!(placed[0].font_size >= placed[1].font_size);
        assert!(placed[1].font_size >= placed[2].font_size);
        // 第一个词受画布宽度限制：2 个字 × 字号 + 边距 ≤ 800
        assert!(placed[0].font_size * 2 + 4 <= 800);
    }

    #[test]
    fn test_max_words_limits_layout() {
        let freqs: NounFrequencyMap = (0..30)
            .map(|i| (format!("단어{}", i), 30 - i as usize))
            .collect();
        let opts = RenderOptions {
            max_words: 5,
            ..options(600, 300)
        };
        let placed = layout(&freqs, &opts, &BlockTypesetter);
        assert!(placed.len() <= 5);
    }

    #[test]
    fn test_vertical_fallback_for_tall_canvas() {
        // 画布很窄，水平放不下时改为竖排
        let freqs: NounFrequencyMap = [("대한민국정부", 10usize)].into_iter().collect();
        let opts = RenderOptions {
            max_font_size: Some(40),
            min_font_size: 30,
            ..options(60, 400)
        };
        let placed = layout(&freqs, &opts, &BlockTypesetter);
        assert_eq!(placed.len(), 1);
        assert!(placed[0].vertical);
        assert_eq!(placed[0].width, placed[0].font_size);
    }
}
