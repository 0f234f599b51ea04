use serde::{Deserialize, Serialize};

use crate::models::Colormap;

/// 词云渲染参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// 画布宽度（像素）
    pub width: u32,
    /// 画布高度（像素）
    pub height: u32,
    /// 配色方案
    pub colormap: Colormap,
    /// 背景色 RGB
    pub background: [u8; 3],
    /// 最多绘制的词数
    pub max_words: usize,
    /// 字号与频率的相关程度，0 只看排名，1 完全按频率比例
    pub relative_scaling: f32,
    pub min_font_size: u32,
    /// 最大字号，None 时取画布高度的一半
    pub max_font_size: Option<u32>,
    /// 放不下时每次缩小的字号
    pub font_step: u32,
    /// 词与词之间的留白
    pub margin: u32,
    /// 水平放不下时是否尝试竖排
    pub allow_vertical: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 700,
            colormap: Colormap::Viridis,
            background: [255, 255, 255],
            max_words: 100,
            relative_scaling: 0.3,
            min_font_size: 4,
            max_font_size: None,
            font_step: 1,
            margin: 2,
            allow_vertical: true,
        }
    }
}

/// 单次分析的参数（界面上可调整的部分）
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// 排名表显示的名词数量
    pub top_n: usize,
    /// 用户追加的停用词
    pub custom_stopwords: Vec<String>,
    pub render: RenderOptions,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_n: 50,
            custom_stopwords: Vec::new(),
            render: RenderOptions::default(),
        }
    }
}

/// 解析 `#RRGGBB` / `RRGGBB` 形式的颜色
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("10a0Ff"), Some([0x10, 0xa0, 0xff]));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("white"), None);
    }

    #[test]
    fn test_defaults_match_app_layout() {
        let opts = AnalysisOptions::default();
        assert_eq!(opts.top_n, 50);
        assert_eq!(opts.render.width, 1400);
        assert_eq!(opts.render.height, 700);
        assert_eq!(opts.render.max_words, 100);
    }
}
