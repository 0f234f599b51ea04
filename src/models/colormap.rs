/// 配色方案枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cool,
    Hot,
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Colormap {
    /// 全部配色方案（界面中的可选顺序）
    pub const ALL: [Colormap; 10] = [
        Colormap::Viridis,
        Colormap::Plasma,
        Colormap::Inferno,
        Colormap::Magma,
        Colormap::Cool,
        Colormap::Hot,
        Colormap::Spring,
        Colormap::Summer,
        Colormap::Autumn,
        Colormap::Winter,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Cool => "cool",
            Colormap::Hot => "hot",
            Colormap::Spring => "spring",
            Colormap::Summer => "summer",
            Colormap::Autumn => "autumn",
            Colormap::Winter => "winter",
        }
    }

    /// 从名称解析（忽略大小写和首尾空白）
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.name() == s)
    }

    /// 所有名称，用逗号连接（用于帮助信息）
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// 颜色节点，按等间距分布在 [0, 1] 上
    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            Colormap::Viridis => &[
                [0x44, 0x01, 0x54],
                [0x3b, 0x52, 0x8b],
                [0x21, 0x91, 0x8c],
                [0x5e, 0xc9, 0x62],
                [0xfd, 0xe7, 0x25],
            ],
            Colormap::Plasma => &[
                [0x0d, 0x08, 0x87],
                [0x7e, 0x03, 0xa8],
                [0xcc, 0x47, 0x78],
                [0xf8, 0x95, 0x40],
                [0xf0, 0xf9, 0x21],
            ],
            Colormap::Inferno => &[
                [0x00, 0x00, 0x04],
                [0x42, 0x0a, 0x68],
                [0x93, 0x26, 0x67],
                [0xdd, 0x51, 0x3a],
                [0xfc, 0xa5, 0x0a],
                [0xfc, 0xff, 0xa4],
            ],
            Colormap::Magma => &[
                [0x00, 0x00, 0x04],
                [0x3b, 0x0f, 0x70],
                [0x8c, 0x29, 0x81],
                [0xde, 0x49, 0x68],
                [0xfe, 0x9f, 0x6d],
                [0xfc, 0xfd, 0xbf],
            ],
            Colormap::Cool => &[[0, 255, 255], [255, 0, 255]],
            Colormap::Hot => &[[10, 0, 0], [255, 0, 0], [255, 255, 0], [255, 255, 255]],
            Colormap::Spring => &[[255, 0, 255], [255, 255, 0]],
            Colormap::Summer => &[[0, 128, 102], [255, 255, 102]],
            Colormap::Autumn => &[[255, 0, 0], [255, 255, 0]],
            Colormap::Winter => &[[0, 0, 255], [0, 255, 128]],
        }
    }

    /// 在 `t ∈ [0, 1]` 处取色（线性插值，越界会被截断）
    pub fn sample(self, t: f32) -> [u8; 3] {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f32;
        let lower = (scaled.floor() as usize).min(stops.len() - 1);
        let upper = (lower + 1).min(stops.len() - 1);
        let frac = scaled - lower as f32;

        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let a = stops[lower][i] as f32;
            let b = stops[upper][i] as f32;
            *channel = (a + (b - a) * frac).round() as u8;
        }
        out
    }
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
