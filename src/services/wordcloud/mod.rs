//! 词云生成
//!
//! - `typesetter` - 字体测量与光栅化
//! - `layout` - 字号递推与螺线定位
//! - `render` - 着色合成与 PNG 编码

pub mod layout;
pub mod render;
pub mod typesetter;

pub use layout::{layout, PlacedWord};
pub use render::{render, WordCloudImage};
pub use typesetter::{FontTypesetter, Typesetter};
