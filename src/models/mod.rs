pub mod article;
pub mod colormap;
pub mod frequency;
pub mod options;

pub use article::{Article, BodySource, UNTITLED};
pub use colormap::Colormap;
pub use frequency::{NounFrequencyMap, RankedNoun};
pub use options::{parse_hex_color, AnalysisOptions, RenderOptions};
