//! 形态素分析服务 - 业务能力层
//!
//! 只负责"从正文中数出名词"：
//! - `MorphAnalyzer` 是分析器的接口，可替换为基于词典的实现
//! - `extract_nouns` 只保留一般名词/专有名词，且长度大于 1

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::models::NounFrequencyMap;

/// 词性标签（世宗标注体系的子集）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    /// 一般名词
    NNG,
    /// 专有名词
    NNP,
    /// 代词
    NP,
    /// 动词/形容词等谓词
    VV,
    /// 谓词的冠形词形、副词形、连接形（어려운、크게、올라）
    VA,
    /// 系词（이다）
    VCP,
    /// 助词
    J,
    /// 名词后缀（들）
    XSN,
    /// 副词、连接词等功能词
    MAG,
    /// 外文
    SL,
    /// 数字
    SN,
    /// 符号
    SW,
}

impl PosTag {
    pub fn is_noun(self) -> bool {
        matches!(self, PosTag::NNG | PosTag::NNP)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 一个形态素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    pub form: String,
    pub tag: PosTag,
}

impl Morpheme {
    pub fn new(form: impl Into<String>, tag: PosTag) -> Self {
        Self {
            form: form.into(),
            tag,
        }
    }
}

/// 形态素分析器
pub trait MorphAnalyzer: Send + Sync {
    /// 把文本切分为带词性的形态素序列
    fn analyze(&self, text: &str) -> Vec<Morpheme>;
}

impl<T: MorphAnalyzer + ?Sized> MorphAnalyzer for Arc<T> {
    fn analyze(&self, text: &str) -> Vec<Morpheme> {
        (**self).analyze(text)
    }
}

/// 名词最小长度（字符数，不含）
pub const MIN_NOUN_CHARS: usize = 1;

/// 统计正文中的名词频率
pub fn extract_nouns<A: MorphAnalyzer + ?Sized>(analyzer: &A, text: &str) -> NounFrequencyMap {
    let morphemes = analyzer.analyze(text);
    debug!("形态素 {} 个", morphemes.len());

    morphemes
        .into_iter()
        .filter(|m| m.tag.is_noun() && m.form.chars().count() > MIN_NOUN_CHARS)
        .map(|m| m.form)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 按空白切分，以 "+" 结尾的词标为名词
    struct FixedAnalyzer;

    impl MorphAnalyzer for FixedAnalyzer {
        fn analyze(&self, text: &str) -> Vec<Morpheme> {
            text.split_whitespace()
                .map(|w| match w.strip_suffix('+') {
                    Some(noun) => Morpheme::new(noun, PosTag::NNP),
                    None => Morpheme::new(w, PosTag::VV),
                })
                .collect()
        }
    }

    #[test]
    fn test_extract_nouns_keeps_only_multi_char_nouns() {
        let map = extract_nouns(&FixedAnalyzer, "정부+ 발표 정부+ 집+ 국회+ 했다");
        assert_eq!(map.get("정부"), Some(2));
        assert_eq!(map.get("국회"), Some(1));
        assert!(!map.contains("집"));
        assert!(!map.contains("발표"));
    }

    #[test]
    fn test_extract_nouns_through_arc() {
        let analyzer: Arc<dyn MorphAnalyzer> = Arc::new(FixedAnalyzer);
        let map = extract_nouns(&analyzer, "경제+ 경제+");
        assert_eq!(map.get("경제"), Some(2));
    }

    #[test]
    fn test_pos_tag_display() {
        assert_eq!(PosTag::NNG.to_string(), "NNG");
        assert!(PosTag::NNP.is_noun());
        assert!(!PosTag::J.is_noun());
        assert!(!PosTag::NP.is_noun());
        assert!(!PosTag::VA.is_noun());
    }
}
