//! 停用词过滤
//!
//! 默认停用词在编译期生成（`phf`），用户停用词在运行时追加。

use phf::phf_set;
use rustc_hash::FxHashSet;

use crate::models::NounFrequencyMap;

/// 默认停用词：媒体名、记者署名、版权声明和常见的单位名词
pub static DEFAULT_STOPWORDS: phf::Set<&'static str> = phf_set! {
    "기자", "뉴스", "사진", "연합뉴스", "중앙일보", "동아일보",
    "조선일보", "한겨레", "경향신문", "이데일리", "뉴시스",
    "것", "수", "등", "때", "년", "월", "일", "시", "분",
    "대한민국", "서울", "한국", "우리", "저희", "관련",
    "제공", "무단", "전재", "재배포", "금지", "저작권자",
};

/// 停用词过滤器
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    /// 用户追加的停用词
    custom: FxHashSet<String>,
}

impl StopwordFilter {
    /// 只包含默认停用词
    pub fn new() -> Self {
        Self::default()
    }

    /// 默认停用词 + 用户停用词
    pub fn with_custom<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new();
        filter.add_stopwords(words);
        filter
    }

    /// 追加停用词（去掉首尾空白，忽略空串）
    pub fn add_stopwords<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                self.custom.insert(word.to_string());
            }
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        DEFAULT_STOPWORDS.contains(word) || self.custom.contains(word)
    }

    /// 用户停用词数量
    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// 去掉停用词，其余条目及计数保持不变
    pub fn remove_stopwords(&self, counts: &NounFrequencyMap) -> NounFrequencyMap {
        counts.retain_keys(|noun| !self.is_stopword(noun))
    }
}

/// 解析逗号分隔的停用词列表
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_stopwords_removed() {
        let counts: NounFrequencyMap = [("기자", 4usize), ("정부", 3), ("연합뉴스", 1)]
            .into_iter()
            .collect();
        let filtered = StopwordFilter::new().remove_stopwords(&counts);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.get("정부"), Some(3));
    }

    #[test]
    fn test_custom_stopwords() {
        let counts: NounFrequencyMap = [("정부", 3usize), ("국회", 2)].into_iter().collect();
        let filter = StopwordFilter::with_custom(parse_list(" 국회 , ,"));
        assert_eq!(filter.custom_len(), 1);
        let filtered = filter.remove_stopwords(&counts);
        assert!(!filtered.contains("국회"));
        assert!(filtered.contains("정부"));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("단어1, 단어2,단어3 "), vec!["단어1", "단어2", "단어3"]);
        assert!(parse_list("  ,  ").is_empty());
    }

    proptest! {
        #[test]
        fn prop_filtered_keys_are_subset(
            entries in prop::collection::vec(("[가-힣]{1,4}", 1usize..50), 0..40),
            custom in prop::collection::vec("[가-힣]{1,3}", 0..5),
        ) {
            let counts: NounFrequencyMap = entries.into_iter().collect();
            let filtered = StopwordFilter::with_custom(&custom).remove_stopwords(&counts);

            prop_assert!(filtered.len() <= counts.len());
            for (noun, count) in filtered.iter() {
                prop_assert_eq!(counts.get(noun), Some(count));
                prop_assert!(!DEFAULT_STOPWORDS.contains(noun));
                prop_assert!(!custom.iter().any(|c| c == noun));
            }
        }
    }
}
