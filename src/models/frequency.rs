use rustc_hash::FxHashMap;
use serde::Serialize;

/// 名词频率表：名词 → 出现次数
///
/// 计数使用 `usize`，因此天然非负。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NounFrequencyMap {
    counts: FxHashMap<String, usize>,
}

/// 排名表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedNoun {
    pub rank: usize,
    pub noun: String,
    pub count: usize,
}

impl NounFrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次出现
    pub fn add(&mut self, noun: impl Into<String>) {
        *self.counts.entry(noun.into()).or_insert(0) += 1;
    }

    /// 直接设置计数（0 会移除该词）
    pub fn insert(&mut self, noun: impl Into<String>, count: usize) {
        let noun = noun.into();
        if count == 0 {
            self.counts.remove(&noun);
        } else {
            self.counts.insert(noun, count);
        }
    }

    pub fn get(&self, noun: &str) -> Option<usize> {
        self.counts.get(noun).copied()
    }

    pub fn contains(&self, noun: &str) -> bool {
        self.counts.contains_key(noun)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 所有出现次数之和
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// 按谓词保留条目，返回新表（键只会减少，不会增加）
    pub fn retain_keys<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        Self {
            counts: self
                .counts
                .iter()
                .filter(|(k, _)| keep(k.as_str()))
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        }
    }

    /// 按频率降序排列的全部条目，频率相同时按词典序
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// 前 `n` 个名词（带排名，从 1 开始）
    pub fn top(&self, n: usize) -> Vec<RankedNoun> {
        self.sorted()
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, (noun, count))| RankedNoun {
                rank: i + 1,
                noun: noun.to_string(),
                count,
            })
            .collect()
    }
}

impl<'a> FromIterator<&'a str> for NounFrequencyMap {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut map = Self::new();
        for noun in iter {
            map.add(noun);
        }
        map
    }
}

impl FromIterator<String> for NounFrequencyMap {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut map = Self::new();
        for noun in iter {
            map.add(noun);
        }
        map
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for NounFrequencyMap {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (noun, count) in iter {
            map.insert(noun, count);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_occurrences() {
        let map: NounFrequencyMap = ["정부", "예산", "정부", "국회", "정부"].into_iter().collect();
        assert_eq!(map.get("정부"), Some(3));
        assert_eq!(map.get("예산"), Some(1));
        assert_eq!(map.len(), 3);
        assert_eq!(map.total(), 5);
    }

    #[test]
    fn test_top_orders_by_count_then_lexically() {
        let map: NounFrequencyMap = [("국회", 2usize), ("예산", 5), ("경제", 2), ("정부", 7)]
            .into_iter()
            .collect();

        let top = map.top(3);
        let nouns: Vec<&str> = top.iter().map(|r| r.noun.as_str()).collect();
        assert_eq!(nouns, vec!["정부", "예산", "경제"]);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[2].count, 2);
    }

    #[test]
    fn test_insert_zero_removes() {
        let mut map = NounFrequencyMap::new();
        map.insert("정부", 4);
        map.insert("정부", 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_retain_keys_keeps_counts() {
        let map: NounFrequencyMap = [("정부", 3usize), ("기자", 9)].into_iter().collect();
        let kept = map.retain_keys(|k| k != "기자");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.get("정부"), Some(3));
    }
}
