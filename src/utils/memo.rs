//! 按输入值记忆结果的简单缓存
//!
//! 只缓存成功的结果；失败不会写入，下次相同输入会重新计算。

use rustc_hash::FxHashMap;
use std::future::Future;
use std::hash::Hash;
use tokio::sync::Mutex;

pub struct Memo<K, V> {
    entries: Mutex<FxHashMap<K, V>>,
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    pub async fn insert(&self, key: K, value: V) {
        self.entries.lock().await.insert(key, value);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// 命中时直接返回；否则调用 `compute`，成功后写入缓存
    ///
    /// 计算期间不持有锁。
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(&key).await {
            return Ok(hit);
        }
        let value = compute().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }
}

impl<K, V> Default for Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
