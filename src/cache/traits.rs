use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错，无法判断键是否存在
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` 为秒，0 表示使用后端的默认值
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// 读取并反序列化，内容损坏时删除该键
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(json) => match serde_json::from_str::<T>(&json) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::info!("缓存内容无法解析，已删除 {}: {}", key, e);
                    self.remove(key).await;
                    CacheResult::NotFound
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    pub async fn insert_json<T: Serialize + ?Sized>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(json) => self.insert_raw(key, json, ttl).await,
            Err(e) => tracing::warn!("缓存序列化失败 {}: {}", key, e),
        }
    }
}
