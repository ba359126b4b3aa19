use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 后端暂时不可用等情况：键可能存在但取不到值，调用方按未命中处理
    ExistsButNoValue,
}

/// 对象缓存契约
///
/// 值以 JSON 字符串形式存取，序列化由调用方负责。
/// ttl 为 0 时使用后端的默认过期时间。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}
