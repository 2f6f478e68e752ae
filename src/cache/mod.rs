//! 对象缓存
//!
//! 后端以插件形式注册，启动时按配置的 `cache.type` 选择。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 为缓存后端生成 `register_plugin` 函数
///
/// 后端类型需提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        pub fn register_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::SchoolError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}

/// 注册内置的缓存后端
pub fn register_builtin_plugins() {
    object_cache::moka::register_plugin();
    object_cache::redis::register_plugin();
}
