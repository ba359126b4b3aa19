//! 缓存层
//!
//! 可插拔的对象缓存：后端通过 `declare_object_cache_plugin!` 在进程启动时
//! 注册到全局注册表，运行时按配置选择，Redis 不可用时回退到内存缓存。

pub mod object_cache;
pub mod register;
mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个对象缓存插件
///
/// `$plugin::new()` 必须返回 `Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|| {
                        ::std::boxed::Box::pin(async {
                            match $plugin::new() {
                                Ok(cache) => Ok(::std::boxed::Box::new(cache)
                                    as ::std::boxed::Box<dyn $crate::cache::ObjectCache>),
                                Err(e) => {
                                    Err($crate::errors::ScoringError::cache_connection(e))
                                }
                            }
                        }) as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
