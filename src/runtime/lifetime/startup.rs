use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::models::profiles::entities::NewProfile;
use crate::models::users::entities::{NewUser, UserRole};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 按名称构造缓存后端
async fn build_cache(cache_type: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(cache_type).ok_or_else(|| {
        SchoolError::cache_plugin_not_found(format!("Cache backend '{cache_type}' not registered"))
    })?;
    let cache = constructor().await?;
    Ok(Arc::from(cache))
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();

    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != "moka" => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            warn!("Falling back to memory cache");
            build_cache("moka").await
        }
        Err(e) => Err(e),
    }
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 数据库中没有任何用户时创建默认管理员
pub async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 优先使用环境变量中的密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let username = AppConfig::get().app.admin_username.clone();
    let admin = NewUser {
        username: username.clone(),
        password_hash,
        role: UserRole::Admin,
        is_staff: true,
        phone_number: None,
    };
    let profile = NewProfile::Admin {
        first_name: username,
        last_name: String::new(),
        title: Some("Administrator".to_string()),
        description: None,
    };

    match storage.create_user_with_profile(admin, profile).await {
        Ok((user, _)) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和默认管理员
pub async fn prepare_server_startup() -> Result<StartupContext> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| SchoolError::io("Failed to install rustls crypto provider"))?;

    crate::cache::register_builtin_plugins();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[test]
    fn test_generated_password_length() {
        let password = generate_random_password(16);
        assert_eq!(password.chars().count(), 16);
    }

    #[tokio::test]
    async fn test_seed_admin_only_once() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
        seed_admin(&storage).await;
        seed_admin(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);

        let admin = storage
            .get_user_by_username(&AppConfig::get().app.admin_username)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert!(admin.is_staff);
    }

    #[tokio::test]
    async fn test_unknown_backend_is_reported() {
        let err = build_cache("memcached").await.err().unwrap();
        assert_eq!(err.code(), "S002");
    }
}
