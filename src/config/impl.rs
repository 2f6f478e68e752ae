use chrono::{FixedOffset, Offset, Utc};
use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    ///
    /// 优先级从低到高：内置默认值、`config.toml`、`config.{APP_ENV}.toml`、
    /// `SCHOOL_` 前缀环境变量、常用环境变量。
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("app.system_name", "School Portal")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("app.utc_offset_minutes", 210)?
            .set_default("app.admin_username", "admin")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.unix_socket_path", "")?
            .set_default("server.workers", 0)?
            .set_default("server.max_workers", 16)?
            .set_default("server.timeouts.client_request", 5000)?
            .set_default("server.timeouts.client_disconnect", 1000)?
            .set_default("server.timeouts.keep_alive", 30)?
            .set_default("server.limits.max_payload_size", 1_048_576)?
            .set_default("jwt.secret", "school-portal-insecure-dev-secret")?
            .set_default("jwt.access_token_expiry", 720)?
            .set_default("jwt.remember_me_expiry", 7)?
            .set_default("database.url", "sqlite://school.db?mode=rwc")?
            .set_default("database.pool_size", 10)?
            .set_default("database.timeout", 30)?
            .set_default("cache.type", "moka")?
            .set_default("cache.default_ttl", 3600)?
            .set_default("cache.redis.url", "redis://127.0.0.1:6379")?
            .set_default("cache.redis.key_prefix", "school:")?
            .set_default("cache.redis.pool_size", 10)?
            .set_default("cache.memory.max_capacity", 10_000)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("cors.max_age", 3600)?
            .set_default("argon2.memory_cost", 19_456)?
            .set_default("argon2.time_cost", 2)?
            .set_default("argon2.parallelism", 1)?
            .add_source(File::with_name("config").required(false))
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            .add_source(
                Environment::with_prefix("SCHOOL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.type", std::env::var("CACHE_TYPE").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?
            .set_override_option("cache.default_ttl", std::env::var("REDIS_TTL").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 学校时区，偏移非法时退回 UTC
    pub fn school_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.app.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_files() {
        let config = AppConfig::load().expect("defaults should deserialize");
        assert!(config.server.workers >= 1);
        assert!(config.jwt.remember_me_expiry > 0);
        assert!(!config.app.admin_username.is_empty());
    }

    #[test]
    fn test_school_offset() {
        let mut config = AppConfig::load().expect("defaults should deserialize");
        config.app.utc_offset_minutes = 210;
        assert_eq!(config.school_offset().local_minus_utc(), 210 * 60);
        config.app.utc_offset_minutes = 100_000;
        assert_eq!(config.school_offset().local_minus_utc(), 0);
    }
}
