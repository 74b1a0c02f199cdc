use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 部署时常用的裸环境变量，映射到对应的配置键
const PLAIN_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("app.environment", "APP_ENV"),
    ("app.log_level", "RUST_LOG"),
    ("server.host", "SERVER_HOST"),
    ("server.port", "SERVER_PORT"),
    ("server.unix_socket_path", "UNIX_SOCKET"),
    ("server.workers", "CPU_COUNT"),
    ("jwt.secret", "JWT_SECRET"),
    ("database.url", "DATABASE_URL"),
    ("cache.default_ttl", "CACHE_TTL"),
    (
        "records.max_subjects_per_department_semester",
        "MAX_SUBJECTS_PER_SEMESTER",
    ),
];

fn environment_name() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
}

impl AppConfig {
    /// 读取 config.toml、config.{APP_ENV}.toml 与 RECORDS_* 变量，再应用裸环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{}", environment_name())).required(false))
            // RECORDS_DATABASE_URL -> database.url
            .add_source(
                Environment::with_prefix("RECORDS")
                    .separator("_")
                    .try_parsing(true),
            );

        for (key, var) in PLAIN_ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let app_config: AppConfig = builder.build()?.try_deserialize()?;
        app_config.finalize()
    }

    /// 补全派生值并拒绝无法运行的组合
    fn finalize(mut self) -> Result<Self, ConfigError> {
        // 0 表示按 CPU 核数，受 max_workers 限制
        if self.server.workers == 0 {
            self.server.workers = num_cpus::get().min(self.server.max_workers.max(1));
        }

        // 开课上限为 0 时任何开课都会被拒绝
        if self.records.max_subjects_per_department_semester == 0 {
            return Err(ConfigError::Message(
                "records.max_subjects_per_department_semester must be at least 1".to_string(),
            ));
        }

        Ok(self)
    }

    /// 全局配置；未初始化时现场加载，失败直接退出进程
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时调用一次
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 生产环境下 cookie 带 Secure 标记
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 配置了套接字路径时改为监听 Unix 套接字
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        Some(self.server.unix_socket_path.as_str()).filter(|path| !path.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_workers_resolved_within_max() {
        let mut config = AppConfig::default();
        config.server.workers = 0;
        config.server.max_workers = 2;

        let config = config.finalize().unwrap();
        assert!((1..=2).contains(&config.server.workers));
    }

    #[test]
    fn test_explicit_workers_kept() {
        let mut config = AppConfig::default();
        config.server.workers = 3;
        assert_eq!(config.finalize().unwrap().server.workers, 3);
    }

    #[test]
    fn test_zero_offering_cap_rejected() {
        let mut config = AppConfig::default();
        config.records.max_subjects_per_department_semester = 0;
        assert!(config.finalize().is_err());
    }

    #[test]
    fn test_default_cap_is_seven() {
        let config = AppConfig::default().finalize().unwrap();
        assert_eq!(config.records.max_subjects_per_department_semester, 7);
    }

    #[test]
    fn test_overrides_target_known_sections() {
        let sections = ["app", "server", "jwt", "database", "cache", "records"];
        for (key, _) in PLAIN_ENV_OVERRIDES {
            let section = key.split('.').next().unwrap_or_default();
            assert!(sections.contains(&section), "unexpected section in {key}");
        }
    }
}
