use crate::cache::{MokaCacheWrapper, ObjectCache};
use crate::config::AppConfig;
use crate::models::AppStartTime;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 初始超级管理员的用户名
pub const SEED_ADMIN_USERNAME: &str = "superadmin";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub start_time: AppStartTime,
}

/// 生成随机密码（保证同时包含字母和数字）
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    const DIGITS: &[u8] = b"0123456789";
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";

    let mut rng = rand::rng();
    let mut password: Vec<char> = vec![
        LETTERS[rng.random_range(0..LETTERS.len())] as char,
        DIGITS[rng.random_range(0..DIGITS.len())] as char,
    ];
    password.extend(
        (2..length.max(2)).map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char),
    );
    password.into_iter().collect()
}

/// 初始化超级管理员账号
/// 只在用户表为空时执行
async fn seed_super_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating super admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 优先使用环境变量中的密码，否则生成一次并打印
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN_PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated password for '{}': {}", SEED_ADMIN_USERNAME, pwd);
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

    let admin_request = CreateUserRequest {
        username: SEED_ADMIN_USERNAME.to_string(),
        email: "superadmin@localhost.local".to_string(),
        password: password_hash,
        role: UserRole::SuperAdmin,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => info!(
            "Super admin account created (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create super admin account: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）、初始账号和缓存
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_super_admin(&storage).await;

    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new(&AppConfig::get().cache));
    warn!("Moka cache backend initialized");

    StartupContext {
        storage,
        cache,
        start_time: AppStartTime {
            start_datetime: chrono::Utc::now(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::validate::validate_password;

    #[test]
    fn test_generated_password_passes_policy() {
        for _ in 0..20 {
            let pwd = generate_random_password(16);
            assert_eq!(pwd.chars().count(), 16);
            assert!(validate_password(&pwd).is_ok());
        }
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());

        seed_super_admin(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);
        let admin = storage
            .get_user_by_username_or_email(SEED_ADMIN_USERNAME)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, UserRole::SuperAdmin);

        seed_super_admin(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }
}
