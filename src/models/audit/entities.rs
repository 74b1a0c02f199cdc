use serde::{Deserialize, Serialize};

// 审计日志级别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl AuditLevel {
    /// 由响应状态码决定日志级别
    pub fn from_status(status: u16) -> Self {
        match status {
            500.. => AuditLevel::Critical,
            400..=499 => AuditLevel::Error,
            300..=399 => AuditLevel::Warning,
            _ => AuditLevel::Info,
        }
    }
}

impl std::fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditLevel::Info => write!(f, "info"),
            AuditLevel::Warning => write!(f, "warning"),
            AuditLevel::Error => write!(f, "error"),
            AuditLevel::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for AuditLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(AuditLevel::Info),
            "warning" => Ok(AuditLevel::Warning),
            "error" => Ok(AuditLevel::Error),
            "critical" => Ok(AuditLevel::Critical),
            _ => Err(format!("Invalid audit level: {s}")),
        }
    }
}

// 审计日志
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: i64,
    pub created_by: Option<i64>,
    pub level: AuditLevel,
    pub action: String,
    pub method: String,
    pub path: String,
    pub ip_address: Option<String>,
    pub details: Option<String>,
    pub payload: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 处理函数挂到请求扩展上的审计信息，由审计中间件读取
#[derive(Debug, Clone, Default)]
pub struct AuditPayload {
    pub action: Option<String>,
    pub error_message: Option<String>,
    pub raw_error: Option<String>,
    pub data: Option<serde_json::Value>,
}

impl AuditPayload {
    pub fn action(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Default::default()
        }
    }

    /// 附带请求数据，密码类字段会被遮蔽
    pub fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        self.data = serde_json::to_value(data).ok().map(mask_sensitive);
        self
    }

    /// 附带错误信息（Integrity 错误会同时保留数据库原始信息）
    pub fn with_error(mut self, err: &crate::errors::RecordsError) -> Self {
        self.error_message = Some(err.message().to_string());
        self.raw_error = err.raw_error().map(str::to_string);
        self
    }

    pub fn into_json(self) -> Option<serde_json::Value> {
        if self.error_message.is_none() && self.raw_error.is_none() && self.data.is_none() {
            return None;
        }
        Some(serde_json::json!({
            "error_message": self.error_message,
            "raw_error": self.raw_error,
            "data": self.data,
        }))
    }
}

const MASK: &str = "********";

fn mask_sensitive(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| {
                    if key.to_ascii_lowercase().contains("password") {
                        (key, Value::String(MASK.to_string()))
                    } else {
                        (key, mask_sensitive(v))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(mask_sensitive).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_status() {
        assert_eq!(AuditLevel::from_status(201), AuditLevel::Info);
        assert_eq!(AuditLevel::from_status(302), AuditLevel::Warning);
        assert_eq!(AuditLevel::from_status(400), AuditLevel::Error);
        assert_eq!(AuditLevel::from_status(404), AuditLevel::Error);
        assert_eq!(AuditLevel::from_status(500), AuditLevel::Critical);
        assert_eq!(AuditLevel::from_status(503), AuditLevel::Critical);
    }

    #[test]
    fn test_empty_payload_has_no_json() {
        assert!(AuditPayload::action("CREATE MARK").into_json().is_none());
        let payload = AuditPayload {
            error_message: Some("dup".into()),
            ..Default::default()
        };
        assert_eq!(payload.into_json().unwrap()["error_message"], "dup");
    }

    #[test]
    fn test_password_fields_masked() {
        let data = serde_json::json!({
            "username": "alice",
            "password": "secret123",
            "nested": {"new_password": "x"}
        });
        let payload = AuditPayload::action("CREATE STUDENT").with_data(&data);
        let json = payload.into_json().unwrap();
        assert_eq!(json["data"]["username"], "alice");
        assert_eq!(json["data"]["password"], MASK);
        assert_eq!(json["data"]["nested"]["new_password"], MASK);
    }

    #[test]
    fn test_integrity_error_keeps_raw_message() {
        use crate::errors::{DomainIntegrityError, RecordsError};

        let err = RecordsError::from(DomainIntegrityError::new("readable", "raw"));
        let payload = AuditPayload::action("CREATE MARK").with_error(&err);
        assert_eq!(payload.error_message.as_deref(), Some("readable"));
        assert_eq!(payload.raw_error.as_deref(), Some("raw"));
    }
}
