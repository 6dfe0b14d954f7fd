//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store identifier
pub type StoreId = u32;

/// User roles for authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Network administrator - sees every store
    Admin,
    /// Store manager - bound to a single store
    Manager,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Manager => write!(f, "manager"),
        }
    }
}

impl UserRole {
    /// Human readable label shown in the dashboard header
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Network administrator",
            UserRole::Manager => "Store manager",
        }
    }
}

/// Profile of an authenticated user, as issued by the session service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    /// Display name
    pub name: String,
    pub role: UserRole,
    /// Store scope, `None` means all stores
    pub store_id: Option<StoreId>,
    /// Avatar glyph
    pub avatar: String,
}

impl UserProfile {
    /// Check if the user may see every store
    pub fn is_unrestricted(&self) -> bool {
        self.store_id.is_none()
    }
}

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Login response with token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserProfile,
}

/// Error body returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_wire_format() {
        let profile = UserProfile {
            email: "admin@company.uz".to_string(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
            store_id: None,
            avatar: "👑".to_string(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["role"], "admin");
        assert!(json["store_id"].is_null());
        assert_eq!(json["avatar"], "👑");
    }

    #[test]
    fn test_login_request_missing_fields_default_to_empty() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
    }
}
