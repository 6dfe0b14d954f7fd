//! Authentication: user directory, token issuance and verification

pub mod directory;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod service;

pub use directory::{DirectoryEntry, StaticDirectory, UserDirectory, DEMO_PASSWORD};
pub use jwt::{peek_claims, Claims, JwtKeys};
pub use middleware::{extract_token, extract_user_from_request, require_auth};
pub use models::{LoginRequest, LoginResponse, StoreId, UserProfile, UserRole};
pub use service::{Session, SessionService};
