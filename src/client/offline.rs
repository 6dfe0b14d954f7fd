//! Offline mode: local sign-in when the session service is unreachable

use std::sync::Arc;

use chrono::Duration;

use crate::auth::directory::MIN_BCRYPT_COST;
use crate::auth::jwt::DEFAULT_TOKEN_TTL_HOURS;
use crate::auth::{JwtKeys, Session, SessionService, StaticDirectory};
use crate::error::Result;

/// Local session service over the built-in demo identities. Tokens it
/// issues are flagged `offline` and signed with a client-side secret, so
/// the real service never accepts them.
#[derive(Clone)]
pub struct OfflineMode {
    service: SessionService,
}

impl OfflineMode {
    pub fn new(secret: &[u8]) -> Result<Self> {
        // The hashes only live in this process
        let directory = StaticDirectory::demo(MIN_BCRYPT_COST)?;
        let keys = JwtKeys::new(secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS)).offline();

        Ok(Self {
            service: SessionService::new(Arc::new(directory), keys),
        })
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        self.service.authenticate(email, password)
    }
}
