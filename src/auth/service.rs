//! Session service: credential check and token issuance

use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::directory::UserDirectory;
use crate::auth::jwt::{Claims, JwtKeys};
use crate::auth::models::{LoginResponse, UserProfile};
use crate::error::{Error, Result};

/// A freshly issued session
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub profile: UserProfile,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self {
            success: true,
            token: session.token,
            user: session.profile,
        }
    }
}

/// Stateless session service. Holds no session table; a token is valid
/// as long as its signature and expiry check out.
#[derive(Clone)]
pub struct SessionService {
    directory: Arc<dyn UserDirectory>,
    keys: JwtKeys,
}

impl SessionService {
    pub fn new(directory: Arc<dyn UserDirectory>, keys: JwtKeys) -> Self {
        Self { directory, keys }
    }

    /// Check credentials and issue a signed token
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        if email.is_empty() || password.is_empty() {
            return Err(Error::InvalidCredentials);
        }

        let Some(entry) = self.directory.find_by_email(email) else {
            debug!("Login for unknown email {}", email);
            if let Some(hash) = self.directory.decoy_hash() {
                let _ = bcrypt::verify(password, &hash);
            }
            return Err(Error::InvalidCredentials);
        };

        if !entry.verify_password(password) {
            debug!("Password mismatch for {}", email);
            return Err(Error::InvalidCredentials);
        }

        let (token, _) = self.keys.issue(&entry.profile)?;

        info!("Issued session for {} ({})", email, entry.profile.role);

        Ok(Session {
            token,
            profile: entry.profile,
        })
    }

    /// Verify a token's signature and expiry
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.keys.validate(token)
    }
}
