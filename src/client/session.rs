//! Client-side session management

use tracing::{debug, info, warn};

use crate::auth::models::{LoginRequest, UserProfile};
use crate::auth::peek_claims;
use crate::client::offline::OfflineMode;
use crate::client::storage::{SessionStorage, PROFILE_KEY, TOKEN_KEY};
use crate::client::transport::AuthTransport;
use crate::error::{Error, Result};

/// Session state owned by the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSessionState {
    pub token: Option<String>,
    pub profile: Option<UserProfile>,
}

impl ClientSessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.profile.is_some()
    }
}

/// Which view the client should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
}

/// How a login was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Token issued by the session service
    Online,
    /// Service unreachable; token issued locally by offline mode
    Offline,
}

/// Owns the client session: login, restore on start, logout.
pub struct SessionManager<S, T> {
    storage: S,
    transport: T,
    offline: Option<OfflineMode>,
    state: ClientSessionState,
}

impl<S: SessionStorage, T: AuthTransport> SessionManager<S, T> {
    /// Create a session manager with offline mode disabled
    pub fn new(storage: S, transport: T) -> Self {
        Self {
            storage,
            transport,
            offline: None,
            state: ClientSessionState::default(),
        }
    }

    /// Allow falling back to offline mode when the service is unreachable
    pub fn with_offline_mode(mut self, offline: OfflineMode) -> Self {
        self.offline = Some(offline);
        self
    }

    pub fn state(&self) -> &ClientSessionState {
        &self.state
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.state.profile.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn view(&self) -> View {
        if self.is_authenticated() {
            View::Dashboard
        } else {
            View::Login
        }
    }

    /// Log in. On any error the state is left untouched.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthMode> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::MissingCredentials);
        }

        let req = LoginRequest::new(email, password);
        match self.transport.login(&req).await {
            Ok(response) => {
                self.establish(response.token, response.user)?;
                info!("Signed in as {}", email);
                Ok(AuthMode::Online)
            }
            Err(Error::TransportFailure(reason)) => {
                let Some(offline) = &self.offline else {
                    return Err(Error::TransportFailure(reason));
                };
                warn!("Session service unreachable ({}), trying offline mode", reason);
                let session = offline.authenticate(email, password)?;
                self.establish(session.token, session.profile)?;
                info!("Signed in as {} in offline mode", email);
                Ok(AuthMode::Offline)
            }
            Err(e) => Err(e),
        }
    }

    /// Restore a persisted session without contacting the service.
    /// Malformed or expired state is discarded and counts as no session.
    pub fn restore(&mut self) -> Result<bool> {
        match self.read_persisted() {
            Ok(Some(state)) => {
                self.state = state;
                debug!("Restored persisted session");
                Ok(true)
            }
            Ok(None) => {
                self.state = ClientSessionState::default();
                Ok(false)
            }
            Err(Error::MalformedPersistedState(reason)) => {
                debug!("Discarding persisted session: {}", reason);
                self.logout()?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Clear persisted and in-memory state. Safe to call repeatedly.
    pub fn logout(&mut self) -> Result<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(PROFILE_KEY)?;
        self.state = ClientSessionState::default();
        Ok(())
    }

    fn establish(&mut self, token: String, profile: UserProfile) -> Result<()> {
        let profile_json = serde_json::to_string(&profile)?;
        self.storage.set(TOKEN_KEY, &token)?;
        self.storage.set(PROFILE_KEY, &profile_json)?;
        self.state = ClientSessionState {
            token: Some(token),
            profile: Some(profile),
        };
        Ok(())
    }

    fn read_persisted(&self) -> Result<Option<ClientSessionState>> {
        let token = self.storage.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let profile = self.storage.get(PROFILE_KEY)?;

        let (Some(token), Some(profile)) = (token, profile) else {
            return Ok(None);
        };

        let profile: UserProfile = serde_json::from_str(&profile)
            .map_err(|e| Error::MalformedPersistedState(format!("profile: {}", e)))?;

        let claims = peek_claims(&token)?;
        if claims.is_expired() {
            return Err(Error::MalformedPersistedState("token expired".to_string()));
        }
        if claims.profile() != profile {
            return Err(Error::MalformedPersistedState(
                "profile does not match token".to_string(),
            ));
        }

        Ok(Some(ClientSessionState {
            token: Some(token),
            profile: Some(profile),
        }))
    }
}
