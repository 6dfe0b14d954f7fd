//! Session client lifecycle tests: login, restore, logout, offline mode

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use storeintel::api::{create_router, AppState};
use storeintel::auth::directory::{demo_profiles, MIN_BCRYPT_COST};
use storeintel::auth::{
    peek_claims, Claims, JwtKeys, LoginRequest, LoginResponse, SessionService, StaticDirectory,
    UserRole, DEMO_PASSWORD,
};
use storeintel::client::{
    AuthMode, AuthTransport, FileStorage, HttpTransport, MemoryStorage, OfflineMode,
    SessionManager, SessionStorage, View, PROFILE_KEY, TOKEN_KEY,
};
use storeintel::config::Config;
use storeintel::error::{Error, Result};
use tempfile::TempDir;

/// Calls the session service in-process and counts requests
#[derive(Clone)]
struct InProcess {
    service: SessionService,
    calls: Arc<AtomicUsize>,
}

impl InProcess {
    fn new() -> Self {
        let directory = StaticDirectory::demo(MIN_BCRYPT_COST).unwrap();
        Self {
            service: SessionService::new(
                Arc::new(directory),
                JwtKeys::new(b"client-test", chrono::Duration::hours(24)),
            ),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthTransport for InProcess {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.service.authenticate(&req.email, &req.password)?.into())
    }
}

/// Always fails like a server that is down
struct Down;

#[async_trait]
impl AuthTransport for Down {
    async fn login(&self, _req: &LoginRequest) -> Result<LoginResponse> {
        Err(Error::TransportFailure("connection refused".to_string()))
    }
}

/// Always fails like a server returning 500
struct Broken;

#[async_trait]
impl AuthTransport for Broken {
    async fn login(&self, _req: &LoginRequest) -> Result<LoginResponse> {
        Err(Error::Server("Server error".to_string()))
    }
}

fn offline() -> OfflineMode {
    OfflineMode::new(b"offline-test").unwrap()
}

#[tokio::test]
async fn test_admin_login_shows_dashboard() {
    let mut manager = SessionManager::new(MemoryStorage::new(), InProcess::new());
    assert_eq!(manager.view(), View::Login);

    let mode = manager.login("admin@company.uz", "password").await.unwrap();
    assert_eq!(mode, AuthMode::Online);
    assert_eq!(manager.view(), View::Dashboard);

    let profile = manager.profile().unwrap();
    assert_eq!(profile.avatar, "👑");
    assert_eq!(profile.role, UserRole::Admin);

    let claims = peek_claims(manager.token().unwrap()).unwrap();
    assert_eq!(claims.role, UserRole::Admin);
    assert_eq!(claims.store_id, None);
    assert!(!claims.offline);
}

#[tokio::test]
async fn test_login_persists_both_keys() {
    let storage = Arc::new(MemoryStorage::new());
    let mut manager = SessionManager::new(SharedStorage(storage.clone()), InProcess::new());
    manager.login("manager@company.uz", "password").await.unwrap();

    let token = storage.get(TOKEN_KEY).unwrap().unwrap();
    let profile = storage.get(PROFILE_KEY).unwrap().unwrap();
    assert_eq!(Some(token.as_str()), manager.token());
    let profile: serde_json::Value = serde_json::from_str(&profile).unwrap();
    assert_eq!(profile["store_id"], 1);
    assert_eq!(profile["role"], "manager");
}

#[tokio::test]
async fn test_wrong_password_stays_on_login() {
    let mut manager = SessionManager::new(MemoryStorage::new(), InProcess::new());
    let result = manager.login("manager@company.uz", "wrongpass").await;

    assert!(matches!(result, Err(Error::InvalidCredentials)));
    assert_eq!(manager.view(), View::Login);
    assert!(manager.token().is_none());
}

#[tokio::test]
async fn test_failed_login_keeps_previous_session() {
    let mut manager = SessionManager::new(MemoryStorage::new(), InProcess::new());
    manager.login("admin@company.uz", "password").await.unwrap();
    let before = manager.state().clone();

    assert!(manager.login("admin@company.uz", "nope").await.is_err());
    assert_eq!(manager.state(), &before);
}

#[tokio::test]
async fn test_restore_without_network() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let transport = InProcess::new();

    let mut first = SessionManager::new(FileStorage::new(&path), transport.clone());
    first.login("admin@company.uz", "password").await.unwrap();
    let persisted = first.state().clone();
    assert_eq!(transport.calls(), 1);

    // New process, same storage
    let mut reloaded = SessionManager::new(FileStorage::new(&path), transport.clone());
    assert!(reloaded.restore().unwrap());
    assert_eq!(reloaded.state(), &persisted);
    assert_eq!(reloaded.view(), View::Dashboard);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let mut manager = SessionManager::new(FileStorage::new(&path), InProcess::new());
    manager.login("manager@company.uz", "password").await.unwrap();

    manager.logout().unwrap();
    assert_eq!(manager.view(), View::Login);
    manager.logout().unwrap();
    assert_eq!(manager.view(), View::Login);

    let storage = FileStorage::new(&path);
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(PROFILE_KEY).unwrap(), None);
    assert!(!SessionManager::new(storage, InProcess::new()).restore().unwrap());
}

#[test]
fn test_malformed_profile_discarded() {
    let storage = Arc::new(MemoryStorage::new());
    let (token, _) = JwtKeys::new(b"k", chrono::Duration::hours(1))
        .issue(&demo_profiles()[0])
        .unwrap();
    storage.set(TOKEN_KEY, &token).unwrap();
    storage.set(PROFILE_KEY, "{ not json").unwrap();

    let mut manager = SessionManager::new(SharedStorage(storage.clone()), InProcess::new());
    assert!(!manager.restore().unwrap());
    assert_eq!(manager.view(), View::Login);
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(PROFILE_KEY).unwrap(), None);
}

#[test]
fn test_non_jwt_token_discarded() {
    let storage = Arc::new(MemoryStorage::new());
    let profile = serde_json::to_string(&demo_profiles()[0]).unwrap();
    storage.set(TOKEN_KEY, "demo-token-1700000000000").unwrap();
    storage.set(PROFILE_KEY, &profile).unwrap();

    let mut manager = SessionManager::new(SharedStorage(storage), InProcess::new());
    assert!(!manager.restore().unwrap());
}

#[test]
fn test_partial_state_is_no_session() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "").unwrap();
    storage.set(PROFILE_KEY, "{}").unwrap();

    let mut manager = SessionManager::new(SharedStorage(storage), InProcess::new());
    assert!(!manager.restore().unwrap());
    assert!(!manager.is_authenticated());
}

#[test]
fn test_expired_session_discarded() {
    let storage = Arc::new(MemoryStorage::new());
    let profile = demo_profiles().remove(1);
    let keys = JwtKeys::new(b"k", chrono::Duration::hours(24));
    let mut claims = Claims::from_profile(&profile, chrono::Duration::hours(24));
    claims.exp = chrono::Utc::now().timestamp() - 60;
    storage.set(TOKEN_KEY, &keys.sign(&claims).unwrap()).unwrap();
    storage
        .set(PROFILE_KEY, &serde_json::to_string(&profile).unwrap())
        .unwrap();

    let mut manager = SessionManager::new(SharedStorage(storage.clone()), InProcess::new());
    assert!(!manager.restore().unwrap());
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn test_profile_contradicting_token_discarded() {
    let storage = Arc::new(MemoryStorage::new());
    let profiles = demo_profiles();
    let (manager_token, _) = JwtKeys::new(b"k", chrono::Duration::hours(24))
        .issue(&profiles[1])
        .unwrap();
    storage.set(TOKEN_KEY, &manager_token).unwrap();
    storage
        .set(PROFILE_KEY, &serde_json::to_string(&profiles[0]).unwrap())
        .unwrap();

    let mut manager = SessionManager::new(SharedStorage(storage.clone()), InProcess::new());
    assert!(!manager.restore().unwrap());
    assert_eq!(manager.profile(), None);
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(PROFILE_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_offline_fallback_with_demo_credentials() {
    let mut manager =
        SessionManager::new(MemoryStorage::new(), Down).with_offline_mode(offline());

    let mode = manager.login("manager@company.uz", "password").await.unwrap();
    assert_eq!(mode, AuthMode::Offline);
    assert_eq!(manager.view(), View::Dashboard);

    let claims = peek_claims(manager.token().unwrap()).unwrap();
    assert!(claims.offline);
    assert_eq!(claims.role, UserRole::Manager);
}

#[tokio::test]
async fn test_offline_fallback_rejects_wrong_password() {
    let mut manager =
        SessionManager::new(MemoryStorage::new(), Down).with_offline_mode(offline());
    let result = manager.login("admin@company.uz", "wrongpass").await;
    assert!(matches!(result, Err(Error::InvalidCredentials)));
    assert_eq!(manager.view(), View::Login);
}

#[tokio::test]
async fn test_server_error_does_not_enter_offline_mode() {
    let mut manager =
        SessionManager::new(MemoryStorage::new(), Broken).with_offline_mode(offline());
    let result = manager.login("admin@company.uz", DEMO_PASSWORD).await;
    assert!(matches!(result, Err(Error::Server(_))));
    assert!(!manager.is_authenticated());
}

// ============================================================================
// Over HTTP
// ============================================================================

async fn spawn_server() -> (String, tokio::task::JoinHandle<()>) {
    let mut config = Config::default();
    config.auth.bcrypt_cost = MIN_BCRYPT_COST;
    let app = create_router(AppState::from_config(config).unwrap());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{}", addr), handle)
}

#[tokio::test]
async fn test_http_login_and_protected_fetch() {
    let (base_url, server) = spawn_server().await;
    let transport = HttpTransport::new(&base_url, Duration::from_secs(5)).unwrap();
    let mut manager = SessionManager::new(MemoryStorage::new(), transport.clone());

    assert_eq!(manager.login("admin@company.uz", "password").await.unwrap(), AuthMode::Online);

    let stats: storeintel::demo::DailyStats = transport
        .get_json("/analytics/daily-stats", manager.token().unwrap())
        .await
        .unwrap();
    assert_eq!(stats.customers, 324);

    let rejected = transport
        .get_json::<serde_json::Value>("/stores", "bogus")
        .await;
    assert!(matches!(rejected, Err(Error::Unauthorized(_))));

    server.abort();
}

#[tokio::test]
async fn test_http_wrong_password() {
    let (base_url, server) = spawn_server().await;
    let transport = HttpTransport::new(&base_url, Duration::from_secs(5)).unwrap();
    let mut manager = SessionManager::new(MemoryStorage::new(), transport).with_offline_mode(offline());

    let result = manager.login("manager@company.uz", "wrongpass").await;
    assert!(matches!(result, Err(Error::InvalidCredentials)));

    server.abort();
}

#[tokio::test]
async fn test_http_server_down_falls_back_offline() {
    // Reserve a port, then close it so nothing listens there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let mut manager = SessionManager::new(MemoryStorage::new(), transport.clone());
    assert!(matches!(
        manager.login("admin@company.uz", "password").await,
        Err(Error::TransportFailure(_))
    ));

    let mut manager = SessionManager::new(MemoryStorage::new(), transport).with_offline_mode(offline());
    assert_eq!(manager.login("admin@company.uz", "password").await.unwrap(), AuthMode::Offline);
}

/// Lets a test inspect storage owned by the session manager
struct SharedStorage(Arc<MemoryStorage>);

impl SessionStorage for SharedStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.0.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.0.remove(key)
    }
}
