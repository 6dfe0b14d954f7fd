//! Session client: login, persisted session restore, logout

pub mod offline;
pub mod session;
pub mod storage;
pub mod transport;

pub use offline::OfflineMode;
pub use session::{AuthMode, ClientSessionState, SessionManager, View};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, PROFILE_KEY, TOKEN_KEY};
pub use transport::{AuthTransport, HttpTransport};
