//! User lookup for the session service

use std::collections::HashMap;

use crate::auth::models::{UserProfile, UserRole};
use crate::config::UserEntry;
use crate::error::Result;

/// Password accepted for the built-in demo identities
pub const DEMO_PASSWORD: &str = "password";

/// Range of bcrypt work factors the hasher accepts
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// A directory entry: the profile plus its bcrypt password hash
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub profile: UserProfile,
    pub password_hash: String,
}

impl DirectoryEntry {
    /// Create an entry, hashing the plaintext password
    pub fn new(profile: UserProfile, password: &str, cost: u32) -> Result<Self> {
        Ok(Self {
            profile,
            password_hash: bcrypt::hash(password, cost)?,
        })
    }

    /// Verify password against the stored hash
    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

/// Lookup capability used by the session service
pub trait UserDirectory: Send + Sync {
    /// Find an entry by exact, case-sensitive email
    fn find_by_email(&self, email: &str) -> Option<DirectoryEntry>;

    /// Hash verified when an email is unknown, so a miss costs the same
    /// bcrypt work as a wrong password
    fn decoy_hash(&self) -> Option<String> {
        None
    }
}

/// Fixed in-memory directory
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    entries: HashMap<String, DirectoryEntry>,
}

impl StaticDirectory {
    pub fn new(entries: impl IntoIterator<Item = DirectoryEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.profile.email.clone(), entry))
                .collect(),
        }
    }

    /// The two demo identities, hashed with the given bcrypt cost
    pub fn demo(cost: u32) -> Result<Self> {
        let entries = demo_profiles()
            .into_iter()
            .map(|profile| DirectoryEntry::new(profile, DEMO_PASSWORD, cost))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(entries))
    }

    /// Build from configured users, whose passwords are already hashed
    pub fn from_config(users: &[UserEntry]) -> Self {
        Self::new(users.iter().map(|user| DirectoryEntry {
            profile: UserProfile {
                email: user.email.clone(),
                name: user.name.clone(),
                role: user.role,
                store_id: user.store_id,
                avatar: user.avatar.clone(),
            },
            password_hash: user.password_hash.clone(),
        }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl UserDirectory for StaticDirectory {
    fn find_by_email(&self, email: &str) -> Option<DirectoryEntry> {
        self.entries.get(email).cloned()
    }

    fn decoy_hash(&self) -> Option<String> {
        self.entries.values().next().map(|entry| entry.password_hash.clone())
    }
}

/// Profiles of the built-in demo identities
pub fn demo_profiles() -> Vec<UserProfile> {
    vec![
        UserProfile {
            email: "admin@company.uz".to_string(),
            name: "System Administrator".to_string(),
            role: UserRole::Admin,
            store_id: None,
            avatar: "👑".to_string(),
        },
        UserProfile {
            email: "manager@company.uz".to_string(),
            name: "Store Manager".to_string(),
            role: UserRole::Manager,
            store_id: Some(1),
            avatar: "👨‍💼".to_string(),
        },
    ]
}
