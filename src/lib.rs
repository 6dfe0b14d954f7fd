//! storeintel - Store Intelligence demo dashboard
//!
//! The library holds both halves of the session contract: the stateless
//! session service and HTTP API (`auth`, `api`) and the session client
//! that logs in, persists, restores and clears a session (`client`).

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod demo;
pub mod error;

pub use config::Config;
pub use error::Error;
