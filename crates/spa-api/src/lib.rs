//! JSON API client for the single-page shell.
//!
//! Thin wrapper over a blocking `reqwest` client: every request is JSON,
//! every request carries the session's bearer token when there is one, and
//! non-success responses become [`ApiError::Http`] with the server's
//! `detail` message.
//!
//! # Example
//!
//! ```ignore
//! use spa_api::{ApiClient, ApiConfig};
//! use spa_store::{MemoryStore, SessionStore};
//!
//! let client = ApiClient::new(&ApiConfig::default(), SessionStore::new(MemoryStore::new()))?;
//! client.login("ada", "secret")?;
//! let expenses = client.get_all("expense")?;
//! client.logout()?;
//! ```

mod client;
mod config;
mod error;

pub use client::{ApiClient, LoginResponse};
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use reqwest::Method;
