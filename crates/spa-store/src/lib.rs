//! Durable storage for the single-page shell.
//!
//! Everything the shell remembers across restarts lives in one string-keyed
//! [`KeyValueStore`]. Two typed views sit on top of it:
//!
//! - [`SessionStore`] - auth token and cached user record
//! - [`LocationStore`] - last active app and section
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local, for tests and throwaway runs
//! - [`FileStore`] - JSON object on disk, written through atomically on
//!   every change
//!
//! Stores share a backend through `Arc`, so a session store and a location
//! store opened on the same file see each other's writes.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use spa_store::{FileStore, LocationStore, SessionStore};
//!
//! let backend = Arc::new(FileStore::open("storage.json")?);
//! let session = SessionStore::new(Arc::clone(&backend));
//! let location = LocationStore::new(backend);
//!
//! if session.is_authenticated()? {
//!     let last = location.load()?;
//! }
//! ```

mod error;
mod file;
mod kv;
mod location;
mod session;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use location::{LocationStore, PersistedLocation};
pub use session::SessionStore;
