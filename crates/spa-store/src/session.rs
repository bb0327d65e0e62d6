//! Auth token and cached user record.

use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "current_user";

/// Session view over a key-value backend.
///
/// Set on login, cleared on logout. Navigation only ever asks
/// [`is_authenticated`](Self::is_authenticated).
#[derive(Debug, Clone)]
pub struct SessionStore<K> {
    store: K,
}

impl<K: KeyValueStore> SessionStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Cache the user record (stored JSON-encoded).
    pub fn set_user(&self, user: &Value) -> Result<()> {
        let encoded = serde_json::to_string(user).map_err(|source| StoreError::Serialize {
            key: USER_KEY.to_string(),
            source,
        })?;
        self.store.set(USER_KEY, &encoded)
    }

    /// The cached user record. A value that does not decode reads as absent.
    pub fn user(&self) -> Result<Option<Value>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring undecodable cached user");
                Ok(None)
            }
        }
    }

    /// Forget the token and the cached user.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }
}
