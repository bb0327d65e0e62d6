//! Session and location stores sharing one storage file.

use std::sync::Arc;

use serde_json::json;
use spa_store::{FileStore, KeyValueStore, LocationStore, PersistedLocation, SessionStore};
use tempfile::tempdir;

#[test]
fn test_stores_share_one_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let backend = Arc::new(FileStore::open(&path).unwrap());
        let session = SessionStore::new(Arc::clone(&backend));
        let location = LocationStore::new(Arc::clone(&backend));

        session.set_token("token-1").unwrap();
        session.set_user(&json!({"email": "ada@example.com"})).unwrap();
        location.save_section("billing", "invoices").unwrap();

        assert_eq!(backend.get("auth_token").unwrap().as_deref(), Some("token-1"));
    }

    let backend = Arc::new(FileStore::open(&path).unwrap());
    let session = SessionStore::new(Arc::clone(&backend));
    let location = LocationStore::new(backend);

    assert!(session.is_authenticated().unwrap());
    assert_eq!(
        location.load().unwrap(),
        PersistedLocation {
            app: Some("billing".to_string()),
            section: Some("invoices".to_string()),
        }
    );

    // Logging out leaves the remembered location alone.
    session.clear().unwrap();
    assert!(!session.is_authenticated().unwrap());
    assert_eq!(location.load().unwrap().app.as_deref(), Some("billing"));
}
