//! Client behavior against a canned loopback server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde_json::json;
use spa_api::{ApiClient, ApiConfig, ApiError};
use spa_store::{MemoryStore, SessionStore};

/// A request as the server saw it.
#[derive(Debug)]
struct Recorded {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Serve one canned `(status, body)` response per connection, in order.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<Recorded>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut recorded = Vec::new();
        for (status, body) in responses {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((key, value)) = line.split_once(':') {
                    headers.push((key.trim().to_string(), value.trim().to_string()));
                }
            }

            let length = headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
                .map(|(_, value)| value.parse::<usize>().unwrap())
                .unwrap_or(0);
            let mut buf = vec![0; length];
            reader.read_exact(&mut buf).unwrap();

            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            recorded.push(Recorded {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8(buf).unwrap(),
            });
        }
        recorded
    });

    (base, handle)
}

fn client(base: &str, store: Arc<MemoryStore>) -> ApiClient<Arc<MemoryStore>> {
    let config = ApiConfig::default().with_base_url(base);
    ApiClient::new(&config, SessionStore::new(store)).unwrap()
}

#[test]
fn test_login_stores_token_and_user() {
    let (base, server) = serve(vec![(
        200,
        r#"{"access_token": "tok-1", "token_type": "bearer", "user": {"id": 1, "username": "ada"}}"#,
    )]);
    let store = Arc::new(MemoryStore::new());
    let api = client(&base, store.clone());

    let login = api.login("ada", "secret").unwrap();
    assert_eq!(login.access_token, "tok-1");

    let session = SessionStore::new(store);
    assert_eq!(session.token().unwrap().as_deref(), Some("tok-1"));
    assert_eq!(
        session.user().unwrap(),
        Some(json!({"id": 1, "username": "ada"}))
    );

    let requests = server.join().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].request_line.starts_with("POST /api/login "));
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
    assert_eq!(requests[0].header("authorization"), None);
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent, json!({"username": "ada", "password": "secret"}));
}

#[test]
fn test_failed_login_surfaces_detail_and_leaves_session_alone() {
    let (base, server) = serve(vec![(401, r#"{"detail": "Invalid credentials"}"#)]);
    let store = Arc::new(MemoryStore::new());
    let api = client(&base, store.clone());

    let err = api.login("ada", "wrong").unwrap_err();
    match &err {
        ApiError::Http { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!SessionStore::new(store).is_authenticated().unwrap());
    server.join().unwrap();
}

#[test]
fn test_login_without_token_is_rejected() {
    let (base, server) = serve(vec![(200, r#"{"user": {"id": 1}}"#)]);
    let store = Arc::new(MemoryStore::new());
    let api = client(&base, store.clone());

    assert!(matches!(
        api.login("ada", "secret"),
        Err(ApiError::MissingToken)
    ));
    assert!(!SessionStore::new(store).is_authenticated().unwrap());
    server.join().unwrap();
}

#[test]
fn test_requests_carry_bearer_token_and_hit_resource_paths() {
    let (base, server) = serve(vec![
        (200, r#"[{"id": 1}, {"id": 2}]"#),
        (200, r#"{"id": 2}"#),
        (200, r#"{"id": 3, "amount": 12}"#),
        (200, r#"{"id": 3, "amount": 15}"#),
        (200, ""),
    ]);
    let store = Arc::new(MemoryStore::new());
    SessionStore::new(store.clone()).set_token("tok-2").unwrap();
    let api = client(&base, store);

    assert_eq!(api.get_all("expense").unwrap(), json!([{"id": 1}, {"id": 2}]));
    assert_eq!(api.get_one("expense", "2").unwrap(), json!({"id": 2}));
    api.create("expense", &json!({"amount": 12})).unwrap();
    api.update("expense", "3", &json!({"amount": 15})).unwrap();
    assert_eq!(api.remove("expense", "3").unwrap(), serde_json::Value::Null);

    let requests = server.join().unwrap();
    let lines: Vec<&str> = requests
        .iter()
        .map(|r| r.request_line.split(' ').take(2).collect::<Vec<_>>())
        .map(|parts| match parts.as_slice() {
            ["GET", "/api/expense"] => "list",
            ["GET", "/api/expense/2"] => "get",
            ["POST", "/api/expense"] => "create",
            ["PUT", "/api/expense/3"] => "update",
            ["DELETE", "/api/expense/3"] => "delete",
            _ => "unexpected",
        })
        .collect();
    assert_eq!(lines, ["list", "get", "create", "update", "delete"]);

    for request in &requests {
        assert_eq!(request.header("authorization"), Some("Bearer tok-2"));
    }
    let sent: serde_json::Value = serde_json::from_str(&requests[3].body).unwrap();
    assert_eq!(sent, json!({"amount": 15}));
}

#[test]
fn test_error_without_detail_reports_status() {
    let (base, server) = serve(vec![(500, "{}")]);
    let api = client(&base, Arc::new(MemoryStore::new()));

    let err = api.get_all("expense").unwrap_err();
    assert_eq!(err.to_string(), "API Error: 500");
    assert_eq!(err.status(), Some(500));
    server.join().unwrap();
}

#[test]
fn test_current_user_is_cached() {
    let (base, server) = serve(vec![(200, r#"{"id": 9, "username": "grace"}"#)]);
    let store = Arc::new(MemoryStore::new());
    SessionStore::new(store.clone()).set_token("tok-3").unwrap();
    let api = client(&base, store.clone());

    let user = api.current_user().unwrap();
    assert_eq!(user["username"], "grace");
    assert_eq!(SessionStore::new(store).user().unwrap(), Some(user));

    let requests = server.join().unwrap();
    assert!(requests[0].request_line.starts_with("GET /api/me "));
}

#[test]
fn test_logout_notifies_server_and_clears_session() {
    let (base, server) = serve(vec![(200, r#"{"message": "Logged out"}"#)]);
    let store = Arc::new(MemoryStore::new());
    let session = SessionStore::new(store.clone());
    session.set_token("tok-4").unwrap();
    session.set_user(&json!({"id": 1})).unwrap();
    let api = client(&base, store);

    api.logout().unwrap();
    assert!(!session.is_authenticated().unwrap());
    assert_eq!(session.user().unwrap(), None);

    let requests = server.join().unwrap();
    assert!(requests[0].request_line.starts_with("POST /api/logout "));
    assert_eq!(requests[0].header("authorization"), Some("Bearer tok-4"));
}

#[test]
fn test_logout_clears_session_when_server_is_unreachable() {
    // Bind then drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let store = Arc::new(MemoryStore::new());
    let session = SessionStore::new(store.clone());
    session.set_token("tok-5").unwrap();
    session.set_user(&json!({"id": 1})).unwrap();
    let api = client(&format!("http://127.0.0.1:{port}/api"), store);

    api.logout().unwrap();
    assert!(!session.is_authenticated().unwrap());
    assert_eq!(session.user().unwrap(), None);
}

#[test]
fn test_logout_without_token_skips_server() {
    // No server at all: nothing should be contacted.
    let store = Arc::new(MemoryStore::new());
    let api = client("http://127.0.0.1:9/api", store.clone());
    api.logout().unwrap();
    assert!(store.snapshot().unwrap().is_empty());
}
