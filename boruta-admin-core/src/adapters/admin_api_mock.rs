//! Mock Boruta admin API server for testing
//!
//! Serves canned responses for `(method, path)` pairs and records every
//! request it receives, so tests can assert on what the client actually sent:
//! method, path, `Authorization` header and JSON body.
//!
//! Unrouted requests get a 404, which is what the real API answers for
//! unknown users.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::Value as JsonValue;

/// Mock admin API server for testing
pub struct MockAdminServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// A request as received by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<JsonValue>,
}

#[derive(Debug, Clone)]
struct MockRoute {
    method: String,
    path: String,
    status: u16,
    body: String,
}

/// Routes served by the mock server
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    routes: Vec<MockRoute>,
}

impl MockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and a JSON body
    pub fn route(self, method: &str, path: &str, status: u16, body: JsonValue) -> Self {
        self.raw_route(method, path, status, &body.to_string())
    }

    /// Answer `method path` with `status` and a verbatim body
    pub fn raw_route(mut self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.routes.push(MockRoute {
            method: method.to_uppercase(),
            path: path.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }
}

impl MockAdminServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking accept so the server can be stopped
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = requests_clone.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base URL to configure the client with (without `/api/users`)
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockAdminServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, log: &Mutex<Vec<RecordedRequest>>) {
    // Accepted sockets may inherit non-blocking mode from the listener
    let _ = stream.set_nonblocking(false);

    let Some((head, body)) = read_request(&mut stream) else {
        send_response(&mut stream, 400, r#"{"errors": {"request": ["malformed"]}}"#);
        return;
    };

    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let authorization = lines.find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("authorization")
            .then(|| value.trim().to_string())
    });

    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    log.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization,
        body,
    });

    match config
        .routes
        .iter()
        .find(|route| route.method == method && route.path == path)
    {
        Some(route) => send_response(&mut stream, route.status, &route.body),
        None => send_response(&mut stream, 404, r#"{"errors": {"detail": ["Not Found"]}}"#),
    }
}

/// Read the request head and a `Content-Length` delimited body
fn read_request(stream: &mut TcpStream) -> Option<(String, Vec<u8>)> {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    let head_end = loop {
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
    };

    let head = String::from_utf8_lossy(&data[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < head_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let body_end = (head_end + content_length).min(data.len());
    Some((head, data[head_end..body_end].to_vec()))
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ApiClient, MemoryTokenStore, RecordingNavigator};
    use crate::domain::result::Error;
    use crate::domain::{Outcome, Route};
    use crate::ports::TokenStore;
    use serde_json::json;

    fn client_for(server: &MockAdminServer, navigator: Arc<RecordingNavigator>) -> ApiClient {
        ApiClient::build(
            &server.base_url(),
            &MemoryTokenStore::with_access_token("test_token"),
            navigator,
        )
        .unwrap()
    }

    #[test]
    fn test_mock_server_starts() {
        let server = MockAdminServer::start(MockConfig::new()).unwrap();
        assert!(server.port() > 0);
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let server = MockAdminServer::start(
            MockConfig::new().route("GET", "/api/users/current", 200, json!({ "data": { "id": 1 } })),
        )
        .unwrap();
        let navigator = Arc::new(RecordingNavigator::new());
        let client = client_for(&server, navigator.clone());

        let outcome = client.get("/current").await.unwrap();
        let response = outcome.completed().unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.data, json!({ "data": { "id": 1 } }));
        assert!(navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let server = MockAdminServer::start(
            MockConfig::new().route("GET", "/api/users/", 200, json!({ "data": [] })),
        )
        .unwrap();
        let client = client_for(&server, Arc::new(RecordingNavigator::new()));

        let _ = client.get("/").await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test_token"));
    }

    #[tokio::test]
    async fn test_token_is_read_at_build_time() {
        let server = MockAdminServer::start(
            MockConfig::new().route("GET", "/api/users/", 200, json!({ "data": [] })),
        )
        .unwrap();
        let tokens = MemoryTokenStore::with_access_token("first");
        let client = ApiClient::build(
            &server.base_url(),
            &tokens,
            Arc::new(RecordingNavigator::new()),
        )
        .unwrap();

        tokens.set("access_token", "second").unwrap();
        let _ = client.get("/").await.unwrap();

        assert_eq!(
            server.requests()[0].authorization.as_deref(),
            Some("Bearer first")
        );
    }

    #[tokio::test]
    async fn test_404_redirects_to_not_found() {
        let server = MockAdminServer::start(MockConfig::new()).unwrap();
        let navigator = Arc::new(RecordingNavigator::new());
        let client = client_for(&server, navigator.clone());

        let outcome = client.get("/missing").await.unwrap();

        assert_eq!(outcome, Outcome::Redirected(Route::NotFound));
        assert_eq!(navigator.routes(), vec![Route::NotFound]);
    }

    #[tokio::test]
    async fn test_400_redirects_to_bad_request() {
        let server = MockAdminServer::start(
            MockConfig::new().route("DELETE", "/api/users/abc", 400, json!({ "error": "bad" })),
        )
        .unwrap();
        let navigator = Arc::new(RecordingNavigator::new());
        let client = client_for(&server, navigator.clone());

        let outcome = client.delete("/abc").await.unwrap();

        assert_eq!(outcome.redirect(), Some(Route::BadRequest));
        assert_eq!(navigator.routes(), vec![Route::BadRequest]);
    }

    #[tokio::test]
    async fn test_500_is_propagated_untouched() {
        let server = MockAdminServer::start(
            MockConfig::new().route("GET", "/api/users/", 500, json!({ "message": "boom" })),
        )
        .unwrap();
        let navigator = Arc::new(RecordingNavigator::new());
        let client = client_for(&server, navigator.clone());

        let err = client.get("/").await.unwrap_err();

        match err {
            Error::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, json!({ "message": "boom" }));
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
        assert!(navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let server = MockAdminServer::start(
            MockConfig::new().raw_route("DELETE", "/api/users/1", 200, ""),
        )
        .unwrap();
        let client = client_for(&server, Arc::new(RecordingNavigator::new()));

        let response = client.delete("/1").await.unwrap().completed().unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.data, JsonValue::Null);
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let mut server = MockAdminServer::start(MockConfig::new()).unwrap();
        let base_url = server.base_url();
        server.stop();
        drop(server);

        let client = ApiClient::build(
            &base_url,
            &MemoryTokenStore::new(),
            Arc::new(RecordingNavigator::new()),
        )
        .unwrap();

        let err = client.get("/").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
