//! Minimal HTTP/1.1 server that serves asset blobs for integration tests.
//!
//! Each route answers GET with a fixed status, optional Content-Disposition
//! and body. Every request's path and Cookie header are recorded so tests can
//! assert how often an asset was fetched.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: &'static str,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl Route {
    /// 200 with `attachment; filename="<filename>"`.
    pub fn attachment(filename: &str, body: &[u8]) -> Self {
        Self {
            status: "200 OK",
            content_disposition: Some(format!("attachment; filename=\"{}\"", filename)),
            body: body.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub path: String,
    pub cookie: Option<String>,
}

/// Handle to a running server. The server runs until the process exits.
pub struct AssetServer {
    base_url: String,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl AssetServer {
    /// Full URL for `path` (which must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

/// Starts a server in a background thread serving `routes` (keyed by path).
/// Unknown paths get 404.
pub fn start(routes: HashMap<String, Route>) -> AssetServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &routes, &log));
        }
    });
    AssetServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    log: &Mutex<Vec<Request>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
    }
    let request = match std::str::from_utf8(&raw) {
        Ok(s) => s,
        Err(_) => return,
    };
    let Some(parsed) = parse_request(request) else {
        return;
    };
    let path = parsed.path.clone();
    log.lock().unwrap().push(parsed);

    let response = match routes.get(&path) {
        Some(route) => {
            let disposition = route
                .content_disposition
                .as_deref()
                .map(|v| format!("Content-Disposition: {}\r\n", v))
                .unwrap_or_default();
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
                route.status,
                route.body.len(),
                disposition
            );
            let mut out = head.into_bytes();
            out.extend_from_slice(&route.body);
            out
        }
        None => b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
    };
    let _ = stream.write_all(&response);
}

fn parse_request(request: &str) -> Option<Request> {
    let mut lines = request.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?;
    if !method.eq_ignore_ascii_case("GET") {
        return None;
    }
    let path = parts.next()?.to_string();

    let mut cookie = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("cookie") {
                cookie = Some(value.trim().to_string());
            }
        }
    }
    Some(Request { path, cookie })
}
