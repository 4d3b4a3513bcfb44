//! In-memory transport for store and rewriter tests.

use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use crate::credential::Credential;
use crate::transport::{FetchResponse, Transport};

enum Route {
    Respond(FetchResponse),
    Fail(String),
}

#[derive(Default)]
struct Inner {
    routes: HashMap<String, Route>,
    /// (url, cookie) per request, in order.
    requests: Vec<(String, String)>,
    /// File sampled at every request.
    watched: Option<PathBuf>,
    /// Contents of `watched` at each request, `None` while it is absent.
    watched_contents: Vec<Option<Vec<u8>>>,
}

/// Serves canned responses and records every request. Clones share state, so
/// a test keeps one handle while the store owns a boxed clone.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    inner: Rc<RefCell<Inner>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 200 with `Content-Disposition: attachment; filename="<filename>"`.
    pub fn serve(&self, url: &str, filename: &str, body: &[u8]) {
        self.serve_response(
            url,
            FetchResponse {
                status: 200,
                content_disposition: Some(format!("attachment; filename=\"{}\"", filename)),
                body: body.to_vec(),
            },
        );
    }

    pub fn serve_response(&self, url: &str, response: FetchResponse) {
        self.inner
            .borrow_mut()
            .routes
            .insert(url.to_string(), Route::Respond(response));
    }

    pub fn fail(&self, url: &str, message: &str) {
        self.inner
            .borrow_mut()
            .routes
            .insert(url.to_string(), Route::Fail(message.to_string()));
    }

    /// Snapshots the contents of `path` each time a request is made.
    pub fn watch(&self, path: PathBuf) {
        self.inner.borrow_mut().watched = Some(path);
    }

    pub fn watched_contents(&self) -> Vec<Option<Vec<u8>>> {
        self.inner.borrow().watched_contents.clone()
    }

    pub fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.inner
            .borrow()
            .requests
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.inner
            .borrow()
            .requests
            .iter()
            .filter(|(u, _)| u == url)
            .count()
    }

    pub fn cookies_sent(&self) -> Vec<String> {
        self.inner
            .borrow()
            .requests
            .iter()
            .map(|(_, cookie)| cookie.clone())
            .collect()
    }
}

impl Transport for FakeTransport {
    fn fetch(&self, url: &str, credential: &Credential) -> Result<FetchResponse> {
        let mut inner = self.inner.borrow_mut();
        inner
            .requests
            .push((url.to_string(), credential.cookie_header().to_string()));
        if let Some(path) = &inner.watched {
            let snapshot = std::fs::read(path).ok();
            inner.watched_contents.push(snapshot);
        }
        match inner.routes.get(url) {
            Some(Route::Respond(r)) => Ok(r.clone()),
            Some(Route::Fail(msg)) => Err(anyhow!("{}", msg)),
            None => Err(anyhow!("connection refused: {}", url)),
        }
    }
}
