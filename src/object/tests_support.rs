//! In-memory requester for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::error::{GithubError, Result};
use crate::traits::{Headers, Requester};

/// Serves canned bodies by URL and records every request.
#[derive(Debug)]
pub(crate) struct FakeRequester {
    base: Url,
    bodies: Mutex<HashMap<String, Value>>,
    failures: Mutex<u32>,
    calls: Mutex<Vec<String>>,
    inputs: Mutex<Vec<Value>>,
}

impl FakeRequester {
    pub(crate) fn new() -> Self {
        Self {
            base: Url::parse("https://api.test/").unwrap(),
            bodies: Mutex::new(HashMap::new()),
            failures: Mutex::new(0),
            calls: Mutex::new(Vec::new()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Serve `body` for any method on `url`.
    pub(crate) fn serve(&self, url: &str, body: Value) {
        self.bodies.lock().unwrap().insert(url.to_string(), body);
    }

    /// Serve `body` for `method` on `url`, taking precedence over `serve`.
    pub(crate) fn serve_method(&self, method: Method, url: &str, body: Value) {
        self.bodies
            .lock()
            .unwrap()
            .insert(format!("{method} {url}"), body);
    }

    /// Fail the next `n` requests with a server error.
    pub(crate) fn fail_next(&self, n: u32) {
        *self.failures.lock().unwrap() = n;
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every request so far, as `"METHOD url"`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Request bodies sent so far.
    pub(crate) fn inputs(&self) -> Vec<Value> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Requester for FakeRequester {
    fn base_url(&self) -> &Url {
        &self.base
    }

    async fn request_json(
        &self,
        method: Method,
        url: &str,
        input: Option<&Value>,
    ) -> Result<(Headers, Value)> {
        let key = format!("{method} {url}");
        self.calls.lock().unwrap().push(key.clone());
        if let Some(input) = input {
            self.inputs.lock().unwrap().push(input.clone());
        }
        {
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(GithubError::ApiError {
                    message: "Server Error".to_string(),
                    status_code: Some(502),
                });
            }
        }
        let body = {
            let bodies = self.bodies.lock().unwrap();
            bodies.get(&key).or_else(|| bodies.get(url)).cloned()
        };
        match body {
            Some(body) => {
                let mut headers = Headers::new();
                headers.insert("etag".to_string(), "\"v1\"".to_string());
                Ok((headers, body))
            }
            None => Err(GithubError::NotFound {
                url: url.to_string(),
            }),
        }
    }

    async fn get_json_if_modified(
        &self,
        url: &str,
        etag: Option<&str>,
        _last_modified: Option<&str>,
    ) -> Result<Option<(Headers, Value)>> {
        if etag == Some("\"v1\"") {
            self.calls.lock().unwrap().push(format!("GET {url} (304)"));
            return Ok(None);
        }
        self.request_json(Method::GET, url, None).await.map(Some)
    }
}
