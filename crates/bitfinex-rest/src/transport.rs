//! Single HTTP round trip with response normalization
//!
//! Every call goes through [`Transport::execute`]: the URL is resolved
//! against the base URL, the request is sent with the configured timeout,
//! 2xx bodies are decoded as JSON and anything else becomes
//! [`RestError::Api`].

use crate::error::{ErrorBody, RestError, RestResult};
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Description of one HTTP request
#[derive(Debug, Clone)]
pub struct Request<'a> {
    method: Method,
    path: &'a str,
    segments: Vec<String>,
    query: Option<Vec<(&'a str, String)>>,
    body: Option<Value>,
    headers: Vec<(&'static str, String)>,
}

impl<'a> Request<'a> {
    /// GET request for a path relative to the base URL
    pub fn get(path: &'a str) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request for a path relative to the base URL
    pub fn post(path: &'a str) -> Self {
        Self::new(Method::POST, path)
    }

    fn new(method: Method, path: &'a str) -> Self {
        Self {
            method,
            path,
            segments: Vec::new(),
            query: None,
            body: None,
            headers: Vec::new(),
        }
    }

    /// Append one path segment, percent-encoded
    ///
    /// `/`, `?` and `#` in the segment are encoded, so it can never address
    /// a different endpoint.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Attach query parameters
    pub fn query(mut self, params: Vec<(&'a str, String)>) -> Self {
        self.query = Some(params);
        self
    }

    /// Attach a JSON body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a header
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// The HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path relative to the base URL
    pub fn path(&self) -> &str {
        self.path
    }
}

/// HTTP transport bound to a base URL and timeout
#[derive(Debug, Clone)]
pub struct Transport {
    http_client: Client,
    base_url: Url,
    timeout: Duration,
}

impl Transport {
    /// Create a transport
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            timeout,
        })
    }

    /// The base URL all paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve a path against the base URL
    pub fn url_for(&self, path: &str) -> RestResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Full URL of a request: base URL, path, then encoded segments
    pub fn resolve(&self, request: &Request<'_>) -> RestResult<Url> {
        let mut url = self.url_for(request.path)?;
        if request.segments.is_empty() {
            return Ok(url);
        }

        if let Some(bad) = request
            .segments
            .iter()
            .find(|segment| matches!(segment.as_str(), "" | "." | ".."))
        {
            return Err(RestError::InvalidArguments(format!(
                "invalid path segment: {:?}",
                bad
            )));
        }

        url.path_segments_mut()
            .map_err(|_| {
                RestError::InvalidArguments(format!(
                    "{} cannot take path segments",
                    self.base_url
                ))
            })?
            .extend(&request.segments);
        Ok(url)
    }

    /// Send a request and decode the response
    ///
    /// Query parameters and a body are mutually exclusive; supplying both
    /// fails with [`RestError::InvalidArguments`] before anything is sent.
    pub async fn execute(&self, request: Request<'_>) -> RestResult<Value> {
        if request.query.is_some() && request.body.is_some() {
            return Err(RestError::InvalidArguments(
                "query parameters and body cannot both be supplied".to_string(),
            ));
        }

        let url = self.resolve(&request)?;
        debug!(method = %request.method, %url, "Sending request");

        let mut builder = self.http_client.request(request.method, url);
        if let Some(query) = &request.query {
            builder = builder.query(query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RestError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        let url = response.url().clone();
        let text = response
            .text()
            .await
            .map_err(|e| RestError::from_reqwest(e, self.timeout))?;

        if status.is_success() {
            return serde_json::from_str(&text)
                .map_err(|e| RestError::Parse(format!("invalid JSON from {}: {}", url, e)));
        }

        warn!(%url, status = status.as_u16(), "Couldn't access endpoint");

        Err(RestError::Api {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body: ErrorBody::from_raw(text),
        })
    }
}
