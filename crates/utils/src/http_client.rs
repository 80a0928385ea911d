//! Minimal HTTP transport for JSON-over-HTTP service clients.
//!
//! A [HttpClient] owns one `reqwest::Client` (and therefore one connection pool) together with
//! the settings that every request issued through it shares:
//!
//! - the base URL, with trailing slashes removed, that request paths are appended to
//! - an optional timeout applied to each request
//! - default headers (authentication and the like)
//!
//! These are fixed when [HttpClientBuilder::build] runs. Per-call details (method, path,
//! query parameters, multipart parts) go through [RequestBuilder].
//!
//! ```ignore
//! let client = HttpClient::builder("https://storage.example.com/")?
//!     .timeout(Duration::from_secs(10))
//!     .default_header(HeaderName::from_static("key"), HeaderValue::from_str(api_key)?)
//!     .build()?;
//!
//! let response = client
//!     .request()
//!     .method(Method::DELETE)
//!     .path("/api/delete")
//!     .query_param("bucket", "images")
//!     .send()
//!     .await?;
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("Invalid base URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Base URL {0} cannot carry a request path")]
    CannotBeABase(String),

    #[error("Unsupported URL scheme {scheme:?} in {url}, expected http or https")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("Failed to build the underlying HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configures a [HttpClient]. Obtained from [HttpClient::builder].
#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: Url,
    client: Option<reqwest::Client>,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl HttpClientBuilder {
    /// Reuses an existing `reqwest::Client` instead of creating a new one.
    ///
    /// The builder's timeout and headers are still applied to every request sent through the
    /// resulting [HttpClient], on top of whatever the supplied client was built with.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn build(self) -> Result<HttpClient, HttpClientError> {
        let inner = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder().build()?,
        };

        Ok(HttpClient { inner, base_url: self.base_url, timeout: self.timeout, default_headers: self.default_headers })
    }
}

/// Shared transport. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: Url,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl HttpClient {
    /// Starts configuring a client rooted at `base_url`.
    ///
    /// Trailing slashes are stripped before parsing, so `http://host/` and `http://host` are
    /// equivalent, as are `http://host/prefix/` and `http://host/prefix`.
    pub fn builder(base_url: &str) -> Result<HttpClientBuilder, HttpClientError> {
        let trimmed = base_url.trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|source| HttpClientError::InvalidUrl { url: base_url.to_string(), source })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(HttpClientError::UnsupportedScheme {
                url: base_url.to_string(),
                scheme: url.scheme().to_string(),
            });
        }
        if url.cannot_be_a_base() {
            return Err(HttpClientError::CannotBeABase(base_url.to_string()));
        }

        Ok(HttpClientBuilder { base_url: url, client: None, timeout: None, default_headers: HeaderMap::new() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Starts a new request. Defaults to `GET` on the base URL.
    pub fn request(&self) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            method: Method::GET,
            url: self.base_url.clone(),
            query: Vec::new(),
            form: None,
        }
    }
}

#[derive(Debug)]
pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    method: Method,
    url: Url,
    query: Vec<(String, String)>,
    form: Option<Form>,
}

impl RequestBuilder<'_> {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Appends path segments to the URL. `"/api/upload"` and `.path("api").path("upload")`
    /// produce the same URL; each segment is percent-encoded on its own.
    pub fn path(mut self, path: &str) -> Self {
        // The base URL was checked in `HttpClient::builder`, so it can always take segments.
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.pop_if_empty();
            for segment in path.split('/').filter(|segment| !segment.is_empty()) {
                segments.push(segment);
            }
        }
        self
    }

    /// Adds a query parameter. Values are form-urlencoded when the request is sent.
    pub fn query_param(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds a text field to the multipart body, turning the request into `multipart/form-data`.
    pub fn form_text(mut self, key: &str, value: &str) -> Self {
        let form = self.form.take().unwrap_or_else(Form::new);
        self.form = Some(form.text(key.to_string(), value.to_string()));
        self
    }

    /// Adds an arbitrary part (typically a file) to the multipart body.
    pub fn form_part(mut self, key: &str, part: Part) -> Self {
        let form = self.form.take().unwrap_or_else(Form::new);
        self.form = Some(form.part(key.to_string(), part));
        self
    }

    /// The URL this request will be sent to, including query parameters.
    pub fn url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        url
    }

    pub async fn send(self) -> Result<Response, reqwest::Error> {
        let url = self.url();

        let mut request = self.client.inner.request(self.method, url).headers(self.client.default_headers.clone());
        if let Some(timeout) = self.client.timeout {
            request = request.timeout(timeout);
        }
        if let Some(form) = self.form {
            request = request.multipart(form);
        }

        request.send().await
    }
}

/// Reads the body of a failed response for diagnostics.
///
/// Returns the body text (or a placeholder naming `operation` when the body itself cannot be
/// read) together with the response status.
pub async fn extract_http_error_text(response: Response, operation: &str) -> (String, StatusCode) {
    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => format!("<failed to read {operation} error body: {e}>"),
    };
    (text, status)
}
