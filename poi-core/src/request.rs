//! Transport-level request and response values.
//!
//! These are plain data. Descriptors build [`TransportRequest`]s, transports
//! execute them and hand back a [`RawResponse`]. Neither side needs to know
//! how the other is implemented.

use anyhow::{Context, Result, anyhow};
use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed base target of a request: scheme, host (with optional port) and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: String,
    pub host: String,
    pub path: String,
}

impl Endpoint {
    pub const DEFAULT_URL: &'static str = "https://example.com/";

    /// Parse an absolute `http`/`https` URL without query or fragment.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).with_context(|| format!("Invalid endpoint URL '{raw}'"))?;

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(anyhow!(
                "Unsupported endpoint scheme '{scheme}' in '{raw}'. Use http or https."
            ));
        }

        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("Endpoint URL '{raw}' has no host"))?;

        if !url.username().is_empty() || url.password().is_some() {
            return Err(anyhow!("Endpoint URL '{raw}' must not carry credentials"));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(anyhow!(
                "Endpoint URL '{raw}' must not carry a query or fragment"
            ));
        }

        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self {
            scheme: scheme.to_string(),
            host,
            path: url.path().to_string(),
        })
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: "example.com".to_string(),
            path: "/".to_string(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)
    }
}

/// A request as handed to a [`TransportClient`](crate::TransportClient).
///
/// Query parameters and headers keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: Method,
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    pub fn new(method: Method, endpoint: &Endpoint) -> Self {
        Self {
            method,
            scheme: endpoint.scheme.clone(),
            host: endpoint.host.clone(),
            path: endpoint.path.clone(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(endpoint: &Endpoint) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// First value for `key`, if any.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full URL with the query form-encoded in order.
    pub fn url(&self) -> Result<Url> {
        let base = format!("{}://{}{}", self.scheme, self.host, self.path);
        let mut url = Url::parse(&base).with_context(|| format!("Invalid request URL '{base}'"))?;

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }
}

/// Bytes and minimal metadata returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
