use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::request::{RawResponse, TransportRequest};

use super::TransportClient;

type Handler = Box<dyn Fn(&TransportRequest) -> Result<RawResponse> + Send + Sync>;

/// Programmable transport for tests.
///
/// The installed handler sees the exact request a descriptor produced and
/// decides the response. Each instance owns its handler, so tests never
/// observe each other's programming. A programmed non-2xx response is
/// turned into an error, as a real transport would. Executing without a
/// handler panics.
pub struct MockTransport {
    handler: Option<Handler>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&TransportRequest) -> Result<RawResponse> + Send + Sync + 'static,
    {
        Self {
            handler: Some(Box::new(handler)),
            calls: AtomicUsize::new(0),
        }
    }

    /// A mock with no handler yet. Install one with [`set_handler`](Self::set_handler).
    pub fn unprogrammed() -> Self {
        Self {
            handler: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_handler<F>(&mut self, handler: F)
    where
        F: Fn(&TransportRequest) -> Result<RawResponse> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
    }

    /// Number of `execute` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("programmed", &self.handler.is_some())
            .field("calls", &self.calls())
            .finish()
    }
}

#[async_trait]
impl TransportClient for MockTransport {
    async fn execute(&self, request: &TransportRequest) -> Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let Some(handler) = &self.handler else {
            panic!(
                "MockTransport executed {} {} without a handler; install one with MockTransport::new or set_handler",
                request.method, request.path
            );
        };

        let res = handler(request)?;
        if !res.is_success() {
            return Err(anyhow!(
                "Request to {} failed with status {}: {}",
                request.path,
                res.status,
                String::from_utf8_lossy(&res.body),
            ));
        }

        Ok(res)
    }
}
