use crate::request::{RawResponse, TransportRequest};
use anyhow::Result;
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

/// Executes a [`TransportRequest`] and yields the raw response.
///
/// This is the only boundary between the loader and real I/O. Timeouts and
/// connection handling belong to the implementation.
#[async_trait]
pub trait TransportClient: Send + Sync + Debug {
    /// Send `request` and return the response.
    ///
    /// A response whose status is not 2xx must come back as `Err`, so that
    /// callers only ever see bodies of successful responses.
    async fn execute(&self, request: &TransportRequest) -> Result<RawResponse>;
}

#[async_trait]
impl<T: TransportClient + ?Sized> TransportClient for Arc<T> {
    async fn execute(&self, request: &TransportRequest) -> Result<RawResponse> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<T: TransportClient + ?Sized> TransportClient for Box<T> {
    async fn execute(&self, request: &TransportRequest) -> Result<RawResponse> {
        (**self).execute(request).await
    }
}
