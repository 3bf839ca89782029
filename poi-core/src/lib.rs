//! Core library for the `poi` CLI.
//!
//! This crate defines:
//! - The request descriptor contract (build a request, parse a response)
//! - The transport contract, with a `reqwest` implementation and a test mock
//! - A generic loader gluing one descriptor to one transport
//! - The points-of-interest descriptor and its domain models
//! - Configuration handling
//!
//! `MockTransport` is compiled for this crate's tests and, with the `mock`
//! feature, for downstream tests.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod loader;
pub mod model;
pub mod request;
pub mod transport;

pub use config::Config;
pub use descriptor::{RequestDescriptor, points::PointsOfInterest};
pub use error::{DecodeError, InvalidInput, LoadError};
pub use loader::RequestLoader;
pub use model::{Coordinate, PointOfInterest};
pub use request::{Endpoint, Method, RawResponse, TransportRequest};
pub use transport::{TransportClient, http::HttpTransport};

#[cfg(any(test, feature = "mock"))]
pub use transport::mock::MockTransport;
