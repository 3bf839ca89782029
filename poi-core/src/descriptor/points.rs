use crate::{
    error::{DecodeError, InvalidInput},
    model::{Coordinate, PointOfInterest},
    request::{Endpoint, TransportRequest},
};

use super::RequestDescriptor;

/// Points of interest around a coordinate.
///
/// Sends `GET <endpoint>?lat=<latitude>&long=<longitude>` and expects a JSON
/// array of objects carrying at least a `name`.
#[derive(Debug, Clone, Default)]
pub struct PointsOfInterest {
    endpoint: Endpoint,
}

impl PointsOfInterest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl RequestDescriptor for PointsOfInterest {
    type Input = Coordinate;
    type Output = Vec<PointOfInterest>;

    fn make_request(&self, input: &Coordinate) -> Result<TransportRequest, InvalidInput> {
        if !input.is_valid() {
            return Err(InvalidInput::new(format!(
                "coordinate ({}, {}) is outside latitude [-90, 90] / longitude [-180, 180]",
                input.latitude, input.longitude
            )));
        }

        // `f64`'s Display is the shortest string that round-trips, so no precision is lost.
        Ok(TransportRequest::get(&self.endpoint)
            .with_query("lat", input.latitude.to_string())
            .with_query("long", input.longitude.to_string())
            .with_header("accept", "application/json"))
    }

    fn parse_response(&self, body: &[u8]) -> Result<Vec<PointOfInterest>, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }
}
