use crate::{
    error::{DecodeError, InvalidInput},
    request::TransportRequest,
};

pub mod points;

/// How to build a request for one endpoint and how to read its response.
///
/// Both operations are synchronous and free of I/O, so a descriptor can be
/// shared by any number of concurrent loads.
pub trait RequestDescriptor: Send + Sync {
    type Input;
    type Output;

    /// Build the request for `input`. Must be deterministic, including query order.
    fn make_request(&self, input: &Self::Input) -> Result<TransportRequest, InvalidInput>;

    fn parse_response(&self, body: &[u8]) -> Result<Self::Output, DecodeError>;
}
