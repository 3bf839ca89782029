use crate::{
    descriptor::RequestDescriptor,
    error::LoadError,
    transport::{TransportClient, http::HttpTransport},
};

/// Glues one [`RequestDescriptor`] to one [`TransportClient`].
///
/// The loader holds no state besides the two, so a single instance can serve
/// any number of concurrent [`load`](Self::load) calls. It does not retry,
/// cache, dedupe or log; every failure goes back to the caller unchanged.
#[derive(Debug, Clone)]
pub struct RequestLoader<D, T = HttpTransport> {
    descriptor: D,
    transport: T,
}

impl<D: RequestDescriptor> RequestLoader<D, HttpTransport> {
    /// Loader over the process-wide [`HttpTransport`].
    pub fn new(descriptor: D) -> Self {
        Self::with_transport(descriptor, HttpTransport::shared())
    }
}

impl<D, T> RequestLoader<D, T>
where
    D: RequestDescriptor,
    T: TransportClient,
{
    pub fn with_transport(descriptor: D, transport: T) -> Self {
        Self { descriptor, transport }
    }

    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request, execute it, and parse the response.
    ///
    /// Input the descriptor rejects never reaches the transport.
    pub async fn load(&self, input: &D::Input) -> Result<D::Output, LoadError> {
        let request = self.descriptor.make_request(input)?;

        let raw = self
            .transport
            .execute(&request)
            .await
            .map_err(LoadError::Transport)?;

        Ok(self.descriptor.parse_response(&raw.body)?)
    }

    /// Callback form of [`load`](Self::load). `callback` runs exactly once,
    /// on the task awaiting this future.
    pub async fn load_with<F>(&self, input: &D::Input, callback: F)
    where
        F: FnOnce(Result<D::Output, LoadError>),
    {
        callback(self.load(input).await);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        descriptor::points::PointsOfInterest,
        error::{DecodeError, InvalidInput},
        model::{Coordinate, PointOfInterest},
        request::{Endpoint, RawResponse, TransportRequest},
        transport::mock::MockTransport,
    };
    use std::sync::Arc;

    fn coordinate() -> Coordinate {
        Coordinate::new(37.3293, -121.8893)
    }

    type MockLoader = RequestLoader<PointsOfInterest, Arc<MockTransport>>;

    fn loader_with(mock: MockTransport) -> (MockLoader, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let loader = RequestLoader::with_transport(PointsOfInterest::default(), Arc::clone(&mock));
        (loader, mock)
    }

    #[tokio::test]
    async fn load_returns_parsed_points() {
        let (loader, mock) = loader_with(MockTransport::new(|req| {
            assert_eq!(req.query_value("lat"), Some("37.3293"));
            assert_eq!(req.query_value("long"), Some("-121.8893"));
            Ok(RawResponse::ok(r#"[{"name":"MyPointOfInterest"}]"#))
        }));

        let mut invocations = 0;
        let mut outcome = None;
        loader
            .load_with(&coordinate(), |res| {
                invocations += 1;
                outcome = Some(res);
            })
            .await;

        assert_eq!(invocations, 1);
        let points = outcome.unwrap().expect("load should succeed");
        assert_eq!(points, vec![PointOfInterest { name: "MyPointOfInterest".to_string() }]);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_transport() {
        let (loader, mock) = loader_with(MockTransport::new(|_| {
            panic!("transport must not be called for invalid input")
        }));

        for input in [Coordinate::new(120.0, 0.0), Coordinate::new(0.0, -200.0)] {
            let err = loader.load(&input).await.unwrap_err();
            assert!(err.is_invalid_input(), "{err}");
        }
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn transport_failure_is_reported_once() {
        let (loader, mock) = loader_with(MockTransport::new(|_| {
            Err(anyhow::anyhow!("network unreachable"))
        }));

        let mut outcomes = Vec::new();
        loader.load_with(&coordinate(), |res| outcomes.push(res)).await;

        assert_eq!(outcomes.len(), 1);
        let err = outcomes.pop().unwrap().unwrap_err();
        assert!(err.is_transport());
        let cause = std::error::Error::source(&err).unwrap();
        assert_eq!(cause.to_string(), "network unreachable");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn error_status_is_a_transport_failure() {
        let (loader, mock) = loader_with(MockTransport::new(|_| {
            let mut res = RawResponse::ok("[]");
            res.status = 500;
            Ok(res)
        }));

        let err = loader.load(&Coordinate::new(1.0, 1.0)).await.unwrap_err();
        assert!(err.is_transport(), "{err}");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_failure() {
        let (loader, _) = loader_with(MockTransport::new(|_| Ok(RawResponse::ok("<html>"))));

        let err = loader.load(&coordinate()).await.unwrap_err();
        assert!(err.is_decode(), "{err}");
    }

    #[tokio::test]
    async fn repeated_loads_are_independent_and_identical() {
        let (loader, mock) = loader_with(MockTransport::new(|_| {
            Ok(RawResponse::ok(r#"[{"name":"A"},{"name":"B"}]"#))
        }));

        let first = loader.load(&coordinate()).await.unwrap();
        let second = loader.load(&coordinate()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn loader_is_reusable_after_a_failure() {
        let (loader, _) = loader_with(MockTransport::new(|req| {
            match req.query_value("lat") {
                Some("0") => Err(anyhow::anyhow!("timeout")),
                _ => Ok(RawResponse::ok(r#"[{"name":"Ok"}]"#)),
            }
        }));

        assert!(loader.load(&Coordinate::new(0.0, 0.0)).await.unwrap_err().is_transport());
        assert_eq!(loader.load(&Coordinate::new(1.0, 1.0)).await.unwrap()[0].name, "Ok");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_loads_resolve_independently() {
        let (loader, mock) = loader_with(MockTransport::new(|req| {
            let lat = req.query_value("lat").unwrap_or_default();
            Ok(RawResponse::ok(format!(r#"[{{"name":"at {lat}"}}]"#)))
        }));
        let loader = Arc::new(loader);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let loader = Arc::clone(&loader);
                tokio::spawn(async move { loader.load(&Coordinate::new(i as f64, 0.0)).await })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let points = handle.await.unwrap().unwrap();
            assert_eq!(points[0].name, format!("at {i}"));
        }
        assert_eq!(mock.calls(), 8);
    }

    #[tokio::test]
    async fn default_loader_rejects_invalid_input_without_network() {
        let loader = RequestLoader::new(PointsOfInterest::default());
        let err = loader.load(&Coordinate::new(f64::NAN, 0.0)).await.unwrap_err();
        assert!(err.is_invalid_input());
    }

    /// Any descriptor plugs in without touching the loader.
    #[derive(Debug)]
    struct Greeting;

    impl RequestDescriptor for Greeting {
        type Input = String;
        type Output = String;

        fn make_request(&self, input: &String) -> Result<TransportRequest, InvalidInput> {
            if input.is_empty() {
                return Err(InvalidInput::new("empty name"));
            }
            Ok(TransportRequest::get(&Endpoint::default()).with_query("name", input.as_str()))
        }

        fn parse_response(&self, body: &[u8]) -> Result<String, DecodeError> {
            String::from_utf8(body.to_vec()).map_err(|e| DecodeError::new(e.to_string()))
        }
    }

    #[tokio::test]
    async fn other_descriptors_plug_in() {
        let loader = RequestLoader::with_transport(
            Greeting,
            MockTransport::new(|req| {
                let name = req.query_value("name").unwrap_or_default();
                Ok(RawResponse::ok(format!("hello {name}")))
            }),
        );

        assert_eq!(loader.load(&"ada".to_string()).await.unwrap(), "hello ada");
        assert!(loader.load(&String::new()).await.unwrap_err().is_invalid_input());

        let bad = RequestLoader::with_transport(
            Greeting,
            MockTransport::new(|_| Ok(RawResponse::ok(vec![0xff, 0xfe]))),
        );
        assert!(bad.load(&"x".to_string()).await.unwrap_err().is_decode());
        assert_eq!(loader.transport().calls(), 1);
    }
}
