//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{HeaderMap, Request, StatusCode},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceExt;

use signed_request::policy::{GlobalPolicy, PolicyResolver};
use signed_request::routing::RouteTable;
use signed_request::{
    HttpServer, RouteOverride, Secret, SignatureAlgorithm, SignedRequestConfig,
    SignedRequestRouterExt, SignedRequestState, Shutdown, Signer,
};

pub const SECRET: &str = "testsalt";
pub const BODY: &str = "TestResponse";

/// md5("/test" + "testsalt")
pub const TEST_PATH_SIGNATURE: &str = "6050b831799ad49213cf279e8eda7d5c";
/// md5("/test" + "testsaltWrong")
pub const WRONG_SIGNATURE: &str = "4277c69f4c202b7793ec74cf5d1ddd91";
/// md5("TestResponse" + "testsalt")
pub const BODY_SIGNATURE: &str = "c980a05698a6ceacd0df2c8e12e34887";
/// md5("/annotation" + "testsalt")
pub const ANNOTATION_SIGNATURE: &str = "83849ebaa03c2ac6c36fabbe3783a124";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub fn legacy_signer() -> Signer {
    Signer::new(Secret::new(SECRET).unwrap(), SignatureAlgorithm::Md5)
}

/// Signing state with the legacy digest, `/annotation` forced to verify.
pub fn state(verify: bool, sign: bool, debug: bool) -> Arc<SignedRequestState> {
    let routes = RouteTable::new().with_override("/annotation", RouteOverride::verify(true));
    let resolver = PolicyResolver::new(GlobalPolicy { verify, sign, debug }, routes);
    Arc::new(SignedRequestState::new(legacy_signer(), resolver))
}

/// Application with `/test` and `/annotation`, both answering `TestResponse`.
pub fn app(state: Arc<SignedRequestState>) -> Router {
    Router::new()
        .route("/test", get(|| async { BODY }))
        .route("/annotation", get(|| async { BODY }))
        .with_signed_requests(state)
}

pub async fn send(router: &Router, path: &str, signature: Option<&str>) -> TestResponse {
    let mut request = Request::builder().method("GET").uri(path);
    if let Some(signature) = signature {
        request = request.header("X-SignedRequest", signature);
    }
    let response = router
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Start a full server on an ephemeral port.
pub async fn spawn_server(config: SignedRequestConfig, app: Router) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, app).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}
