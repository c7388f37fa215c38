//! Full server over TCP with the signing client.

use axum::{extract::Path, routing::get, Router};
use reqwest::StatusCode;
use signed_request::client::SignedClient;
use signed_request::{Secret, SignatureAlgorithm, SignedRequestConfig, Signer, VerificationOutcome};

mod common;

use common::{BODY, BODY_SIGNATURE, SECRET, TEST_PATH_SIGNATURE};

fn config(algorithm: SignatureAlgorithm) -> SignedRequestConfig {
    let mut config = SignedRequestConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.signature.secret = SECRET.into();
    config.signature.algorithm = algorithm;
    config
}

fn app() -> Router {
    Router::new().route("/test", get(|| async { BODY }))
}

#[tokio::test]
async fn test_legacy_client_round_trip() {
    let (addr, shutdown) = common::spawn_server(config(SignatureAlgorithm::Md5), app()).await;

    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = http
        .get(format!("http://{}/test", addr))
        .header("X-SignedRequest", TEST_PATH_SIGNATURE)
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("x-signedrequest").and_then(|v| v.to_str().ok()),
        Some(BODY_SIGNATURE)
    );
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), BODY);

    let res = http.get(format!("http://{}/test", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "");

    shutdown.trigger();
}

#[tokio::test]
async fn test_signed_client_with_hmac() {
    let (addr, shutdown) = common::spawn_server(config(SignatureAlgorithm::HmacSha256), app()).await;

    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let signer = Signer::new(Secret::new(SECRET).unwrap(), SignatureAlgorithm::HmacSha256);
    let client = SignedClient::with_client(http.clone(), format!("http://{}", addr), signer);

    let res = client.get("/test").await.unwrap();
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), BODY);
    assert!(res.is_trusted());
    assert_eq!(res.debug, None);

    let wrong = Signer::new(Secret::new("testsaltWrong").unwrap(), SignatureAlgorithm::HmacSha256);
    let client = SignedClient::with_client(http, format!("http://{}", addr), wrong);
    let res = client.get("/test").await.unwrap();
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.signature, VerificationOutcome::Absent);

    shutdown.trigger();
}

fn hmac_client(addr: std::net::SocketAddr, base_path: &str, secret: &str) -> SignedClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let signer = Signer::new(Secret::new(secret).unwrap(), SignatureAlgorithm::HmacSha256);
    SignedClient::with_client(http, format!("http://{}{}", addr, base_path), signer)
}

#[tokio::test]
async fn test_signed_client_with_encoded_path() {
    let app = Router::new().route("/users/{id}", get(|Path(id): Path<String>| async move { id }));
    let (addr, shutdown) = common::spawn_server(config(SignatureAlgorithm::HmacSha256), app).await;
    let client = hmac_client(addr, "", SECRET);

    for (path, id) in [("/users/ab", "ab"), ("/users/a b", "a b"), ("/users/é", "é")] {
        let res = client.get(path).await.unwrap();
        assert_eq!(res.status, StatusCode::OK, "path {:?}", path);
        assert_eq!(res.text(), id);
        assert!(res.is_trusted());
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_signed_client_with_base_path() {
    let app = Router::new().nest("/api", app());
    let (addr, shutdown) = common::spawn_server(config(SignatureAlgorithm::HmacSha256), app).await;
    let client = hmac_client(addr, "/api", SECRET);

    let res = client.get("/test").await.unwrap();
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), BODY);
    assert!(res.is_trusted());

    shutdown.trigger();
}

#[tokio::test]
async fn test_signed_client_reads_debug_header() {
    let mut config = config(SignatureAlgorithm::HmacSha256);
    config.signature.debug = true;
    let (addr, shutdown) = common::spawn_server(config, app()).await;

    let res = hmac_client(addr, "", SECRET).get("/test").await.unwrap();
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.debug, Some(true));
    assert!(res.is_trusted());

    let res = hmac_client(addr, "", "testsaltWrong").get("/test").await.unwrap();
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), BODY);
    assert_eq!(res.debug, Some(false));
    // Signed with the server's secret, not ours.
    assert_eq!(res.signature, VerificationOutcome::Mismatch);

    shutdown.trigger();
}
