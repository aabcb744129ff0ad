//! Shared HTTP plumbing for the upstream clients.

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::UpstreamError;

/// Build an HTTP client with the given user agent and request timeout.
pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, UpstreamError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .use_rustls_tls()
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
        .map_err(UpstreamError::from)
}

/// Send a GET request and decode a JSON body.
///
/// Any non-2xx status is an error, regardless of the body.
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder, service: &str) -> Result<T, UpstreamError> {
    let start = Instant::now();

    let response = request.header(header::ACCEPT, "application/json").send().await?;

    let status = response.status();
    tracing::debug!("{} response status: {}", service, status);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(UpstreamError::RateLimited);
    }

    if !status.is_success() {
        return Err(UpstreamError::HttpError { status: status.as_u16() });
    }

    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes)?;

    tracing::debug!("{} request completed in {:?} ({} bytes)", service, start.elapsed(), bytes.len());

    Ok(body)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde::Deserialize;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[derive(Debug, Deserialize)]
    struct Body {
        ok: bool,
    }

    /// Serve a single canned HTTP response on a local port and return its base URL.
    pub(crate) async fn serve_once(status: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}")
    }

    async fn fetch(status: &str, body: &str) -> Result<Body, UpstreamError> {
        let base = serve_once(status, body).await;
        let client = build_client("songlink-mcp/0.1", Duration::from_secs(5)).unwrap();
        get_json(client.get(base), "test").await
    }

    #[test]
    fn test_build_client() {
        assert!(build_client("songlink-mcp/0.1", Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let body = fetch("200 OK", r#"{"ok":true}"#).await.unwrap();
        assert!(body.ok);
    }

    #[tokio::test]
    async fn test_get_json_server_error() {
        let err = fetch("503 Service Unavailable", r#"{"ok":true}"#).await.unwrap_err();
        assert!(matches!(err, UpstreamError::HttpError { status: 503 }));
    }

    #[tokio::test]
    async fn test_get_json_rate_limited() {
        let err = fetch("429 Too Many Requests", "").await.unwrap_err();
        assert!(matches!(err, UpstreamError::RateLimited));
    }

    #[tokio::test]
    async fn test_get_json_html_body() {
        let err = fetch("200 OK", "<html><body>maintenance</body></html>").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Parse(_)));
    }
}
