//! Indexer HTTP Client - Plain JSON REST Client
//!
//! Wraps reqwest with a timeout, optional relaxed TLS for local
//! indexers, and uniform status handling. One request per call:
//! failures are returned to the caller as-is.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::NetworkConfig;

/// Configuration for the indexer HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
  /// Request timeout.
  pub timeout: Duration,
  /// Accept self-signed / invalid TLS certificates.
  pub accept_invalid_certs: bool,
}

impl Default for HttpClientConfig {
  fn default() -> Self {
    Self {
      timeout: Duration::from_secs(30),
      accept_invalid_certs: false,
    }
  }
}

impl From<&NetworkConfig> for HttpClientConfig {
  fn from(net: &NetworkConfig) -> Self {
    Self {
      timeout: Duration::from_secs(net.timeout_seconds),
      accept_invalid_certs: net.accept_invalid_certs,
    }
  }
}

/// JSON-over-HTTP client shared by the indexer and LCD adapters.
#[derive(Debug, Clone)]
pub struct JsonHttpClient {
  /// Underlying HTTP client.
  http: Client,
}

impl JsonHttpClient {
  /// Create a new client.
  pub fn new(config: &HttpClientConfig) -> Result<Self> {
    if config.accept_invalid_certs {
      warn!("TLS certificate verification disabled for indexer requests");
    }

    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(5)
      .danger_accept_invalid_certs(config.accept_invalid_certs)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { http })
  }

  /// GET `url` and decode the JSON body.
  pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
    debug!(url, "GET");
    let response = self
      .http
      .get(url)
      .send()
      .await
      .with_context(|| format!("GET {url} failed"))?;

    Self::decode(url, response).await
  }

  /// POST a JSON body to `url` and decode the JSON response.
  pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
  where
    B: serde::Serialize + ?Sized,
    T: DeserializeOwned,
  {
    debug!(url, "POST");
    let response = self
      .http
      .post(url)
      .json(body)
      .send()
      .await
      .with_context(|| format!("POST {url} failed"))?;

    Self::decode(url, response).await
  }

  /// Map non-2xx to an error carrying status + body, else parse JSON.
  async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T> {
    let status = response.status();
    let body = response
      .text()
      .await
      .with_context(|| format!("Failed to read response body from {url}"))?;

    if !status.is_success() {
      return Err(anyhow::anyhow!("API error {status} from {url}: {body}"));
    }

    serde_json::from_str(&body)
      .with_context(|| format!("Failed to unmarshal response from {url}"))
  }

  /// Check if `url` answers at all (any HTTP status counts).
  pub async fn reachable(&self, url: &str) -> bool {
    self.http.get(url).send().await.is_ok()
  }
}

/// Join a base URL and a path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
  format!(
    "{}/{}",
    base.trim_end_matches('/'),
    path.trim_start_matches('/')
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_join_url() {
    assert_eq!(join_url("http://a:1/", "/x/y"), "http://a:1/x/y");
    assert_eq!(join_url("http://a:1", "x"), "http://a:1/x");
  }

  #[test]
  fn test_config_from_network() {
    let net = NetworkConfig {
      timeout_seconds: 7,
      accept_invalid_certs: true,
      ..NetworkConfig::default()
    };
    let cfg = HttpClientConfig::from(&net);
    assert_eq!(cfg.timeout, Duration::from_secs(7));
    assert!(cfg.accept_invalid_certs);
  }

  #[test]
  fn test_client_builds() {
    assert!(JsonHttpClient::new(&HttpClientConfig::default()).is_ok());
  }

  /// Answer one request on a local port with a canned HTTP response.
  async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      let (mut socket, _) = listener.accept().await.unwrap();
      let mut buf = [0u8; 4096];
      let _ = socket.read(&mut buf).await.unwrap();
      let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
      );
      socket.write_all(response.as_bytes()).await.unwrap();
      socket.shutdown().await.unwrap();
    });
    format!("http://{addr}/api/test")
  }

  #[tokio::test]
  async fn test_non_success_status_carries_status_and_body() {
    let url = serve_once("503 Service Unavailable", "indexer overloaded").await;
    let client = JsonHttpClient::new(&HttpClientConfig::default()).unwrap();

    let err = client
      .get_json::<serde_json::Value>(&url)
      .await
      .unwrap_err()
      .to_string();
    assert!(err.contains("503"), "{err}");
    assert!(err.contains("indexer overloaded"), "{err}");
  }

  #[tokio::test]
  async fn test_success_status_decodes_json() {
    let url = serve_once("200 OK", r#"{"price": 0.48}"#).await;
    let client = JsonHttpClient::new(&HttpClientConfig::default()).unwrap();

    let value: serde_json::Value = client.get_json(&url).await.unwrap();
    assert_eq!(value["price"], 0.48);
  }
}
