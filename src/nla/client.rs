// src/nla/client.rs
use crate::utils::error::FetchError;
use reqwest::header;
use std::time::Duration;

const NLA_USER_AGENT: &str = concat!("nla_papers/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client for fetching the listing page.
fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(NLA_USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(FetchError::ClientBuild)
}

/// Downloads the raw markup of a listing page. One GET, no retries.
pub async fn fetch_listing(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let client = build_client(timeout)?;

    tracing::info!("Downloading listing from: {}", url);
    tracing::debug!("Using User-Agent: {}, timeout {:?}", NLA_USER_AGENT, timeout);

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        return Err(FetchError::Http {
            status,
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn returns_body_on_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/our-publications/staff-papers"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<ul class=\"search-results\"></ul>"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/our-publications/staff-papers", mock_server.uri());
        let body = fetch_listing(&url, TIMEOUT).await.unwrap();
        assert_eq!(body, "<ul class=\"search-results\"></ul>");
    }

    #[tokio::test]
    async fn non_success_status_is_an_http_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let url = format!("{}/missing", mock_server.uri());
        let err = fetch_listing(&url, TIMEOUT).await.unwrap_err();
        match err {
            FetchError::Http { status, url: failed } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(failed, url);
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        // Nothing listens on port 1.
        let err = fetch_listing("http://127.0.0.1:1/", TIMEOUT).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
    }
}
