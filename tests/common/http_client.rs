//! HTTP client utilities for testing.
//!
//! This module provides helper functions for making HTTP requests to the airdash server during tests.

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

/// Default timeout for HTTP requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a default test client
pub fn create_test_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Failed to build test HTTP client")
}

/// Build a URL for an airdash server endpoint
pub fn build_url(addr: &SocketAddr, path: &str) -> Url {
    format!("http://{}{}", addr, path)
        .parse()
        .expect("Failed to parse URL")
}

/// Make a GET request to the airdash server
pub async fn get(addr: &SocketAddr, path: &str) -> Result<Response, Box<dyn Error>> {
    get_with_query(addr, path, &[]).await
}

/// Make a GET request with percent-encoded query parameters
pub async fn get_with_query(
    addr: &SocketAddr,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Response, Box<dyn Error>> {
    let client = create_test_client();
    let url = build_url(addr, path);
    println!("Making request to: {} {:?}", url, query);
    Ok(client.get(url).query(query).send().await?)
}

/// Make a GET request and parse the JSON response, requiring 200 OK
pub async fn get_json<T: DeserializeOwned>(
    addr: &SocketAddr,
    path: &str,
    query: &[(&str, &str)],
) -> Result<T, Box<dyn Error>> {
    let response = get_with_query(addr, path, query).await?;

    if response.status() != StatusCode::OK {
        return Err(format!(
            "Unexpected status code: {}, body: {:?}",
            response.status(),
            response.text().await
        )
        .into());
    }

    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let addr: SocketAddr = ([127, 0, 0, 1], 8000).into();
        let url = build_url(&addr, "/api/cities");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/cities");
    }

    #[test]
    fn test_query_is_percent_encoded() {
        let client = create_test_client();
        let addr: SocketAddr = ([127, 0, 0, 1], 8000).into();
        let request = client
            .get(build_url(&addr, "/api/stations"))
            .query(&[("city", "서울")])
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("city=%EC%84%9C%EC%9A%B8"));
    }
}
