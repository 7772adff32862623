/// HTTP client for the image analysis endpoint
///
/// Each call uploads one image as multipart form data and returns the
/// parsed analysis response. Server-reported errors carry a structured
/// `detail` field which surfaces verbatim; anything else falls back to
/// a synthesized status line.

use crate::state::data::AnalysisResponse;
use reqwest::multipart;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding the analysis service address
pub const BASE_URL_ENV: &str = "VISUAL_TAGGER_API_URL";

/// Local development address used when no override is set
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Failure modes for one analysis request
#[derive(Debug, Error)]
pub enum ApiError {
    /// Structured detail reported by the server (non-2xx with a
    /// parseable `detail` body); shown to the user as-is
    #[error("{0}")]
    Server(String),

    /// Non-2xx response whose body carried no parseable detail
    #[error("HTTP {code} - {reason}")]
    Status { code: u16, reason: String },

    /// Network-level failure (connection refused, DNS, aborted, ...)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// 2xx response whose body was not a valid analysis response
    #[error("Malformed response from server: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error body shape used by the analysis service for failures
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Client for the remote analysis service
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client from the environment, falling back to the local
    /// development address when no override is set
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// The configured service address
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload one image and return its analysis response
    ///
    /// Sends the bytes as the `file` field of a multipart form to
    /// `POST {base_url}/api/v1/analyze`. The part carries the original
    /// filename and an `image/*` MIME type guessed from its extension
    /// (the service rejects uploads without one).
    pub async fn analyze_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<AnalysisResponse, ApiError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_for(filename))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/api/v1/analyze", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ErrorBody>(&body) {
                return Err(ApiError::Server(error.detail));
            }
            return Err(ApiError::Status {
                code: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown Error")
                    .to_string(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Guess an image MIME type from a filename extension
fn mime_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_mime_guessing() {
        assert_eq!(mime_for("photo.PNG"), "image/png");
        assert_eq!(mime_for("clip.gif"), "image/gif");
        assert_eq!(mime_for("shot.jpeg"), "image/jpeg");
        assert_eq!(mime_for("no_extension"), "image/jpeg");
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:9000/");
        assert_eq!(client.base_url(), "http://localhost:9000");
    }

    #[tokio::test]
    async fn test_successful_analysis_parses_tags() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/analyze")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"tags":[{"name":"cat","confidence":0.91,"source_model":"m1"}],"message":"ok"}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let response = client
            .analyze_image("cat.jpg", vec![0xFF, 0xD8, 0xFF])
            .await
            .expect("analysis should succeed");

        assert_eq!(response.tags.len(), 1);
        assert_eq!(response.tags[0].name, "cat");
        assert_eq!(response.tags[0].confidence, 0.91);
        assert_eq!(response.tags[0].source_model, "m1");
        assert_eq!(response.message, "ok");
        assert_eq!(response.image_id, None);
        assert_eq!(response.filename, None);

        // Exactly one upload per call
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_detail_surfaces_verbatim() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/v1/analyze")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail":"bad image"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let error = client
            .analyze_image("broken.jpg", vec![1, 2, 3])
            .await
            .expect_err("analysis should fail");

        assert!(matches!(error, ApiError::Server(_)));
        assert_eq!(error.to_string(), "bad image");
    }

    #[tokio::test]
    async fn test_unparseable_error_body_falls_back_to_status_line() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/v1/analyze")
            .with_status(503)
            .with_body("<html>gateway said no</html>")
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let error = client
            .analyze_image("photo.png", vec![1, 2, 3])
            .await
            .expect_err("analysis should fail");

        assert_eq!(error.to_string(), "HTTP 503 - Service Unavailable");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/v1/analyze")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let error = client
            .analyze_image("photo.jpg", vec![1, 2, 3])
            .await
            .expect_err("analysis should fail");

        assert!(matches!(error, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        // Nothing listens on this port
        let client = ApiClient::new("http://127.0.0.1:1");
        let error = client
            .analyze_image("photo.jpg", vec![1, 2, 3])
            .await
            .expect_err("analysis should fail");

        assert!(matches!(error, ApiError::Network(_)));
    }
}
