use crate::utils::error::{MorningError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Upper bound on buffer space reserved from a `Content-Length` header.
const MAX_PREALLOC: usize = 8 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct RandomImageResponse {
    message: String,
    status: String,
}

/// Client for the Dog CEO random image endpoint and the image host behind it.
#[derive(Debug, Clone)]
pub struct DogApiClient {
    client: Client,
    endpoint: String,
}

impl DogApiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub async fn random_image_url(&self) -> Result<String> {
        tracing::debug!("Requesting random dog image from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("Dog API response status: {}", status);
        if !status.is_success() {
            return Err(MorningError::DogApiError {
                message: format!("random image endpoint returned HTTP {}", status),
            });
        }

        let payload: RandomImageResponse = response.json().await?;
        if payload.status != "success" {
            return Err(MorningError::DogApiError {
                message: format!("unexpected status '{}': {}", payload.status, payload.message),
            });
        }

        Ok(payload.message)
    }

    pub async fn download_image(&self, image_url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Downloading image from: {}", image_url);
        let mut response = self.client.get(image_url).send().await?.error_for_status()?;

        let expected = response.content_length().unwrap_or(0);
        let mut data = Vec::with_capacity(usize::try_from(expected).unwrap_or(MAX_PREALLOC).min(MAX_PREALLOC));
        while let Some(chunk) = response.chunk().await? {
            data.extend_from_slice(&chunk);
        }

        tracing::debug!("Downloaded {} bytes", data.len());
        Ok(data)
    }
}

/// Content type for an image URL, judged by its file extension.
pub fn content_type_for(image_url: &str) -> &'static str {
    let extension = image_url
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_random_image_url() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/breeds/image/random");
            then.status(200).json_body(serde_json::json!({
                "message": "https://images.dog.ceo/breeds/pug/pug_1.jpg",
                "status": "success"
            }));
        });

        let client = DogApiClient::new(server.url("/api/breeds/image/random"), None).unwrap();
        let url = client.random_image_url().await.unwrap();

        mock.assert();
        assert_eq!(url, "https://images.dog.ceo/breeds/pug/pug_1.jpg");
    }

    #[tokio::test]
    async fn test_random_image_url_rejects_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/random");
            then.status(200).json_body(serde_json::json!({
                "message": "Breed not found",
                "status": "error"
            }));
        });

        let client = DogApiClient::new(server.url("/random"), None).unwrap();
        let err = client.random_image_url().await.unwrap_err();
        assert!(matches!(err, MorningError::DogApiError { .. }));
    }

    #[tokio::test]
    async fn test_random_image_url_rejects_http_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/random");
            then.status(503);
        });

        let client = DogApiClient::new(server.url("/random"), None).unwrap();
        let err = client.random_image_url().await.unwrap_err();
        assert!(matches!(err, MorningError::DogApiError { message } if message.contains("503")));
    }

    #[tokio::test]
    async fn test_download_image() {
        let server = MockServer::start();
        let bytes: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let expected = bytes.clone();
        server.mock(move |when, then| {
            when.method(GET).path("/breeds/pug/pug_1.jpg");
            then.status(200).header("Content-Type", "image/jpeg").body(bytes);
        });

        let client = DogApiClient::new("http://unused", None).unwrap();
        let data = client
            .download_image(&server.url("/breeds/pug/pug_1.jpg"))
            .await
            .unwrap();
        assert_eq!(data, expected);
    }

    #[tokio::test]
    async fn test_download_survives_oversized_content_length() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000000000000000\r\n\r\nabc")
                .await
                .unwrap();
            let _ = socket.shutdown().await;
        });

        let client = DogApiClient::new("http://unused", None).unwrap();
        match client
            .download_image(&format!("http://{}/breeds/pug/pug_1.jpg", addr))
            .await
        {
            Ok(data) => assert!(data.len() <= 3),
            Err(e) => assert!(matches!(e, MorningError::ApiError(_))),
        }
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("https://x/breeds/pug/a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("https://x/breeds/pug/a.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("https://x/breeds/pug/a.png"), "image/png");
        assert_eq!(content_type_for("https://x/breeds/pug/a"), "application/octet-stream");
    }
}
