//! Hosted object storage client
//!
//! Uploads image bytes to a bucket and hands back the public URL the
//! rest of the system stores in table rows.

use std::sync::Arc;

use async_trait::async_trait;
use craftlink_core::ObjectStore;
use craftlink_domain::{CraftlinkError, ImageUpload, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use super::client::HostedClient;

/// Client for the hosted object storage surface (`/storage/v1`).
#[derive(Clone)]
pub struct StorageApi {
    client: Arc<HostedClient>,
}

impl StorageApi {
    pub fn new(client: Arc<HostedClient>) -> Self {
        Self { client }
    }

    /// Public, unauthenticated URL for an uploaded object.
    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.client.endpoint(&format!("/storage/v1/object/public/{bucket}/{path}"))
    }
}

#[async_trait]
impl ObjectStore for StorageApi {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        image: &ImageUpload,
        overwrite: bool,
    ) -> Result<String> {
        debug!(bucket, path, bytes = image.bytes.len(), "uploading object");

        let builder = self
            .client
            .http()
            .request(Method::POST, self.client.endpoint(&format!("/storage/v1/object/{bucket}/{path}")))
            .bearer_auth(self.client.bearer_token())
            .header("x-upsert", if overwrite { "true" } else { "false" })
            .header(CONTENT_TYPE, &image.content_type)
            .body(image.bytes.clone());

        let response = self.client.http().send(builder).await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<StorageErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => "unreadable error body".to_string(),
            };
            return Err(CraftlinkError::Storage(format!(
                "upload to {bucket}/{path} failed (HTTP {status}): {message}"
            )));
        }

        Ok(self.public_url(bucket, path))
    }
}

#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_bytes, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::HostedConfig;

    fn storage(server: &MockServer) -> StorageApi {
        let config = HostedConfig {
            base_url: server.uri(),
            api_key: "anon-key".to_string(),
            timeout_seconds: 5,
        };
        StorageApi::new(Arc::new(HostedClient::new(&config).expect("hosted client")))
    }

    fn sample_image() -> ImageUpload {
        ImageUpload {
            file_name: "kitchen.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    #[tokio::test]
    async fn upload_returns_public_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/storage/v1/object/portfolio-images/u1/kitchen.jpg"))
            .and(header("x-upsert", "false"))
            .and(header("content-type", "image/jpeg"))
            .and(body_bytes(vec![0xff, 0xd8, 0xff]))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Key": "portfolio-images/u1/kitchen.jpg"
            })))
            .mount(&server)
            .await;

        let url = storage(&server)
            .upload("portfolio-images", "u1/kitchen.jpg", &sample_image(), false)
            .await
            .expect("upload");
        assert_eq!(
            url,
            format!("{}/storage/v1/object/public/portfolio-images/u1/kitchen.jpg", server.uri())
        );
    }

    #[tokio::test]
    async fn overwrite_sets_upsert_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/storage/v1/object/profile-photos/u1/avatar.jpg"))
            .and(header("x-upsert", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        storage(&server)
            .upload("profile-photos", "u1/avatar.jpg", &sample_image(), true)
            .await
            .expect("upload");
    }

    #[tokio::test]
    async fn failed_upload_maps_to_storage_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/storage/v1/object/portfolio-images/u1/kitchen.jpg"))
            .respond_with(ResponseTemplate::new(413).set_body_json(json!({
                "message": "The object exceeded the maximum allowed size"
            })))
            .mount(&server)
            .await;

        let result = storage(&server)
            .upload("portfolio-images", "u1/kitchen.jpg", &sample_image(), false)
            .await;
        match result {
            Err(CraftlinkError::Storage(message)) => {
                assert!(message.contains("maximum allowed size"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
