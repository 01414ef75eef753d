//! Cloudinary unsigned-preset image upload client.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use reqwest::multipart::Form;
use serde::Deserialize;
use tracing::{debug, error, instrument};
use wayfarer_error::{HttpError, UpstreamError, WayfarerResult};
use wayfarer_interface::ImageStore;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

/// Cloudinary image store using an unsigned upload preset.
#[derive(Debug, Clone)]
pub struct CloudinaryStore {
    client: Client,
    cloud_name: String,
    upload_preset: String,
}

impl CloudinaryStore {
    /// Creates a new store for the given cloud and unsigned preset.
    pub fn new(cloud_name: impl Into<String>, upload_preset: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }
}

#[async_trait]
impl ImageStore for CloudinaryStore {
    #[instrument(skip(self, image), fields(cloud = %self.cloud_name, size = image.len()))]
    async fn upload(&self, image: &[u8]) -> WayfarerResult<String> {
        // Cloudinary accepts data URLs in the `file` field
        let data_url = format!("data:image/png;base64,{}", BASE64.encode(image));

        let form = Form::new()
            .text("file", data_url)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send upload request");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "Cloudinary returned error");
            return Err(UpstreamError::new(status, body).into());
        }

        let parsed: UploadResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse upload response");
            HttpError::new(format!("Failed to parse response: {}", e))
        })?;

        let url = parsed
            .secure_url
            .or(parsed.url)
            .ok_or_else(|| HttpError::new("Upload response carried no URL"))?;

        debug!(url = %url, "Uploaded image");
        Ok(url)
    }
}
