use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::media::host::{ImageHost, ImageHostError, ImageUpload, UploadedImage};

const UPLOAD_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct UploadResult {
    secure_url: Option<String>,
    url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Signed uploads to a Cloudinary-compatible endpoint.
#[derive(Clone)]
pub struct CloudinaryClient {
    client: Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryClient {
    /// `base_url` is the API origin, e.g. `https://api.cloudinary.com`.
    pub fn new(
        base_url: String,
        cloud_name: String,
        api_key: String,
        api_secret: String,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cloud_name,
            api_key,
            api_secret,
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/v1_1/{}/image/upload", self.base_url, self.cloud_name)
    }
}

#[async_trait]
impl ImageHost for CloudinaryClient {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, ImageHostError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut params = vec![
            ("folder", image.folder.clone()),
            ("timestamp", timestamp.clone()),
        ];
        if let Some(t) = &image.transformation {
            params.push(("transformation", t.clone()));
        }
        let signature = sign_params(&params, &self.api_secret);

        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;

        let mut form = Form::new()
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .part("file", part);
        for (key, value) in params {
            form = form.text(key, value);
        }

        debug!(
            "Uploading {} ({} bytes) to {}",
            image.file_name,
            image.bytes.len(),
            image.folder
        );

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Image host returned {}: {}", status, body);
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ImageHostError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let result: UploadResult = response.json().await?;
        let url = result
            .secure_url
            .or(result.url)
            .ok_or(ImageHostError::MissingUrl)?;

        Ok(UploadedImage {
            url,
            width: result.width,
            height: result.height,
        })
    }
}

/// Request signature: parameters sorted by key, joined as `k=v&k=v`, with the
/// secret appended, then SHA-256 hex. Empty values are not signed.
pub fn sign_params(params: &[(&str, String)], secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
