// src/infrastructure/assets/cloudinary.rs
use crate::application::ports::assets::{AssetStore, AssetStoreError, ImagePayload, StoredAsset};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use uuid::Uuid;

/// Asset store backed by Cloudinary's upload API. Requests are signed with
/// SHA-1 over the non-credential parameters in alphabetical order, followed
/// by the API secret.
pub struct CloudinaryAssetStore {
    cloud_name: String,
    api_key: String,
    api_secret: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl CloudinaryAssetStore {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/{action}",
            self.cloud_name
        )
    }

    fn sign(&self, params: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(params.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    async fn rejection(response: reqwest::Response) -> AssetStoreError {
        let status = response.status();
        match response.json::<ApiErrorBody>().await {
            Ok(body) => AssetStoreError::Rejected(body.error.message),
            Err(_) => AssetStoreError::Rejected(format!("unexpected status {status}")),
        }
    }
}

#[async_trait]
impl AssetStore for CloudinaryAssetStore {
    async fn upload(
        &self,
        payload: ImagePayload,
        namespace: &str,
    ) -> Result<StoredAsset, AssetStoreError> {
        let public_id = Uuid::new_v4().to_string();
        let timestamp = Utc::now().timestamp();
        let signature = self.sign(&format!(
            "folder={namespace}&public_id={public_id}&timestamp={timestamp}"
        ));

        let file_part = Part::bytes(payload.bytes.to_vec())
            .file_name(payload.file_name.clone())
            .mime_str("application/octet-stream")
            .map_err(|err| AssetStoreError::Transport(err.to_string()))?;

        let form = Form::new()
            .part("file", file_part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("folder", namespace.to_string())
            .text("public_id", public_id);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| AssetStoreError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|err| AssetStoreError::Transport(err.to_string()))?;

        // The returned public_id includes the folder prefix; it is the
        // handle destroy expects.
        Ok(StoredAsset {
            url: body.secure_url,
            asset_id: body.public_id,
        })
    }

    async fn delete(&self, asset_id: &str) -> Result<(), AssetStoreError> {
        let timestamp = Utc::now().timestamp();
        let signature = self.sign(&format!("public_id={asset_id}&timestamp={timestamp}"));

        let form = Form::new()
            .text("public_id", asset_id.to_string())
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| AssetStoreError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|err| AssetStoreError::Transport(err.to_string()))?;

        if body.result == "ok" {
            Ok(())
        } else {
            Err(AssetStoreError::Rejected(format!(
                "destroy returned '{}'",
                body.result
            )))
        }
    }
}
