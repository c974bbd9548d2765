//! Supabase Storage client

use async_trait::async_trait;
use reqwest::Client;
use urlencoding::encode;

use crate::domain::ports::ObjectStore;
use crate::error::StorageError;

/// Implementation of the ObjectStore port on a Supabase Storage bucket
pub struct SupabaseStorageClient {
    http: Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseStorageClient {
    pub fn new(base_url: String, service_key: String, bucket: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
        }
    }

    /// Percent-encode each path segment, keeping the separators
    fn encoded_path(path: &str) -> String {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(|s| encode(s).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            encode(&self.bucket),
            Self::encoded_path(path)
        )
    }

    /// Public URL of an object in a public bucket
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            encode(&self.bucket),
            Self::encoded_path(path)
        )
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorageClient {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let size = bytes.len();

        let response = self
            .http
            .post(self.object_url(path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("x-upsert", "true")
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(path, size, bucket = %self.bucket, "Uploaded object");
        Ok(self.public_url(path))
    }
}
