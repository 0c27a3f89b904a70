//! HTTP client for the storage service

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use clip_common::config::StorageConfig;
use clip_core::error::DomainError;
use clip_core::traits::{Bucket, ObjectStorage};

/// Object storage client speaking the storage service's REST API.
///
/// Objects are written under a fresh UUID name so uploads never collide; the
/// original filename only contributes its extension.
#[derive(Clone)]
pub struct HttpObjectStorage {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpObjectStorage {
    /// Create a new storage client from configuration
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn upload_url(&self, bucket: Bucket, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket.name(),
            object_name
        )
    }

    fn public_url(&self, bucket: Bucket, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket.name(),
            object_name
        )
    }
}

/// Derive a unique object name, keeping only the original extension
fn object_name(filename: &str) -> String {
    match extension(filename) {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}

fn extension(filename: &str) -> Option<&str> {
    let ext = filename.rsplit_once('.')?.1;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext)
}

/// Content type by extension; unknown extensions fall back to octet-stream
fn content_type(filename: &str) -> &'static str {
    match extension(filename).map(str::to_ascii_lowercase).as_deref() {
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    #[instrument(skip(self, data), fields(bytes = data.len(), bucket = bucket.name()))]
    async fn upload(
        &self,
        data: Vec<u8>,
        filename: &str,
        bucket: Bucket,
    ) -> Result<String, DomainError> {
        let name = object_name(filename);

        let response = self
            .http
            .post(self.upload_url(bucket, &name))
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type(filename))
            .body(data)
            .send()
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::StorageError(format!(
                "Upload rejected with {status}: {body}"
            )));
        }

        Ok(self.public_url(bucket, &name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> HttpObjectStorage {
        HttpObjectStorage::new(&StorageConfig {
            base_url: "https://storage.example.com/".to_string(),
            api_key: "secret".to_string(),
            max_upload_mb: 500,
        })
    }

    #[test]
    fn test_urls_have_no_double_slash() {
        let client = test_client();
        assert_eq!(
            client.upload_url(Bucket::Videos, "abc.mp4"),
            "https://storage.example.com/storage/v1/object/videos/abc.mp4"
        );
        assert_eq!(
            client.public_url(Bucket::Avatars, "abc.png"),
            "https://storage.example.com/storage/v1/object/public/avatars/abc.png"
        );
    }

    #[test]
    fn test_object_name_keeps_extension_only() {
        let name = object_name("my vacation video.mp4");
        assert!(name.ends_with(".mp4"));
        assert!(!name.contains(' '));

        let bare = object_name("README");
        assert!(!bare.contains('.'));
    }

    #[test]
    fn test_content_type_mapping() {
        assert_eq!(content_type("clip.mp4"), "video/mp4");
        assert_eq!(content_type("thumb.JPG"), "image/jpeg");
        assert_eq!(content_type("cover.png"), "image/png");
        assert_eq!(content_type("mystery.bin"), "application/octet-stream");
        assert_eq!(content_type("noext"), "application/octet-stream");
    }
}
