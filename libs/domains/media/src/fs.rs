//! Filesystem implementation of ImageIntake

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::PathBuf;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{IntakeError, IntakeResult};
use crate::intake::ImageIntake;

/// Stores decoded `data:` URL payloads under a root directory.
///
/// Locations are `<uuid>.<ext>` file names relative to the root, so they
/// stay valid if the root moves. Plain `http(s)` URLs are already hosted
/// elsewhere and pass through unchanged.
pub struct FsImageIntake {
    root: PathBuf,
}

impl FsImageIntake {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Split a `data:image/<subtype>;base64,<data>` payload into
    /// (extension, raw bytes).
    fn decode_data_url(payload: &str) -> IntakeResult<(String, Vec<u8>)> {
        let rest = payload
            .strip_prefix("data:image/")
            .ok_or_else(|| IntakeError::InvalidPayload("expected a data:image/ URL".to_string()))?;

        let (subtype, data) = rest
            .split_once(";base64,")
            .ok_or_else(|| IntakeError::InvalidPayload("expected base64 encoding".to_string()))?;

        if subtype.is_empty() || !subtype.chars().all(|c| c.is_ascii_alphanumeric() || c == '+') {
            return Err(IntakeError::InvalidPayload(format!(
                "unsupported image subtype: {}",
                subtype
            )));
        }

        let bytes = BASE64
            .decode(data)
            .map_err(|e| IntakeError::Decode(e.to_string()))?;

        // "svg+xml" and friends: the extension is the part before '+'
        let ext = subtype.split('+').next().unwrap_or(subtype).to_string();
        Ok((ext, bytes))
    }
}

#[async_trait]
impl ImageIntake for FsImageIntake {
    #[instrument(skip(self, payloads), fields(count = payloads.len()))]
    async fn store(&self, payloads: &[String]) -> IntakeResult<Vec<String>> {
        tokio::fs::create_dir_all(&self.root).await?;

        let mut locations = Vec::with_capacity(payloads.len());
        for payload in payloads {
            if payload.starts_with("http://") || payload.starts_with("https://") {
                // Already hosted; keep the URL as the location
                locations.push(payload.clone());
                continue;
            }

            let (ext, bytes) = Self::decode_data_url(payload)?;
            let file_name = format!("{}.{}", Uuid::now_v7(), ext);
            tokio::fs::write(self.root.join(&file_name), &bytes).await?;

            tracing::info!(location = %file_name, "Image stored");
            locations.push(file_name);
        }

        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[tokio::test]
    async fn test_store_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let intake = FsImageIntake::new(dir.path());

        let payload = format!("data:image/png;base64,{}", PIXEL);
        let locations = intake.store(&[payload]).await.unwrap();

        assert_eq!(locations.len(), 1);
        assert!(locations[0].ends_with(".png"));
        assert!(dir.path().join(&locations[0]).exists());
    }

    #[tokio::test]
    async fn test_store_url_passthrough() {
        let dir = tempfile::tempdir().unwrap();
        let intake = FsImageIntake::new(dir.path());

        let url = "https://cdn.example.com/shoes.jpg".to_string();
        let locations = intake.store(std::slice::from_ref(&url)).await.unwrap();

        assert_eq!(locations, vec![url]);
    }

    #[tokio::test]
    async fn test_store_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let intake = FsImageIntake::new(dir.path());

        let payloads = vec![
            "https://cdn.example.com/a.jpg".to_string(),
            format!("data:image/png;base64,{}", PIXEL),
            "https://cdn.example.com/b.jpg".to_string(),
        ];
        let locations = intake.store(&payloads).await.unwrap();

        assert_eq!(locations.len(), 3);
        assert_eq!(locations[0], "https://cdn.example.com/a.jpg");
        assert!(locations[1].ends_with(".png"));
        assert_eq!(locations[2], "https://cdn.example.com/b.jpg");
    }

    #[tokio::test]
    async fn test_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let intake = FsImageIntake::new(dir.path());

        let result = intake.store(&["not-an-image".to_string()]).await;
        assert!(matches!(result, Err(IntakeError::InvalidPayload(_))));
    }

    #[tokio::test]
    async fn test_store_rejects_bad_base64() {
        let dir = tempfile::tempdir().unwrap();
        let intake = FsImageIntake::new(dir.path());

        let result = intake
            .store(&["data:image/png;base64,!!!".to_string()])
            .await;
        assert!(matches!(result, Err(IntakeError::Decode(_))));
    }
}
