//! Local-disk upload store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, instrument};
use uuid::Uuid;

use domain_payment::{PaymentError, StoredFile, UploadStore, UploadedImage};

use crate::error::StorageError;

/// Stores proof-of-payment images on the local filesystem
///
/// References are generated filenames, never the client-supplied name, so a
/// reference is stable and safe to persist and to embed in a URL.
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    root: PathBuf,
    base_url: String,
}

impl LocalUploadStore {
    /// Creates a store rooted at `root`, serving files under `base_url`
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Keeps the original extension when it is a plain alphanumeric suffix
    fn extension_of(filename: &str) -> Option<&str> {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    #[instrument(skip(self, image), fields(filename = %image.filename, size = image.bytes.len()))]
    async fn store(&self, image: UploadedImage) -> Result<StoredFile, PaymentError> {
        if image.bytes.is_empty() {
            return Err(PaymentError::bad_request("Uploaded image is empty"));
        }

        let reference = match Self::extension_of(&image.filename) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase()),
            None => Uuid::new_v4().to_string(),
        };

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(StorageError::Io)?;
        tokio::fs::write(self.root.join(&reference), &image.bytes)
            .await
            .map_err(StorageError::Io)?;

        info!(%reference, "proof image stored");
        Ok(StoredFile { reference })
    }

    async fn resolve_url(&self, reference: &str) -> Result<String, PaymentError> {
        // References are generated by `store`; anything with a path
        // separator never came from us.
        if reference.is_empty() || reference.contains('/') || reference.contains("..") {
            return Err(StorageError::UnknownReference(reference.to_string()).into());
        }

        Ok(format!("{}/{}", self.base_url, reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LocalUploadStore {
        let dir = std::env::temp_dir().join(format!("courtbook-uploads-{}", Uuid::new_v4()));
        LocalUploadStore::new(dir, "http://localhost:8080/uploads/")
    }

    #[tokio::test]
    async fn test_store_and_resolve() {
        let store = store();
        let image = UploadedImage {
            filename: "receipt.JPG".to_string(),
            content_type: Some("image/jpeg".to_string()),
            bytes: vec![0xFF, 0xD8, 0xFF],
        };

        let stored = store.store(image).await.unwrap();
        assert!(stored.reference.ends_with(".jpg"));

        let url = store.resolve_url(&stored.reference).await.unwrap();
        assert_eq!(url, format!("http://localhost:8080/uploads/{}", stored.reference));
    }

    #[tokio::test]
    async fn test_empty_upload_rejected() {
        let store = store();
        let image = UploadedImage {
            filename: "receipt.png".to_string(),
            content_type: None,
            bytes: vec![],
        };

        assert!(matches!(
            store.store(image).await,
            Err(PaymentError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_traversal_reference_rejected() {
        let store = store();
        assert!(store.resolve_url("../etc/passwd").await.is_err());
        assert!(store.resolve_url("a/b.png").await.is_err());
    }

    #[tokio::test]
    async fn test_reference_is_not_client_filename() {
        let store = store();
        let image = UploadedImage {
            filename: "my receipt (1).png".to_string(),
            content_type: None,
            bytes: vec![1, 2, 3],
        };

        let stored = store.store(image).await.unwrap();
        assert!(!stored.reference.contains("receipt"));
        assert!(stored.reference.ends_with(".png"));
    }
}
