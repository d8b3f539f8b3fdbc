//! Port for object storage holding recipe images.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by image storage adapters.
    pub enum ImageStorageError {
        /// The storage service could not be reached.
        Connection { message: String } => "image storage connection failed: {message}",
        /// The storage service refused the upload.
        Rejected { message: String } => "image storage rejected the upload: {message}",
    }
}

/// Port for uploading images and resolving their public URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store `bytes` at `path` inside `bucket`.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), ImageStorageError>;

    /// Public URL of the object at `path` inside `bucket`.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
