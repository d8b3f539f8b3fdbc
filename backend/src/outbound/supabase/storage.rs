//! Object-storage adapter for recipe images.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;

use super::client::{ApiKey, SupabaseClient, SupabaseError};
use crate::domain::ports::{ImageStorage, ImageStorageError};

fn map_storage_error(error: SupabaseError) -> ImageStorageError {
    if error.is_connection() {
        ImageStorageError::connection(error.to_string())
    } else {
        ImageStorageError::rejected(error.to_string())
    }
}

/// Image storage backed by the managed object store.
#[derive(Clone)]
pub struct SupabaseImageStorage {
    client: SupabaseClient,
}

impl SupabaseImageStorage {
    /// Create the adapter.
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn object_url(&self, prefix: &[&str], bucket: &str, path: &str) -> reqwest::Url {
        let mut segments: Vec<&str> = vec!["storage", "v1", "object"];
        segments.extend_from_slice(prefix);
        segments.push(bucket);
        segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
        self.client.endpoint(segments)
    }
}

#[async_trait]
impl ImageStorage for SupabaseImageStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), ImageStorageError> {
        let request = self
            .client
            .request(
                Method::POST,
                self.object_url(&[], bucket, path),
                ApiKey::ServiceRole,
            )
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes.to_vec());
        self.client
            .send(request)
            .await
            .map(|_| ())
            .map_err(map_storage_error)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.object_url(&["public"], bucket, path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::supabase::client::test_client;
    use rstest::rstest;

    #[rstest]
    #[case(
        "recipes/3fa85f64-5717-4562-b3fc-2c963f66afa6/Pasta.jpg",
        "https://proj.supabase.co/storage/v1/object/public/recipe-images/recipes/3fa85f64-5717-4562-b3fc-2c963f66afa6/Pasta.jpg"
    )]
    #[case(
        "recipes/u/Mac Cheese.png",
        "https://proj.supabase.co/storage/v1/object/public/recipe-images/recipes/u/Mac%20Cheese.png"
    )]
    fn public_url_follows_the_public_object_layout(#[case] path: &str, #[case] expected: &str) {
        let storage = SupabaseImageStorage::new(test_client("https://proj.supabase.co"));
        assert_eq!(storage.public_url("recipe-images", path), expected);
    }

    #[rstest]
    fn rejected_uploads_keep_the_backend_message() {
        let err = map_storage_error(SupabaseError::Status {
            status: 409,
            message: "The resource already exists".into(),
        });
        assert!(matches!(err, ImageStorageError::Rejected { .. }));
        assert!(err.to_string().contains("already exists"));
    }
}
