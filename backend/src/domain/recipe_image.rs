//! Uploaded recipe images and their storage paths.

use std::fmt;

use crate::domain::UserId;

/// Bucket recipe images are uploaded to.
pub const RECIPE_IMAGE_BUCKET: &str = "recipe-images";

/// Content type recorded for every uploaded image.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Validation errors for uploaded images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageValidationError {
    /// The declared filename has no extension.
    MissingExtension,
    /// The extension contains characters other than ASCII letters and digits.
    InvalidExtension,
    /// The upload carried no bytes.
    EmptyPayload,
}

impl fmt::Display for ImageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingExtension => write!(f, "image filename must have an extension"),
            Self::InvalidExtension => {
                write!(f, "image extension must contain only letters and digits")
            }
            Self::EmptyPayload => write!(f, "image must not be empty"),
        }
    }
}

impl std::error::Error for ImageValidationError {}

/// Image bytes read from the creation form.
///
/// ## Invariants
/// - `extension` is the non-empty text after the last `.` of the filename and
///   contains only ASCII letters and digits.
/// - `bytes` is non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct RecipeImage {
    extension: String,
    bytes: Vec<u8>,
}

impl RecipeImage {
    /// Validate an upload by its declared filename.
    ///
    /// # Examples
    /// ```
    /// use recipes_backend::domain::RecipeImage;
    ///
    /// let image = RecipeImage::try_new("pasta.final.png", vec![1, 2, 3]).unwrap();
    /// assert_eq!(image.extension(), "png");
    /// assert!(RecipeImage::try_new("pasta", vec![1]).is_err());
    /// assert!(RecipeImage::try_new("pasta.", vec![1]).is_err());
    /// assert!(RecipeImage::try_new("pasta.j/pg", vec![1]).is_err());
    /// ```
    pub fn try_new(filename: &str, bytes: Vec<u8>) -> Result<Self, ImageValidationError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.trim())
            .filter(|ext| !ext.is_empty())
            .ok_or(ImageValidationError::MissingExtension)?;
        if !extension.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(ImageValidationError::InvalidExtension);
        }
        if bytes.is_empty() {
            return Err(ImageValidationError::EmptyPayload);
        }
        Ok(Self {
            extension: extension.to_owned(),
            bytes,
        })
    }

    /// Extension taken from the declared filename.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Object path the image is stored under for `user_id` and `title`.
    ///
    /// Separators in the title are replaced so it stays a single segment.
    ///
    /// # Examples
    /// ```
    /// use recipes_backend::domain::{RecipeImage, UserId};
    ///
    /// let user = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
    /// let image = RecipeImage::try_new("photo.jpg", vec![0xff]).unwrap();
    /// assert_eq!(
    ///     image.storage_path(&user, "Mac/Cheese"),
    ///     "recipes/3fa85f64-5717-4562-b3fc-2c963f66afa6/Mac-Cheese.jpg",
    /// );
    /// ```
    pub fn storage_path(&self, user_id: &UserId, title: &str) -> String {
        let segment: String = title
            .chars()
            .map(|ch| if matches!(ch, '/' | '\\') { '-' } else { ch })
            .collect();
        format!("recipes/{user_id}/{segment}.{}", self.extension)
    }
}

impl fmt::Debug for RecipeImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeImage")
            .field("extension", &self.extension)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("photo", ImageValidationError::MissingExtension)]
    #[case("photo.", ImageValidationError::MissingExtension)]
    #[case("", ImageValidationError::MissingExtension)]
    #[case("x./../../victim/pwn", ImageValidationError::InvalidExtension)]
    #[case("photo.j pg", ImageValidationError::InvalidExtension)]
    #[case(r"photo.jp\g", ImageValidationError::InvalidExtension)]
    fn rejects_filenames_without_a_usable_extension(
        #[case] filename: &str,
        #[case] expected: ImageValidationError,
    ) {
        assert_eq!(
            RecipeImage::try_new(filename, vec![1]).expect_err("invalid filename"),
            expected
        );
    }

    #[rstest]
    fn rejects_empty_payload() {
        assert_eq!(
            RecipeImage::try_new("a.jpg", Vec::new()).expect_err("empty"),
            ImageValidationError::EmptyPayload
        );
    }

    #[rstest]
    #[case("Soup", "Soup")]
    #[case(r"a\b/c", "a-b-c")]
    #[case("Crème brûlée", "Crème brûlée")]
    fn storage_path_keeps_title_in_one_segment(#[case] title: &str, #[case] segment: &str) {
        let user = UserId::random();
        let image = RecipeImage::try_new("x.webp", vec![1]).expect("valid image");
        assert_eq!(
            image.storage_path(&user, title),
            format!("recipes/{user}/{segment}.webp")
        );
    }
}
