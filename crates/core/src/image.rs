//! Product image upload rules.
//!
//! Uploads are limited to [`MAX_IMAGE_BYTES`] and to the MIME types in
//! [`ALLOWED_IMAGE_TYPES`]. The declared content type must be allowed and the
//! payload's magic bytes must identify an allowed image format.

use ::image::ImageFormat;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum accepted image size (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for product images.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// A vetted image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageKind {
    /// Content type derived from the payload, not from the client.
    pub content_type: &'static str,
    /// File extension used in the object key.
    pub extension: &'static str,
}

/// Check an uploaded image against the size and type rules.
pub fn inspect_image(declared_type: Option<&str>, bytes: &[u8]) -> Result<ImageKind, CoreError> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(CoreError::PayloadTooLarge(format!(
            "Image is {} bytes; the limit is {MAX_IMAGE_BYTES} bytes",
            bytes.len()
        )));
    }
    if bytes.is_empty() {
        return Err(CoreError::Validation("Image file is empty".into()));
    }

    let declared = declared_type.map(|t| t.trim().to_ascii_lowercase());
    match declared.as_deref() {
        Some(t) if ALLOWED_IMAGE_TYPES.contains(&t) => {}
        Some(t) => {
            return Err(CoreError::UnsupportedMedia(format!(
                "Content type '{t}' is not allowed. Must be one of: {}",
                ALLOWED_IMAGE_TYPES.join(", ")
            )))
        }
        None => {
            return Err(CoreError::UnsupportedMedia(
                "Image content type is missing".into(),
            ))
        }
    }

    let format = ::image::guess_format(bytes)
        .map_err(|_| CoreError::UnsupportedMedia("File is not a recognizable image".into()))?;

    match format {
        ImageFormat::Jpeg => Ok(ImageKind {
            content_type: "image/jpeg",
            extension: "jpg",
        }),
        ImageFormat::Png => Ok(ImageKind {
            content_type: "image/png",
            extension: "png",
        }),
        ImageFormat::Gif => Ok(ImageKind {
            content_type: "image/gif",
            extension: "gif",
        }),
        ImageFormat::WebP => Ok(ImageKind {
            content_type: "image/webp",
            extension: "webp",
        }),
        other => Err(CoreError::UnsupportedMedia(format!(
            "Image format {other:?} is not allowed"
        ))),
    }
}

/// Object key for a product image: `products/{id}/image_{timestamp}.{ext}`.
pub fn product_image_key(product_id: DbId, timestamp_millis: i64, extension: &str) -> String {
    format!("products/{product_id}/image_{timestamp_millis}.{extension}")
}
