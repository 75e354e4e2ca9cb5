pub mod ingredient;
pub mod product;
pub mod product_image;
pub mod transfer;

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// A file part read from a multipart form.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Read the multipart field named `field_name`, ignoring all other fields.
///
/// Returns `BadRequest` if the form has no such field.
pub async fn read_file_field(
    multipart: &mut Multipart,
    field_name: &str,
) -> AppResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(AppError::from_multipart)?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(AppError::from_multipart)?;
        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::BadRequest(format!(
        "Missing required '{field_name}' field"
    )))
}
