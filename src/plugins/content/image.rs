use axum::extract::multipart::Field;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::plugins::content::error::ContentError;

/// An uploaded image, drained into memory before any document write happens.
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Read an uploaded multipart field. A failed or truncated read surfaces as
/// an encoding error, which aborts the request before any document is written.
pub async fn read_image_field(field: Field<'_>) -> Result<ImageUpload, ContentError> {
    let filename = field.file_name().unwrap_or("upload").to_string();
    let content_type = field.content_type().map(|s| s.to_string());
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ContentError::Encoding(format!("failed to read image {}: {}", filename, e)))?;
    Ok(ImageUpload { filename, content_type, bytes: bytes.to_vec() })
}

fn mime_type(upload: &ImageUpload) -> Option<&str> {
    if let Some(ct) = upload.content_type.as_deref() {
        if ct.starts_with("image/") {
            return Some(ct);
        }
    }
    let ext = std::path::Path::new(&upload.filename)
        .extension()
        .and_then(|s| s.to_str())?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Encode the whole file as an inline `data:<mime>;base64,<payload>` string,
/// stored directly on the record. Documents grow with their images; that
/// trade against a separate blob store is accepted and not capped here.
pub fn to_data_uri(upload: &ImageUpload) -> Result<String, ContentError> {
    if upload.bytes.is_empty() {
        return Err(ContentError::Encoding(format!(
            "image {} is empty or unreadable",
            upload.filename
        )));
    }
    let mime = mime_type(upload).ok_or_else(|| {
        ContentError::Encoding(format!("cannot determine image type of {}", upload.filename))
    })?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&upload.bytes)))
}
