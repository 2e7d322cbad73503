use axum::extract::Multipart;
use axum::http::StatusCode;
use std::collections::HashMap;

use crate::http_error::AppError;
use crate::plugins::content::image::{read_image_field, ImageUpload};

/// A parsed admin form submission: text fields plus at most one uploaded
/// image (the `image` part). Field validation beyond presence is the form
/// layer's job; repositories do not re-check.
pub struct FormPayload {
    pub fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

pub async fn read_form(mut multipart: Multipart) -> Result<FormPayload, AppError> {
    let mut fields = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::from((StatusCode::BAD_REQUEST, format!("multipart error: {}", e)))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            image = Some(read_image_field(field).await?);
        } else {
            let value = field.text().await.map_err(|e| {
                AppError::from((StatusCode::BAD_REQUEST, format!("multipart read error: {}", e)))
            })?;
            fields.insert(name, value);
        }
    }

    Ok(FormPayload { fields, image })
}

impl FormPayload {
    pub fn required(&self, key: &str) -> Result<String, AppError> {
        self.fields
            .get(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::new(StatusCode::BAD_REQUEST, format!("{} is required", key))
                    .with_code("missing_field")
            })
    }

    /// Supplied-or-not, stored verbatim when supplied.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.fields.get(key).cloned()
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.fields.get(key).map(|s| s.as_str()), Some("true") | Some("1"))
    }
}
