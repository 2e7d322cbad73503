use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::json;
use uuid::Uuid;

use crate::http_error::AppError;
use crate::plugins::content::blog::models::{BlogForm, BlogPost, TemplateType};
use crate::plugins::content::blog::repo;
use crate::plugins::content::error::ContentError;
use crate::plugins::content::form::{read_form, FormPayload};
use crate::store::DynStore;

fn blog_form(payload: &FormPayload) -> Result<BlogForm, AppError> {
    let raw = payload.required("template_type")?;
    let template_type = TemplateType::parse(&raw).ok_or_else(|| {
        AppError::new(StatusCode::BAD_REQUEST, "unknown template_type").with_code("invalid_field")
    })?;
    Ok(BlogForm {
        title: payload.required("title")?,
        short_description: payload.required("short_description")?,
        full_content: payload.required("full_content")?,
        template_type,
    })
}

pub async fn create_post(
    Extension(store): Extension<DynStore>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let payload = read_form(multipart).await?;
    let form = blog_form(&payload)?;
    // every post carries a cover image
    let image = payload.image.ok_or_else(|| {
        AppError::new(StatusCode::BAD_REQUEST, "image is required").with_code("missing_field")
    })?;

    let id = repo::create_post(&store, form, image).await?;
    Ok(Json(json!({ "id": id })))
}

pub async fn list_posts(
    Extension(store): Extension<DynStore>,
) -> Result<Json<Vec<BlogPost>>, AppError> {
    Ok(Json(repo::list_posts(&store).await?))
}

pub async fn get_post(
    Extension(store): Extension<DynStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<BlogPost>, AppError> {
    let post = repo::get_post(&store, id).await?.ok_or(ContentError::NotFound)?;
    Ok(Json(post))
}

pub async fn get_post_by_slug(
    Extension(store): Extension<DynStore>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, AppError> {
    let post = repo::get_post_by_slug(&store, &slug).await?.ok_or(ContentError::NotFound)?;
    Ok(Json(post))
}

pub async fn update_post(
    Extension(store): Extension<DynStore>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let payload = read_form(multipart).await?;
    let form = blog_form(&payload)?;
    repo::update_post(&store, id, form, payload.image).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_post(
    Extension(store): Extension<DynStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    repo::delete_post(&store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
