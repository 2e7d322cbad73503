use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::json;
use uuid::Uuid;

use crate::http_error::AppError;
use crate::plugins::content::error::ContentError;
use crate::plugins::content::form::{read_form, FormPayload};
use crate::plugins::content::testimonials::models::{Testimonial, TestimonialForm};
use crate::plugins::content::testimonials::repo;
use crate::store::DynStore;

fn testimonial_form(payload: &FormPayload) -> Result<TestimonialForm, AppError> {
    Ok(TestimonialForm {
        client_name: payload.required("client_name")?,
        client_position: payload.required("client_position")?,
        client_company: payload.optional("client_company"),
        testimonial_text: payload.required("testimonial_text")?,
        featured: payload.flag("featured"),
    })
}

pub async fn create_testimonial(
    Extension(store): Extension<DynStore>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let payload = read_form(multipart).await?;
    let form = testimonial_form(&payload)?;
    let id = repo::create_testimonial(&store, form, payload.image).await?;
    Ok(Json(json!({ "id": id })))
}

pub async fn list_testimonials(
    Extension(store): Extension<DynStore>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    Ok(Json(repo::list_testimonials(&store).await?))
}

pub async fn list_featured(
    Extension(store): Extension<DynStore>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    Ok(Json(repo::list_featured(&store).await?))
}

pub async fn get_testimonial(
    Extension(store): Extension<DynStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<Testimonial>, AppError> {
    let testimonial = repo::get_testimonial(&store, id).await?.ok_or(ContentError::NotFound)?;
    Ok(Json(testimonial))
}

pub async fn update_testimonial(
    Extension(store): Extension<DynStore>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let payload = read_form(multipart).await?;
    let form = testimonial_form(&payload)?;
    repo::update_testimonial(&store, id, form, payload.image).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_testimonial(
    Extension(store): Extension<DynStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    repo::delete_testimonial(&store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
