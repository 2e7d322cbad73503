use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::json;
use uuid::Uuid;

use crate::http_error::AppError;
use crate::plugins::content::error::ContentError;
use crate::plugins::content::form::{read_form, FormPayload};
use crate::plugins::content::team::models::{
    ImagePatch, TeamCategory, TeamMember, TeamMemberForm, TeamMemberPatch,
};
use crate::plugins::content::team::repo;
use crate::store::DynStore;

fn parse_category(payload: &FormPayload) -> Result<Option<TeamCategory>, AppError> {
    match payload.optional("category") {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => TeamCategory::parse(&raw).map(Some).ok_or_else(|| {
            AppError::new(StatusCode::BAD_REQUEST, "unknown category").with_code("invalid_field")
        }),
    }
}

pub async fn create_member(
    Extension(store): Extension<DynStore>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let payload = read_form(multipart).await?;
    let form = TeamMemberForm {
        name: payload.required("name")?,
        position: payload.required("position")?,
        expertise: payload.optional("expertise"),
        category: parse_category(&payload)?,
        bio: payload.optional("bio"),
    };

    let id = repo::create_member(&store, form, payload.image).await?;
    Ok(Json(json!({ "id": id })))
}

pub async fn list_members(
    Extension(store): Extension<DynStore>,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    Ok(Json(repo::list_members(&store).await?))
}

pub async fn get_member(
    Extension(store): Extension<DynStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamMember>, AppError> {
    let member = repo::get_member(&store, id).await?.ok_or(ContentError::NotFound)?;
    Ok(Json(member))
}

pub async fn update_member(
    Extension(store): Extension<DynStore>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let payload = read_form(multipart).await?;
    let patch = TeamMemberPatch {
        name: payload.optional("name"),
        position: payload.optional("position"),
        expertise: payload.optional("expertise"),
        category: parse_category(&payload)?,
        bio: payload.optional("bio"),
    };

    // uploading wins over clearing; neither means keep the stored image
    let remove_image = payload.flag("remove_image");
    let image = match payload.image {
        Some(upload) => ImagePatch::Replace(upload),
        None if remove_image => ImagePatch::Clear,
        None => ImagePatch::Keep,
    };

    repo::update_member(&store, id, patch, image).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_member(
    Extension(store): Extension<DynStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    repo::delete_member(&store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
