use chrono::Utc;
use uuid::Uuid;

use crate::plugins::content::error::ContentError;
use crate::plugins::content::image::{self, ImageUpload};
use crate::plugins::content::team::models::{
    ImagePatch, TeamMember, TeamMemberForm, TeamMemberPatch, TeamMemberRecord,
};
use crate::store::{decode_document, encode_document, DynStore};

pub const TEAM_COLLECTION: &str = "team_members";

pub async fn create_member(
    store: &DynStore,
    form: TeamMemberForm,
    image: Option<ImageUpload>,
) -> Result<Uuid, ContentError> {
    let image_base64 = image.as_ref().map(image::to_data_uri).transpose()?;

    let record = TeamMemberRecord {
        name: form.name,
        position: form.position,
        expertise: form.expertise,
        category: form.category,
        bio: form.bio,
        image_base64,
        created_at: Utc::now(),
    };
    let id = store.insert(TEAM_COLLECTION, encode_document(&record)?).await?;
    tracing::info!(%id, "created team member");
    Ok(id)
}

pub async fn list_members(store: &DynStore) -> Result<Vec<TeamMember>, ContentError> {
    let docs = store.list(TEAM_COLLECTION).await?;
    docs.into_iter()
        .map(|(id, doc)| Ok(decode_document::<TeamMemberRecord>(doc)?.into_member(id)))
        .collect()
}

pub async fn get_member(store: &DynStore, id: Uuid) -> Result<Option<TeamMember>, ContentError> {
    match store.get(TEAM_COLLECTION, id).await? {
        Some(doc) => Ok(Some(decode_document::<TeamMemberRecord>(doc)?.into_member(id))),
        None => Ok(None),
    }
}

pub async fn update_member(
    store: &DynStore,
    id: Uuid,
    patch: TeamMemberPatch,
    image: ImagePatch,
) -> Result<(), ContentError> {
    let current = get_member(store, id).await?.ok_or(ContentError::NotFound)?;

    let image_base64 = match image {
        ImagePatch::Keep => current.image_base64,
        ImagePatch::Replace(upload) => Some(image::to_data_uri(&upload)?),
        ImagePatch::Clear => None,
    };

    let record = TeamMemberRecord {
        name: patch.name.unwrap_or(current.name),
        position: patch.position.unwrap_or(current.position),
        expertise: patch.expertise.or(current.expertise),
        category: patch.category.or(current.category),
        bio: patch.bio.or(current.bio),
        image_base64,
        // created_at is write-once
        created_at: current.created_at,
    };
    if !store.replace(TEAM_COLLECTION, id, encode_document(&record)?).await? {
        return Err(ContentError::NotFound);
    }
    Ok(())
}

pub async fn delete_member(store: &DynStore, id: Uuid) -> Result<(), ContentError> {
    if get_member(store, id).await?.is_none() {
        return Err(ContentError::NotFound);
    }
    store.remove(TEAM_COLLECTION, id).await?;
    tracing::info!(%id, "deleted team member");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn form(name: &str) -> TeamMemberForm {
        TeamMemberForm {
            name: name.to_string(),
            position: "Partner".to_string(),
            expertise: Some("Restructuring, M&A".to_string()),
            category: None,
            bio: None,
        }
    }

    fn png() -> ImageUpload {
        ImageUpload {
            filename: "portrait.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn partial_update_leaves_unsupplied_fields_alone() {
        let store = InMemoryStore::new().into_arc();
        let id = create_member(&store, form("Dana"), Some(png())).await.unwrap();

        let patch = TeamMemberPatch {
            position: Some("Managing Partner".to_string()),
            ..Default::default()
        };
        update_member(&store, id, patch, ImagePatch::Keep).await.unwrap();

        let member = get_member(&store, id).await.unwrap().unwrap();
        assert_eq!(member.name, "Dana");
        assert_eq!(member.position, "Managing Partner");
        assert_eq!(member.expertise.as_deref(), Some("Restructuring, M&A"));
        assert!(member.image_base64.is_some());
    }

    #[tokio::test]
    async fn image_patch_tri_state() {
        let store = InMemoryStore::new().into_arc();
        let id = create_member(&store, form("Dana"), None).await.unwrap();
        assert!(get_member(&store, id).await.unwrap().unwrap().image_base64.is_none());

        update_member(&store, id, TeamMemberPatch::default(), ImagePatch::Replace(png()))
            .await
            .unwrap();
        let with_image = get_member(&store, id).await.unwrap().unwrap();
        assert!(with_image.image_base64.as_deref().unwrap().starts_with("data:image/png"));

        update_member(&store, id, TeamMemberPatch::default(), ImagePatch::Keep).await.unwrap();
        let kept = get_member(&store, id).await.unwrap().unwrap();
        assert_eq!(kept.image_base64, with_image.image_base64);

        update_member(&store, id, TeamMemberPatch::default(), ImagePatch::Clear).await.unwrap();
        assert!(get_member(&store, id).await.unwrap().unwrap().image_base64.is_none());
    }
}
