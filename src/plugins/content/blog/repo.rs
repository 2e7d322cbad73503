use chrono::Utc;
use uuid::Uuid;

use crate::plugins::content::blog::models::{BlogForm, BlogPost, BlogRecord};
use crate::plugins::content::error::ContentError;
use crate::plugins::content::image::{self, ImageUpload};
use crate::plugins::content::slug::generate_slug;
use crate::store::{decode_document, encode_document, DynStore};

pub const BLOGS_COLLECTION: &str = "blogs";

pub async fn create_post(
    store: &DynStore,
    form: BlogForm,
    image: ImageUpload,
) -> Result<Uuid, ContentError> {
    let slug = generate_slug(&form.title);
    // encode before touching the store; an encoding failure writes nothing
    let image_url = image::to_data_uri(&image)?;

    let record = BlogRecord {
        title: form.title,
        short_description: form.short_description,
        full_content: form.full_content,
        image_url,
        template_type: form.template_type,
        slug,
        created_at: Utc::now(),
    };
    let id = store.insert(BLOGS_COLLECTION, encode_document(&record)?).await?;
    tracing::info!(%id, slug = %record.slug, "created blog post");
    Ok(id)
}

pub async fn list_posts(store: &DynStore) -> Result<Vec<BlogPost>, ContentError> {
    let docs = store.list(BLOGS_COLLECTION).await?;
    docs.into_iter()
        .map(|(id, doc)| Ok(decode_document::<BlogRecord>(doc)?.into_post(id)))
        .collect()
}

pub async fn get_post(store: &DynStore, id: Uuid) -> Result<Option<BlogPost>, ContentError> {
    match store.get(BLOGS_COLLECTION, id).await? {
        Some(doc) => Ok(Some(decode_document::<BlogRecord>(doc)?.into_post(id))),
        None => Ok(None),
    }
}

/// Full fetch with an in-process filter. Slugs are not unique: on duplicate
/// titles the first match wins and later posts are silently shadowed.
pub async fn get_post_by_slug(
    store: &DynStore,
    slug: &str,
) -> Result<Option<BlogPost>, ContentError> {
    Ok(list_posts(store).await?.into_iter().find(|p| p.slug == slug))
}

pub async fn update_post(
    store: &DynStore,
    id: Uuid,
    form: BlogForm,
    image: Option<ImageUpload>,
) -> Result<(), ContentError> {
    let current = get_post(store, id).await?.ok_or(ContentError::NotFound)?;

    // a new upload replaces the stored image, otherwise the old value survives
    let image_url = match image {
        Some(upload) => image::to_data_uri(&upload)?,
        None => current.image_url,
    };

    let record = BlogRecord {
        // slug follows the submitted title, recomputed on every update
        slug: generate_slug(&form.title),
        title: form.title,
        short_description: form.short_description,
        full_content: form.full_content,
        image_url,
        template_type: form.template_type,
        // created_at is write-once
        created_at: current.created_at,
    };
    if !store.replace(BLOGS_COLLECTION, id, encode_document(&record)?).await? {
        return Err(ContentError::NotFound);
    }
    Ok(())
}

pub async fn delete_post(store: &DynStore, id: Uuid) -> Result<(), ContentError> {
    // pre-read so a missing id reports not-found rather than a silent no-op
    if get_post(store, id).await?.is_none() {
        return Err(ContentError::NotFound);
    }
    store.remove(BLOGS_COLLECTION, id).await?;
    tracing::info!(%id, "deleted blog post");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::content::blog::models::TemplateType;
    use crate::store::InMemoryStore;

    fn form(title: &str) -> BlogForm {
        BlogForm {
            title: title.to_string(),
            short_description: "summary".to_string(),
            full_content: "<p>body</p>".to_string(),
            template_type: TemplateType::Layout1,
        }
    }

    fn png(name: &str) -> ImageUpload {
        ImageUpload {
            filename: name.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn create_derives_slug_and_stamps_created_at() {
        let store = InMemoryStore::new().into_arc();
        let before = Utc::now();
        let id = create_post(&store, form("Hello World"), png("a.png")).await.unwrap();

        let post = get_post(&store, id).await.unwrap().unwrap();
        assert_eq!(post.slug, generate_slug("Hello World"));
        assert!(post.image_url.starts_with("data:image/png;base64,"));
        assert!(post.created_at >= before && post.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn update_recomputes_slug_keeps_image_and_created_at() {
        let store = InMemoryStore::new().into_arc();
        let id = create_post(&store, form("Hello World"), png("a.png")).await.unwrap();
        let created = get_post(&store, id).await.unwrap().unwrap();

        update_post(&store, id, form("Hello Universe"), None).await.unwrap();

        let updated = get_post(&store, id).await.unwrap().unwrap();
        assert_eq!(updated.slug, generate_slug("Hello Universe"));
        assert_eq!(updated.image_url, created.image_url);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn duplicate_titles_share_a_slug_and_lookup_shadows_one() {
        let store = InMemoryStore::new().into_arc();
        let first = create_post(&store, form("Hello World"), png("a.png")).await.unwrap();
        let second = create_post(&store, form("Hello World"), png("b.png")).await.unwrap();

        let posts = list_posts(&store).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.slug == "hello-world"));

        // exactly one of the two is reachable by slug; the other is shadowed
        let found = get_post_by_slug(&store, "hello-world").await.unwrap().unwrap();
        assert!(found.id == first || found.id == second);
    }

    #[tokio::test]
    async fn operations_on_deleted_posts_report_not_found() {
        let store = InMemoryStore::new().into_arc();
        let id = create_post(&store, form("Hello World"), png("a.png")).await.unwrap();
        delete_post(&store, id).await.unwrap();

        assert!(get_post(&store, id).await.unwrap().is_none());
        assert!(matches!(
            update_post(&store, id, form("Again"), None).await,
            Err(ContentError::NotFound)
        ));
        assert!(matches!(delete_post(&store, id).await, Err(ContentError::NotFound)));
    }

    #[tokio::test]
    async fn encoding_failure_writes_nothing() {
        let store = InMemoryStore::new().into_arc();
        let broken = ImageUpload {
            filename: "empty.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![],
        };
        let result = create_post(&store, form("Hello World"), broken).await;
        assert!(matches!(result, Err(ContentError::Encoding(_))));
        assert!(list_posts(&store).await.unwrap().is_empty());
    }
}
