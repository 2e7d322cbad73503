use chrono::Utc;
use uuid::Uuid;

use crate::plugins::content::error::ContentError;
use crate::plugins::content::image::{self, ImageUpload};
use crate::plugins::content::testimonials::models::{
    Testimonial, TestimonialForm, TestimonialRecord,
};
use crate::store::{decode_document, encode_document, DynStore};

pub const TESTIMONIALS_COLLECTION: &str = "testimonials";

pub async fn create_testimonial(
    store: &DynStore,
    form: TestimonialForm,
    image: Option<ImageUpload>,
) -> Result<Uuid, ContentError> {
    let image_url = image.as_ref().map(image::to_data_uri).transpose()?;

    let record = TestimonialRecord {
        client_name: form.client_name,
        client_position: form.client_position,
        client_company: form.client_company,
        testimonial_text: form.testimonial_text,
        image_url,
        featured: form.featured,
        created_at: Utc::now(),
    };
    let id = store.insert(TESTIMONIALS_COLLECTION, encode_document(&record)?).await?;
    tracing::info!(%id, "created testimonial");
    Ok(id)
}

/// Newest first; this ordering is part of the contract for testimonials.
pub async fn list_testimonials(store: &DynStore) -> Result<Vec<Testimonial>, ContentError> {
    let docs = store.list(TESTIMONIALS_COLLECTION).await?;
    let mut testimonials: Vec<Testimonial> = docs
        .into_iter()
        .map(|(id, doc)| Ok(decode_document::<TestimonialRecord>(doc)?.into_testimonial(id)))
        .collect::<Result<_, ContentError>>()?;
    testimonials.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(testimonials)
}

/// The homepage carousel: the full list filtered in process, not a
/// store-side predicate.
pub async fn list_featured(store: &DynStore) -> Result<Vec<Testimonial>, ContentError> {
    Ok(list_testimonials(store).await?.into_iter().filter(|t| t.featured).collect())
}

pub async fn get_testimonial(
    store: &DynStore,
    id: Uuid,
) -> Result<Option<Testimonial>, ContentError> {
    match store.get(TESTIMONIALS_COLLECTION, id).await? {
        Some(doc) => Ok(Some(decode_document::<TestimonialRecord>(doc)?.into_testimonial(id))),
        None => Ok(None),
    }
}

pub async fn update_testimonial(
    store: &DynStore,
    id: Uuid,
    form: TestimonialForm,
    image: Option<ImageUpload>,
) -> Result<(), ContentError> {
    let current = get_testimonial(store, id).await?.ok_or(ContentError::NotFound)?;

    let image_url = match image {
        Some(upload) => Some(image::to_data_uri(&upload)?),
        None => current.image_url,
    };

    let record = TestimonialRecord {
        client_name: form.client_name,
        client_position: form.client_position,
        client_company: form.client_company,
        testimonial_text: form.testimonial_text,
        image_url,
        featured: form.featured,
        // created_at is write-once
        created_at: current.created_at,
    };
    if !store.replace(TESTIMONIALS_COLLECTION, id, encode_document(&record)?).await? {
        return Err(ContentError::NotFound);
    }
    Ok(())
}

pub async fn delete_testimonial(store: &DynStore, id: Uuid) -> Result<(), ContentError> {
    if get_testimonial(store, id).await?.is_none() {
        return Err(ContentError::NotFound);
    }
    store.remove(TESTIMONIALS_COLLECTION, id).await?;
    tracing::info!(%id, "deleted testimonial");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use std::time::Duration;

    fn form(name: &str, featured: bool) -> TestimonialForm {
        TestimonialForm {
            client_name: name.to_string(),
            client_position: "CEO".to_string(),
            client_company: None,
            testimonial_text: "They delivered.".to_string(),
            featured,
        }
    }

    #[tokio::test]
    async fn featured_filter_is_exact() {
        let store = InMemoryStore::new().into_arc();
        for (name, featured) in
            [("a", false), ("b", true), ("c", false), ("d", true), ("e", false)]
        {
            create_testimonial(&store, form(name, featured), None).await.unwrap();
        }

        let featured = list_featured(&store).await.unwrap();
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|t| t.featured));
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let store = InMemoryStore::new().into_arc();
        let mut ids = Vec::new();
        for name in ["first", "second", "third"] {
            ids.push(create_testimonial(&store, form(name, false), None).await.unwrap());
            // keep created_at strictly increasing
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let listed = list_testimonials(&store).await.unwrap();
        let listed_ids: Vec<_> = listed.iter().map(|t| t.id).collect();
        ids.reverse();
        assert_eq!(listed_ids, ids);
    }
}
