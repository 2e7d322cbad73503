use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TestimonialForm {
    pub client_name: String,
    pub client_position: String,
    pub client_company: Option<String>,
    pub testimonial_text: String,
    /// Governs homepage carousel inclusion.
    pub featured: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TestimonialRecord {
    pub client_name: String,
    pub client_position: String,
    pub client_company: Option<String>,
    pub testimonial_text: String,
    /// Inline data URI, optional.
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Testimonial {
    pub id: Uuid,
    pub client_name: String,
    pub client_position: String,
    pub client_company: Option<String>,
    pub testimonial_text: String,
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl TestimonialRecord {
    pub fn into_testimonial(self, id: Uuid) -> Testimonial {
        Testimonial {
            id,
            client_name: self.client_name,
            client_position: self.client_position,
            client_company: self.client_company,
            testimonial_text: self.testimonial_text,
            image_url: self.image_url,
            featured: self.featured,
            created_at: self.created_at,
        }
    }
}
