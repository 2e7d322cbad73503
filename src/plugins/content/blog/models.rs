use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of the three detail-page layouts renders the post.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateType {
    #[serde(rename = "layout-1")]
    Layout1,
    #[serde(rename = "layout-2")]
    Layout2,
    #[serde(rename = "layout-3")]
    Layout3,
}

impl TemplateType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "layout-1" => Some(Self::Layout1),
            "layout-2" => Some(Self::Layout2),
            "layout-3" => Some(Self::Layout3),
            _ => None,
        }
    }
}

/// Fields the admin form submits. Slug, image encoding and the creation
/// timestamp are the repository's business.
#[derive(Debug, Clone)]
pub struct BlogForm {
    pub title: String,
    pub short_description: String,
    pub full_content: String,
    pub template_type: TemplateType,
}

/// The stored document, id excluded (ids live outside documents).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BlogRecord {
    pub title: String,
    pub short_description: String,
    /// Rich-text HTML.
    pub full_content: String,
    /// Inline data URI; always present.
    pub image_url: String,
    pub template_type: TemplateType,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Debug, Clone)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub full_content: String,
    pub image_url: String,
    pub template_type: TemplateType,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl BlogRecord {
    pub fn into_post(self, id: Uuid) -> BlogPost {
        BlogPost {
            id,
            title: self.title,
            short_description: self.short_description,
            full_content: self.full_content,
            image_url: self.image_url,
            template_type: self.template_type,
            slug: self.slug,
            created_at: self.created_at,
        }
    }
}
