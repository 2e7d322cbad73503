use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plugins::content::image::ImageUpload;

/// Practice area used as a filter key on the team page.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamCategory {
    Strategy,
    Finance,
    Operations,
    Technology,
    Legal,
    Hr,
}

impl TeamCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "strategy" => Some(Self::Strategy),
            "finance" => Some(Self::Finance),
            "operations" => Some(Self::Operations),
            "technology" => Some(Self::Technology),
            "legal" => Some(Self::Legal),
            "hr" => Some(Self::Hr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeamMemberForm {
    pub name: String,
    pub position: String,
    /// Free text; some pages split it on commas, the data layer does not care.
    pub expertise: Option<String>,
    pub category: Option<TeamCategory>,
    pub bio: Option<String>,
}

/// Partial update: only supplied fields overwrite the stored ones.
#[derive(Debug, Clone, Default)]
pub struct TeamMemberPatch {
    pub name: Option<String>,
    pub position: Option<String>,
    pub expertise: Option<String>,
    pub category: Option<TeamCategory>,
    pub bio: Option<String>,
}

/// What an update does to the stored image. Presence of a value cannot say
/// "clear", so clearing is its own case.
pub enum ImagePatch {
    Keep,
    Replace(ImageUpload),
    Clear,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TeamMemberRecord {
    pub name: String,
    pub position: String,
    pub expertise: Option<String>,
    pub category: Option<TeamCategory>,
    pub bio: Option<String>,
    /// Inline data URI, optional for team members.
    pub image_base64: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Debug, Clone)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub expertise: Option<String>,
    pub category: Option<TeamCategory>,
    pub bio: Option<String>,
    pub image_base64: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TeamMemberRecord {
    pub fn into_member(self, id: Uuid) -> TeamMember {
        TeamMember {
            id,
            name: self.name,
            position: self.position,
            expertise: self.expertise,
            category: self.category,
            bio: self.bio,
            image_base64: self.image_base64,
            created_at: self.created_at,
        }
    }
}
