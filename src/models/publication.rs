use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Publication {
    pub id: Uuid,
    pub course_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub contributor_id: Uuid,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Publication {
    pub fn new(contributor_id: Uuid, title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            course_id: None,
            title: title.to_string(),
            description: None,
            tags: None,
            contributor_id,
            status: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
