use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the `likes` or `downloads` table.
///
/// `count` is an accumulated magnitude, so a single row may stand for many
/// individual actions. `contributor_id` is the user who performed them, which
/// is not necessarily the owner of the publication.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interaction {
    pub id: Uuid,
    pub count: f64,
    pub publication_id: Uuid,
    pub contributor_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Interaction {
    pub fn new(publication_id: Uuid, contributor_id: Uuid, count: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            count,
            publication_id,
            contributor_id,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

pub type Like = Interaction;
pub type Download = Interaction;
