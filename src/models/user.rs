use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub student_id: Option<String>,
    pub name: String,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub username: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(name: &str, username: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id: None,
            name: name.to_string(),
            surname: None,
            email: None,
            grade: None,
            username: username.to_string(),
            status: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
