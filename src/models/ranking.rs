use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// What a user *did*: publications they own plus likes and downloads they
/// performed on any publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivityCounts {
    pub publication_count: i64,
    pub download_count: f64,
    pub like_count: f64,
}

/// Raw activity read for one user id.
///
/// `has_rows` records whether any publication, like or download references
/// the id at all, independent of what the counts sum to.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ActivityRow {
    pub user_exists: bool,
    pub has_rows: bool,
    pub publication_count: i64,
    pub download_count: f64,
    pub like_count: f64,
}

/// What a user's published content *received*, one row per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ContributionRow {
    pub user_id: Uuid,
    pub name: String,
    pub publication_count: i64,
    pub likes_received: f64,
    pub downloads_received: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopContributor {
    pub user_id: Uuid,
    pub name: String,
    pub publication_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScore {
    pub user_id: Uuid,
    pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRank {
    pub user_count: i64,
    pub user_rank: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub user_id: Uuid,
    pub publications_count: i64,
    pub likes_count: f64,
    pub downloads_count: f64,
    pub rank: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PublicationStats {
    pub like_count: f64,
    pub download_count: f64,
}
