use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::InteractionStore;
use crate::error::StoreError;
use crate::models::{ActivityRow, ContributionRow, PublicationStats};

#[derive(Debug, Clone)]
pub struct PgInteractionStore {
    pool: PgPool,
}

impl PgInteractionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionStore for PgInteractionStore {
    async fn user_activity(&self, user_id: Uuid) -> Result<ActivityRow, StoreError> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT
                EXISTS (SELECT 1 FROM users WHERE id = $1) AS user_exists,
                (
                    EXISTS (SELECT 1 FROM publications WHERE contributor_id = $1)
                    OR EXISTS (SELECT 1 FROM likes WHERE contributor_id = $1)
                    OR EXISTS (SELECT 1 FROM downloads WHERE contributor_id = $1)
                ) AS has_rows,
                (SELECT COUNT(*) FROM publications WHERE contributor_id = $1) AS publication_count,
                (SELECT COALESCE(SUM(count), 0) FROM downloads WHERE contributor_id = $1)::DOUBLE PRECISION AS download_count,
                (SELECT COALESCE(SUM(count), 0) FROM likes WHERE contributor_id = $1)::DOUBLE PRECISION AS like_count
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn contribution_snapshot(&self) -> Result<Vec<ContributionRow>, StoreError> {
        // Likes and downloads are summed per publication before the join so the
        // two tables never multiply each other's rows.
        let rows = sqlx::query_as::<_, ContributionRow>(
            r#"
            SELECT
                u.id AS user_id,
                COALESCE(u.name, '') AS name,
                COALESCE(owned.publication_count, 0) AS publication_count,
                COALESCE(owned.likes_received, 0)::DOUBLE PRECISION AS likes_received,
                COALESCE(owned.downloads_received, 0)::DOUBLE PRECISION AS downloads_received
            FROM users u
            LEFT JOIN (
                SELECT
                    p.contributor_id,
                    COUNT(*) AS publication_count,
                    SUM(COALESCE(l.like_sum, 0)) AS likes_received,
                    SUM(COALESCE(d.download_sum, 0)) AS downloads_received
                FROM publications p
                LEFT JOIN (
                    SELECT publication_id, SUM(count) AS like_sum
                    FROM likes
                    GROUP BY publication_id
                ) l ON l.publication_id = p.id
                LEFT JOIN (
                    SELECT publication_id, SUM(count) AS download_sum
                    FROM downloads
                    GROUP BY publication_id
                ) d ON d.publication_id = p.id
                GROUP BY p.contributor_id
            ) owned ON owned.contributor_id = u.id
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn publication_engagement(
        &self,
        publication_id: Uuid,
    ) -> Result<PublicationStats, StoreError> {
        let stats = sqlx::query_as::<_, PublicationStats>(
            r#"
            SELECT
                (SELECT COALESCE(SUM(count), 0) FROM likes WHERE publication_id = $1)::DOUBLE PRECISION AS like_count,
                (SELECT COALESCE(SUM(count), 0) FROM downloads WHERE publication_id = $1)::DOUBLE PRECISION AS download_count
            "#,
        )
        .bind(publication_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
