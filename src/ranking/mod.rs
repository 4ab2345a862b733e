//! Contribution scoring and ranking.
//!
//! Two metrics live here and are kept apart on purpose. Activity counts are
//! what a user performed. Scores are what a user's publications received.
//! Scores, ranks, statistics and the contributor leaderboard are always
//! recomputed from one fresh snapshot per call; nothing is cached.

mod context;
pub mod score;

pub use context::{CancelHandle, RequestContext};

use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::error::{RankingError, RankingResult};
use crate::models::{
    ContributionRow, PublicationStats, TopContributor, UserActivityCounts, UserRank, UserScore,
    UserStatistics,
};
use crate::store::InteractionStore;

#[derive(Clone)]
pub struct RankingService {
    store: Arc<dyn InteractionStore>,
    query_timeout: Option<Duration>,
}

impl RankingService {
    pub fn new(store: Arc<dyn InteractionStore>) -> Self {
        Self {
            store,
            query_timeout: None,
        }
    }

    /// Deadline applied to reads whose context does not carry its own.
    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub async fn user_activity_counts(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> RankingResult<UserActivityCounts> {
        let user_id = parse_id("user_id", user_id)?;

        let row = ctx
            .run(
                "get user activity counts",
                self.query_timeout,
                self.store.user_activity(user_id),
            )
            .await?;

        if !row.user_exists && !row.has_rows {
            return Err(RankingError::not_found("user", user_id));
        }

        Ok(UserActivityCounts {
            publication_count: row.publication_count,
            download_count: row.download_count,
            like_count: row.like_count,
        })
    }

    pub async fn top_contributors(
        &self,
        ctx: &RequestContext,
    ) -> RankingResult<Vec<TopContributor>> {
        let snapshot = self.snapshot(ctx, "get top contributors").await?;
        Ok(score::top_contributors(&snapshot))
    }

    pub async fn user_scores(&self, ctx: &RequestContext) -> RankingResult<Vec<UserScore>> {
        let snapshot = self.snapshot(ctx, "get user scores").await?;
        Ok(score::score_board(&snapshot))
    }

    pub async fn user_rank(&self, ctx: &RequestContext, user_id: &str) -> RankingResult<UserRank> {
        let user_id = parse_id("user_id", user_id)?;
        let snapshot = self.snapshot(ctx, "get user rank").await?;
        rank_in(&snapshot, user_id)
    }

    /// Publication count, engagement received and rank for one user, all
    /// taken from the same snapshot so the rank always matches `user_rank`.
    pub async fn user_statistics(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> RankingResult<UserStatistics> {
        let user_id = parse_id("user_id", user_id)?;
        let snapshot = self.snapshot(ctx, "get user statistics").await?;

        let row = snapshot
            .iter()
            .find(|row| row.user_id == user_id)
            .ok_or_else(|| RankingError::not_found("user", user_id))?;
        let rank = rank_in(&snapshot, user_id)?;

        Ok(UserStatistics {
            user_id,
            publications_count: row.publication_count,
            likes_count: row.likes_received,
            downloads_count: row.downloads_received,
            rank: rank.user_rank,
        })
    }

    /// Unknown publications are not distinguished from ones with no
    /// engagement; both report zero likes and zero downloads.
    pub async fn publication_stats(
        &self,
        ctx: &RequestContext,
        publication_id: &str,
    ) -> RankingResult<PublicationStats> {
        let publication_id = parse_id("publication_id", publication_id)?;

        ctx.run(
            "get publication stats",
            self.query_timeout,
            self.store.publication_engagement(publication_id),
        )
        .await
    }

    async fn snapshot(
        &self,
        ctx: &RequestContext,
        stage: &'static str,
    ) -> RankingResult<Vec<ContributionRow>> {
        let started = Instant::now();
        let result = ctx
            .run(stage, self.query_timeout, self.store.contribution_snapshot())
            .await;

        match &result {
            Ok(rows) => tracing::debug!(
                stage,
                users = rows.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "contribution snapshot read"
            ),
            Err(error) => tracing::warn!(stage, %error, "contribution snapshot failed"),
        }

        result
    }
}

fn rank_in(snapshot: &[ContributionRow], user_id: Uuid) -> RankingResult<UserRank> {
    let board = score::score_board(snapshot);
    score::resolve_rank(&board, user_id).ok_or_else(|| RankingError::not_found("user", user_id))
}

pub fn parse_id(field: &'static str, raw: &str) -> RankingResult<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RankingError::InvalidArgument {
            field,
            reason: format!("{} is required", field),
        });
    }

    Uuid::parse_str(raw).map_err(|e| RankingError::InvalidArgument {
        field,
        reason: format!("{} must be a valid UUID ({})", field, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_blank_input() {
        let err = parse_id("user_id", "   ").unwrap_err();
        assert!(matches!(err, RankingError::InvalidArgument { field: "user_id", .. }));
        assert_eq!(err.to_string(), "invalid user_id: user_id is required");
    }

    #[test]
    fn parse_id_rejects_non_uuid() {
        let err = parse_id("publication_id", "42").unwrap_err();
        assert!(matches!(
            err,
            RankingError::InvalidArgument { field: "publication_id", .. }
        ));
    }

    #[test]
    fn parse_id_accepts_padded_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("user_id", &format!(" {} ", id)).unwrap(), id);
    }
}
