//! Pure scoring and ordering over a contribution snapshot.

use uuid::Uuid;

use crate::models::{ContributionRow, TopContributor, UserRank, UserScore};

/// `round((likes + downloads) / max(publications, 1))`.
///
/// A user without publications divides by one; their numerator is zero, so
/// the score is zero. Rounding is half away from zero, the same as Postgres
/// `ROUND(numeric)`.
pub fn contribution_score(likes: f64, downloads: f64, publication_count: i64) -> i64 {
    let denominator = publication_count.max(1) as f64;
    ((likes + downloads) / denominator).round() as i64
}

pub fn score_of(row: &ContributionRow) -> UserScore {
    UserScore {
        user_id: row.user_id,
        score: contribution_score(
            row.likes_received,
            row.downloads_received,
            row.publication_count,
        ),
    }
}

/// Every user's score, highest first; equal scores fall back to user id.
pub fn score_board(snapshot: &[ContributionRow]) -> Vec<UserScore> {
    let mut board: Vec<UserScore> = snapshot.iter().map(score_of).collect();
    board.sort_by(|a, b| b.score.cmp(&a.score).then(a.user_id.cmp(&b.user_id)));
    board
}

/// Competition rank of `user_id`: one plus the number of users with a
/// strictly greater score. Tied users share a rank and the next distinct
/// score skips the places they occupy (1, 1, 3).
///
/// Returns `None` when the user is not part of the board.
pub fn resolve_rank(board: &[UserScore], user_id: Uuid) -> Option<UserRank> {
    let target = board.iter().find(|s| s.user_id == user_id)?.score;
    let ahead = board.iter().filter(|s| s.score > target).count();

    Some(UserRank {
        user_count: board.len() as i64,
        user_rank: ahead as i64 + 1,
    })
}

/// Users with at least one publication, most publications first.
pub fn top_contributors(snapshot: &[ContributionRow]) -> Vec<TopContributor> {
    let mut contributors: Vec<TopContributor> = snapshot
        .iter()
        .filter(|row| row.publication_count > 0)
        .map(|row| TopContributor {
            user_id: row.user_id,
            name: row.name.clone(),
            publication_count: row.publication_count,
        })
        .collect();
    contributors.sort_by(|a, b| {
        b.publication_count
            .cmp(&a.publication_count)
            .then(a.user_id.cmp(&b.user_id))
    });
    contributors
}
