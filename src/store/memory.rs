use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::InteractionStore;
use crate::error::StoreError;
use crate::models::{
    ActivityRow, ContributionRow, Download, Interaction, Like, Publication, PublicationStats, User,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    publications: Vec<Publication>,
    likes: Vec<Like>,
    downloads: Vec<Download>,
}

/// In-memory store for tests and local runs without a database.
///
/// Every read takes the lock once and works on that view, so reads are
/// snapshots in the same sense as a single SQL statement.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
    latency_ms: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, name: &str) -> Uuid {
        let user = User::new(name, &name.to_lowercase());
        let id = user.id;
        self.write().users.push(user);
        id
    }

    pub fn remove_user(&self, user_id: Uuid) {
        self.write().users.retain(|u| u.id != user_id);
    }

    pub fn add_publication(&self, contributor_id: Uuid, title: &str) -> Uuid {
        let publication = Publication::new(contributor_id, title);
        let id = publication.id;
        self.write().publications.push(publication);
        id
    }

    pub fn add_like(&self, publication_id: Uuid, contributor_id: Uuid, count: f64) -> Uuid {
        let like = Interaction::new(publication_id, contributor_id, count);
        let id = like.id;
        self.write().likes.push(like);
        id
    }

    pub fn add_download(&self, publication_id: Uuid, contributor_id: Uuid, count: f64) -> Uuid {
        let download = Interaction::new(publication_id, contributor_id, count);
        let id = download.id;
        self.write().downloads.push(download);
        id
    }

    /// Make every subsequent read fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delay every subsequent read, to exercise deadlines and cancellation.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms.store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    async fn begin_read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".to_string()));
        }
        Ok(self.tables.read().unwrap_or_else(PoisonError::into_inner))
    }
}

#[async_trait]
impl InteractionStore for MemoryStore {
    async fn user_activity(&self, user_id: Uuid) -> Result<ActivityRow, StoreError> {
        let tables = self.begin_read().await?;
        let has_rows = tables.publications.iter().any(|p| p.contributor_id == user_id)
            || tables.likes.iter().any(|l| l.contributor_id == user_id)
            || tables.downloads.iter().any(|d| d.contributor_id == user_id);

        Ok(ActivityRow {
            user_exists: tables.users.iter().any(|u| u.id == user_id),
            has_rows,
            publication_count: tables
                .publications
                .iter()
                .filter(|p| p.contributor_id == user_id)
                .count() as i64,
            download_count: tables
                .downloads
                .iter()
                .filter(|d| d.contributor_id == user_id)
                .map(|d| d.count)
                .sum(),
            like_count: tables
                .likes
                .iter()
                .filter(|l| l.contributor_id == user_id)
                .map(|l| l.count)
                .sum(),
        })
    }

    async fn contribution_snapshot(&self) -> Result<Vec<ContributionRow>, StoreError> {
        let tables = self.begin_read().await?;

        let mut rows: Vec<ContributionRow> = tables
            .users
            .iter()
            .map(|user| {
                let owned: HashSet<Uuid> = tables
                    .publications
                    .iter()
                    .filter(|p| p.contributor_id == user.id)
                    .map(|p| p.id)
                    .collect();
                let received = |rows: &[Interaction]| -> f64 {
                    rows.iter()
                        .filter(|r| owned.contains(&r.publication_id))
                        .map(|r| r.count)
                        .sum()
                };

                ContributionRow {
                    user_id: user.id,
                    name: user.name.clone(),
                    publication_count: owned.len() as i64,
                    likes_received: received(&tables.likes),
                    downloads_received: received(&tables.downloads),
                }
            })
            .collect();
        rows.sort_by_key(|row| row.user_id);

        Ok(rows)
    }

    async fn publication_engagement(
        &self,
        publication_id: Uuid,
    ) -> Result<PublicationStats, StoreError> {
        let tables = self.begin_read().await?;
        let sum = |rows: &[Interaction]| -> f64 {
            rows.iter()
                .filter(|r| r.publication_id == publication_id)
                .map(|r| r.count)
                .sum()
        };

        Ok(PublicationStats {
            like_count: sum(&tables.likes),
            download_count: sum(&tables.downloads),
        })
    }
}
