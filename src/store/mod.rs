//! Read port onto the relational store that holds users, publications,
//! likes and downloads.
//!
//! Each method is a single logical read. Implementations must answer it from
//! one consistent view of the data; the ranking core relies on that to never
//! mix scores read at different moments.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgInteractionStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{ActivityRow, ContributionRow, PublicationStats};

#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Publication count plus like/download sums performed *by* the user.
    async fn user_activity(&self, user_id: Uuid) -> Result<ActivityRow, StoreError>;

    /// One row per user with the engagement their publications received,
    /// ordered by user id.
    async fn contribution_snapshot(&self) -> Result<Vec<ContributionRow>, StoreError>;

    /// Like and download sums for one publication. Unknown ids yield zeros.
    async fn publication_engagement(
        &self,
        publication_id: Uuid,
    ) -> Result<PublicationStats, StoreError>;
}
