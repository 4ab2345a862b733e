//! Integration tests for the Postgres store.
//! Requires a Postgres instance. Set DATABASE_TEST_URL or these tests are skipped.

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use student_publications::store::{InteractionStore, PgInteractionStore};
use student_publications::{RankingService, RequestContext, db};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Harness: every test gets its own schema
// ---------------------------------------------------------------------------

struct TestDb {
    pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    async fn teardown(self) {
        self.pool.close().await;
        let _ = sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.admin)
            .await;
    }
}

async fn test_db() -> Option<TestDb> {
    let url = std::env::var("DATABASE_TEST_URL").ok()?;
    let admin = PgPool::connect(&url).await.ok()?;

    let schema = format!("ranking_test_{}", Uuid::new_v4().simple());
    sqlx::query(&format!("CREATE SCHEMA {}", schema))
        .execute(&admin)
        .await
        .ok()?;

    let options = url
        .parse::<PgConnectOptions>()
        .ok()?
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
        .ok()?;
    db::ensure_schema(&pool).await.ok()?;

    Some(TestDb {
        pool,
        admin,
        schema,
    })
}

async fn insert_user(pool: &PgPool, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, name, username) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(name)
        .bind(format!("{}-{}", name.to_lowercase(), id.simple()))
        .execute(pool)
        .await
        .unwrap();
    id
}

async fn insert_publication(pool: &PgPool, contributor_id: Uuid) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO publications (id, title, contributor_id) VALUES ($1, $2, $3)")
        .bind(id)
        .bind("notes")
        .bind(contributor_id)
        .execute(pool)
        .await
        .unwrap();
    id
}

async fn insert_interaction(
    pool: &PgPool,
    table: &str,
    publication_id: Uuid,
    contributor_id: Uuid,
    count: f64,
) {
    let sql = format!(
        "INSERT INTO {table} (id, count, publication_id, contributor_id) VALUES ($1, $2, $3, $4)"
    );
    sqlx::query(&sql)
        .bind(Uuid::new_v4())
        .bind(count)
        .bind(publication_id)
        .bind(contributor_id)
        .execute(pool)
        .await
        .unwrap();
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn snapshot_sums_do_not_multiply_likes_by_downloads() {
    let Some(test_db) = test_db().await else {
        return;
    };
    let pool = &test_db.pool;

    let author = insert_user(pool, "Author").await;
    let reader = insert_user(pool, "Reader").await;
    let publication = insert_publication(pool, author).await;
    for count in [2.0, 3.0] {
        insert_interaction(pool, "likes", publication, reader, count).await;
    }
    for count in [1.0, 4.0, 5.0] {
        insert_interaction(pool, "downloads", publication, reader, count).await;
    }

    let store = PgInteractionStore::new(pool.clone());
    let snapshot = store.contribution_snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 2);

    let author_row = snapshot.iter().find(|r| r.user_id == author).unwrap();
    assert_eq!(author_row.name, "Author");
    assert_eq!(author_row.publication_count, 1);
    assert_eq!(author_row.likes_received, 5.0);
    assert_eq!(author_row.downloads_received, 10.0);

    let reader_row = snapshot.iter().find(|r| r.user_id == reader).unwrap();
    assert_eq!(reader_row.publication_count, 0);
    assert_eq!(reader_row.likes_received, 0.0);
    assert_eq!(reader_row.downloads_received, 0.0);

    let activity = store.user_activity(reader).await.unwrap();
    assert!(activity.user_exists);
    assert!(activity.has_rows);
    assert_eq!(activity.publication_count, 0);
    assert_eq!(activity.like_count, 5.0);
    assert_eq!(activity.download_count, 10.0);

    let stats = store.publication_engagement(publication).await.unwrap();
    assert_eq!(stats.like_count, 5.0);
    assert_eq!(stats.download_count, 10.0);

    test_db.teardown().await;
}

#[tokio::test]
async fn tied_scores_share_rank_one() {
    let Some(test_db) = test_db().await else {
        return;
    };
    let pool = &test_db.pool;

    // U1: two publications, likes 10, downloads 4. U2: one publication, likes 7.
    let u1 = insert_user(pool, "U1").await;
    let u2 = insert_user(pool, "U2").await;
    let a1 = insert_publication(pool, u1).await;
    let a2 = insert_publication(pool, u1).await;
    let b1 = insert_publication(pool, u2).await;
    insert_interaction(pool, "likes", a1, u2, 6.0).await;
    insert_interaction(pool, "likes", a2, u2, 4.0).await;
    insert_interaction(pool, "downloads", a1, u2, 4.0).await;
    insert_interaction(pool, "likes", b1, u1, 7.0).await;

    let service = RankingService::new(Arc::new(PgInteractionStore::new(pool.clone())));
    let ctx = RequestContext::background();

    let scores = service.user_scores(&ctx).await.unwrap();
    assert_eq!(scores.len(), 2);
    assert!(scores.iter().all(|s| s.score == 7));

    for user in [u1, u2] {
        let rank = service.user_rank(&ctx, &user.to_string()).await.unwrap();
        assert_eq!(rank.user_count, 2);
        assert_eq!(rank.user_rank, 1);
    }

    let stats = service.user_statistics(&ctx, &u1.to_string()).await.unwrap();
    assert_eq!(stats.publications_count, 2);
    assert_eq!(stats.likes_count, 10.0);
    assert_eq!(stats.downloads_count, 4.0);
    assert_eq!(stats.rank, 1);

    test_db.teardown().await;
}

#[tokio::test]
async fn unknown_ids_read_as_empty() {
    let Some(test_db) = test_db().await else {
        return;
    };
    let store = PgInteractionStore::new(test_db.pool.clone());

    let stats = store.publication_engagement(Uuid::new_v4()).await.unwrap();
    assert_eq!(stats.like_count, 0.0);
    assert_eq!(stats.download_count, 0.0);

    let activity = store.user_activity(Uuid::new_v4()).await.unwrap();
    assert!(!activity.user_exists);
    assert!(!activity.has_rows);
    assert_eq!(activity.publication_count, 0);

    test_db.teardown().await;
}
