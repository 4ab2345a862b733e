use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connects and makes sure the tables the ranking core reads exist.
pub async fn init_db(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    ensure_schema(&pool).await?;

    Ok(pool)
}

/// Creates the users, publications, likes and downloads tables if missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            student_id VARCHAR(64) NULL,
            name VARCHAR(255) NOT NULL,
            surname VARCHAR(255) NULL,
            email VARCHAR(255) NULL UNIQUE,
            grade VARCHAR(64) NULL,
            username VARCHAR(191) NOT NULL UNIQUE,
            password TEXT NULL,
            profile_image TEXT NULL,
            status BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS publications (
            id UUID PRIMARY KEY,
            course_id UUID NULL,
            title VARCHAR(255) NOT NULL,
            description TEXT NULL,
            tags TEXT NULL,
            image_id TEXT NULL,
            file_id TEXT NULL,
            contributor_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            status VARCHAR(64) NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_publications_contributor_id ON publications (contributor_id)",
    )
    .execute(pool)
    .await?;

    for table in ["likes", "downloads"] {
        let create_sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id UUID PRIMARY KEY,
                count DOUBLE PRECISION NOT NULL DEFAULT 0,
                publication_id UUID NOT NULL REFERENCES publications(id) ON DELETE CASCADE,
                contributor_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NULL
            )
            "#
        );
        sqlx::query(&create_sql).execute(pool).await?;

        for column in ["publication_id", "contributor_id"] {
            let index_sql = format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_{column} ON {table} ({column})"
            );
            sqlx::query(&index_sql).execute(pool).await?;
        }
    }

    Ok(())
}
