//! SQLite connection setup and embedded migrations

use std::path::Path;
use std::time::Duration;

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Connection, SqlitePool,
};

use crate::{config::DatabaseConfig, error::AppResult};

/// Schema migrations compiled into the binary
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open the database file, creating it when missing, and bring the schema up to date
pub async fn connect(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let pool = open(&config.path, config.max_connections).await?;
    tracing::info!("Connected to database {}", config.path.display());

    upgrade_legacy_schema(&pool).await?;

    MIGRATOR.run(&pool).await?;
    tracing::info!("Database migrations completed");

    Ok(pool)
}

/// Statements turning a database written by the first release of the
/// application into the current layout. Run with foreign keys off so that
/// rebuilding `books` does not cascade into borrows and favourites.
const LEGACY_UPGRADE: &[&str] = &[
    "DROP TRIGGER IF EXISTS decrease_book_number",
    "DROP TRIGGER IF EXISTS increase_book_number",
    "DROP TRIGGER IF EXISTS remove_admin_borrows",
    "ALTER TABLE users RENAME COLUMN type TO role",
    r#"CREATE TABLE books_upgraded (
        book_id     INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
        title       TEXT NOT NULL,
        author      TEXT NOT NULL,
        quantity    INTEGER NOT NULL CHECK (quantity >= 0),
        publisher   TEXT,
        pub_year    INTEGER,
        description TEXT,
        edition     INTEGER,
        rating      REAL NOT NULL DEFAULT 0,
        raters      INTEGER NOT NULL DEFAULT 0
    )"#,
    r#"INSERT INTO books_upgraded
        (book_id, title, author, quantity, publisher, pub_year, description, edition, rating, raters)
        SELECT book_id, title, author, quantity, publisher, pub_year, description, edition,
               COALESCE(CAST(rating AS REAL), 0), COALESCE(raters, 0)
        FROM books"#,
    "DROP TABLE books",
    "ALTER TABLE books_upgraded RENAME TO books",
    "ALTER TABLE borrows ADD COLUMN borrowed_at TEXT NOT NULL DEFAULT ''",
    "UPDATE borrows SET borrowed_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')",
    // Integer session ids cannot be restored; readers log in again
    "DROP TABLE sessions",
];

/// Whether the file still has the first release's schema (`users.type`)
pub async fn is_legacy_schema(pool: &SqlitePool) -> AppResult<bool> {
    let legacy: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM pragma_table_info('users') WHERE name = 'type')",
    )
    .fetch_one(pool)
    .await?;
    Ok(legacy)
}

async fn upgrade_legacy_schema(pool: &SqlitePool) -> AppResult<()> {
    if !is_legacy_schema(pool).await? {
        return Ok(());
    }

    let mut conn = pool.acquire().await?;
    sqlx::query("PRAGMA foreign_keys = OFF").execute(&mut *conn).await?;

    let upgraded = async {
        let mut tx = conn.begin().await?;
        for statement in LEGACY_UPGRADE {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await
    }
    .await;

    sqlx::query("PRAGMA foreign_keys = ON").execute(&mut *conn).await?;
    upgraded?;

    tracing::info!("Upgraded legacy database schema");
    Ok(())
}

async fn open(path: &Path, max_connections: u32) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    Ok(pool)
}
