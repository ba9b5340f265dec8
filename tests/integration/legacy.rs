//! Databases written by the first release of the application

use std::path::Path;

use library_system::{
    config::{AppConfig, ConfigOverrides},
    db,
    models::Role,
    repository::Repository,
    services::Services,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const LEGACY_SCHEMA: &[&str] = &[
    r#"CREATE TABLE [users] (
        [username] VARCHAR(20) PRIMARY KEY NOT NULL,
        [email] VARCHAR(50) NOT NULL UNIQUE,
        [password] VARCHAR(50) NOT NULL,
        [type] VARCHAR(7) NOT NULL DEFAULT 'Regular',
        CHECK ([type] IN ('Admin', 'Regular'))
    )"#,
    "INSERT INTO [users] (email, username, password, type) VALUES ('root@library.me', 'root', 'root', 'Admin')",
    r#"CREATE TABLE [books] (
        [book_id] INTEGER NOT NULL PRIMARY KEY,
        [title] VARCHAR(100) NOT NULL,
        [author] VARCHAR(50) NOT NULL,
        [quantity] INTEGER NOT NULL CHECK (quantity >= 0),
        [publisher] VARCHAR(50),
        [pub_year] INTEGER,
        [description] VARCHAR(200),
        [edition] INTEGER,
        [rating] NUMERIC,
        [raters] INTEGER DEFAULT 0,
        [file] BLOB
    )"#,
    r#"CREATE TABLE [favourites] (
        [username] VARCHAR(50) NOT NULL,
        [book_id] INTEGER NOT NULL,
        CONSTRAINT [pk_favourites] PRIMARY KEY (username, book_id),
        FOREIGN KEY ([username]) REFERENCES [users] (username) ON DELETE CASCADE,
        FOREIGN KEY (book_id) REFERENCES [books] (book_id) ON DELETE CASCADE
    )"#,
    r#"CREATE TABLE [borrows] (
        [username] VARCHAR(50) NOT NULL,
        [book_id] INTEGER NOT NULL,
        CONSTRAINT [pk_favourites] PRIMARY KEY (username, book_id),
        FOREIGN KEY (username) REFERENCES [users] (username) ON DELETE CASCADE,
        FOREIGN KEY (book_id) REFERENCES [books] (book_id) ON DELETE CASCADE
    )"#,
    r#"CREATE TABLE [sessions] (
        [username] VARCHAR(50) NOT NULL PRIMARY KEY,
        [session] INTEGER UNIQUE,
        FOREIGN KEY (username) REFERENCES [users] (username) ON DELETE CASCADE
    )"#,
    r#"CREATE TRIGGER decrease_book_number AFTER INSERT ON [borrows]
    BEGIN
        UPDATE [books] SET quantity = quantity - 1 WHERE book_id = NEW.book_id;
    END"#,
    r#"CREATE TRIGGER increase_book_number AFTER DELETE ON [borrows]
    BEGIN
        UPDATE [books] SET quantity = quantity + 1 WHERE book_id = OLD.book_id;
    END"#,
    r#"CREATE TRIGGER remove_admin_borrows AFTER UPDATE ON [users]
    WHEN NEW.type = 'Admin' AND OLD.type = 'Regular'
    BEGIN
        DELETE FROM [borrows] WHERE username = NEW.username;
    END"#,
    "INSERT INTO users (email, username, password) VALUES ('alice@example.org', 'alice', 'secret')",
    "INSERT INTO books (book_id, title, author, quantity, rating, raters) VALUES (1, 'Dune', 'Herbert', 2, 4, 1)",
    "INSERT INTO books (book_id, title, author, quantity) VALUES (2, 'Emma', 'Austen', 1)",
    "INSERT INTO borrows (username, book_id) VALUES ('alice', 1)",
    "INSERT INTO favourites (username, book_id) VALUES ('alice', 2)",
    "INSERT INTO sessions (username, session) VALUES ('alice', 12345)",
];

async fn write_legacy_database(path: &Path) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("legacy database");
    for statement in LEGACY_SCHEMA {
        sqlx::query(statement).execute(&pool).await.expect("legacy schema");
    }
    pool.close().await;
}

#[tokio::test]
async fn test_legacy_database_is_upgraded_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("legacy.db");
    write_legacy_database(&database).await;

    let config = AppConfig::load(&ConfigOverrides {
        data_dir: Some(dir.path().to_path_buf()),
        database: Some(database),
        ..Default::default()
    })
    .unwrap();
    let pool = db::connect(&config.database).await.unwrap();
    assert!(!db::is_legacy_schema(&pool).await.unwrap());

    let repository = Repository::new(pool);
    let services = Services::new(repository.clone(), &config);
    services.auth.ensure_root().await.unwrap();

    // Plain-text passwords log in once and are rehashed
    let alice = services.auth.login("alice", "secret").await.unwrap();
    assert_eq!(alice.role, Role::Normal);
    let stored = repository.users.get_credentials("alice").await.unwrap().unwrap();
    assert!(stored.password.starts_with("$argon2"));
    assert!(services.auth.login("alice", "secret").await.is_ok());
    assert!(services.auth.login("alice", "wrong").await.is_err());

    let root = services.auth.login("root", "root").await.unwrap();
    assert_eq!(root.role, Role::Admin);

    // Borrow counted once by the old triggers, restored once by the new ones
    let dune = services.catalog.get_book(1).await.unwrap();
    assert_eq!(dune.quantity, 1);
    assert_eq!(dune.rating, 4.0);
    assert_eq!(services.catalog.get_book(2).await.unwrap().rating, 0.0);

    let borrowed = services.loans.borrowed(&alice).await.unwrap();
    assert_eq!(borrowed.len(), 1);
    let returned = services.loans.return_book(&alice, 1).await.unwrap();
    assert_eq!(returned.quantity, 2);
    let again = services.loans.borrow(&alice, 1).await.unwrap();
    assert_eq!(again.quantity, 1);

    assert_eq!(services.favourites.favourites(&alice).await.unwrap().len(), 1);

    // Old integer sessions are gone; new ones work
    assert_eq!(repository.sessions.token_for("alice").await.unwrap(), None);
    let token = services.sessions.start(&alice).await.unwrap();
    assert_eq!(repository.sessions.restore(&token).await.unwrap(), Some(alice));
}

#[tokio::test]
async fn test_upgraded_database_opens_again() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("legacy.db");
    write_legacy_database(&database).await;

    let config = AppConfig::load(&ConfigOverrides {
        data_dir: Some(dir.path().to_path_buf()),
        database: Some(database),
        ..Default::default()
    })
    .unwrap();
    db::connect(&config.database).await.unwrap().close().await;

    let pool = db::connect(&config.database).await.unwrap();
    let services = Services::new(Repository::new(pool), &config);
    assert_eq!(services.catalog.list_books().await.unwrap().len(), 2);
}
