//! Shared fixtures: a fresh database in a temporary directory

use library_system::{
    config::{AppConfig, ConfigOverrides},
    db,
    models::{Book, BookForm, NewUser, User},
    repository::Repository,
    services::Services,
};
use tempfile::TempDir;

pub struct TestLibrary {
    pub services: Services,
    pub repository: Repository,
    pub config: AppConfig,
    _dir: TempDir,
}

pub async fn setup() -> TestLibrary {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = AppConfig::load(&ConfigOverrides {
        data_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    })
    .expect("config");

    let pool = db::connect(&config.database).await.expect("database");
    let repository = Repository::new(pool);
    let services = Services::new(repository.clone(), &config);
    services.auth.ensure_root().await.expect("root account");

    TestLibrary {
        services,
        repository,
        config,
        _dir: dir,
    }
}

impl TestLibrary {
    pub async fn root(&self) -> User {
        self.services.auth.login("root", "root").await.expect("root login")
    }

    pub async fn reader(&self, username: &str) -> User {
        self.services
            .auth
            .signup(NewUser::new(format!("{}@example.org", username), username, "secret"))
            .await
            .expect("signup")
    }

    pub async fn add_book(&self, title: &str, author: &str, quantity: i64) -> Book {
        let root = self.root().await;
        let form = BookForm {
            title: title.to_string(),
            author: author.to_string(),
            quantity: quantity.to_string(),
            ..Default::default()
        };
        self.services.catalog.add_book(&root, &form).await.expect("add book")
    }

    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.repository.pool)
            .await
            .expect("count users")
    }

    pub async fn borrow_count(&self, username: &str) -> i64 {
        self.repository.borrows.count_for_user(username).await.expect("count borrows")
    }

    pub async fn favourite_count(&self, username: &str) -> i64 {
        self.repository
            .favourites
            .count_for_user(username)
            .await
            .expect("count favourites")
    }
}
