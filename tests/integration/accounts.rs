use library_system::{models::NewUser, services::auth::hash_password, AppError};

use crate::common::setup;

#[tokio::test]
async fn test_signup_then_login() {
    let lib = setup().await;

    let user = lib
        .services
        .auth
        .signup(NewUser::new("alice@example.org", "alice", "secret"))
        .await
        .unwrap();
    assert!(!user.is_admin());

    let stored = lib.repository.users.get_by_username("alice").await.unwrap();
    assert_eq!(stored, user);

    let logged_in = lib.services.auth.login("alice", "secret").await.unwrap();
    assert_eq!(logged_in.username, "alice");
}

#[tokio::test]
async fn test_duplicate_signup_leaves_storage_unchanged() {
    let lib = setup().await;
    lib.reader("alice").await;
    let before = lib.user_count().await;

    let same_name = lib
        .services
        .auth
        .signup(NewUser::new("other@example.org", "alice", "secret"))
        .await;
    assert!(matches!(same_name, Err(AppError::Conflict(ref m)) if m == "Username is taken!"));

    let same_email = lib
        .services
        .auth
        .signup(NewUser::new("ALICE@example.org", "alicia", "secret"))
        .await;
    assert!(matches!(same_email, Err(AppError::Conflict(ref m)) if m == "Email is used before!"));

    assert_eq!(lib.user_count().await, before);
}

#[tokio::test]
async fn test_signup_feedback_follows_form_order() {
    let lib = setup().await;
    lib.reader("alice").await;
    let auth = &lib.services.auth;

    let partial = NewUser::new("", "bob", "");
    assert_eq!(
        auth.validate_signup(&partial, false).await.unwrap().as_deref(),
        Some("Username is too short!")
    );

    let taken = NewUser::new("", "alice", "");
    assert_eq!(
        auth.validate_signup(&taken, false).await.unwrap().as_deref(),
        Some("Username is taken!")
    );

    let short_password = NewUser::new("", "bobby", "pw");
    assert_eq!(
        auth.validate_signup(&short_password, false).await.unwrap().as_deref(),
        Some("Password is too short!")
    );

    let only_name = NewUser::new("", "bobby", "");
    assert_eq!(auth.validate_signup(&only_name, false).await.unwrap(), None);

    let complete = NewUser::new("bob@example.org", "bobby", "secret");
    assert_eq!(auth.validate_signup(&complete, true).await.unwrap(), None);
}

#[tokio::test]
async fn test_login_failure_is_generic() {
    let lib = setup().await;
    lib.reader("alice").await;

    for (username, password) in [("alice", "wrong"), ("nobody", "secret")] {
        let err = lib.services.auth.login(username, password).await.unwrap_err();
        assert!(matches!(err, AppError::Authentication(ref m) if m == "Login failed. Wrong credentials!"));
    }
}

#[tokio::test]
async fn test_plain_text_password_is_upgraded_on_login() {
    let lib = setup().await;
    sqlx::query("INSERT INTO users (username, email, password, role) VALUES ('legacy', 'legacy@example.org', 'oldpass', 'Regular')")
        .execute(&lib.repository.pool)
        .await
        .unwrap();

    lib.services.auth.login("legacy", "oldpass").await.unwrap();

    let stored = lib.repository.users.get_credentials("legacy").await.unwrap().unwrap();
    assert!(stored.password.starts_with("$argon2"));
    lib.services.auth.login("legacy", "oldpass").await.unwrap();
}

#[tokio::test]
async fn test_root_is_seeded_once() {
    let lib = setup().await;
    lib.services.auth.ensure_root().await.unwrap();

    let root = lib.root().await;
    assert!(root.is_admin());
    assert_eq!(root.email, "root@library.me");
}

#[tokio::test]
async fn test_change_password() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;

    let err = lib.services.auth.change_password(&alice, "abc").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "Password too short"));

    lib.services.auth.change_password(&alice, "newsecret").await.unwrap();
    assert!(lib.services.auth.login("alice", "secret").await.is_err());
    lib.services.auth.login("alice", "newsecret").await.unwrap();
}

#[tokio::test]
async fn test_delete_account_cascades() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 2).await;

    lib.services.loans.borrow(&alice, book.book_id).await.unwrap();
    lib.services.favourites.favourite(&alice, book.book_id).await.unwrap();
    let token = lib.services.sessions.start(&alice).await.unwrap();

    lib.services.auth.delete_account(&alice).await.unwrap();

    assert_eq!(lib.borrow_count("alice").await, 0);
    assert_eq!(lib.favourite_count("alice").await, 0);
    assert_eq!(lib.repository.sessions.restore(&token).await.unwrap(), None);
    assert_eq!(lib.services.sessions.restore().await.unwrap(), None);
    assert_eq!(lib.services.catalog.get_book(book.book_id).await.unwrap().quantity, 2);
}

#[tokio::test]
async fn test_root_cannot_delete_itself() {
    let lib = setup().await;
    let root = lib.root().await;
    let err = lib.services.auth.delete_account(&root).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
    assert!(lib.repository.users.username_exists("root").await.unwrap());
}

#[test]
fn test_hash_is_salted() {
    assert_ne!(hash_password("secret").unwrap(), hash_password("secret").unwrap());
}
