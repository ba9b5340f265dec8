use library_system::{
    models::{NewUser, Role},
    AppError,
};

use crate::common::setup;

#[tokio::test]
async fn test_root_is_hidden_from_user_listing() {
    let lib = setup().await;
    let root = lib.root().await;
    lib.reader("alice").await;
    lib.reader("bobby").await;

    let users = lib.services.users.list_users(&root).await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["alice", "bobby"]);

    let found = lib.services.users.search_users(&root, "ROO").await.unwrap();
    assert!(found.is_empty());
    let found = lib.services.users.search_users(&root, "bob").await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_admin_adds_and_removes_users() {
    let lib = setup().await;
    let root = lib.root().await;

    let created = lib
        .services
        .users
        .add_user(&root, NewUser::new("carol@example.org", "carol", "secret"))
        .await
        .unwrap();
    assert_eq!(created.role, Role::Normal);
    lib.services.auth.login("carol", "secret").await.unwrap();

    let err = lib
        .services
        .users
        .add_user(&root, NewUser::new("carol2@example.org", "car", "secret"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Username is too short!");

    lib.services.users.remove_user(&root, "carol").await.unwrap();
    assert!(!lib.repository.users.username_exists("carol").await.unwrap());
}

#[tokio::test]
async fn test_root_cannot_be_removed_or_demoted() {
    let lib = setup().await;
    let root = lib.root().await;
    let alice = lib.reader("alice").await;
    let alice = lib.services.users.promote(&root, &alice.username).await.unwrap();

    assert!(matches!(
        lib.services.users.remove_user(&alice, "root").await,
        Err(AppError::BusinessRule(_))
    ));
    assert!(matches!(
        lib.services.users.demote(&alice, "root").await,
        Err(AppError::BusinessRule(_))
    ));
    assert!(lib.root().await.is_admin());
}

#[tokio::test]
async fn test_readers_cannot_manage_users() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    lib.reader("bobby").await;

    assert!(matches!(
        lib.services.users.list_users(&alice).await,
        Err(AppError::Authorization(_))
    ));
    assert!(matches!(
        lib.services.users.promote(&alice, "bobby").await,
        Err(AppError::Authorization(_))
    ));
}

#[tokio::test]
async fn test_role_change_clears_relations() {
    let lib = setup().await;
    let root = lib.root().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 1).await;

    lib.services.loans.borrow(&alice, book.book_id).await.unwrap();
    lib.services.favourites.favourite(&alice, book.book_id).await.unwrap();

    let promoted = lib.services.users.promote(&root, "alice").await.unwrap();
    assert!(promoted.is_admin());
    let (demoted, demoted_self) = lib.services.users.demote(&root, "alice").await.unwrap();
    assert!(!demoted.is_admin());
    assert!(!demoted_self);

    assert_eq!(lib.borrow_count("alice").await, 0);
    assert_eq!(lib.favourite_count("alice").await, 0);
    assert_eq!(lib.services.catalog.get_book(book.book_id).await.unwrap().quantity, 1);
}

#[tokio::test]
async fn test_admin_demoting_themself_is_reported() {
    let lib = setup().await;
    let root = lib.root().await;
    lib.reader("alice").await;
    let alice = lib.services.users.promote(&root, "alice").await.unwrap();

    let (_, demoted_self) = lib.services.users.demote(&alice, "alice").await.unwrap();
    assert!(demoted_self);
    assert_eq!(lib.repository.users.get_by_username("alice").await.unwrap().role, Role::Normal);
}

#[tokio::test]
async fn test_admin_cannot_remove_themself_from_management() {
    let lib = setup().await;
    let root = lib.root().await;
    lib.reader("alice").await;
    let alice = lib.services.users.promote(&root, "alice").await.unwrap();

    assert!(matches!(
        lib.services.users.remove_user(&alice, "alice").await,
        Err(AppError::BusinessRule(_))
    ));
}
