use library_system::{models::Score, AppError};

use crate::common::setup;

#[tokio::test]
async fn test_borrow_then_return_restores_quantity() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 2).await;

    let borrowed = lib.services.loans.borrow(&alice, book.book_id).await.unwrap();
    assert_eq!(borrowed.quantity, 1);
    assert!(lib.services.loans.is_borrowed(&alice, book.book_id).await.unwrap());

    let list = lib.services.loans.borrowed(&alice).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].book.book_id, book.book_id);

    let returned = lib.services.loans.return_book(&alice, book.book_id).await.unwrap();
    assert_eq!(returned.quantity, 2);
    assert_eq!(lib.borrow_count("alice").await, 0);
}

#[tokio::test]
async fn test_cannot_borrow_unavailable_book() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 0).await;

    let err = lib.services.loans.borrow(&alice, book.book_id).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
    assert_eq!(lib.borrow_count("alice").await, 0);
    assert_eq!(lib.services.catalog.get_book(book.book_id).await.unwrap().quantity, 0);
}

#[tokio::test]
async fn test_cannot_borrow_twice() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 5).await;

    lib.services.loans.borrow(&alice, book.book_id).await.unwrap();
    let err = lib.services.loans.borrow(&alice, book.book_id).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
    assert_eq!(lib.services.catalog.get_book(book.book_id).await.unwrap().quantity, 4);
}

#[tokio::test]
async fn test_return_without_borrow() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 1).await;

    let err = lib.services.loans.return_book(&alice, book.book_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(lib.services.catalog.get_book(book.book_id).await.unwrap().quantity, 1);
}

#[tokio::test]
async fn test_admins_cannot_borrow() {
    let lib = setup().await;
    let root = lib.root().await;
    let book = lib.add_book("Dune", "Herbert", 1).await;

    let err = lib.services.loans.borrow(&root, book.book_id).await.unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));
}

#[tokio::test]
async fn test_rating_updates_running_average() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 1).await;
    sqlx::query("UPDATE books SET rating = 3.0, raters = 2 WHERE book_id = ?")
        .bind(book.book_id)
        .execute(&lib.repository.pool)
        .await
        .unwrap();

    lib.services.loans.borrow(&alice, book.book_id).await.unwrap();
    let rated = lib
        .services
        .loans
        .rate(&alice, book.book_id, Score::new(5).unwrap())
        .await
        .unwrap();

    assert!((rated.rating - 11.0 / 3.0).abs() < 1e-9);
    assert_eq!(rated.raters, 3);
    assert_eq!(rated.rating_label(), "3.7 (3 ratings)");
}

#[tokio::test]
async fn test_rating_requires_borrow() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 1).await;

    let err = lib
        .services
        .loans
        .rate(&alice, book.book_id, Score::new(4).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
    assert_eq!(lib.services.catalog.get_book(book.book_id).await.unwrap().raters, 0);
}

#[tokio::test]
async fn test_favourites() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 1).await;
    let favourites = &lib.services.favourites;

    favourites.favourite(&alice, book.book_id).await.unwrap();
    assert!(favourites.is_favourite(&alice, book.book_id).await.unwrap());
    assert!(matches!(
        favourites.favourite(&alice, book.book_id).await,
        Err(AppError::Conflict(_))
    ));
    assert_eq!(favourites.favourites(&alice).await.unwrap().len(), 1);

    favourites.unfavourite(&alice, book.book_id).await.unwrap();
    assert!(favourites.favourites(&alice).await.unwrap().is_empty());
    assert!(matches!(
        favourites.unfavourite(&alice, book.book_id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(favourites.favourite(&alice, 999).await, Err(AppError::NotFound(_))));
}
