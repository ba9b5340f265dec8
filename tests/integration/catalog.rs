use library_system::{models::BookForm, AppError};

use crate::common::setup;

fn form(title: &str, author: &str, quantity: &str) -> BookForm {
    BookForm {
        title: title.to_string(),
        author: author.to_string(),
        quantity: quantity.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_add_book_with_optional_fields() {
    let lib = setup().await;
    let root = lib.root().await;

    let mut input = form("  Dune ", "Frank Herbert", "3");
    input.pub_year = "1965".to_string();
    input.publisher = "Chilton".to_string();

    let book = lib.services.catalog.add_book(&root, &input).await.unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.quantity, 3);
    assert_eq!(book.pub_year, Some(1965));
    assert_eq!(book.publisher.as_deref(), Some("Chilton"));
    assert_eq!(book.edition, None);
    assert_eq!(book.rating, 0.0);
    assert_eq!(book.raters, 0);
}

#[tokio::test]
async fn test_add_book_validation_messages() {
    let lib = setup().await;
    let root = lib.root().await;
    let catalog = &lib.services.catalog;

    let cases = [
        (form("", "Herbert", "1"), "Title is required"),
        (form("Dune", "", "1"), "Author name is required"),
        (form("Dune", "Herbert", ""), "Quantity is required"),
        (form("Dune", "Herbert", "two"), "Invalid quantity input"),
    ];
    for (input, expected) in cases {
        let err = catalog.add_book(&root, &input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == expected), "{:?}", err);
    }

    let mut bad_year = form("Dune", "Herbert", "1");
    bad_year.pub_year = "19x5".to_string();
    let err = catalog.add_book(&root, &bad_year).await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid publication year");

    assert!(catalog.list_books().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_readers_cannot_edit_catalog() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 1).await;

    let err = lib.services.catalog.add_book(&alice, &form("X", "Y", "1")).await.unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));
    assert!(lib.services.catalog.remove_book(&alice, book.book_id).await.is_err());
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let lib = setup().await;
    lib.add_book("Lord of the Rings", "Tolkien", 1).await;
    lib.add_book("Dune", "Herbert", 1).await;
    lib.add_book("100% Python", "Someone", 1).await;

    let found = lib.services.catalog.search_books("tol").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Lord of the Rings");

    let by_title = lib.services.catalog.search_books("DUNE").await.unwrap();
    assert_eq!(by_title.len(), 1);

    let literal_percent = lib.services.catalog.search_books("0%").await.unwrap();
    assert_eq!(literal_percent.len(), 1);

    assert_eq!(lib.services.catalog.search_books("").await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_keeps_rating() {
    let lib = setup().await;
    let root = lib.root().await;
    let book = lib.add_book("Dune", "Herbert", 1).await;
    sqlx::query("UPDATE books SET rating = 4.5, raters = 2 WHERE book_id = ?")
        .bind(book.book_id)
        .execute(&lib.repository.pool)
        .await
        .unwrap();

    let mut input = form("Dune Messiah", "Herbert", "4");
    input.edition = "2".to_string();
    let updated = lib.services.catalog.update_book(&root, book.book_id, &input).await.unwrap();

    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.quantity, 4);
    assert_eq!(updated.edition, Some(2));
    assert_eq!(updated.rating, 4.5);
    assert_eq!(updated.raters, 2);
}

#[tokio::test]
async fn test_remove_book_drops_relations() {
    let lib = setup().await;
    let root = lib.root().await;
    let alice = lib.reader("alice").await;
    let book = lib.add_book("Dune", "Herbert", 1).await;
    lib.services.loans.borrow(&alice, book.book_id).await.unwrap();
    lib.services.favourites.favourite(&alice, book.book_id).await.unwrap();

    lib.services.catalog.remove_book(&root, book.book_id).await.unwrap();

    assert!(matches!(
        lib.services.catalog.get_book(book.book_id).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(lib.borrow_count("alice").await, 0);
    assert_eq!(lib.favourite_count("alice").await, 0);
}
