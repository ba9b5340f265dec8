use library_system::session::SessionFile;

use crate::common::setup;

#[tokio::test]
async fn test_session_survives_restart() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;

    let token = lib.services.sessions.start(&alice).await.unwrap();
    let file = SessionFile::new(lib.config.session.file.clone());
    assert_eq!(file.read().await.unwrap().as_deref(), Some(token.as_str()));

    let restored = lib.services.sessions.restore().await.unwrap();
    assert_eq!(restored, Some(alice));
}

#[tokio::test]
async fn test_new_login_replaces_previous_token() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;

    let first = lib.services.sessions.start(&alice).await.unwrap();
    let second = lib.services.sessions.start(&alice).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(lib.repository.sessions.restore(&first).await.unwrap(), None);
    assert_eq!(
        lib.repository.sessions.token_for("alice").await.unwrap().as_deref(),
        Some(second.as_str())
    );
}

#[tokio::test]
async fn test_logout_forgets_session() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    lib.services.sessions.start(&alice).await.unwrap();

    lib.services.sessions.end(&alice).await.unwrap();

    assert_eq!(lib.services.sessions.restore().await.unwrap(), None);
    assert_eq!(lib.repository.sessions.token_for("alice").await.unwrap(), None);
}

#[tokio::test]
async fn test_discard_file_starts_fresh() {
    let lib = setup().await;
    let alice = lib.reader("alice").await;
    lib.services.sessions.start(&alice).await.unwrap();

    lib.services.sessions.discard_file().await.unwrap();

    assert_eq!(lib.services.sessions.restore().await.unwrap(), None);
    assert_eq!(lib.repository.sessions.token_for("alice").await.unwrap(), None);
}

#[tokio::test]
async fn test_unknown_token_restores_nothing() {
    let lib = setup().await;
    SessionFile::new(lib.config.session.file.clone())
        .write("not-a-token")
        .await
        .unwrap();

    assert_eq!(lib.services.sessions.restore().await.unwrap(), None);
}
