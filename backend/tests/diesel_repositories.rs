//! Integration tests for the Diesel repositories against a real SQLite file.
//!
//! Each test migrates a fresh database in a temporary directory, so tests
//! never share state.

#[path = "support/store.rs"]
mod store;

use contact_book::domain::ports::{ContactRepository, UserPersistenceError, UserRepository};
use contact_book::domain::{ContactDraft, ContactId, HashedPassword, NewUser, Username};
use contact_book::outbound::persistence::{
    DieselContactRepository, DieselUserRepository, run_pending_migrations,
};
use rstest::{fixture, rstest};
use store::TempStore;

#[fixture]
fn ada() -> ContactDraft {
    ContactDraft::try_new("Ada Lovelace", "555-0100", "ada@example.com").expect("valid draft")
}

#[fixture]
fn grace() -> ContactDraft {
    ContactDraft::try_new("Grace Hopper", "555-0199", "").expect("valid draft")
}

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: Username::new(name).expect("valid username"),
        password_hash: HashedPassword::new("$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA")
            .expect("valid hash"),
    }
}

#[rstest]
#[tokio::test]
async fn contacts_list_in_insertion_order(ada: ContactDraft, grace: ContactDraft) {
    let store = TempStore::new().await;
    let repo = DieselContactRepository::new(store.pool.clone());

    let first = repo.insert(&ada).await.expect("insert ada");
    let second = repo.insert(&grace).await.expect("insert grace");
    assert!(first.id() < second.id());

    let listed = repo.list().await.expect("list");
    assert_eq!(listed, vec![first, second.clone()]);
    assert_eq!(second.email(), None);
}

#[rstest]
#[tokio::test]
async fn update_overwrites_every_column(ada: ContactDraft) {
    let store = TempStore::new().await;
    let repo = DieselContactRepository::new(store.pool.clone());
    let created = repo.insert(&ada).await.expect("insert");

    let updated = repo
        .update(created.id(), &ContactDraft::overwrite("", "", ""))
        .await
        .expect("update")
        .expect("row exists");
    assert_eq!(updated.name(), "");
    assert_eq!(updated.email(), None);

    let fetched = repo
        .find_by_id(created.id())
        .await
        .expect("find")
        .expect("still present");
    assert_eq!(fetched, updated);
}

#[rstest]
#[tokio::test]
async fn missing_ids_report_absence(ada: ContactDraft) {
    let store = TempStore::new().await;
    let repo = DieselContactRepository::new(store.pool.clone());
    let missing = ContactId::new(404);

    assert!(repo.find_by_id(missing).await.expect("find").is_none());
    assert!(repo.update(missing, &ada).await.expect("update").is_none());
    assert!(!repo.delete(missing).await.expect("delete"));
}

#[rstest]
#[tokio::test]
async fn delete_removes_only_the_target(ada: ContactDraft, grace: ContactDraft) {
    let store = TempStore::new().await;
    let repo = DieselContactRepository::new(store.pool.clone());
    let first = repo.insert(&ada).await.expect("insert ada");
    let second = repo.insert(&grace).await.expect("insert grace");

    assert!(repo.delete(first.id()).await.expect("delete"));
    assert!(!repo.delete(first.id()).await.expect("second delete"));
    assert_eq!(repo.list().await.expect("list"), vec![second]);
}

#[rstest]
#[tokio::test]
async fn users_round_trip_and_reject_duplicates() {
    let store = TempStore::new().await;
    let repo = DieselUserRepository::new(store.pool.clone());

    let created = repo.insert(&new_user("admin")).await.expect("insert");
    let by_name = repo
        .find_by_username(created.username())
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(by_name, created);
    assert_eq!(
        repo.find_by_id(created.id()).await.expect("lookup by id"),
        Some(created)
    );

    let err = repo
        .insert(&new_user("admin"))
        .await
        .expect_err("duplicate rejected");
    assert!(matches!(err, UserPersistenceError::DuplicateUsername { .. }));
}

#[rstest]
#[tokio::test]
async fn migrations_are_idempotent() {
    let store = TempStore::new().await;
    let applied = run_pending_migrations(&store.database_url)
        .await
        .expect("rerun migrations");
    assert_eq!(applied, 0);
}
