use filer_core::store::{StoreConfig, StoreRegistry};
use filer_core::{FilingAction, FilingSession, StateStore};
use filer_db_sqlite::{SqliteStateStore, SqliteStoreFactory};
use pretty_assertions::assert_eq;

fn registry() -> StoreRegistry {
    let mut registry = StoreRegistry::with_builtin();
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

fn file_config(dir: &tempfile::TempDir) -> StoreConfig {
    StoreConfig {
        backend: "sqlite".to_string(),
        connection_string: dir.path().join("filing.db").display().to_string(),
    }
}

#[tokio::test]
async fn registry_exposes_sqlite_backend() {
    assert_eq!(registry().available_backends(), vec!["json", "memory", "sqlite"]);
}

#[tokio::test]
async fn values_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir);

    {
        let store = registry().create(&config).await.expect("should open");
        store.write("milestones", "[25]").await.unwrap();
    }

    let reopened = registry().create(&config).await.expect("should reopen");
    assert_eq!(
        reopened.read("milestones").await,
        Ok(Some("[25]".to_string()))
    );
}

#[tokio::test]
async fn session_progress_is_restored_from_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir);

    {
        let store = registry().create(&config).await.unwrap();
        let mut session = FilingSession::open(store).await;
        session.dispatch(FilingAction::CompleteSubStep).await.unwrap();
        session.dispatch(FilingAction::GoToNext).await.unwrap();
        assert!(session.is_persistent());
    }

    let store = registry().create(&config).await.unwrap();
    let session = FilingSession::open(store).await;

    assert_eq!(session.state().current_step_index(), 1);
    assert_eq!(session.state().current_sub_step_index(), 0);
    assert_eq!(session.state().completed_sub_steps(), 1);
    assert_eq!(session.storage_warning(), None);
}

#[tokio::test]
async fn connect_by_url_then_migrate() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}?mode=rwc", dir.path().join("url.db").display());

    let store = SqliteStateStore::new(&url).await.expect("should connect");
    store.run_migrations().await.expect("should migrate");

    store.write("filing_state", "{}").await.unwrap();
    assert_eq!(store.read("filing_state").await, Ok(Some("{}".to_string())));
}
