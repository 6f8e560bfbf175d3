use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use filer_core::store::{StoreConfig, StoreFactory};
use filer_core::{StateStore, StoreError};

use crate::repository::SqliteStateStore;

/// Map a connection string to sqlx connect options.
///
/// * `":memory:"` becomes an in-memory database.
/// * Anything starting with `sqlite:` is taken as a sqlx URL.
/// * Otherwise it is a file path, created if missing.
fn connect_options(connection_string: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    match connection_string {
        ":memory:" => SqliteConnectOptions::from_str("sqlite::memory:"),
        url if url.starts_with("sqlite:") => SqliteConnectOptions::from_str(url),
        path => Ok(SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)),
    }
}

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`filer_core::store::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use filer_core::store::StoreRegistry;
/// use filer_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::with_builtin();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn StateStore>, StoreError> {
        let options = connect_options(&config.connection_string)
            .map_err(|e| StoreError::Configuration(e.to_string()))?;

        // Every connection to `:memory:` is a separate database.
        let max_connections = if config.connection_string == ":memory:" {
            1
        } else {
            4
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = SqliteStateStore::new_with_pool(pool);
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{e:#}")))?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use filer_core::store::{StoreConfig, StoreFactory};
    use pretty_assertions::assert_eq;

    use super::{SqliteStoreFactory, connect_options};

    fn config(connection_string: &str) -> StoreConfig {
        StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: connection_string.to_string(),
        }
    }

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    #[test]
    fn bare_path_is_created_if_missing() {
        let options = connect_options("filing.db").expect("Should parse");
        assert_eq!(options.get_filename().to_str(), Some("filing.db"));
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(connect_options("sqlite:filing.db?mode=bogus").is_err());
    }

    #[tokio::test]
    async fn creates_in_memory_store() {
        let store = SqliteStoreFactory
            .create(&config(":memory:"))
            .await
            .expect("failed to create in-memory store");

        store.write("filing_state", "{}").await.unwrap();
        assert_eq!(
            store.read("filing_state").await,
            Ok(Some("{}".to_string()))
        );
    }
}
