//! Database connection management

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::database::config::DatabaseConfig;
use crate::error::Error;

/// Wrapper around SeaORM's DatabaseConnection
///
/// Clonable and thread-safe; the store holds one and every request shares
/// the underlying pool.
#[derive(Clone)]
pub struct DbConnection {
    inner: Arc<DatabaseConnection>,
}

impl DbConnection {
    /// Create a new database connection from config
    ///
    /// Establishes a connection pool using the provided configuration. For
    /// file-backed SQLite databases the file is created if it doesn't exist.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, Error> {
        let url = if config.url.starts_with("sqlite://") {
            let path = config.url.trim_start_matches("sqlite://");
            let path = path.trim_start_matches("./");

            // In-memory databases need no file handling
            if path != ":memory:" && !path.starts_with(":memory:") {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent).ok();
                    }
                }

                if !std::path::Path::new(path).exists() {
                    std::fs::File::create(path).ok();
                }
            }

            format!("sqlite:{}?mode=rwc", path)
        } else {
            config.url.clone()
        };

        let mut opt = ConnectOptions::new(&url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .sqlx_logging(config.logging);

        let conn = Database::connect(opt)
            .await
            .map_err(|e| Error::database(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(conn),
        })
    }

    /// Get a reference to the underlying SeaORM connection
    pub fn inner(&self) -> &DatabaseConnection {
        &self.inner
    }
}

impl AsRef<DatabaseConnection> for DbConnection {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.inner
    }
}

impl std::ops::Deref for DbConnection {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
