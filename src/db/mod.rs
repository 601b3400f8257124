use crate::models::Location;
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SqliteTarget<'a> {
    Memory,
    File(&'a Path),
}

/// Resolves where a `sqlite:` URL points. Other backends (`postgres://`) get
/// `None` and are handed to the driver untouched.
fn sqlite_target(db_url: &str) -> Option<SqliteTarget<'_>> {
    let rest = db_url.strip_prefix("sqlite:")?;
    let path = rest.trim_start_matches("//");
    let path = path.split_once('?').map_or(path, |(path, _)| path);

    if path.starts_with(":memory:") {
        Some(SqliteTarget::Memory)
    } else {
        Some(SqliteTarget::File(Path::new(path)))
    }
}

/// Process-wide store handle. Cloning shares the underlying pool; there is no
/// per-request transaction scope.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let target = sqlite_target(db_url);

        if let Some(SqliteTarget::File(path)) = target {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !path.exists() {
                std::fs::File::create(path)?;
            }
        }

        // Every pooled connection to `sqlite::memory:` would be a separate
        // database, so in-memory stores are pinned to one connection.
        let (max_connections, min_connections) = if target == Some(SqliteTarget::Memory) {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    pub async fn find_location(&self, search_query: &str) -> Result<Option<Location>> {
        self.location_repo().find_by_query(search_query).await
    }

    pub async fn add_location(&self, location: &Location) -> Result<()> {
        self.location_repo().insert(location).await
    }

    pub async fn location_count(&self, search_query: &str) -> Result<u64> {
        self.location_repo().count_by_query(search_query).await
    }
}
