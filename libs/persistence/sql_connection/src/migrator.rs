use deadpool_postgres::Pool;
use thiserror::Error;
use tracing::info;

/// A named, embedded SQL migration
pub type Migration = (&'static str, &'static str);

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),
    #[error("Connection error: {0}")]
    Connection(#[from] deadpool_postgres::PoolError),
    #[error("Migration {name} failed: {source}")]
    Failed {
        name: &'static str,
        source: tokio_postgres::Error,
    },
}

/// SQL-based migration system using plain .sql files
pub struct SqlMigrator {
    pool: Pool,
}

impl SqlMigrator {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    /// Run pending migrations in order, each inside its own transaction.
    /// Returns the names of the migrations applied by this call.
    pub async fn run_all_migrations(
        &self, migrations: &[Migration],
    ) -> Result<Vec<&'static str>, MigrationError> {
        self.create_migration_table().await?;

        let mut applied = Vec::new();
        for &(name, sql) in migrations {
            if self.is_migration_applied(name).await? {
                info!("Migration {} already applied, skipping", name);
                continue;
            }

            info!("Running migration: {}", name);
            let mut client = self.pool.get().await?;
            let tx = client.transaction().await?;
            tx.batch_execute(sql)
                .await
                .map_err(|source| MigrationError::Failed { name, source })?;
            tx.execute(
                "INSERT INTO _migrations (name, applied_at) VALUES ($1, NOW())",
                &[&name],
            )
            .await?;
            tx.commit().await?;

            info!("Migration {} completed successfully", name);
            applied.push(name);
        }

        Ok(applied)
    }

    async fn create_migration_table(&self) -> Result<(), MigrationError> {
        let client = self.pool.get().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS _migrations (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR(255) NOT NULL UNIQUE,
                    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
            )
            .await?;
        Ok(())
    }

    async fn is_migration_applied(
        &self, name: &str,
    ) -> Result<bool, MigrationError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one("SELECT COUNT(*) FROM _migrations WHERE name = $1", &[
                &name,
            ])
            .await?;
        let count: i64 = row.get(0);
        Ok(count > 0)
    }

    /// List applied migrations in the order they ran
    pub async fn list_applied_migrations(
        &self,
    ) -> Result<Vec<String>, MigrationError> {
        self.create_migration_table().await?;

        let client = self.pool.get().await?;
        let rows = client
            .query("SELECT name FROM _migrations ORDER BY id", &[])
            .await?;

        Ok(rows.into_iter().map(|row| row.get(0)).collect())
    }
}
