pub use config::{DbConnectConfig, DbOptionsConfig, PostgresDbConfig};
pub use connect::SqlConnect;
pub use deadpool_postgres::PoolError;
pub use migrator::{Migration, MigrationError, SqlMigrator};
pub use pool::{build_pool, connect_postgres_db};
pub use tokio_postgres::Error as PgError;

pub mod config;
mod connect;
mod migrator;
mod pool;
