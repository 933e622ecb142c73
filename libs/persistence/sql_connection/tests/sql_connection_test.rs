use sql_connection::{Migration, SqlConnect};
use test_utils::TestPostgresContainer;

const MIGRATIONS: &[Migration] = &[
    (
        "001_create_widgets",
        "CREATE TABLE widgets (id SERIAL PRIMARY KEY, name TEXT NOT NULL);",
    ),
    (
        "002_seed_widgets",
        "INSERT INTO widgets (name) VALUES ('a'); INSERT INTO widgets (name) \
         VALUES ('b');",
    ),
];

#[tokio::test]
async fn test_sql_connect_clients_return_to_pool() {
    let container = TestPostgresContainer::new().await.unwrap();
    let db = SqlConnect::new(container.pool.clone());

    let client = db.get_client().await.unwrap();
    let value: i32 = client.query_one("SELECT 42", &[]).await.unwrap().get(0);
    assert_eq!(value, 42);
    drop(client);

    let (available, size) = db.get_pool_status();
    assert_eq!(size, 1);
    assert_eq!(available, 1);
}

#[tokio::test]
async fn test_migrations_apply_in_order() {
    let container = TestPostgresContainer::new().await.unwrap();
    let migrator = container.get_migrator();

    let applied = migrator.run_all_migrations(MIGRATIONS).await.unwrap();
    assert_eq!(applied, vec!["001_create_widgets", "002_seed_widgets"]);

    let listed = migrator.list_applied_migrations().await.unwrap();
    assert_eq!(listed, vec![
        "001_create_widgets".to_string(),
        "002_seed_widgets".to_string()
    ]);

    let client = container.pool.get().await.unwrap();
    let count: i64 = client
        .query_one("SELECT COUNT(*) FROM widgets", &[])
        .await
        .unwrap()
        .get(0);
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let container = TestPostgresContainer::new().await.unwrap();
    let migrator = container.get_migrator();

    migrator.run_all_migrations(MIGRATIONS).await.unwrap();
    let second = migrator.run_all_migrations(MIGRATIONS).await.unwrap();
    assert!(second.is_empty());

    let client = container.pool.get().await.unwrap();
    let count: i64 = client
        .query_one("SELECT COUNT(*) FROM widgets", &[])
        .await
        .unwrap()
        .get(0);
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_failed_migration_is_rolled_back() {
    let container = TestPostgresContainer::new().await.unwrap();
    let migrator = container.get_migrator();

    let broken: &[Migration] = &[(
        "001_broken",
        "CREATE TABLE half_done (id INT); SELECT * FROM missing_table;",
    )];

    let result = migrator.run_all_migrations(broken).await;
    assert!(result.is_err());

    let listed = migrator.list_applied_migrations().await.unwrap();
    assert!(listed.is_empty());

    let client = container.pool.get().await.unwrap();
    assert!(client.query("SELECT * FROM half_done", &[]).await.is_err());
}
