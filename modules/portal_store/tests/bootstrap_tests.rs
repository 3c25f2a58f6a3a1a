//! Connection bootstrap and migration bookkeeping

use portal_store::config::DatabaseConfig;
use portal_store::infra::storage::db;
use portal_store::infra::storage::migrations::Migrator;
use portal_store::infra::storage::PortalRepository;
use portal_store::{CrudRepository, Filters};
use sea_orm_migration::MigratorTrait;

mod common;
use common::{print_test_header, seed_portal, setup_db};

fn single_connection() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    }
}

#[tokio::test]
async fn connect_applies_every_migration() {
    print_test_header(
        "connect_applies_every_migration",
        "A fresh database records each migration under its own name",
    );
    let db = setup_db().await;

    let applied = Migrator::get_applied_migrations(&db).await.unwrap();
    let pending = Migrator::get_pending_migrations(&db).await.unwrap();

    assert_eq!(applied.len(), Migrator::migrations().len());
    assert!(pending.is_empty());
}

#[tokio::test]
async fn migrate_again_is_a_no_op() {
    let db = setup_db().await;
    seed_portal(&db, "Head Office").await;

    db::migrate(&db).await.unwrap();

    let portals = PortalRepository::new(&db);
    assert_eq!(portals.count(Filters::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn connect_without_migrations_leaves_schema_pending() {
    let cfg = DatabaseConfig {
        run_migrations: false,
        ..single_connection()
    };
    let db = db::connect(&cfg).await.unwrap();

    let pending = Migrator::get_pending_migrations(&db).await.unwrap();
    assert_eq!(pending.len(), Migrator::migrations().len());

    db::migrate(&db).await.unwrap();
    assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
}
