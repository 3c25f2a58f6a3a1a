//! Common test utilities: in-memory database and portal fixtures

#![allow(dead_code)]

use portal_store::config::DatabaseConfig;
use portal_store::infra::storage::db;
use portal_store::infra::storage::entity::{department, portal, user};
use portal_store::infra::storage::{DepartmentRepository, PortalRepository, UserRepository};
use portal_store::{CrudRepository, Fields};
use sea_orm::DatabaseConnection;
use serde_json::json;
use uuid::Uuid;

/// Fresh in-memory SQLite database with every migration applied
///
/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn setup_db() -> DatabaseConnection {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    db::connect(&cfg).await.unwrap()
}

/// Turn a `json!` object into a field mapping
pub fn fields(value: serde_json::Value) -> Fields {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

pub async fn seed_portal(db: &DatabaseConnection, name: &str) -> portal::Model {
    PortalRepository::new(db)
        .create(fields(json!({ "name": name })))
        .await
        .unwrap()
}

pub async fn seed_department(
    db: &DatabaseConnection,
    portal_id: Uuid,
    name: &str,
) -> department::Model {
    DepartmentRepository::new(db)
        .create(fields(json!({ "name": name, "portal_id": portal_id })))
        .await
        .unwrap()
}

pub async fn seed_user(db: &DatabaseConnection, email: &str) -> user::Model {
    UserRepository::new(db)
        .create(fields(json!({
            "first_name": "Ivan",
            "last_name": "Petrov",
            "email": email,
            "password": "$2b$12$hashhashhashhashhashha",
        })))
        .await
        .unwrap()
}

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}
