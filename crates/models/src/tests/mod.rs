//! Entity and connection tests against SQLite, so no external database is needed.

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::{db, errors::ModelError, section};

fn sqlite_config(url: String) -> DatabaseConfig {
    DatabaseConfig {
        url,
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 5,
        acquire_timeout_secs: 5,
        ..Default::default()
    }
}

async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let db = db::connect_with_config(&sqlite_config("sqlite::memory:".into())).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn upsert_creates_then_replaces() -> anyhow::Result<()> {
    let db = memory_db().await?;

    assert!(section::find_by_name(&db, "hero").await?.is_none());

    section::upsert(&db, "hero", &json!({"name": "Ada"})).await?;
    let first = section::find_by_name(&db, "hero").await?.expect("created");
    assert_eq!(first.value, Some(json!({"name": "Ada"})));

    section::upsert(&db, "hero", &json!({"roles": ["Engineer"]})).await?;
    let second = section::find_by_name(&db, "hero").await?.expect("still there");
    // wholesale replacement, same row
    assert_eq!(second.value, Some(json!({"roles": ["Engineer"]})));
    assert_eq!(second.id, first.id);

    assert_eq!(section::list(&db).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn list_is_ordered_by_name() -> anyhow::Result<()> {
    let db = memory_db().await?;
    for name in ["skills", "about", "hero"] {
        section::upsert(&db, name, &json!({})).await?;
    }
    let names: Vec<String> = section::list(&db).await?.into_iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["about", "hero", "skills"]);
    Ok(())
}

#[tokio::test]
async fn empty_name_rejected() -> anyhow::Result<()> {
    let db = memory_db().await?;
    let err = section::upsert(&db, "  ", &json!({})).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn manager_memoizes_connection() -> anyhow::Result<()> {
    let manager = db::ConnectionManager::new(sqlite_config("sqlite::memory:".into()));
    assert!(!manager.is_connected().await);
    let conn = manager.get_connection().await?;
    migration::Migrator::up(&conn, None).await?;
    section::upsert(&conn, "about", &json!({"title": "About"})).await?;

    // same pool: the table created above is visible through the second handle
    let again = manager.get_connection().await?;
    assert!(section::find_by_name(&again, "about").await?.is_some());
    assert!(manager.is_connected().await);

    manager.reset().await;
    assert!(!manager.is_connected().await);
    Ok(())
}

#[tokio::test]
async fn manager_retries_after_failed_attempt() -> anyhow::Result<()> {
    let root = std::env::temp_dir().join(format!("portfolio_conn_{}", uuid::Uuid::new_v4()));
    let db_path = root.join("nested").join("sections.db");
    let manager = db::ConnectionManager::new(sqlite_config(format!("sqlite://{}?mode=rwc", db_path.display())));

    // parent directory missing: SQLite cannot create the file
    let err = manager.get_connection().await.unwrap_err();
    match &err {
        ModelError::Connection { target, .. } => assert!(target.contains("sections.db")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_connection_failure());
    assert!(!manager.is_connected().await);

    tokio::fs::create_dir_all(db_path.parent().unwrap()).await?;
    manager.get_connection().await?;
    assert!(manager.is_connected().await);

    manager.reset().await;
    let _ = tokio::fs::remove_dir_all(&root).await;
    Ok(())
}
