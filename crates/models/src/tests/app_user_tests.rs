use crate::app_user::{self, PASSWORD_HASH_LEN};
use crate::db::connect;
use crate::errors::ModelError;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use uuid::Uuid;

/// Connect and migrate, or `None` when no database is available.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

#[test]
fn rejects_wrong_hash_length() {
    let err = app_user::new_active_model("Bob", "bob", vec![0u8; 32], vec![1u8; 128]).unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
}

#[test]
fn rejects_empty_salt_and_username() {
    assert!(app_user::new_active_model("Bob", "bob", vec![0u8; PASSWORD_HASH_LEN], vec![]).is_err());
    assert!(app_user::new_active_model("", "", vec![0u8; PASSWORD_HASH_LEN], vec![1]).is_err());
}

#[test]
fn builds_row_with_original_casing() {
    let am = app_user::new_active_model("Bob", "bob", vec![7u8; PASSWORD_HASH_LEN], vec![9u8; 128]).unwrap();
    assert_eq!(am.username.clone().unwrap(), "Bob");
    assert_eq!(am.normalized_username.clone().unwrap(), "bob");
}

#[tokio::test]
async fn test_app_user_crud() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let name = format!("User_{}", Uuid::new_v4());
    let normalized = name.to_lowercase();
    let created = app_user::new_active_model(&name, &normalized, vec![3u8; PASSWORD_HASH_LEN], vec![4u8; 128])?
        .insert(&db)
        .await?;
    assert_eq!(created.username, name);

    let found = app_user::find_by_normalized_username(&db, &normalized).await?;
    assert_eq!(found.map(|m| m.id), Some(created.id));

    // unique index on normalized_username
    let dup = app_user::new_active_model(&name.to_uppercase(), &normalized, vec![5u8; PASSWORD_HASH_LEN], vec![6u8; 128])?
        .insert(&db)
        .await;
    assert!(dup.is_err());

    app_user::hard_delete(&db, created.id).await?;
    assert!(app_user::find_by_normalized_username(&db, &normalized).await?.is_none());
    Ok(())
}
