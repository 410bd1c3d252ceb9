use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryFilter, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Length of a stored HMAC-SHA-512 password digest.
pub const PASSWORD_HASH_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    #[sea_orm(unique)]
    pub normalized_username: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Build an insertable row. Hash and salt must already be computed; this
/// layer never sees plaintext.
pub fn new_active_model(
    username: &str,
    normalized_username: &str,
    password_hash: Vec<u8>,
    password_salt: Vec<u8>,
) -> Result<ActiveModel, ModelError> {
    if normalized_username.is_empty() {
        return Err(ModelError::Validation("username required".into()));
    }
    if password_hash.len() != PASSWORD_HASH_LEN {
        return Err(ModelError::Validation(format!("password hash must be {PASSWORD_HASH_LEN} bytes")));
    }
    if password_salt.is_empty() {
        return Err(ModelError::Validation("password salt required".into()));
    }
    Ok(ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        normalized_username: Set(normalized_username.to_string()),
        password_hash: Set(password_hash),
        password_salt: Set(password_salt),
        created_at: Set(Utc::now().into()),
    })
}

pub async fn find_by_normalized_username(db: &DatabaseConnection, normalized_username: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::NormalizedUsername.eq(normalized_username))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
