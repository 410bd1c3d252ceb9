use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait};

use models::app_user;

use crate::auth::domain::Identity;
use crate::auth::errors::AuthError;
use crate::auth::repository::{CreateOutcome, UserStore};

pub struct SeaOrmUserStore {
    pub db: DatabaseConnection,
}

impl SeaOrmUserStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl UserStore for SeaOrmUserStore {
    async fn find_by_username(&self, normalized_username: &str) -> Result<Option<Identity>, AuthError> {
        let res = app_user::find_by_normalized_username(&self.db, normalized_username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| Identity { username: u.username, password_hash: u.password_hash, password_salt: u.password_salt }))
    }

    /// `INSERT .. ON CONFLICT (normalized_username) DO NOTHING`; zero rows
    /// written means another registration got there first.
    async fn create_if_absent(&self, identity: &Identity) -> Result<CreateOutcome, AuthError> {
        let am = app_user::new_active_model(
            &identity.username,
            &identity.normalized_username(),
            identity.password_hash.clone(),
            identity.password_salt.clone(),
        )
        .map_err(|e| AuthError::Repository(e.to_string()))?;

        let inserted = app_user::Entity::insert(am)
            .on_conflict(
                OnConflict::column(app_user::Column::NormalizedUsername)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;

        Ok(if inserted == 0 { CreateOutcome::Conflict } else { CreateOutcome::Created })
    }
}
