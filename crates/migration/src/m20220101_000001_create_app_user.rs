//! Create `app_user` table storing registered identities.
//!
//! `normalized_username` carries the unique constraint so that concurrent
//! registrations differing only in case collide at the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppUser::Table)
                    .if_not_exists()
                    .col(uuid(AppUser::Id).primary_key())
                    .col(string_len(AppUser::Username, 255).not_null())
                    .col(string_len(AppUser::NormalizedUsername, 255).unique_key().not_null())
                    .col(ColumnDef::new(AppUser::PasswordHash).binary().not_null())
                    .col(ColumnDef::new(AppUser::PasswordSalt).binary().not_null())
                    .col(timestamp_with_time_zone(AppUser::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AppUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AppUser { Table, Id, Username, NormalizedUsername, PasswordHash, PasswordSalt, CreatedAt }
