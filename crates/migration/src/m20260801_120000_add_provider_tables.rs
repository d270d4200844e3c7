//! Migration to add the authorization provider tables.
//!
//! Creates tables for:
//! - auth_code: authorization-code grant records
//! - access_token: access-token grant records
//! - owner: principals on whose behalf grants are issued
//! - session: login sessions written by the external authentication surface

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Authorization codes
        manager
            .create_table(
                Table::create()
                    .table(AuthCode::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthCode::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AuthCode::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AuthCode::AppName).string().not_null())
                    .col(ColumnDef::new(AuthCode::Owner).string().not_null())
                    .col(
                        ColumnDef::new(AuthCode::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 2. Access tokens
        manager
            .create_table(
                Table::create()
                    .table(AccessToken::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessToken::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AccessToken::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AccessToken::AppName).string().not_null())
                    .col(ColumnDef::new(AccessToken::Owner).string().not_null())
                    .col(
                        ColumnDef::new(AccessToken::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 3. Owners
        manager
            .create_table(
                Table::create()
                    .table(Owner::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Owner::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Owner::Role).string().not_null())
                    .col(
                        ColumnDef::new(Owner::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Owner::DisplayName).string().null())
                    .col(
                        ColumnDef::new(Owner::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 4. Login sessions
        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Session::Token)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Session::Owner).string().not_null())
                    .col(ColumnDef::new(Session::Role).string().not_null())
                    .col(
                        ColumnDef::new(Session::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup indexes. Uniqueness on the token columns is part of the table
        // definitions above; these cover the reuse and audit lookups.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_auth_code_owner")
                    .table(AuthCode::Table)
                    .col(AuthCode::Owner)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_auth_code_app_name_owner")
                    .table(AuthCode::Table)
                    .col(AuthCode::AppName)
                    .col(AuthCode::Owner)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_access_token_owner")
                    .table(AccessToken::Table)
                    .col(AccessToken::Owner)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_access_token_app_name_owner")
                    .table(AccessToken::Table)
                    .col(AccessToken::AppName)
                    .col(AccessToken::Owner)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Session::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Owner::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccessToken::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuthCode::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuthCode {
    Table,
    Id,
    Token,
    AppName,
    Owner,
    IssuedAt,
}

#[derive(DeriveIden)]
enum AccessToken {
    Table,
    Id,
    Token,
    AppName,
    Owner,
    IssuedAt,
}

#[derive(DeriveIden)]
enum Owner {
    Table,
    Id,
    Role,
    Email,
    DisplayName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Session {
    Table,
    Token,
    Owner,
    Role,
    CreatedAt,
}
