//! Creates the `users` table and the per-sport `user_level` table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::CityId).integer().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PhoneNumber).string())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Birthdate).date().not_null())
                    .col(ColumnDef::new(Users::ProfilePictureUrl).string())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_city")
                            .from(Users::Table, Users::CityId)
                            .to(City::Table, City::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserLevel::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserLevel::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserLevel::SportId).integer().not_null())
                    .col(ColumnDef::new(UserLevel::Level).small_integer().not_null())
                    .col(ColumnDef::new(UserLevel::Description).string())
                    .primary_key(
                        Index::create()
                            .col(UserLevel::UserId)
                            .col(UserLevel::SportId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_level_user")
                            .from(UserLevel::Table, UserLevel::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_level_sport")
                            .from(UserLevel::Table, UserLevel::SportId)
                            .to(Sport::Table, Sport::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLevel::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    CityId,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    PasswordHash,
    Birthdate,
    ProfilePictureUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserLevel {
    Table,
    UserId,
    SportId,
    Level,
    Description,
}

#[derive(DeriveIden)]
enum City {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Sport {
    Table,
    Id,
}
