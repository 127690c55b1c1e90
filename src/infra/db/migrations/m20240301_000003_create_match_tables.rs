//! Creates the `matches`, `team` and `participation` tables.
//!
//! Deleting a match cascades to its teams and participations; deleting a
//! team only clears the `team_id` of its members.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Matches::OrganizerId).uuid().not_null())
                    .col(ColumnDef::new(Matches::SportId).integer().not_null())
                    .col(ColumnDef::new(Matches::Latitude).double().not_null())
                    .col(ColumnDef::new(Matches::Longitude).double().not_null())
                    .col(ColumnDef::new(Matches::MinPlayers).integer().not_null())
                    .col(ColumnDef::new(Matches::MaxPlayers).integer().not_null())
                    .col(
                        ColumnDef::new(Matches::Price)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::DurationMinutes).integer().not_null())
                    .col(
                        ColumnDef::new(Matches::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::Description).text())
                    .col(
                        ColumnDef::new(Matches::RecommendedLevel)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_organizer")
                            .from(Matches::Table, Matches::OrganizerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_sport")
                            .from(Matches::Table, Matches::SportId)
                            .to(Sport::Table, Sport::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matches_scheduled_at")
                    .table(Matches::Table)
                    .col(Matches::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Team::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Team::MatchId).uuid().not_null())
                    .col(ColumnDef::new(Team::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_match")
                            .from(Team::Table, Team::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_match_name")
                    .table(Team::Table)
                    .col(Team::MatchId)
                    .col(Team::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Participation::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Participation::UserId).uuid().not_null())
                    .col(ColumnDef::new(Participation::MatchId).uuid().not_null())
                    .col(ColumnDef::new(Participation::TeamId).uuid())
                    .col(
                        ColumnDef::new(Participation::Validated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Participation::Score).small_integer())
                    .col(
                        ColumnDef::new(Participation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Participation::UserId)
                            .col(Participation::MatchId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participation_user")
                            .from(Participation::Table, Participation::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participation_match")
                            .from(Participation::Table, Participation::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participation_team")
                            .from(Participation::Table, Participation::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Participation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Matches {
    Table,
    Id,
    OrganizerId,
    SportId,
    Latitude,
    Longitude,
    MinPlayers,
    MaxPlayers,
    Price,
    DurationMinutes,
    ScheduledAt,
    Description,
    RecommendedLevel,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Team {
    Table,
    Id,
    MatchId,
    Name,
}

#[derive(DeriveIden)]
enum Participation {
    Table,
    UserId,
    MatchId,
    TeamId,
    Validated,
    Score,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Sport {
    Table,
    Id,
}
