//! Creates the reference catalog tables (`city`, `sport`) and seeds the
//! supported sports with their default roster bounds.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(City::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(City::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(City::Name).string().not_null())
                    .col(ColumnDef::new(City::PostalCode).string().not_null())
                    .col(ColumnDef::new(City::DepartmentName).string().not_null())
                    .col(ColumnDef::new(City::DepartmentCode).string().not_null())
                    .col(ColumnDef::new(City::RegionName).string().not_null())
                    .col(ColumnDef::new(City::RegionCode).string().not_null())
                    .col(ColumnDef::new(City::Latitude).double().not_null())
                    .col(ColumnDef::new(City::Longitude).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_city_name")
                    .table(City::Table)
                    .col(City::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sport::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sport::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sport::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Sport::DefaultMinPlayers).integer().not_null())
                    .col(ColumnDef::new(Sport::DefaultMaxPlayers).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Seed the supported sports. Clients rely on these identifiers
        // being assigned in insertion order.
        let seed = Query::insert()
            .into_table(Sport::Table)
            .columns([Sport::Name, Sport::DefaultMinPlayers, Sport::DefaultMaxPlayers])
            .values_panic(["football".into(), 10.into(), 22.into()])
            .values_panic(["basketball".into(), 14.into(), 20.into()])
            .values_panic(["ping_pong".into(), 10.into(), 20.into()])
            .values_panic(["badminton".into(), 10.into(), 20.into()])
            .values_panic(["volleyball".into(), 12.into(), 16.into()])
            .values_panic(["rugby".into(), 20.into(), 30.into()])
            .to_owned();
        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sport::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(City::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum City {
    Table,
    Id,
    Name,
    PostalCode,
    DepartmentName,
    DepartmentCode,
    RegionName,
    RegionCode,
    Latitude,
    Longitude,
}

#[derive(DeriveIden)]
enum Sport {
    Table,
    Id,
    Name,
    DefaultMinPlayers,
    DefaultMaxPlayers,
}
