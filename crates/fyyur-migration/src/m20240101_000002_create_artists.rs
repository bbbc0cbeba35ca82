use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artists::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Artists::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Artists::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Artists::City).string_len(120).not_null())
                    .col(ColumnDef::new(Artists::State).string_len(120).not_null())
                    .col(ColumnDef::new(Artists::Phone).string_len(120).not_null())
                    .col(ColumnDef::new(Artists::Genres).json_binary().not_null())
                    .col(ColumnDef::new(Artists::ImageLink).string_len(500).null())
                    .col(ColumnDef::new(Artists::FacebookLink).string_len(120).null())
                    .col(ColumnDef::new(Artists::Website).text().null())
                    .col(
                        ColumnDef::new(Artists::SeekingVenue)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Artists::SeekingDescription).text().null())
                    .col(
                        ColumnDef::new(Artists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Artist names are unique
        manager
            .create_index(
                Index::create()
                    .name("idx_artists_name")
                    .table(Artists::Table)
                    .col(Artists::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Artists {
    Table,
    Id,
    Name,
    City,
    State,
    Phone,
    Genres,
    ImageLink,
    FacebookLink,
    Website,
    SeekingVenue,
    SeekingDescription,
    CreatedAt,
}
