use sea_orm_migration::{prelude::*, schema::*};

use super::m20240305_000001_create_cities::Cities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PointsOfInterest::Table)
                    .if_not_exists()
                    .col(pk_auto(PointsOfInterest::Id))
                    .col(integer(PointsOfInterest::CityId).not_null())
                    .col(string_len(PointsOfInterest::Name, 50).not_null().default(""))
                    .col(string_len_null(PointsOfInterest::Description, 200))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_points_of_interest_city")
                            .from(PointsOfInterest::Table, PointsOfInterest::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_points_of_interest_city_id")
                    .table(PointsOfInterest::Table)
                    .col(PointsOfInterest::CityId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed two points of interest per seeded city
        let insert = Query::insert()
            .into_table(PointsOfInterest::Table)
            .columns([
                PointsOfInterest::CityId,
                PointsOfInterest::Name,
                PointsOfInterest::Description,
            ])
            .values_panic([
                1i32.into(),
                "Kirkstall Abbey".into(),
                "A ruined Cistercian monastery".into(),
            ])
            .values_panic([
                1i32.into(),
                "Kirkgate Market".into(),
                "One of the largest indoor markets in Europe".into(),
            ])
            .values_panic([
                2i32.into(),
                "Botanical Gardens".into(),
                "Expansive 19th-century gardens".into(),
            ])
            .values_panic([
                2i32.into(),
                "Kelham Island Museum".into(),
                "Museum of Sheffield's industrial history".into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PointsOfInterest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PointsOfInterest {
    Table,
    Id,
    CityId,
    Name,
    Description,
}
