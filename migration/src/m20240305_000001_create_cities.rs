use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(pk_auto(Cities::Id))
                    .col(string_len(Cities::Name, 50).not_null())
                    .col(string_len_null(Cities::Description, 200))
                    .to_owned(),
            )
            .await?;

        // Seed cities, ids 1 and 2 on a fresh database
        let insert = Query::insert()
            .into_table(Cities::Table)
            .columns([Cities::Name, Cities::Description])
            .values_panic([
                "Leeds".into(),
                "A city in the northern English county of Yorkshire".into(),
            ])
            .values_panic([
                "Sheffield".into(),
                "A city in the English county of South Yorkshire".into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Cities {
    Table,
    Id,
    Name,
    Description,
}
