use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatToys::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatToys::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CatToys::Name).string_len(100).not_null())
                    .col(ColumnDef::new(CatToys::Color).string_len(50).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatToys::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CatToys {
    Table,
    Id,
    Name,
    Color,
}
