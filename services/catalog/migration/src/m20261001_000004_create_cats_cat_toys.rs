use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatsCatToys::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CatsCatToys::CatId).integer().not_null())
                    .col(ColumnDef::new(CatsCatToys::CatToyId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CatsCatToys::CatId)
                            .col(CatsCatToys::CatToyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CatsCatToys::Table, CatsCatToys::CatId)
                            .to(Cats::Table, Cats::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CatsCatToys::Table, CatsCatToys::CatToyId)
                            .to(CatToys::Table, CatToys::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatsCatToys::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CatsCatToys {
    Table,
    CatId,
    CatToyId,
}

#[derive(Iden)]
enum Cats {
    Table,
    Id,
}

#[derive(Iden)]
enum CatToys {
    Table,
    Id,
}
