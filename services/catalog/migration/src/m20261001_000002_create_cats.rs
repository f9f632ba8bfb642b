use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cats::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cats::UserId).integer().not_null())
                    .col(ColumnDef::new(Cats::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Cats::Breed).string_len(100).not_null())
                    .col(ColumnDef::new(Cats::Description).string_len(250).not_null())
                    .col(ColumnDef::new(Cats::Age).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cats::Table, Cats::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cats::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cats {
    Table,
    Id,
    UserId,
    Name,
    Breed,
    Description,
    Age,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
