use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Cats::Table)
                    .col(Cats::UserId)
                    .name("idx_cats_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CatsCatToys::Table)
                    .col(CatsCatToys::CatToyId)
                    .name("idx_cats_cat_toys_cat_toy_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Sessions::Table)
                    .col(Sessions::UserId)
                    .name("idx_sessions_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_sessions_user_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cats_cat_toys_cat_toy_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cats_user_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cats {
    Table,
    UserId,
}

#[derive(Iden)]
enum CatsCatToys {
    Table,
    CatToyId,
}

#[derive(Iden)]
enum Sessions {
    Table,
    UserId,
}
