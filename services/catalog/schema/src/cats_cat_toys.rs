use sea_orm::entity::prelude::*;

/// Membership of a toy in a cat's toy set. One row per (cat, toy) pair.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cats_cat_toys")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub cat_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub cat_toy_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cats::Entity",
        from = "Column::CatId",
        to = "super::cats::Column::Id",
        on_delete = "Cascade"
    )]
    Cat,
    #[sea_orm(
        belongs_to = "super::cat_toys::Entity",
        from = "Column::CatToyId",
        to = "super::cat_toys::Column::Id",
        on_delete = "Cascade"
    )]
    CatToy,
}

impl Related<super::cats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cat.def()
    }
}

impl Related<super::cat_toys::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatToy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
