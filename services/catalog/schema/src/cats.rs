use sea_orm::entity::prelude::*;

/// A cat in the catalog, owned by exactly one user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::cats_cat_toys::Entity")]
    CatsCatToys,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::cat_toys::Entity> for Entity {
    fn to() -> RelationDef {
        super::cats_cat_toys::Relation::CatToy.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::cats_cat_toys::Relation::Cat.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
