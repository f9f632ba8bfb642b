use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cat_toys")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cats_cat_toys::Entity")]
    CatsCatToys,
}

impl Related<super::cats::Entity> for Entity {
    fn to() -> RelationDef {
        super::cats_cat_toys::Relation::Cat.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::cats_cat_toys::Relation::CatToy.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
