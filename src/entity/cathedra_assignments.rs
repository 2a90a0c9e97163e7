//! 教授-教研室分配实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cathedra_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub professor_id: i64,
    pub cathedra_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::persons::Entity",
        from = "Column::ProfessorId",
        to = "super::persons::Column::Id"
    )]
    Professor,
    #[sea_orm(
        belongs_to = "super::cathedras::Entity",
        from = "Column::CathedraId",
        to = "super::cathedras::Column::Id"
    )]
    Cathedra,
}

impl Related<super::persons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::cathedras::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cathedra.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
