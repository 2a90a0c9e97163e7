//! 教研室实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cathedras")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub credits: i32,
    pub career: String,
    pub coordinator_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::persons::Entity",
        from = "Column::CoordinatorId",
        to = "super::persons::Column::Id"
    )]
    Coordinator,
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,
    #[sea_orm(has_many = "super::cathedra_assignments::Entity")]
    CathedraAssignments,
}

impl Related<super::persons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coordinator.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl Related<super::cathedra_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CathedraAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_cathedra(self) -> crate::models::cathedras::entities::Cathedra {
        use crate::models::cathedras::entities::Cathedra;
        use crate::models::persons::entities::Career;

        Cathedra {
            id: self.id,
            name: self.name,
            code: self.code,
            credits: self.credits,
            career: self.career.parse::<Career>().unwrap_or(Career::Fisica),
            coordinator_id: self.coordinator_id,
        }
    }
}
