//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub code: String,
    pub start_date: Date,
    pub end_date: Date,
    pub active: bool,
    pub cathedra_id: i64,
    pub professor_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cathedras::Entity",
        from = "Column::CathedraId",
        to = "super::cathedras::Column::Id"
    )]
    Cathedra,
    #[sea_orm(
        belongs_to = "super::persons::Entity",
        from = "Column::ProfessorId",
        to = "super::persons::Column::Id"
    )]
    Professor,
    #[sea_orm(has_many = "super::inscriptions::Entity")]
    Inscriptions,
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
}

impl Related<super::cathedras::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cathedra.def()
    }
}

impl Related<super::persons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::inscriptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inscriptions.def()
    }
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::Course;

        Course {
            id: self.id,
            title: self.title,
            code: self.code,
            start_date: self.start_date,
            end_date: self.end_date,
            active: self.active,
            cathedra_id: self.cathedra_id,
            professor_id: self.professor_id,
        }
    }
}
