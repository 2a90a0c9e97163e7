//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub value: f64,
    pub student_id: i64,
    pub evaluation_id: i64,
    pub inscription_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::persons::Entity",
        from = "Column::StudentId",
        to = "super::persons::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::evaluations::Entity",
        from = "Column::EvaluationId",
        to = "super::evaluations::Column::Id"
    )]
    Evaluation,
    #[sea_orm(
        belongs_to = "super::inscriptions::Entity",
        from = "Column::InscriptionId",
        to = "super::inscriptions::Column::Id"
    )]
    Inscription,
}

impl Related<super::persons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl Related<super::inscriptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inscription.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> crate::models::enrollments::entities::Grade {
        crate::models::enrollments::entities::Grade {
            id: self.id,
            value: self.value,
            student_id: self.student_id,
            evaluation_id: self.evaluation_id,
            inscription_id: self.inscription_id,
        }
    }
}
