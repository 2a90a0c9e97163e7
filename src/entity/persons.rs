//! 人员实体
//!
//! 教授与学生共用同一张表，通过 `kind` 列区分。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "persons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub kind: String,
    pub full_name: String,
    #[sea_orm(unique)]
    pub ci: String,
    pub phone_number: Option<String>,
    pub age: i32,
    pub nationality: Option<String>,
    pub residence: Option<String>,
    pub career: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,
    #[sea_orm(has_many = "super::cathedra_assignments::Entity")]
    CathedraAssignments,
    #[sea_orm(has_many = "super::inscriptions::Entity")]
    Inscriptions,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
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

impl Related<super::inscriptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inscriptions.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_person(self) -> crate::models::persons::entities::Person {
        use crate::models::persons::entities::{Career, Person, PersonKind, PersonalData};
        use chrono::{DateTime, Utc};

        Person {
            id: self.id,
            kind: self
                .kind
                .parse::<PersonKind>()
                .unwrap_or(PersonKind::Student),
            data: PersonalData {
                full_name: self.full_name,
                ci: self.ci,
                phone_number: self.phone_number,
                age: self.age,
                nationality: self.nationality,
                residence: self.residence,
                career: self.career.parse::<Career>().unwrap_or(Career::Fisica),
            },
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
