//! 预导入模块，方便使用

pub use super::cathedra_assignments::{
    ActiveModel as CathedraAssignmentActiveModel, Entity as CathedraAssignments,
    Model as CathedraAssignmentModel,
};
pub use super::cathedras::{
    ActiveModel as CathedraActiveModel, Entity as Cathedras, Model as CathedraModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::inscriptions::{
    ActiveModel as InscriptionActiveModel, Entity as Inscriptions, Model as InscriptionModel,
};
pub use super::persons::{ActiveModel as PersonActiveModel, Entity as Persons, Model as PersonModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
