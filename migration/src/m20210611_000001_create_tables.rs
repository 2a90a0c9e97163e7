use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 人员表（教授与学生共用，kind 区分）
        manager
            .create_table(
                Table::create()
                    .table(Persons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Persons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Persons::Kind).string().not_null())
                    .col(ColumnDef::new(Persons::FullName).string().not_null())
                    .col(ColumnDef::new(Persons::Ci).string().not_null().unique_key())
                    .col(ColumnDef::new(Persons::PhoneNumber).string().null())
                    .col(ColumnDef::new(Persons::Age).integer().not_null())
                    .col(ColumnDef::new(Persons::Nationality).string().null())
                    .col(ColumnDef::new(Persons::Residence).string().null())
                    .col(ColumnDef::new(Persons::Career).string().not_null())
                    .col(ColumnDef::new(Persons::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Salt).string().not_null())
                    .col(ColumnDef::new(Users::HashedPassword).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::ProfessorId).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::ProfessorId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 教研室表
        manager
            .create_table(
                Table::create()
                    .table(Cathedras::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cathedras::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Cathedras::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Cathedras::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Cathedras::Credits).integer().not_null())
                    .col(ColumnDef::new(Cathedras::Career).string().not_null())
                    .col(ColumnDef::new(Cathedras::CoordinatorId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cathedras::Table, Cathedras::CoordinatorId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 教研室分配表（不设唯一约束）
        manager
            .create_table(
                Table::create()
                    .table(CathedraAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CathedraAssignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CathedraAssignments::ProfessorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CathedraAssignments::CathedraId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CathedraAssignments::Table, CathedraAssignments::ProfessorId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CathedraAssignments::Table, CathedraAssignments::CathedraId)
                            .to(Cathedras::Table, Cathedras::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::StartDate).date().not_null())
                    .col(ColumnDef::new(Courses::EndDate).date().not_null())
                    .col(ColumnDef::new(Courses::Active).boolean().not_null())
                    .col(ColumnDef::new(Courses::CathedraId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::ProfessorId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::CathedraId)
                            .to(Cathedras::Table, Cathedras::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::ProfessorId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 选课表
        manager
            .create_table(
                Table::create()
                    .table(Inscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inscriptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Inscriptions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Inscriptions::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Inscriptions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Inscriptions::Table, Inscriptions::StudentId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Inscriptions::Table, Inscriptions::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考核表
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Evaluations::Name).string().not_null())
                    .col(ColumnDef::new(Evaluations::Percentage).integer().not_null())
                    .col(ColumnDef::new(Evaluations::CourseId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 成绩表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::Value).double().not_null())
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::EvaluationId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::InscriptionId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::InscriptionId)
                            .to(Inscriptions::Table, Inscriptions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_persons_kind")
                    .table(Persons::Table)
                    .col(Persons::Kind)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cathedra_assignments_cathedra_id")
                    .table(CathedraAssignments::Table)
                    .col(CathedraAssignments::CathedraId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_inscriptions_student_id")
                    .table(Inscriptions::Table)
                    .col(Inscriptions::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_inscription_id")
                    .table(Grades::Table)
                    .col(Grades::InscriptionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CathedraAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cathedras::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Persons::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Persons {
    #[sea_orm(iden = "persons")]
    Table,
    Id,
    Kind,
    FullName,
    Ci,
    PhoneNumber,
    Age,
    Nationality,
    Residence,
    Career,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    Salt,
    HashedPassword,
    Role,
    ProfessorId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Cathedras {
    #[sea_orm(iden = "cathedras")]
    Table,
    Id,
    Name,
    Code,
    Credits,
    Career,
    CoordinatorId,
}

#[derive(DeriveIden)]
enum CathedraAssignments {
    #[sea_orm(iden = "cathedra_assignments")]
    Table,
    Id,
    ProfessorId,
    CathedraId,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Title,
    Code,
    StartDate,
    EndDate,
    Active,
    CathedraId,
    ProfessorId,
}

#[derive(DeriveIden)]
enum Inscriptions {
    #[sea_orm(iden = "inscriptions")]
    Table,
    Id,
    StudentId,
    CourseId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Evaluations {
    #[sea_orm(iden = "evaluations")]
    Table,
    Id,
    Name,
    Percentage,
    CourseId,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    Value,
    StudentId,
    EvaluationId,
    InscriptionId,
}
