pub use sea_orm_migration::prelude::*;

mod m20210611_000001_create_tables;
mod m20210612_000001_unique_professor_account;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20210611_000001_create_tables::Migration),
            Box::new(m20210612_000001_unique_professor_account::Migration),
        ]
    }
}
