use sea_orm_migration::prelude::*;

mod m20240104_initial;
mod m20240210_seed_admin;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240104_initial::Migration),
            Box::new(m20240210_seed_admin::Migration),
        ]
    }
}
