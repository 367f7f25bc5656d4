use sea_orm_migration::prelude::*;

mod m20260101_create_catalog;
mod m20260102_catalog_unique_pairs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_create_catalog::Migration),
            Box::new(m20260102_catalog_unique_pairs::Migration),
        ]
    }
}
