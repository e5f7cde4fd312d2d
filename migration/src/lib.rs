pub use sea_orm_migration::prelude::*;

mod m20240305_000001_create_cities;
mod m20240305_000002_create_points_of_interest;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240305_000001_create_cities::Migration),
            Box::new(m20240305_000002_create_points_of_interest::Migration),
        ]
    }
}
