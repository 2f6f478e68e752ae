pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_accounts;
mod m20250301_000002_create_academics;
mod m20250301_000003_create_content;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_accounts::Migration),
            Box::new(m20250301_000002_create_academics::Migration),
            Box::new(m20250301_000003_create_content::Migration),
        ]
    }
}
