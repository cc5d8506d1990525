//! Database schema for the Zerone backend.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_tables;
mod m20240215_000001_comments_and_user_deletion;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_tables::Migration),
            Box::new(m20240215_000001_comments_and_user_deletion::Migration),
        ]
    }
}
