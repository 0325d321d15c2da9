//! Infrastructure storage layer - database persistence.
//!
//! ## Architecture
//!
//! This module contains ALL SeaORM-specific code and database operations:
//! - `entity/` - SeaORM entity definitions (users, groups, views, ownerships)
//! - `mapper.rs` - Conversions between SeaORM models and SDK contract types
//! - `migrations/` - Database schema migrations
//! - `db.rs` - Connection setup and `DbErr` conversion
//!
//! ## Layering Rules
//!
//! The infrastructure layer:
//! - **Contains**: ALL SeaORM imports and database-specific code
//! - **Uses**: `accounts_sdk` contract types as the domain model
//! - **Implements**: the repository ports of `domain::repo`

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
mod users_sea_repo;
mod views_sea_repo;

pub use db::{connect, migrate};
pub use migrations::Migrator;
pub use users_sea_repo::SeaOrmUsersRepository;
pub use views_sea_repo::SeaOrmViewsRepository;
