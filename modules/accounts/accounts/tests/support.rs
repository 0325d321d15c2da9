#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `accounts` integration tests.
//!
//! Provides an in-memory store with migrations applied and seeding helpers.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use accounts::config::DatabaseConfig;
use accounts::infra::storage::connect;
use accounts::{
    Group, SeaOrmUsersRepository, SeaOrmViewsRepository, User, UsersRepository, View,
    ViewsRepository,
};
use sea_orm::DatabaseConnection;

pub async fn inmem_db() -> DatabaseConnection {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".to_owned(),
        ..DatabaseConfig::default()
    };
    connect(&cfg)
        .await
        .expect("Failed to open in-memory database")
}

pub async fn repos() -> (SeaOrmUsersRepository, SeaOrmViewsRepository) {
    let db = inmem_db().await;
    (
        SeaOrmUsersRepository::new(db.clone()),
        SeaOrmViewsRepository::new(db),
    )
}

#[must_use]
pub fn new_user(email: &str, company: &str, name: &str) -> User {
    User::new(email, company, "", name, "Tester")
}

pub async fn seed_user(repo: &SeaOrmUsersRepository, email: &str, company: &str) -> User {
    let name = email.split('@').next().unwrap_or(email);
    let mut user = new_user(email, company, name);
    repo.create(&mut user).await.expect("Failed to seed user");
    user
}

pub async fn seed_view(
    repo: &SeaOrmViewsRepository,
    group_name: Option<&str>,
    owner_id: Option<i64>,
    view_name: &str,
) -> (Group, View) {
    let group = repo
        .create_group(group_name, owner_id)
        .await
        .expect("Failed to seed group");
    let view = repo
        .create_view(group.id, view_name, "10.0.0.0/8")
        .await
        .expect("Failed to seed view");
    (group, view)
}
