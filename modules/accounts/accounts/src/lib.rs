//! Accounts Module
//!
//! Identity and access-scoping core: the canonical user account, the
//! sanitization applied to every persisted change, and the company-scoped
//! visibility projection of shared views.
//!
//! ## Public API
//!
//! Contract types come from the `accounts-sdk` crate and are re-exported here:
//! - `User`, `Ownership`, `View`, `Group` - data models
//! - `UserField`, `Expand` - partial-update and eager-loading selectors
//! - `AccountsError` - error types
//!
//! Storage is reached through the repository traits in `domain::repo`, backed
//! by the `SeaORM` implementations in `infra::storage`.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub use accounts_sdk::{
    AccountsError, CompanyBucket, Emphasis, Expand, Group, GroupSection, MemberFlags,
    MemberLine, Ownership, User, UserField, View, ViewSection, VisibilityReport,
};

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use config::AccountsConfig;
pub use domain::repo::{UsersRepository, ViewsRepository};
pub use domain::sanitize::sanitize_user;
pub use domain::visibility::{InactivityPolicy, project_visibility};
pub use infra::storage::{SeaOrmUsersRepository, SeaOrmViewsRepository};
