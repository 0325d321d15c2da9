//! Accounts SDK
//!
//! Transport-agnostic contract of the accounts module:
//! - `User`, `Ownership`, `View`, `Group` - data models
//! - `UserField` - typed column selectors for partial updates
//! - `Expand` - eager-loading selector for single-user lookups
//! - `VisibilityReport` and friends - output of the visibility projection
//! - `AccountsError` - error types
//!
//! Storage, serialization and sanitization live in the `accounts` crate.

pub mod errors;
pub mod fields;
pub mod models;
pub mod visibility;

pub use errors::AccountsError;
pub use fields::UserField;
pub use models::{Expand, Group, Ownership, User, View};
pub use visibility::{
    CompanyBucket, Emphasis, GroupSection, MemberFlags, MemberLine, ViewSection,
    VisibilityReport,
};
