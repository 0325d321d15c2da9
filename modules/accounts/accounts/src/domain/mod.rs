//! Domain layer - sanitization, repository ports and the visibility projection.
//!
//! The domain layer:
//! - **MAY** import: `accounts_sdk` (contract types)
//! - **MUST NOT** import: `infra::*` or `api::*`

pub mod repo;
pub mod sanitize;
pub mod visibility;
