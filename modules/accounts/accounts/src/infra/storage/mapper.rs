//! Conversions between `SeaORM` models and contract types.
//!
//! Relations are never filled here; the repositories attach them per `Expand`.

use accounts_sdk::{Group, Ownership, User, View};

use crate::infra::storage::entity::{group, ownership, user, view};

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            password: m.password,
            sso_id: m.sso_id,
            company: m.company,
            department: m.department,
            created: m.created,
            last_login: m.last_login,
            logout_count: m.logout_count,
            active: m.active,
            admin: m.admin,
            name: m.name,
            surname: m.surname,
            gender: m.gender,
            certificate: m.certificate,
            db_password_hash: m.db_password,
            ownerships: Vec::new(),
        }
    }
}

impl From<group::Model> for Group {
    fn from(m: group::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            owner_id: m.owner_id,
        }
    }
}

impl From<view::Model> for View {
    fn from(m: view::Model) -> Self {
        Self {
            id: m.id,
            group_id: m.group_id,
            name: m.name,
            filters: m.filters,
            group: None,
            ownerships: Vec::new(),
        }
    }
}

impl From<ownership::Model> for Ownership {
    fn from(m: ownership::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            view_id: m.view_id,
            user: None,
            view: None,
        }
    }
}
