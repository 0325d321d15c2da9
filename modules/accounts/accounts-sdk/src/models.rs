//! Public models for the accounts module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the accounts module and its consumers.

use std::fmt;

use time::OffsetDateTime;

/// A tenant-scoped user account.
///
/// `id == 0` means the user has not been persisted yet.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// Login and notification address; stored lower-case, globally unique.
    pub email: String,
    /// Password hash for users not logging in via SSO.
    pub password: Option<String>,
    /// SSO correlation id; stored upper-case, unique when present.
    pub sso_id: Option<String>,
    /// Users of the same company may see each other in shared contexts.
    pub company: String,
    pub department: String,
    pub created: OffsetDateTime,
    /// Advanced by the authentication collaborator on every successful login.
    pub last_login: OffsetDateTime,
    /// Incremented on logout to invalidate previously issued session tokens.
    pub logout_count: i64,
    pub active: bool,
    pub admin: bool,
    pub name: String,
    pub surname: String,
    /// Single upper-case character or empty.
    pub gender: String,
    /// Public key used to send encrypted messages to the user.
    pub certificate: Vec<u8>,
    /// Hash of the generated database-view credential.
    pub db_password_hash: String,
    /// Loaded only by expanded single-user lookups.
    pub ownerships: Vec<Ownership>,
}

impl User {
    /// Build a not-yet-persisted user with default status.
    ///
    /// An empty `company` falls back to the e-mail address so users never end
    /// up sharing a company bucket without an explicit assignment.
    #[must_use]
    pub fn new(email: &str, company: &str, department: &str, name: &str, surname: &str) -> Self {
        let company = if company.is_empty() { email } else { company };

        Self {
            id: 0,
            email: email.to_owned(),
            password: None,
            sso_id: None,
            company: company.to_owned(),
            department: department.to_owned(),
            created: OffsetDateTime::now_utc(),
            last_login: OffsetDateTime::UNIX_EPOCH,
            logout_count: 0,
            active: true,
            admin: false,
            name: name.to_owned(),
            surname: surname.to_owned(),
            gender: String::new(),
            certificate: Vec::new(),
            db_password_hash: String::new(),
            ownerships: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// "Name Surname", as shown in listings and advisories.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_owned()
    }
}

// Secrets stay out of debug output and therefore out of logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("company", &self.company)
            .field("department", &self.department)
            .field("created", &self.created)
            .field("last_login", &self.last_login)
            .field("active", &self.active)
            .field("admin", &self.admin)
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("gender", &self.gender)
            .field("ownerships", &self.ownerships)
            .finish_non_exhaustive()
    }
}

/// Join record granting a user access to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownership {
    pub id: i64,
    pub user_id: i64,
    pub view_id: i64,
    /// Present when the ownership was loaded from the view side.
    pub user: Option<User>,
    /// Present when the ownership was loaded from the user side with expansion.
    pub view: Option<View>,
}

/// A shared, named resource scoped to a scan target set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
    /// Opaque filter criteria of the view.
    pub filters: String,
    pub group: Option<Group>,
    pub ownerships: Vec<Ownership>,
}

/// Organizational scope a view belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub name: Option<String>,
    /// User owning the scope, if any.
    pub owner_id: Option<i64>,
}

/// Eager-loading selector for single-user lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expand {
    #[default]
    None,
    /// Load ownership records.
    Ownerships,
    /// Load ownership records, each with its view and the view's group.
    OwnershipsWithGroups,
}

impl Expand {
    #[must_use]
    pub fn ownerships(self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub fn groups(self) -> bool {
        matches!(self, Self::OwnershipsWithGroups)
    }
}
