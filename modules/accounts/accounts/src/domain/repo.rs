use accounts_sdk::{AccountsError, Expand, Group, User, UserField, View};
use async_trait::async_trait;

/// Port for user persistence.
///
/// Every write runs the sanitization pipeline before the statement is built.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert a new user and write the store-assigned id back into it.
    ///
    /// # Errors
    /// `InvalidEntity` if the user already has an id, `Conflict` on a
    /// duplicate email or SSO id, `Storage` for any other store fault.
    async fn create(&self, user: &mut User) -> Result<(), AccountsError>;

    /// Persist exactly the masked columns of an existing user.
    ///
    /// Returns the number of affected rows. An empty mask writes nothing and
    /// returns 0; a zero count for a non-empty mask means the row is gone.
    ///
    /// # Errors
    /// `InvalidEntity` if the user has no id, `Conflict` on a duplicate
    /// email or SSO id, `Storage` for any other store fault.
    async fn save(&self, user: &mut User, fields: &[UserField]) -> Result<u64, AccountsError>;

    /// Hard delete by id. Ownerships follow the store's cascade rules.
    ///
    /// # Errors
    /// `InvalidEntity` if the user has no id, `Storage` on store faults.
    async fn delete(&self, user: &User) -> Result<(), AccountsError>;

    /// Every user, ordered by id.
    ///
    /// # Errors
    /// `Storage` on store faults.
    async fn get_all(&self) -> Result<Vec<User>, AccountsError>;

    /// Users with the admin flag, ordered by id.
    ///
    /// # Errors
    /// `Storage` on store faults.
    async fn get_administrators(&self) -> Result<Vec<User>, AccountsError>;

    /// # Errors
    /// `Storage` on store faults.
    async fn get_by_id(&self, id: i64, expand: Expand) -> Result<Option<User>, AccountsError>;

    /// Lookup by e-mail; the input is lower-cased first.
    ///
    /// # Errors
    /// `Storage` on store faults.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AccountsError>;
}

/// Port for the view side of ownership: read path for the visibility
/// projection plus the minimal writers needed to populate it.
#[async_trait]
pub trait ViewsRepository: Send + Sync {
    /// Every view with its group and ownerships, each ownership carrying its
    /// user. Ordered by group id then view id; ownerships by id.
    ///
    /// # Errors
    /// `Storage` on store faults.
    async fn list_with_access(&self) -> Result<Vec<View>, AccountsError>;

    /// # Errors
    /// `Storage` on store faults.
    async fn create_group(
        &self,
        name: Option<&str>,
        owner_id: Option<i64>,
    ) -> Result<Group, AccountsError>;

    /// # Errors
    /// `Storage` on store faults, including an unknown group id.
    async fn create_view(
        &self,
        group_id: i64,
        name: &str,
        filters: &str,
    ) -> Result<View, AccountsError>;

    /// Record that `user_id` may access `view_id`. Returns the ownership id.
    ///
    /// # Errors
    /// `Conflict` if the grant already exists, `Storage` otherwise.
    async fn grant(&self, user_id: i64, view_id: i64) -> Result<i64, AccountsError>;
}
