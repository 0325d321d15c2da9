use std::fmt;

/// Typed column selector for partial user updates.
///
/// `id` and `created` are not selectable: both are fixed once the row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Email,
    Password,
    SsoId,
    Company,
    Department,
    LastLogin,
    LogoutCount,
    Active,
    Admin,
    Name,
    Surname,
    Gender,
    Certificate,
    DbPasswordHash,
}

impl UserField {
    pub const ALL: [UserField; 14] = [
        Self::Email,
        Self::Password,
        Self::SsoId,
        Self::Company,
        Self::Department,
        Self::LastLogin,
        Self::LogoutCount,
        Self::Active,
        Self::Admin,
        Self::Name,
        Self::Surname,
        Self::Gender,
        Self::Certificate,
        Self::DbPasswordHash,
    ];

    /// Name of the persisted column.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::SsoId => "sso_id",
            Self::Company => "company",
            Self::Department => "department",
            Self::LastLogin => "last_login",
            Self::LogoutCount => "logout_count",
            Self::Active => "active",
            Self::Admin => "admin",
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Gender => "gender",
            Self::Certificate => "certificate",
            Self::DbPasswordHash => "db_password",
        }
    }

    /// Whether the sanitization pipeline rewrites this field before a write.
    #[must_use]
    pub const fn is_sanitized(self) -> bool {
        matches!(
            self,
            Self::Email | Self::SsoId | Self::Name | Self::Surname | Self::Gender
        )
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn column_names_are_unique() {
        let names: HashSet<&str> = UserField::ALL.iter().map(|f| f.column_name()).collect();
        assert_eq!(names.len(), UserField::ALL.len());
    }

    #[test]
    fn identity_columns_are_not_selectable() {
        assert!(
            UserField::ALL
                .iter()
                .all(|f| f.column_name() != "id" && f.column_name() != "created")
        );
    }

    #[test]
    fn sanitized_fields_are_the_free_text_identity_fields() {
        let sanitized: Vec<UserField> = UserField::ALL
            .into_iter()
            .filter(|f| f.is_sanitized())
            .collect();
        assert_eq!(
            sanitized,
            vec![
                UserField::Email,
                UserField::SsoId,
                UserField::Name,
                UserField::Surname,
                UserField::Gender
            ]
        );
    }

    #[test]
    fn display_uses_column_name() {
        assert_eq!(UserField::DbPasswordHash.to_string(), "db_password");
        assert_eq!(UserField::LastLogin.to_string(), "last_login");
    }
}
