//! Output of the visibility projection.
//!
//! A presentation-ready grouping of views by scope group, with each view's
//! users bucketed by company and annotated with display flags.

/// Styling emphasis of a member line. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Emphasis {
    /// No login for at least the inactivity threshold. Overrides everything else.
    Inactive,
    Admin,
    Owner,
    Member,
}

/// Independent flags of a (view, user) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberFlags {
    pub inactive: bool,
    pub admin: bool,
    pub owner: bool,
}

impl MemberFlags {
    #[must_use]
    pub fn emphasis(self) -> Emphasis {
        if self.inactive {
            Emphasis::Inactive
        } else if self.admin {
            Emphasis::Admin
        } else if self.owner {
            Emphasis::Owner
        } else {
            Emphasis::Member
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberLine {
    pub user_id: i64,
    pub email: String,
    pub display_name: String,
    pub flags: MemberFlags,
}

impl MemberLine {
    #[must_use]
    pub fn emphasis(&self) -> Emphasis {
        self.flags.emphasis()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyBucket {
    pub company: String,
    pub members: Vec<MemberLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSection {
    pub view_id: i64,
    pub name: String,
    pub filters: String,
    pub companies: Vec<CompanyBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSection {
    pub group_id: i64,
    pub name: String,
    pub views: Vec<ViewSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityReport {
    pub groups: Vec<GroupSection>,
    /// Display names of users with access but inactive past the threshold, sorted.
    pub inactive_users: Vec<String>,
}

impl VisibilityReport {
    #[must_use]
    pub fn has_inactive_users(&self) -> bool {
        !self.inactive_users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_overrides_admin_and_owner() {
        let flags = MemberFlags {
            inactive: true,
            admin: true,
            owner: true,
        };
        assert_eq!(flags.emphasis(), Emphasis::Inactive);
    }

    #[test]
    fn admin_and_owner_differ_from_member() {
        let admin = MemberFlags {
            admin: true,
            ..MemberFlags::default()
        };
        let owner = MemberFlags {
            owner: true,
            ..MemberFlags::default()
        };
        assert_eq!(admin.emphasis(), Emphasis::Admin);
        assert_eq!(owner.emphasis(), Emphasis::Owner);
        assert_eq!(MemberFlags::default().emphasis(), Emphasis::Member);
    }
}
