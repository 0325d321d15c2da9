//! Visibility projection of shared views.
//!
//! Turns views (with group and ownerships, each ownership carrying its user)
//! into the grouped, annotated structure consumed by presentation layers. The
//! projection performs no I/O and is deterministic for a given `now`.

use std::collections::BTreeMap;

use accounts_sdk::{
    CompanyBucket, GroupSection, MemberFlags, MemberLine, User, View, ViewSection,
    VisibilityReport,
};
use time::{Date, Month, OffsetDateTime};

/// Shown for groups without a loaded group or without a name.
pub const UNNAMED_GROUP: &str = "(unnamed group)";

/// Bucket key for users with an empty company.
pub const NO_COMPANY: &str = "(no company)";

/// Inactivity threshold in calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityPolicy {
    pub months: u8,
}

impl Default for InactivityPolicy {
    fn default() -> Self {
        Self { months: 6 }
    }
}

impl InactivityPolicy {
    /// Latest login instant that still counts as inactive at `now`.
    #[must_use]
    pub fn threshold(&self, now: OffsetDateTime) -> OffsetDateTime {
        subtract_months(now, self.months)
    }

    #[must_use]
    pub fn is_inactive(&self, user: &User, now: OffsetDateTime) -> bool {
        user.last_login <= self.threshold(now)
    }
}

/// Calendar month subtraction; the day is clamped to the length of the target month.
fn subtract_months(at: OffsetDateTime, months: u8) -> OffsetDateTime {
    let mut year = at.year();
    let mut month = at.month();
    for _ in 0..months {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    let day = at.day().min(month.length(year));
    Date::from_calendar_date(year, month, day)
        .map_or(OffsetDateTime::UNIX_EPOCH, |date| at.replace_date(date))
}

/// Project views into group sections with company-bucketed, flagged members.
#[must_use]
pub fn project_visibility(
    views: &[View],
    now: OffsetDateTime,
    policy: &InactivityPolicy,
) -> VisibilityReport {
    let threshold = policy.threshold(now);
    let mut groups: Vec<GroupSection> = Vec::new();
    let mut inactive: BTreeMap<i64, String> = BTreeMap::new();

    for view in views {
        let owner_id = view.group.as_ref().and_then(|g| g.owner_id);
        let mut buckets: BTreeMap<String, Vec<MemberLine>> = BTreeMap::new();

        for ownership in &view.ownerships {
            let Some(user) = ownership.user.as_ref() else {
                continue;
            };

            let flags = MemberFlags {
                inactive: user.last_login <= threshold,
                admin: user.admin,
                owner: owner_id == Some(user.id),
            };
            if flags.inactive {
                inactive.insert(user.id, user.display_name());
            }

            let company = if user.company.is_empty() {
                NO_COMPANY.to_owned()
            } else {
                user.company.clone()
            };
            buckets.entry(company).or_default().push(MemberLine {
                user_id: user.id,
                email: user.email.clone(),
                display_name: user.display_name(),
                flags,
            });
        }

        let section = ViewSection {
            view_id: view.id,
            name: view.name.clone(),
            filters: view.filters.clone(),
            companies: buckets
                .into_iter()
                .map(|(company, members)| CompanyBucket { company, members })
                .collect(),
        };

        let group_id = view.group.as_ref().map_or(view.group_id, |g| g.id);
        if let Some(existing) = groups.iter_mut().find(|g| g.group_id == group_id) {
            existing.views.push(section);
        } else {
            let name = view
                .group
                .as_ref()
                .and_then(|g| g.name.as_deref())
                .filter(|n| !n.is_empty())
                .unwrap_or(UNNAMED_GROUP);
            groups.push(GroupSection {
                group_id,
                name: name.to_owned(),
                views: vec![section],
            });
        }
    }

    let mut inactive_users: Vec<String> = inactive.into_values().collect();
    inactive_users.sort();

    VisibilityReport {
        groups,
        inactive_users,
    }
}
