//! Plain-text rendering of the visibility report.

use std::fmt::Write;

use accounts::{Emphasis, InactivityPolicy, MemberLine, VisibilityReport};

fn marker(line: &MemberLine) -> &'static str {
    match line.emphasis() {
        Emphasis::Inactive => "!",
        Emphasis::Admin => "*",
        Emphasis::Owner => "+",
        Emphasis::Member => " ",
    }
}

/// Render groups, views and company buckets followed by the single
/// inactivity advisory.
pub fn render(report: &VisibilityReport, policy: &InactivityPolicy) -> String {
    let mut out = String::new();

    for group in &report.groups {
        let _ = writeln!(out, "{}", group.name);
        for view in &group.views {
            let _ = writeln!(out, "  {} [{}]", view.name, view.filters);
            for bucket in &view.companies {
                let _ = writeln!(out, "    {}", bucket.company);
                for member in &bucket.members {
                    let _ = writeln!(
                        out,
                        "    {} {} <{}>",
                        marker(member),
                        member.display_name,
                        member.email
                    );
                }
            }
        }
    }

    if report.has_inactive_users() {
        let _ = writeln!(
            out,
            "\nNo login for {} months or more: {}",
            policy.months,
            report.inactive_users.join(", ")
        );
    }
    out
}
