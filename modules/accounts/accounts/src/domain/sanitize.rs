//! Normalization of untrusted user fields before any write.
//!
//! Every write path of the repositories runs `sanitize_user` right before the
//! statement is built. The pipeline never fails: malformed input degrades to an
//! empty or truncated string.

use std::collections::HashSet;

use accounts_sdk::User;

/// Strip all markup. Tags and attributes are removed, not escaped, and the
/// content of `script`/`style` elements is dropped entirely.
#[must_use]
pub fn sanitize_markup(input: &str) -> String {
    let mut builder = ammonia::Builder::empty();
    builder.clean_content_tags(HashSet::from(["script", "style"]));
    builder.clean(input).to_string()
}

#[must_use]
pub fn normalize_email(input: &str) -> String {
    sanitize_markup(input).to_lowercase()
}

#[must_use]
pub fn normalize_sso_id(input: &str) -> String {
    sanitize_markup(input).to_uppercase()
}

/// Upper-cased and truncated to a single character.
#[must_use]
pub fn normalize_gender(input: &str) -> String {
    sanitize_markup(input)
        .to_uppercase()
        .chars()
        .next()
        .map(String::from)
        .unwrap_or_default()
}

/// Rewrite the untrusted string fields of `user` in place.
pub fn sanitize_user(user: &mut User) {
    user.email = normalize_email(&user.email);
    user.sso_id = user.sso_id.as_deref().map(normalize_sso_id);
    user.name = sanitize_markup(&user.name);
    user.surname = sanitize_markup(&user.surname);
    user.gender = normalize_gender(&user.gender);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new("jane@example.com", "Acme", "Ops", "Jane", "Doe")
    }

    #[test]
    fn script_is_removed_with_its_content() {
        assert_eq!(sanitize_markup("<script>alert(1)</script>Jane"), "Jane");
    }

    #[test]
    fn tags_and_attributes_are_removed() {
        assert_eq!(sanitize_markup("<b>Jane</b>"), "Jane");
        assert_eq!(sanitize_markup("<img src=x onerror=alert(1)>Jane"), "Jane");
        assert_eq!(
            sanitize_markup(r#"<a href="javascript:alert(1)">Doe</a>"#),
            "Doe"
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(sanitize_markup("Jane"), "Jane");
        assert_eq!(sanitize_markup(""), "");
    }

    #[test]
    fn email_is_lower_cased() {
        assert_eq!(normalize_email("User@Example.COM"), "user@example.com");
    }

    #[test]
    fn sso_id_is_upper_cased() {
        assert_eq!(normalize_sso_id("abc-123"), "ABC-123");
    }

    #[test]
    fn gender_is_single_upper_case_char() {
        assert_eq!(normalize_gender("Diverse"), "D");
        assert_eq!(normalize_gender("m"), "M");
        assert_eq!(normalize_gender(""), "");
        assert_eq!(normalize_gender("<i></i>"), "");
    }

    #[test]
    fn gender_truncation_respects_char_boundaries() {
        assert_eq!(normalize_gender("\u{e9}l\u{e8}ve"), "\u{c9}");
    }

    #[test]
    fn sanitize_user_rewrites_in_place() {
        let mut u = user();
        u.email = "Jane.Doe@Example.COM".to_owned();
        u.sso_id = Some("<b>abc-123</b>".to_owned());
        u.name = "<script>alert(1)</script>Jane".to_owned();
        u.surname = "<em>Doe</em>".to_owned();
        u.gender = "female".to_owned();

        sanitize_user(&mut u);

        assert_eq!(u.email, "jane.doe@example.com");
        assert_eq!(u.sso_id.as_deref(), Some("ABC-123"));
        assert_eq!(u.name, "Jane");
        assert_eq!(u.surname, "Doe");
        assert_eq!(u.gender, "F");
    }

    #[test]
    fn absent_sso_id_stays_absent() {
        let mut u = user();
        sanitize_user(&mut u);
        assert!(u.sso_id.is_none());
    }

    #[test]
    fn untouched_fields_are_left_alone() {
        let mut u = user();
        u.company = "<b>Acme</b>".to_owned();
        u.department = "R&D".to_owned();
        sanitize_user(&mut u);
        assert_eq!(u.company, "<b>Acme</b>");
        assert_eq!(u.department, "R&D");
    }

    #[test]
    fn sanitizing_twice_is_idempotent() {
        let mut u = user();
        u.email = "Tom&Jerry@Example.com".to_owned();
        u.sso_id = Some("x<y".to_owned());
        u.name = "A & B <i>C</i>".to_owned();
        u.surname = "O'Brien".to_owned();
        u.gender = "diverse".to_owned();

        sanitize_user(&mut u);
        let snapshot = u.clone();
        sanitize_user(&mut u);

        assert_eq!(u, snapshot);
        assert_eq!(u.email, "tom&amp;jerry@example.com");
        assert_eq!(normalize_email(&u.email), u.email);
    }
}
