pub const TITLE_MAX_LEN: usize = 256;
pub const USER_NAME_MAX_LEN: usize = 150;
pub const SLUG_MAX_LEN: usize = 64;
const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 128;

/// Letters, digits and `@ . + - _`, like the usual web-framework user names.
pub fn validate_username(user_name: &str) -> bool {
    let len = user_name.chars().count();
    (1..=USER_NAME_MAX_LEN).contains(&len)
        && user_name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

pub fn validate_password_form(password: &str) -> bool {
    (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&password.chars().count())
}

pub fn validate_title(title: &str) -> bool {
    !title.trim().is_empty() && title.chars().count() <= TITLE_MAX_LEN
}

/// Latin letters, digits, hyphen and underscore.
pub fn validate_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= SLUG_MAX_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn validate_comment(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_names() {
        assert!(validate_username("leo.tolstoy+blog@ya"));
        assert!(validate_username("Анна_К"));
        assert!(!validate_username(""));
        assert!(!validate_username("has space"));
        assert!(!validate_username("slash/name"));
        assert!(!validate_username(&"a".repeat(151)));
    }

    #[test]
    fn passwords() {
        assert!(validate_password_form("12345678"));
        assert!(!validate_password_form("short"));
        assert!(!validate_password_form(&"x".repeat(129)));
    }

    #[test]
    fn titles() {
        assert!(validate_title("Hello"));
        assert!(validate_title(&"й".repeat(256)));
        assert!(!validate_title("   "));
        assert!(!validate_title(&"a".repeat(257)));
    }

    #[test]
    fn slugs() {
        assert!(validate_slug("travel_2026-notes"));
        assert!(!validate_slug("путешествия"));
        assert!(!validate_slug("with space"));
        assert!(!validate_slug(""));
    }

    #[test]
    fn comments() {
        assert!(validate_comment("Nice post"));
        assert!(!validate_comment(" \n\t"));
    }
}
