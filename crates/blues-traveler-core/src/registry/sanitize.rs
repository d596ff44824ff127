/// Maximum length, in characters, of a project slug.
pub const MAX_SLUG_LEN: usize = 200;

/// Turn an absolute project path into a filesystem-safe file stem.
///
/// Path separators, colons, spaces and `~` become `-`, runs of `-` collapse to
/// one, leading and trailing `-` are trimmed, and the result is cut to
/// [`MAX_SLUG_LEN`] characters.
pub fn sanitize_project_path(path: &str) -> String {
    let mut slug = String::with_capacity(path.len());

    for c in path.chars() {
        let c = match c {
            '/' | '\\' | ':' | ' ' | '~' => '-',
            other => other,
        };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        return "root".to_string();
    }

    trimmed.chars().take(MAX_SLUG_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_separators_and_colons() {
        assert_eq!(
            sanitize_project_path("/Users/user/dev:special/project"),
            "Users-user-dev-special-project"
        );
    }

    #[test]
    fn test_sanitize_collapses_and_trims() {
        assert_eq!(
            sanitize_project_path("~/my projects//--app/"),
            "my-projects-app"
        );
        assert_eq!(
            sanitize_project_path(r"C:\Users\me\code"),
            "C-Users-me-code"
        );
    }

    #[test]
    fn test_sanitize_truncates_to_limit() {
        let long = format!("/{}", "a".repeat(300));
        let slug = sanitize_project_path(&long);
        assert_eq!(slug.chars().count(), MAX_SLUG_LEN);

        let exact = format!("/{}", "b".repeat(MAX_SLUG_LEN));
        assert_eq!(sanitize_project_path(&exact).len(), MAX_SLUG_LEN);
    }

    #[test]
    fn test_sanitize_counts_characters_not_bytes() {
        let long = format!("/{}", "é".repeat(250));
        let slug = sanitize_project_path(&long);
        assert_eq!(slug.chars().count(), MAX_SLUG_LEN);
    }

    #[test]
    fn test_sanitize_root_path() {
        assert_eq!(sanitize_project_path("/"), "root");
    }
}
