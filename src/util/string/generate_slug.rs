/// Lowercases ASCII letters and digits, joins words with hyphens and drops
/// everything else. May return an empty string for non-latin titles.
pub fn generate_slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::generate_slug;

    #[test]
    fn slugifies_words() {
        assert_eq!(generate_slug("Travel  Notes: Summer 2026!"), "travel-notes-summer-2026");
    }

    #[test]
    fn non_latin_title_yields_empty_slug() {
        assert_eq!(generate_slug("Путешествия"), "");
    }
}
