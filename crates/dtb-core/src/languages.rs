/// Recognized language codes plus the ordered full-name → code mapping.
///
/// The order of `names` is part of the contract: category-name inference takes
/// the first entry whose name appears in the category, so "Persian Spoken"
/// and similar overlaps resolve by list position, not by match length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageTable {
    codes: Vec<String>,
    names: Vec<(String, String)>,
}

pub const DEFAULT_CODES: &[&str] = &["en", "fa", "de", "fr", "es"];

pub const DEFAULT_NAMES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Dari", "fa"),
    ("Persian", "fa"),
    ("Farsi", "fa"),
    ("German", "de"),
    ("Deutsch", "de"),
    ("French", "fr"),
    ("Français", "fr"),
    ("Spanish", "es"),
    ("Español", "es"),
];

impl Default for LanguageTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_CODES.iter().map(|c| c.to_string()).collect(),
            DEFAULT_NAMES
                .iter()
                .map(|(n, c)| (n.to_string(), c.to_string()))
                .collect(),
        )
    }
}

impl LanguageTable {
    /// Name entries pointing at codes outside `codes` are dropped.
    pub fn new(codes: Vec<String>, names: Vec<(String, String)>) -> Self {
        let names = names
            .into_iter()
            .filter(|(name, code)| !name.trim().is_empty() && codes.contains(code))
            .collect();
        Self { codes, names }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Ordered `(full name, code)` pairs.
    pub fn names(&self) -> &[(String, String)] {
        &self.names
    }

    /// First mapped code whose full name is a case-insensitive substring of `text`.
    pub fn find_name_in(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.names
            .iter()
            .find(|(name, _)| haystack.contains(&name.to_lowercase()))
            .map(|(_, code)| code.as_str())
    }

    /// Human-readable name for prompts: the first full name listed for `code`,
    /// or the bare code when none is configured.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.names
            .iter()
            .find(|(_, c)| c == code)
            .map(|(name, _)| name.as_str())
            .unwrap_or(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_knows_the_five_codes() {
        let t = LanguageTable::default();
        for code in ["en", "fa", "de", "fr", "es"] {
            assert!(t.contains(code), "{code}");
        }
        assert!(!t.contains("it"));
    }

    #[test]
    fn display_name_uses_first_listed_name() {
        let t = LanguageTable::default();
        assert_eq!(t.display_name("fa"), "Dari");
        assert_eq!(t.display_name("de"), "German");

        let bare = LanguageTable::new(vec!["en".to_string()], vec![]);
        assert_eq!(bare.display_name("en"), "en");
    }

    #[test]
    fn name_lookup_is_case_insensitive_and_ordered() {
        let t = LanguageTable::new(
            vec!["en".to_string(), "fa".to_string()],
            vec![
                ("Farsi".to_string(), "fa".to_string()),
                ("English".to_string(), "en".to_string()),
            ],
        );
        assert_eq!(t.find_name_in("ENGLISH channels"), Some("en"));
        // Both names present: list order decides.
        assert_eq!(t.find_name_in("English / Farsi"), Some("fa"));
        assert_eq!(t.find_name_in("Voice"), None);
    }

    #[test]
    fn names_for_unknown_codes_are_dropped() {
        let t = LanguageTable::new(
            vec!["en".to_string()],
            vec![
                ("Italian".to_string(), "it".to_string()),
                ("English".to_string(), "en".to_string()),
            ],
        );
        assert_eq!(t.names().len(), 1);
        assert_eq!(t.find_name_in("italian"), None);
    }
}
