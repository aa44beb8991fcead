use crate::languages::LanguageTable;

/// Extra guidance appended when translating *from* a given language.
fn source_guidance(source_code: &str) -> &'static [&'static str] {
    match source_code {
        "fa" => &[
            "Do not translate compound words or phrases individually; always consider the overall context of the sentence.",
            "If the user says \"درست است\", assume that means \"OK\" rather than \"That is correct\" unless the context clearly says otherwise.",
        ],
        _ => &[],
    }
}

/// System prompt for one source → target translation conversation.
pub fn translation_system_prompt(
    languages: &LanguageTable,
    source_code: &str,
    target_code: &str,
) -> String {
    let source = languages.display_name(source_code);
    let target = languages.display_name(target_code);

    let mut lines = vec![
        format!(
            "Translate every message the user sends from {source} to {target}. Reply with the translation only and nothing else, since your reply is posted as-is."
        ),
        "If something is wrapped in brackets like [this], do not change or translate it. Leave it where it appeared, in the original language and text direction.".to_string(),
    ];
    lines.extend(source_guidance(source_code).iter().map(|s| s.to_string()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_both_languages() {
        let p = translation_system_prompt(&LanguageTable::default(), "en", "de");
        assert!(p.contains("from English to German"));
        assert!(p.contains("[this]"));
        assert!(!p.contains("درست است"));
    }

    #[test]
    fn dari_source_gets_extra_rules() {
        let p = translation_system_prompt(&LanguageTable::default(), "fa", "en");
        assert!(p.contains("from Dari to English"));
        assert!(p.contains("compound words"));
        assert!(p.contains("درست است"));
    }

    #[test]
    fn unnamed_codes_fall_back_to_the_code() {
        let t = LanguageTable::new(vec!["en".to_string(), "fr".to_string()], vec![]);
        let p = translation_system_prompt(&t, "en", "fr");
        assert!(p.contains("from en to fr"));
    }
}
