//! Channel classification: name + parent category → base topic, language, spoken flag.

use std::sync::OnceLock;

use regex::Regex;

use crate::{domain::ChannelInfo, languages::LanguageTable};

const SPOKEN_SUFFIX: &str = "-s";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelDescriptor {
    pub base_name: String,
    /// `None` means the channel does not take part in translation.
    pub language_code: Option<String>,
    pub is_spoken: bool,
}

fn channel_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*?)(?:-([a-z]{2})(?:-(s))?)?$").expect("valid regex"))
}

/// Classify a channel. Never fails.
///
/// Precedence: a code in the channel name itself, then a category named
/// exactly like a code, then the first configured language name found in the
/// category name.
pub fn classify(channel: &ChannelInfo, languages: &LanguageTable) -> ChannelDescriptor {
    let mut is_spoken = false;
    let mut name = channel.name.as_str();
    if let Some(stripped) = name.strip_suffix(SPOKEN_SUFFIX) {
        is_spoken = true;
        name = stripped;
    }

    let parent = channel.parent_name();
    if let Some(p) = parent {
        if !is_spoken && p.to_lowercase().contains("spoken") {
            is_spoken = true;
        }
    }

    if let Some((base, code)) = split_coded_name(name) {
        if languages.contains(code) {
            return ChannelDescriptor {
                base_name: base.trim_end_matches('-').to_string(),
                language_code: Some(code.to_string()),
                is_spoken,
            };
        }
    }

    let from_parent = parent.and_then(|p| {
        if languages.contains(p) {
            Some(p)
        } else {
            languages.find_name_in(p)
        }
    });

    ChannelDescriptor {
        base_name: channel.name.clone(),
        language_code: from_parent.map(str::to_string),
        is_spoken,
    }
}

/// Convenience for callers that only need the code.
pub fn language_code(channel: &ChannelInfo, languages: &LanguageTable) -> Option<String> {
    classify(channel, languages).language_code
}

fn split_coded_name(name: &str) -> Option<(&str, &str)> {
    let caps = channel_name_re().captures(name)?;
    let code = caps.get(2)?.as_str();
    let base = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    Some((base, code))
}
