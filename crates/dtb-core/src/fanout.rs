use crate::{
    classify::classify, domain::ChannelInfo, grouping::ChannelGroups, languages::LanguageTable,
};

/// Sibling channels that should receive a copy of a message posted in `source`.
///
/// Empty when the source carries no language or has no group. Members are
/// re-classified before being returned since the group was built in a separate
/// pass.
pub fn resolve_destinations(
    source: &ChannelInfo,
    groups: &ChannelGroups,
    languages: &LanguageTable,
) -> Vec<ChannelInfo> {
    let desc = classify(source, languages);
    if desc.language_code.is_none() {
        return Vec::new();
    }
    let Some(members) = groups.get(&desc.base_name) else {
        return Vec::new();
    };

    members
        .iter()
        .filter(|c| c.id != source.id)
        .filter(|c| classify(c, languages).language_code.is_some())
        .cloned()
        .collect()
}
