use std::collections::BTreeMap;

use crate::{
    classify::classify,
    domain::{ChannelId, ChannelInfo},
    languages::LanguageTable,
};

/// Language-participating channels bucketed by base name.
///
/// Rebuilt from a fresh channel listing for every inbound message. Buckets are
/// kept sorted by channel id so two builds over the same listing compare equal
/// regardless of the order the platform returned channels in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelGroups {
    groups: BTreeMap<String, Vec<ChannelInfo>>,
}

impl ChannelGroups {
    pub fn build(channels: &[ChannelInfo], languages: &LanguageTable) -> Self {
        let mut groups: BTreeMap<String, Vec<ChannelInfo>> = BTreeMap::new();
        for channel in channels {
            let desc = classify(channel, languages);
            if desc.language_code.is_none() {
                continue;
            }
            let bucket = groups.entry(desc.base_name).or_default();
            if !bucket.iter().any(|c| c.id == channel.id) {
                bucket.push(channel.clone());
            }
        }
        for bucket in groups.values_mut() {
            bucket.sort_by_key(|c| c.id);
        }
        Self { groups }
    }

    pub fn get(&self, base_name: &str) -> Option<&[ChannelInfo]> {
        self.groups.get(base_name).map(Vec::as_slice)
    }

    pub fn base_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Base name of the bucket holding `id`, if any.
    pub fn group_of(&self, id: ChannelId) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, members)| members.iter().any(|c| c.id == id))
            .map(|(base, _)| base.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<ChannelInfo> {
        vec![
            ChannelInfo::new(3, "news-de"),
            ChannelInfo::new(1, "news-en"),
            ChannelInfo::new(2, "news-fa"),
            ChannelInfo::new(4, "general"),
            ChannelInfo::new(5, "chat").with_parent(100, "English"),
            ChannelInfo::new(6, "chat").with_parent(101, "Dari"),
            ChannelInfo::new(7, "random-xx"),
        ]
    }

    #[test]
    fn groups_by_base_name_and_skips_uncoded() {
        let groups = ChannelGroups::build(&listing(), &LanguageTable::default());

        let names: Vec<_> = groups.base_names().collect();
        assert_eq!(names, vec!["chat", "news"]);

        let news: Vec<u64> = groups.get("news").unwrap().iter().map(|c| c.id.0).collect();
        assert_eq!(news, vec![1, 2, 3]);
        assert_eq!(groups.get("chat").unwrap().len(), 2);
        assert!(groups.get("general").is_none());
        assert!(groups.get("random-xx").is_none());
    }

    #[test]
    fn grouping_is_idempotent_and_order_independent() {
        let t = LanguageTable::default();
        let a = ChannelGroups::build(&listing(), &t);
        let b = ChannelGroups::build(&listing(), &t);
        assert_eq!(a, b);

        let mut reversed = listing();
        reversed.reverse();
        assert_eq!(a, ChannelGroups::build(&reversed, &t));
    }

    #[test]
    fn every_channel_lands_in_at_most_one_bucket() {
        let groups = ChannelGroups::build(&listing(), &LanguageTable::default());
        let total: usize = groups
            .base_names()
            .map(|b| groups.get(b).unwrap().len())
            .sum();
        assert_eq!(total, 5);
        assert_eq!(groups.group_of(ChannelId(6)), Some("chat"));
        assert_eq!(groups.group_of(ChannelId(4)), None);
    }

    #[test]
    fn empty_listing_gives_no_groups() {
        let groups = ChannelGroups::build(&[], &LanguageTable::default());
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
    }
}
