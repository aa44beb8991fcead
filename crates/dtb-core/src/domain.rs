//! Narrow views of platform entities.
//!
//! Only the fields the relay actually reads are modelled here; the Discord
//! adapter converts its own types into these.

/// Discord guild (server) id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuildId(pub u64);

/// Discord channel id (text channels and categories share the id space).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u64);

/// Parent category of a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryInfo {
    pub id: ChannelId,
    /// `None` when the adapter could not resolve the category.
    pub name: Option<String>,
}

/// A text channel as seen at listing time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub name: String,
    pub parent: Option<CategoryInfo>,
}

impl ChannelInfo {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ChannelId(id),
            name: name.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, id: u64, name: impl Into<String>) -> Self {
        self.parent = Some(CategoryInfo {
            id: ChannelId(id),
            name: Some(name.into()),
        });
        self
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_ref().and_then(|p| p.name.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
    pub username: String,
    /// Guild nickname, if the member has one.
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub is_bot: bool,
}

impl Author {
    /// Nickname if set, otherwise the account username.
    pub fn display_name(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nick) if !nick.trim().is_empty() => nick,
            _ => &self.username,
        }
    }
}

/// File attached to a message; forwarded by reference, never downloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachmentRef {
    pub filename: String,
    pub url: String,
}

/// Inbound guild message.
#[derive(Clone, Debug)]
pub struct IncomingMessage {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub author: Author,
    pub content: String,
    pub attachments: Vec<AttachmentRef>,
}

impl IncomingMessage {
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.attachments.is_empty()
    }
}
