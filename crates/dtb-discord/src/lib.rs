//! Discord adapter (serenity).
//!
//! This crate implements the `dtb-core` ChatPlatform port over the Discord
//! HTTP API and feeds gateway message events into the dispatcher.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use serenity::{
    builder::{CreateEmbed, CreateEmbedAuthor, CreateMessage},
    http::Http,
    model::channel::{ChannelType, GuildChannel},
};

pub mod handlers;
pub mod router;

use dtb_core::{
    domain::{CategoryInfo, ChannelId, ChannelInfo, GuildId},
    errors::Error,
    formatting::truncate_chars,
    messaging::{port::ChatPlatform, types::OutgoingMessage},
    Result,
};

/// Discord caps message content at 2000 characters.
const MESSAGE_CONTENT_LIMIT: usize = 2000;

/// Discord caps embed author names at 256 characters.
const EMBED_AUTHOR_LIMIT: usize = 256;

#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    pub fn from_token(token: &str) -> Self {
        Self::new(Arc::new(Http::new(token)))
    }

    fn dc_guild(guild: GuildId) -> serenity::model::id::GuildId {
        serenity::model::id::GuildId::new(guild.0)
    }

    fn dc_channel(channel: ChannelId) -> serenity::model::id::ChannelId {
        serenity::model::id::ChannelId::new(channel.0)
    }

    fn map_err(e: serenity::Error) -> Error {
        Error::Platform(format!("discord error: {e}"))
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn list_text_channels(&self, guild: GuildId) -> Result<Vec<ChannelInfo>> {
        let channels = Self::dc_guild(guild)
            .channels(self.http.as_ref())
            .await
            .map_err(Self::map_err)?;
        Ok(text_channels(channels.values()))
    }

    async fn send(&self, channel: ChannelId, message: &OutgoingMessage) -> Result<()> {
        Self::dc_channel(channel)
            .send_message(self.http.as_ref(), render(message))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}

/// The fields of a guild channel the relay looks at.
#[derive(Clone, Debug)]
struct ChannelEntry {
    id: u64,
    kind: ChannelType,
    name: String,
    parent: Option<u64>,
}

impl From<&GuildChannel> for ChannelEntry {
    fn from(c: &GuildChannel) -> Self {
        Self {
            id: c.id.get(),
            kind: c.kind,
            name: c.name.clone(),
            parent: c.parent_id.map(|p| p.get()),
        }
    }
}

/// Text channels with their category names resolved from the same listing.
fn text_channels<'a>(all: impl Iterator<Item = &'a GuildChannel>) -> Vec<ChannelInfo> {
    let entries: Vec<ChannelEntry> = all.map(ChannelEntry::from).collect();
    resolve_text_channels(&entries)
}

fn resolve_text_channels(entries: &[ChannelEntry]) -> Vec<ChannelInfo> {
    let categories: HashMap<u64, &str> = entries
        .iter()
        .filter(|c| c.kind == ChannelType::Category)
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut out: Vec<ChannelInfo> = entries
        .iter()
        .filter(|c| c.kind == ChannelType::Text)
        .map(|c| ChannelInfo {
            id: ChannelId(c.id),
            name: c.name.clone(),
            parent: c.parent.map(|p| CategoryInfo {
                id: ChannelId(p),
                name: categories.get(&p).map(|n| n.to_string()),
            }),
        })
        .collect();
    out.sort_by_key(|c| c.id);
    out
}

/// One embed carrying author + body; attachment URLs go in the plain content
/// so Discord renders their previews.
fn render(message: &OutgoingMessage) -> CreateMessage {
    let mut author =
        CreateEmbedAuthor::new(truncate_chars(&message.author.name, EMBED_AUTHOR_LIMIT));
    if let Some(icon) = &message.author.icon_url {
        author = author.icon_url(icon);
    }

    let mut embed = CreateEmbed::new().author(author).color(message.color);
    if !message.body.is_empty() {
        embed = embed.description(&message.body);
    }

    let mut builder = CreateMessage::new().embed(embed);
    if let Some(content) = attachment_content(message) {
        builder = builder.content(content);
    }
    builder
}

fn attachment_content(message: &OutgoingMessage) -> Option<String> {
    if message.attachments.is_empty() {
        return None;
    }
    let urls = message
        .attachments
        .iter()
        .map(|a| a.url.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    Some(truncate_chars(&urls, MESSAGE_CONTENT_LIMIT))
}
