//! Gateway event handlers.
//!
//! Each handler narrows the serenity payload to the core's `IncomingMessage`
//! and hands it to the dispatcher. Failures are logged here; nothing a single
//! message does may take the gateway down.

use std::sync::Arc;

use serenity::model::channel::Message;
use tracing::{debug, error};

use dtb_core::domain::{AttachmentRef, Author, ChannelId, GuildId, IncomingMessage};

use crate::router::AppState;

pub async fn handle_message(msg: Message, state: Arc<AppState>) {
    let Some(incoming) = to_incoming(&msg) else {
        return;
    };
    if incoming.author.is_bot {
        return;
    }

    // Relay messages of one channel in the order they arrived.
    let _guard = state.channel_locks.lock_channel(incoming.channel_id.0).await;

    match state.dispatcher.dispatch(&incoming).await {
        Ok(summary) => debug!(message = msg.id.get(), ?summary, "dispatch finished"),
        Err(e) => error!(
            message = msg.id.get(),
            guild = incoming.guild_id.0,
            "dispatch failed: {e}"
        ),
    }
}

/// `None` for direct messages.
fn to_incoming(msg: &Message) -> Option<IncomingMessage> {
    let guild_id = msg.guild_id?;
    Some(IncomingMessage {
        guild_id: GuildId(guild_id.get()),
        channel_id: ChannelId(msg.channel_id.get()),
        author: Author {
            username: msg.author.name.clone(),
            nickname: msg.member.as_ref().and_then(|m| m.nick.clone()),
            avatar_url: Some(msg.author.face()),
            is_bot: msg.author.bot,
        },
        content: msg.content.clone(),
        attachments: msg
            .attachments
            .iter()
            .map(|a| AttachmentRef {
                filename: a.filename.clone(),
                url: a.url.clone(),
            })
            .collect(),
    })
}
