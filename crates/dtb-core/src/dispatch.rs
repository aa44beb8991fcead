//! Inbound message → translated copies in every sibling language channel.

use std::{collections::HashMap, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    classify::classify,
    conversation::{ConversationKey, ConversationStore},
    domain::{ChannelId, IncomingMessage},
    errors::Error,
    fanout::resolve_destinations,
    formatting::{format_relay, DEFAULT_EMBED_COLOR},
    grouping::ChannelGroups,
    languages::LanguageTable,
    messaging::port::ChatPlatform,
    model::{client::CompletionClient, types::ConversationEntry},
    prompt::translation_system_prompt,
    Result,
};

/// What happened to one inbound message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub destinations: usize,
    pub translated: usize,
    pub passed_through: usize,
    pub translation_failures: usize,
    pub delivered: usize,
    pub delivery_failures: usize,
}

pub struct TranslationDispatcher {
    platform: Arc<dyn ChatPlatform>,
    model: Arc<dyn CompletionClient>,
    conversations: Arc<ConversationStore>,
    languages: Arc<LanguageTable>,
    embed_color: u32,
}

impl TranslationDispatcher {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        model: Arc<dyn CompletionClient>,
        conversations: Arc<ConversationStore>,
        languages: Arc<LanguageTable>,
    ) -> Self {
        Self {
            platform,
            model,
            conversations,
            languages,
            embed_color: DEFAULT_EMBED_COLOR,
        }
    }

    pub fn with_embed_color(mut self, color: u32) -> Self {
        self.embed_color = color;
        self
    }

    /// Relay `msg` to its sibling channels.
    ///
    /// Destinations are handled one at a time and each distinct target
    /// language is translated once per message. Translation and delivery
    /// failures are logged and counted; only a failed channel listing is
    /// returned as an error.
    pub async fn dispatch(&self, msg: &IncomingMessage) -> Result<DispatchSummary> {
        let mut summary = DispatchSummary::default();
        if msg.author.is_bot || msg.is_empty() {
            return Ok(summary);
        }

        let channels = self.platform.list_text_channels(msg.guild_id).await?;
        let Some(source) = channels.iter().find(|c| c.id == msg.channel_id) else {
            debug!(channel = msg.channel_id.0, "source channel not in listing");
            return Ok(summary);
        };
        let Some(source_code) = classify(source, &self.languages).language_code else {
            return Ok(summary);
        };

        let groups = ChannelGroups::build(&channels, &self.languages);
        let destinations = resolve_destinations(source, &groups, &self.languages);
        summary.destinations = destinations.len();
        if destinations.is_empty() {
            return Ok(summary);
        }

        info!(
            channel = %source.name,
            language = %source_code,
            destinations = destinations.len(),
            "relaying message"
        );

        // One model call per target language; siblings sharing a code reuse it.
        let mut resolved: HashMap<String, Option<String>> = HashMap::new();

        for dest in &destinations {
            let dest_desc = classify(dest, &self.languages);
            let Some(dest_code) = dest_desc.language_code else {
                continue;
            };

            let text = if dest_code == source_code || msg.content.trim().is_empty() {
                summary.passed_through += 1;
                msg.content.clone()
            } else {
                if !resolved.contains_key(&dest_code) {
                    let outcome = match self
                        .translate(source.id, &source_code, &dest_code, &msg.content)
                        .await
                    {
                        Ok(translated) => Some(translated),
                        Err(e) => {
                            warn!(
                                from = %source_code,
                                to = %dest_code,
                                retryable = e.is_retryable(),
                                "translation failed, forwarding original text: {e}"
                            );
                            summary.translation_failures += 1;
                            None
                        }
                    };
                    resolved.insert(dest_code.clone(), outcome);
                }
                match resolved.get(&dest_code).cloned().flatten() {
                    Some(translated) => {
                        summary.translated += 1;
                        translated
                    }
                    None => msg.content.clone(),
                }
            };

            let outgoing = format_relay(&text, msg, self.embed_color);
            match self.platform.send(dest.id, &outgoing).await {
                Ok(()) => {
                    debug!(channel = %dest.name, spoken = dest_desc.is_spoken, "delivered");
                    summary.delivered += 1;
                }
                Err(e) => {
                    warn!(channel = %dest.name, "delivery failed: {e}");
                    summary.delivery_failures += 1;
                }
            }
        }

        Ok(summary)
    }

    /// One model round-trip against the source channel's log for `to`.
    ///
    /// Surrounding whitespace is trimmed from the reply before it is stored
    /// and sent. The buffer stays locked for the whole call so concurrent messages from
    /// the same channel append in order. A failed call leaves no dangling user
    /// turn behind.
    async fn translate(
        &self,
        source: ChannelId,
        from: &str,
        to: &str,
        text: &str,
    ) -> Result<String> {
        let key = ConversationKey::new(source, to);
        let mut buffer = self.conversations.lock(&key).await;

        buffer.ensure_initialized(&translation_system_prompt(&self.languages, from, to));
        buffer.push(ConversationEntry::user(text));

        let result = self.model.complete(buffer.entries()).await;
        match result {
            Ok(reply) if !reply.trim().is_empty() => {
                let reply = reply.trim().to_string();
                buffer.push(ConversationEntry::assistant(reply.clone()));
                Ok(reply)
            }
            Ok(_) => {
                buffer.discard_pending_user();
                Err(Error::model(false, "empty completion"))
            }
            Err(e) => {
                buffer.discard_pending_user();
                Err(e)
            }
        }
    }
}
