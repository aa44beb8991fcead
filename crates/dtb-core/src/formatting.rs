//! Outgoing message formatting (attribution + body + forwarded files).

use crate::{
    domain::IncomingMessage,
    messaging::types::{OutgoingAuthor, OutgoingMessage},
};

/// Discord caps embed descriptions at 4096 characters.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

pub const DEFAULT_EMBED_COLOR: u32 = 0x0099FF;

/// Build the relayed copy of `original` carrying `text` as its body.
pub fn format_relay(text: &str, original: &IncomingMessage, color: u32) -> OutgoingMessage {
    OutgoingMessage {
        author: OutgoingAuthor {
            name: original.author.display_name().to_string(),
            icon_url: original.author.avatar_url.clone(),
        },
        body: truncate_chars(text, EMBED_DESCRIPTION_LIMIT),
        attachments: original.attachments.clone(),
        color,
    }
}

/// Keep at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
