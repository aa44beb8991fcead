use crate::domain::AttachmentRef;

/// Who the relayed copy is attributed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingAuthor {
    pub name: String,
    pub icon_url: Option<String>,
}

/// Platform-neutral relayed message.
///
/// The Discord adapter renders it as a single embed; attachments travel as
/// their original URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub author: OutgoingAuthor,
    pub body: String,
    pub attachments: Vec<AttachmentRef>,
    pub color: u32,
}
