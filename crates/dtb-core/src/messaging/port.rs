use async_trait::async_trait;

use crate::{
    domain::{ChannelId, ChannelInfo, GuildId},
    messaging::types::OutgoingMessage,
    Result,
};

/// Chat platform capabilities the relay needs.
///
/// Discord is the implementation today; anything that can list text channels
/// with their categories and post an attributed message fits.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Every text channel of the guild, with parent category names resolved.
    async fn list_text_channels(&self, guild: GuildId) -> Result<Vec<ChannelInfo>>;

    async fn send(&self, channel: ChannelId, message: &OutgoingMessage) -> Result<()>;
}
