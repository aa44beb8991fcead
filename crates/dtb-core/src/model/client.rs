use async_trait::async_trait;

use crate::Result;

use super::types::ConversationEntry;

/// Completion backend used by the dispatcher.
///
/// Model selection, temperature, and endpoint are the implementation's
/// business; callers only hand over the ordered conversation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, conversation: &[ConversationEntry]) -> Result<String>;
}
