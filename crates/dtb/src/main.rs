use std::sync::Arc;

use tracing::info;

use dtb_core::{config::Config, conversation::ConversationStore, dispatch::TranslationDispatcher};
use dtb_discord::{router::run_gateway, DiscordPlatform};
use dtb_openai::OpenAiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first: it loads `.env`, which may carry RUST_LOG.
    let cfg = Arc::new(Config::load()?);
    dtb_core::logging::init("dtb")?;

    info!(
        model = %cfg.completion.model,
        history = cfg.history_limit,
        languages = ?cfg.languages.codes(),
        "starting translation relay"
    );

    let model = Arc::new(OpenAiClient::new(
        cfg.openai_api_key.clone(),
        cfg.openai_base_url.clone(),
        cfg.completion.clone(),
        cfg.request_timeout,
    )?);
    let platform = Arc::new(DiscordPlatform::from_token(&cfg.discord_token));
    let conversations = Arc::new(ConversationStore::new(cfg.history_limit));

    let dispatcher = Arc::new(
        TranslationDispatcher::new(
            platform,
            model,
            conversations,
            Arc::new(cfg.languages.clone()),
        )
        .with_embed_color(cfg.embed_color),
    );

    run_gateway(cfg, dispatcher).await
}
