use std::{collections::HashMap, sync::Arc};

use serenity::{
    async_trait,
    client::{Client, Context, EventHandler},
    model::{channel::Message, gateway::Ready},
    prelude::GatewayIntents,
};

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;

use dtb_core::{config::Config, dispatch::TranslationDispatcher};

use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub dispatcher: Arc<TranslationDispatcher>,
    pub channel_locks: Arc<ChannelLocks>,
}

#[derive(Default)]
pub struct ChannelLocks {
    inner: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl ChannelLocks {
    pub async fn lock_channel(&self, channel_id: u64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(channel_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

struct Handler {
    state: Arc<AppState>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, _ctx: Context, msg: Message) {
        handlers::handle_message(msg, self.state.clone()).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Ready! Logged in as {}", ready.user.tag());
        info!(
            guilds = ready.guilds.len(),
            languages = ?self.state.cfg.languages.codes(),
            "watching language channels"
        );
    }
}

pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

/// Connect to the gateway and relay messages until the client stops.
pub async fn run_gateway(
    cfg: Arc<Config>,
    dispatcher: Arc<TranslationDispatcher>,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        dispatcher,
        channel_locks: Arc::new(ChannelLocks::default()),
    });

    let mut client = Client::builder(&cfg.discord_token, intents())
        .event_handler(Handler { state })
        .await?;

    client.start().await?;
    Ok(())
}
