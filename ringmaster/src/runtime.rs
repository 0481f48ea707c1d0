//! Runtime wiring helpers and the per-event dispatch loop.

use std::sync::Arc;

use rdialogue::{ChatTransport, DialogueEngine, DialogueHooks, IncomingEvent};
use rgateway::{GatewayError, HttpModelBackend, ModelBackend};
use robserve::{SafeDialogueHooks, TracingDialogueHooks};
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinSet;

use crate::BotConfig;

/// HTTP backend client configured from [`BotConfig`]; the request timeout is
/// set at the client level so every call inherits it.
pub fn http_backend(config: &BotConfig) -> Result<HttpModelBackend, GatewayError> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .map_err(|err| GatewayError::transport(err.to_string()))?;

    Ok(HttpModelBackend::new(client).with_base_url(config.api_base_url()))
}

/// Engine against the configured HTTP backend, with tracing hooks.
pub fn build_engine(
    config: &BotConfig,
    transport: Arc<dyn ChatTransport>,
) -> Result<DialogueEngine, GatewayError> {
    let backend: Arc<dyn ModelBackend> = Arc::new(http_backend(config)?);
    let hooks: Arc<dyn DialogueHooks> = Arc::new(SafeDialogueHooks::new(TracingDialogueHooks));
    Ok(build_engine_with(config, backend, transport, hooks))
}

pub fn build_engine_with(
    config: &BotConfig,
    backend: Arc<dyn ModelBackend>,
    transport: Arc<dyn ChatTransport>,
    hooks: Arc<dyn DialogueHooks>,
) -> DialogueEngine {
    DialogueEngine::builder(backend, transport)
        .hooks(hooks)
        .storage_dir(config.storage_dir())
        .build()
}

/// Drains the event channel, handling each event on its own task. Chats are
/// independent, so events for different chats proceed concurrently; per-chat
/// ordering is the transport's delivery guarantee. Returns once the channel
/// closes and every in-flight event has finished.
pub async fn run_events(engine: DialogueEngine, mut events: Receiver<IncomingEvent>) {
    let mut tasks = JoinSet::new();
    while let Some(event) = events.recv().await {
        let engine = engine.clone();
        tasks.spawn(async move {
            let chat = event.chat;
            if let Err(error) = engine.handle_event(event).await {
                tracing::error!(
                    phase = "pump",
                    event = "handle_failed",
                    chat = chat.value(),
                    error_kind = ?error.kind,
                    error = %error
                );
            }
        });
    }

    while tasks.join_next().await.is_some() {}
}
