use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use parley_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::services::Services;
use crate::state::AppState;

/// Renders, catalog and flag images headed for the window
const TO_UI_CAPACITY: usize = 256;
/// Window intents plus results posted back by backend tasks
const FROM_UI_CAPACITY: usize = 64;

type Channel = (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>);

/// Both directions between the window and the event loop
pub struct ChannelSet {
    pub to_ui: Channel,
    pub from_ui: Channel,
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            to_ui: kanal::bounded_async(TO_UI_CAPACITY),
            from_ui: kanal::bounded_async(FROM_UI_CAPACITY),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Channel ends handed to `parley_ui::run_ui`
pub struct UiChannels {
    pub events: AsyncReceiver<AppEvent>,
    pub intents: AsyncSender<AppEvent>,
}

/// Owns the channels and the root cancellation token of the backend
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Spawn the event loop. Must be called inside a tokio runtime.
    pub fn spawn_tasks(&self, services: Services) -> JoinSet<anyhow::Result<()>> {
        let (intents_tx, intents_rx) = &self.channels.from_ui;
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            services,
            intents_rx.clone(),
            // task results re-enter through the intent channel
            intents_tx.clone(),
            self.channels.to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn ui_channels(&self) -> UiChannels {
        UiChannels {
            events: self.channels.to_ui.1.clone(),
            intents: self.channels.from_ui.0.clone(),
        }
    }

    pub fn shutdown(&self) {
        tracing::info!("Cancelling backend tasks");
        self.cancel_token.cancel();
    }
}
