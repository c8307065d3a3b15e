use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use parley_config::ui::{DEFAULT_SOURCE, DEFAULT_TARGET};
use parley_core::render::catalog_rows;
use parley_core::{LanguageCatalog, SelectionState, Session, render};
use parley_io::{FlagSource, ThemeStore};
use parley_types::{Ack, AppEvent, MicState, Slot, UiEvent, ViewModel};
use tokio_util::sync::CancellationToken;

use crate::debounce::Debouncer;
use crate::events::speech::Recognition;
use crate::services::Services;
use crate::state::AppState;

pub mod output;
pub mod selection;
pub mod speech;
pub mod theme;
pub mod translate;

/// Everything the event loop owns. Handlers get `&mut` access one event
/// at a time; spawned tasks only ever see channel senders.
pub struct EventContext {
    pub catalog: Arc<LanguageCatalog>,
    pub services: Services,
    pub session: Session,
    pub debouncer: Debouncer,
    pub ack_duration: Duration,
    /// Sender back into this loop, for task results
    pub loopback: AsyncSender<AppEvent>,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    pub cancel: CancellationToken,
    /// The live recognition session, if any
    pub listening: Option<Recognition>,
    /// Id handed to the next recognition session
    pub next_recognition: u64,
    copy_timer: Option<CancellationToken>,
    share_timer: Option<CancellationToken>,
    requested_flags: HashSet<String>,
    last_view: Option<ViewModel>,
}

impl EventContext {
    pub async fn new(
        state: &AppState,
        services: Services,
        loopback: AsyncSender<AppEvent>,
        app_to_ui_tx: AsyncSender<AppEvent>,
        cancel: CancellationToken,
    ) -> anyhow::Result<Self> {
        let catalog = state.catalog.clone();
        let config = state.config.read().await;

        let selection = match SelectionState::new(
            &catalog,
            &config.ui.default_source,
            &config.ui.default_target,
        ) {
            Ok(selection) => selection,
            Err(e) => {
                tracing::warn!("Configured default languages unusable ({e}), using built-in pair");
                SelectionState::new(&catalog, DEFAULT_SOURCE, DEFAULT_TARGET)?
            }
        };

        let mic = if services.recognizer.is_some() {
            MicState::Idle
        } else {
            MicState::Unsupported
        };
        let theme = services
            .theme_store
            .as_ref()
            .and_then(|store| store.load())
            .unwrap_or_default();

        let debouncer = Debouncer::new(
            Duration::from_millis(config.debounce_ms),
            cancel.child_token(),
        );

        Ok(Self {
            catalog,
            services,
            session: Session::new(selection, mic, theme),
            debouncer,
            ack_duration: Duration::from_millis(config.ack_ms),
            loopback,
            app_to_ui_tx,
            cancel,
            listening: None,
            next_recognition: 0,
            copy_timer: None,
            share_timer: None,
            requested_flags: HashSet::new(),
            last_view: None,
        })
    }

    /// Run `task` in the background until it finishes or the app shuts down
    pub fn spawn_task<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = task => {}
            }
        });
    }

    pub fn ack_timer(&mut self, ack: Ack) -> &mut Option<CancellationToken> {
        match ack {
            Ack::Copy => &mut self.copy_timer,
            Ack::Share => &mut self.share_timer,
        }
    }

    async fn emit(&self, event: AppEvent) -> anyhow::Result<()> {
        tokio::select! {
            _ = self.cancel.cancelled() => Ok(()),
            sent = self.app_to_ui_tx.send(event) => Ok(sent?),
        }
    }

    /// Re-render the session and push the view if anything changed
    pub async fn resync(&mut self) -> anyhow::Result<()> {
        let view = render(&self.catalog, &self.session);
        if self.last_view.as_ref() == Some(&view) {
            return Ok(());
        }

        self.request_flags(&view);
        self.last_view = Some(view.clone());
        self.emit(AppEvent::Render(view)).await
    }

    /// Fetch every flag the view shows that has not been asked for yet:
    /// both slots, plus the listed rows while the picker is open
    fn request_flags(&mut self, view: &ViewModel) {
        let slots = [Slot::Source, Slot::Target].map(|slot| &view.slot(slot).flag_key);
        let rows = view
            .picker
            .rows
            .iter()
            .filter(|_| view.picker.visible)
            .map(|row| &row.flag_key);

        for key in slots.into_iter().chain(rows) {
            if !self.requested_flags.insert(key.clone()) {
                continue;
            }

            let flags = self.services.flags.clone();
            let tx = self.app_to_ui_tx.clone();
            let key = key.clone();
            self.spawn_task(async move {
                match flags.fetch(&key).await {
                    Ok(pixels) => {
                        let _ = tx.send(AppEvent::FlagLoaded { key, pixels }).await;
                    }
                    Err(e) => tracing::warn!("Flag {key} unavailable: {e:#}"),
                }
            });
        }
    }

    fn shutdown(&mut self) {
        self.debouncer.cancel();
        if let Some(listening) = self.listening.take() {
            listening.token.cancel();
        }
        for ack in [Ack::Copy, Ack::Share] {
            if let Some(timer) = self.ack_timer(ack).take() {
                timer.cancel();
            }
        }
    }
}

/// App's main loop. Owns the session; every event is handled to completion
/// before the next one is read.
pub async fn event_loop(
    state: Arc<AppState>,
    services: Services,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut ctx = EventContext::new(&state, services, ui_to_app_tx, app_to_ui_tx, cancel.clone()).await?;

    ctx.emit(AppEvent::CatalogLoaded(catalog_rows(ctx.catalog.entries())))
        .await?;
    ctx.resync().await?;
    ctx.emit(AppEvent::BackendReady).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Shutdown requested");
                break;
            }
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!(
            "[EVENT_LOOP] Event received: {:?}",
            std::mem::discriminant(&event)
        );
        if let Err(e) = handle_events(&mut ctx, event) {
            tracing::error!("[EVENT_LOOP] Handler failed: {e:#}");
        }
        ctx.resync().await?;
    }

    ctx.shutdown();
    Ok(())
}

fn handle_events(ctx: &mut EventContext, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::Ui(event) => handle_ui_event(ctx, event)?,
        AppEvent::TranslationFinished { request_id, result } => {
            translate::handle_translation_finished(ctx, request_id, result);
        }
        AppEvent::DebounceElapsed(generation) => {
            translate::handle_debounce_elapsed(ctx, generation);
        }
        AppEvent::TranscriptReady { session, result } => {
            speech::handle_transcript(ctx, session, result);
        }
        AppEvent::Delivered(ack) => {
            output::show_ack(ctx, ack);
        }
        AppEvent::AckExpired(ack) => {
            output::handle_ack_expired(ctx, ack);
        }
        AppEvent::CatalogLoaded(_)
        | AppEvent::Render(_)
        | AppEvent::FlagLoaded { .. }
        | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
        }
    }

    Ok(())
}

fn handle_ui_event(ctx: &mut EventContext, event: UiEvent) -> anyhow::Result<()> {
    match event {
        UiEvent::SelectLanguage { slot, code } => selection::handle_select(ctx, slot, &code),
        UiEvent::Swap => selection::handle_swap(ctx),
        UiEvent::OpenPicker(slot) => ctx.session.open_picker(slot),
        UiEvent::PickLanguage(code) => selection::handle_pick(ctx, &code),
        UiEvent::ClosePicker => ctx.session.close_picker(),
        UiEvent::FilterCatalog(query) => ctx.session.query = query,
        UiEvent::InputChanged(text) => translate::handle_input_changed(ctx, text),
        UiEvent::ClearInput => output::handle_clear(ctx),
        UiEvent::Translate => translate::handle_translate_request(ctx),
        UiEvent::SpeakInput => speech::handle_speak(ctx, Slot::Source),
        UiEvent::SpeakOutput => speech::handle_speak(ctx, Slot::Target),
        UiEvent::ToggleMic => speech::handle_mic_toggle(ctx),
        UiEvent::CopyOutput => output::handle_copy(ctx),
        UiEvent::ShareOutput => output::handle_share(ctx),
        UiEvent::ToggleFavorite => output::handle_favorite(ctx),
        UiEvent::ToggleTheme => theme::handle_theme_toggle(ctx)?,
    }

    Ok(())
}
