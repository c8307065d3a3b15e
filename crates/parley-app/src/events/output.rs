use parley_io::{ShareOutcome, Sharer, copy_text};
use parley_types::{Ack, AppEvent};

use crate::events::EventContext;

pub const SHARE_TITLE: &str = "Translation";

pub fn handle_copy(ctx: &mut EventContext) {
    if ctx.session.output_text.is_empty() {
        return;
    }

    let clipboard = ctx.services.clipboard.clone();
    let text = ctx.session.output_text.clone();
    let tx = ctx.loopback.clone();
    ctx.spawn_task(async move {
        match copy_text(clipboard, text).await {
            Ok(()) => {
                let _ = tx.send(AppEvent::Delivered(Ack::Copy)).await;
            }
            Err(e) => tracing::warn!("Copy failed: {e:#}"),
        }
    });
}

pub fn handle_share(ctx: &mut EventContext) {
    if ctx.session.output_text.is_empty() {
        return;
    }

    let sharer = ctx.services.sharer.clone();
    let text = ctx.session.output_text.clone();
    let tx = ctx.loopback.clone();
    ctx.spawn_task(async move {
        match sharer.share(SHARE_TITLE, &text).await {
            Ok(ShareOutcome::Shared) => tracing::debug!("Translation shared"),
            Ok(ShareOutcome::Copied) => {
                let _ = tx.send(AppEvent::Delivered(Ack::Share)).await;
            }
            Err(e) => tracing::warn!("Share failed: {e:#}"),
        }
    });
}

pub fn handle_favorite(ctx: &mut EventContext) {
    ctx.session.favorite = !ctx.session.favorite;
}

pub fn handle_clear(ctx: &mut EventContext) {
    ctx.debouncer.cancel();
    ctx.session.clear_texts();
}

/// Light up an acknowledgment for the configured duration. Re-triggering
/// restarts the timer.
pub fn show_ack(ctx: &mut EventContext, ack: Ack) {
    ctx.session.set_ack(ack, true);

    let token = ctx.cancel.child_token();
    if let Some(previous) = ctx.ack_timer(ack).replace(token.clone()) {
        previous.cancel();
    }

    let delay = ctx.ack_duration;
    let tx = ctx.loopback.clone();
    ctx.spawn_task(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            _ = tokio::time::sleep(delay) => {
                let _ = tx.send(AppEvent::AckExpired(ack)).await;
            }
        }
    });
}

pub fn handle_ack_expired(ctx: &mut EventContext, ack: Ack) {
    ctx.session.set_ack(ack, false);
    *ctx.ack_timer(ack) = None;
}
