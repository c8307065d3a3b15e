use parley_core::preprocess::{DefaultPreprocessor, Preprocessor};
use parley_translator::{TranslateError, Translator};
use parley_types::AppEvent;
use uuid::Uuid;

use crate::events::EventContext;

/// Text typed into the input area
pub fn handle_input_changed(ctx: &mut EventContext, text: String) {
    ctx.session.edit_input(text);

    if ctx.session.input_text.is_empty() {
        ctx.debouncer.cancel();
        ctx.session.output_text.clear();
        ctx.session.abandon_translation();
        return;
    }

    let generation = ctx.debouncer.arm(&ctx.loopback);
    tracing::trace!("Auto-translate armed, generation {generation}");
}

/// Translate button
pub fn handle_translate_request(ctx: &mut EventContext) {
    ctx.debouncer.cancel();
    translate(ctx);
}

pub fn handle_debounce_elapsed(ctx: &mut EventContext, generation: u64) {
    if ctx.debouncer.fire(generation) {
        translate(ctx);
    } else {
        tracing::trace!("Ignoring superseded debounce generation {generation}");
    }
}

/// Send the current input for translation with the languages selected
/// right now. Blank input is a no-op.
pub fn translate(ctx: &mut EventContext) {
    let Some(text) = DefaultPreprocessor.process(&ctx.session.input_text) else {
        tracing::debug!("Nothing to translate");
        return;
    };

    let Some(translator) = ctx.services.translator.clone() else {
        tracing::warn!("Translator disabled, skipping request");
        ctx.session.fail_translation(TranslateError::Disabled.to_string());
        return;
    };

    let from = ctx.session.selection.source().to_string();
    let to = ctx.session.selection.target().to_string();
    let request_id = ctx.session.begin_translation();
    tracing::debug!(
        "Translation {request_id}: {from} -> {to}, {} chars",
        text.len()
    );

    let tx = ctx.loopback.clone();
    ctx.spawn_task(async move {
        let result = translator
            .translate(&text, from, to)
            .await
            .map(|translation| translation.text)
            .map_err(|e| e.to_string());

        if let Err(e) = &result {
            tracing::warn!("Translation {request_id} failed: {e}");
        }

        let _ = tx
            .send(AppEvent::TranslationFinished { request_id, result })
            .await;
    });
}

pub fn handle_translation_finished(
    ctx: &mut EventContext,
    request_id: Uuid,
    result: Result<String, String>,
) {
    if !ctx.session.finish_translation(request_id, result) {
        tracing::debug!("Dropping stale translation {request_id}");
    }
}
