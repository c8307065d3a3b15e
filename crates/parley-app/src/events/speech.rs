use parley_io::{SpeechRecognizer, SpeechSynthesizer};
use parley_types::{AppEvent, MicState, Slot};
use tokio_util::sync::CancellationToken;

use crate::events::EventContext;
use crate::events::translate::translate;

/// A running recognizer and the token that stops it
pub struct Recognition {
    pub id: u64,
    pub token: CancellationToken,
}

/// Read the input (source) or output (target) text aloud
pub fn handle_speak(ctx: &mut EventContext, slot: Slot) {
    let text = match slot {
        Slot::Source => &ctx.session.input_text,
        Slot::Target => &ctx.session.output_text,
    };
    if text.trim().is_empty() {
        return;
    }

    let Some(synthesizer) = ctx.services.synthesizer.clone() else {
        tracing::warn!("No speech synthesizer configured");
        return;
    };

    let text = text.clone();
    let lang = ctx.session.selection.code(slot).to_string();
    ctx.spawn_task(async move {
        if let Err(e) = synthesizer.speak(&text, &lang).await {
            tracing::warn!("Speech synthesis failed: {e:#}");
        }
    });
}

pub fn handle_mic_toggle(ctx: &mut EventContext) {
    match ctx.session.mic {
        MicState::Unsupported => {
            tracing::debug!("Voice input unsupported, ignoring mic");
        }
        MicState::Idle => start_listening(ctx),
        MicState::Listening => {
            if let Some(listening) = ctx.listening.take() {
                tracing::debug!("Stopping recognition session {}", listening.id);
                listening.token.cancel();
            }
            ctx.session.mic = MicState::Idle;
        }
    }
}

fn start_listening(ctx: &mut EventContext) {
    let Some(recognizer) = ctx.services.recognizer.clone() else {
        ctx.session.mic = MicState::Unsupported;
        return;
    };

    let id = ctx.next_recognition;
    ctx.next_recognition += 1;
    let token = ctx.cancel.child_token();
    ctx.listening = Some(Recognition {
        id,
        token: token.clone(),
    });
    ctx.session.mic = MicState::Listening;

    let lang = ctx.session.selection.source().to_string();
    tracing::debug!("Recognition session {id} listening for {lang}");

    let tx = ctx.loopback.clone();
    ctx.spawn_task(async move {
        let result = recognizer
            .recognize(&lang, token)
            .await
            .map_err(|e| format!("{e:#}"));
        let _ = tx
            .send(AppEvent::TranscriptReady {
                session: id,
                result,
            })
            .await;
    });
}

/// Recognition session `session` ended. Results of sessions the user
/// already stopped are dropped; otherwise the mic returns to idle whatever
/// the outcome.
pub fn handle_transcript(
    ctx: &mut EventContext,
    session: u64,
    result: Result<Option<String>, String>,
) {
    if ctx.listening.as_ref().map(|l| l.id) != Some(session) {
        tracing::debug!("Dropping result of stopped recognition session {session}");
        return;
    }

    ctx.listening = None;
    ctx.session.mic = MicState::Idle;

    match result {
        Ok(Some(transcript)) if !transcript.trim().is_empty() => {
            tracing::debug!("Transcript: {} chars", transcript.len());
            ctx.debouncer.cancel();
            ctx.session.replace_input(transcript);
            translate(ctx);
        }
        Ok(_) => tracing::debug!("Recognition ended without speech"),
        Err(e) => tracing::warn!("Speech recognition failed: {e}"),
    }
}
