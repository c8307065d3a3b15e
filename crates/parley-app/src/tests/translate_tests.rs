use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parley_types::{OutputStatus, UiEvent};
use tokio::sync::Notify;

use super::fakes::{FakeTranslator, Fakes, Harness};

#[tokio::test]
async fn translate_button_uses_trimmed_text_and_current_languages() {
    let harness = Harness::start(Fakes::default()).await;

    harness
        .send(UiEvent::SelectLanguage {
            slot: parley_types::Slot::Target,
            code: "it-IT".into(),
        })
        .await;
    harness.send(UiEvent::InputChanged("  good night \n".into())).await;
    harness.send(UiEvent::Translate).await;

    let view = harness
        .render_until(|v| v.output_status == OutputStatus::Idle && !v.output_text.is_empty())
        .await;
    assert_eq!(view.output_text, "[it-IT] good night");
    assert_eq!(view.output_placeholder, "Translation");
    assert_eq!(
        harness.fakes.translator.calls(),
        vec![(
            "good night".to_string(),
            "en-GB".to_string(),
            "it-IT".to_string()
        )]
    );

    harness.stop().await;
}

#[tokio::test]
async fn blank_input_never_reaches_the_translator() {
    let harness = Harness::start(Fakes::default()).await;

    harness.send(UiEvent::InputChanged("   ".into())).await;
    harness.send(UiEvent::Translate).await;
    let view = harness.flush().await;

    assert_eq!(view.output_status, OutputStatus::Idle);
    assert!(harness.fakes.translator.calls().is_empty());

    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_translates_once_with_the_last_text() {
    let harness = Harness::start(Fakes::default()).await;

    for text in ["h", "he", "hel", "hell", "hello"] {
        harness.send(UiEvent::InputChanged(text.into())).await;
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    let view = harness.render_until(|v| !v.output_text.is_empty()).await;
    assert_eq!(view.output_text, "[es-ES] hello");

    tokio::time::sleep(Duration::from_secs(5)).await;
    harness.flush().await;
    let calls = harness.fakes.translator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "hello");

    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn quiet_period_must_fully_elapse() {
    let harness = Harness::start(Fakes::default()).await;

    harness.send(UiEvent::InputChanged("bonjour".into())).await;
    tokio::time::sleep(Duration::from_millis(900)).await;
    harness.flush().await;
    assert!(harness.fakes.translator.calls().is_empty());

    tokio::time::sleep(Duration::from_millis(200)).await;
    harness.render_until(|v| !v.output_text.is_empty()).await;
    assert_eq!(harness.fakes.translator.calls().len(), 1);

    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn emptying_the_input_clears_output_and_cancels_the_timer() {
    let harness = Harness::start(Fakes::default()).await;

    harness.send(UiEvent::InputChanged("hello".into())).await;
    harness.send(UiEvent::Translate).await;
    harness.render_until(|v| !v.output_text.is_empty()).await;

    harness.send(UiEvent::InputChanged("hello!".into())).await;
    harness.send(UiEvent::InputChanged(String::new())).await;
    let view = harness.render_until(|v| v.input_text.is_empty()).await;
    assert!(view.output_text.is_empty());

    tokio::time::sleep(Duration::from_secs(3)).await;
    harness.flush().await;
    assert_eq!(harness.fakes.translator.calls().len(), 1);

    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn clear_cancels_pending_auto_translate() {
    let harness = Harness::start(Fakes::default()).await;

    harness.send(UiEvent::InputChanged("hi".into())).await;
    harness.send(UiEvent::ClearInput).await;
    let view = harness.render_until(|v| v.input_revision == 1).await;
    assert!(view.input_text.is_empty());
    assert!(view.output_text.is_empty());

    tokio::time::sleep(Duration::from_secs(3)).await;
    harness.flush().await;
    assert!(harness.fakes.translator.calls().is_empty());

    harness.stop().await;
}

#[tokio::test]
async fn failure_replaces_the_pending_placeholder() {
    let fakes = Fakes {
        translator: Arc::new(FakeTranslator {
            fail: AtomicBool::new(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    let harness = Harness::start(fakes).await;

    harness.send(UiEvent::InputChanged("hello".into())).await;
    harness.send(UiEvent::Translate).await;

    let view = harness
        .render_until(|v| matches!(v.output_status, OutputStatus::Failed(_)))
        .await;
    assert_eq!(view.output_placeholder, "Translation failed");
    assert!(view.output_text.is_empty());

    harness.stop().await;
}

#[tokio::test]
async fn failure_after_success_hides_the_stale_translation() {
    let harness = Harness::start(Fakes::default()).await;

    harness.send(UiEvent::InputChanged("hello".into())).await;
    harness.send(UiEvent::Translate).await;
    harness
        .render_until(|v| v.output_text == "[es-ES] hello")
        .await;

    harness.fakes.translator.fail.store(true, Ordering::SeqCst);
    harness.send(UiEvent::InputChanged("goodbye".into())).await;
    harness.send(UiEvent::Translate).await;

    let view = harness
        .render_until(|v| matches!(v.output_status, OutputStatus::Failed(_)))
        .await;
    assert!(view.output_text.is_empty());
    assert_eq!(view.output_placeholder, "Translation failed");

    harness.stop().await;
}

#[tokio::test]
async fn disabled_translator_reports_failure() {
    let fakes = Fakes {
        translator_enabled: false,
        ..Default::default()
    };
    let harness = Harness::start(fakes).await;

    harness.send(UiEvent::InputChanged("hello".into())).await;
    harness.send(UiEvent::Translate).await;

    let view = harness
        .render_until(|v| matches!(v.output_status, OutputStatus::Failed(_)))
        .await;
    assert_eq!(
        view.output_status,
        OutputStatus::Failed("translator disabled".into())
    );

    harness.stop().await;
}

#[tokio::test]
async fn result_arriving_after_clear_is_dropped() {
    let gate = Arc::new(Notify::new());
    let fakes = Fakes {
        translator: Arc::new(FakeTranslator {
            gate: Some(gate.clone()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let harness = Harness::start(fakes).await;

    harness.send(UiEvent::InputChanged("hello".into())).await;
    harness.send(UiEvent::Translate).await;
    harness
        .render_until(|v| v.output_status == OutputStatus::Translating)
        .await;
    assert_eq!(harness.fakes.translator.calls().len(), 1);

    harness.send(UiEvent::ClearInput).await;
    let view = harness.render_until(|v| v.input_revision == 1).await;
    assert_eq!(view.output_status, OutputStatus::Idle);

    gate.notify_one();
    while harness.fakes.translator.finished.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    let view = harness.flush().await;
    assert!(view.output_text.is_empty());
    assert_eq!(view.output_status, OutputStatus::Idle);

    harness.stop().await;
}
