use std::cell::RefCell;
use std::rc::Rc;

use kanal::{AsyncReceiver, AsyncSender};
use parley_types::{AppEvent, Slot, UiEvent};
use slint::ComponentHandle;

pub mod events;
pub mod state;

use events::handle_events;
use state::UiState;

slint::include_modules!();

/// Build the window, wire its callbacks to `ui_to_app_tx` and run the
/// Slint event loop until the window closes. Must run on the main thread.
pub fn run_ui(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let window = MainWindow::new()?;
    let state = Rc::new(RefCell::new(UiState::new()));

    wire_callbacks(&window, &state, &ui_to_app_tx);

    // Receive events from the backend
    {
        let window_weak = window.as_weak();
        let state = state.clone();
        slint::spawn_local(async move {
            while let Ok(event) = app_to_ui_rx.recv().await {
                handle_events(event, &window_weak, &mut state.borrow_mut());
            }
            tracing::debug!("[SLINT] Backend channel closed");
            slint::quit_event_loop().ok();
        })?;
    }

    window.show()?;
    window.run()?;

    tracing::info!("[SLINT] Window closed");
    Ok(())
}

fn send(tx: &AsyncSender<AppEvent>, event: UiEvent) {
    match tx.try_send(AppEvent::Ui(event)) {
        Ok(true) => {}
        Ok(false) => tracing::warn!("[SLINT] Backend busy, dropped UI event"),
        Err(e) => tracing::error!("[SLINT] Backend gone: {e}"),
    }
}

fn wire_callbacks(window: &MainWindow, state: &Rc<RefCell<UiState>>, tx: &AsyncSender<AppEvent>) {
    for slot in [Slot::Source, Slot::Target] {
        let state = state.clone();
        let tx = tx.clone();
        let on_selected = move |index: i32| {
            let code = state.borrow().code_at(index).map(str::to_string);
            match code {
                Some(code) => send(&tx, UiEvent::SelectLanguage { slot, code }),
                None => tracing::warn!("[SLINT] No language at dropdown index {index}"),
            }
        };
        match slot {
            Slot::Source => window.on_source_selected(on_selected),
            Slot::Target => window.on_target_selected(on_selected),
        }
    }

    {
        let tx = tx.clone();
        window.on_open_picker(move |slot| {
            let slot = if slot == 0 { Slot::Source } else { Slot::Target };
            send(&tx, UiEvent::OpenPicker(slot));
        });
    }
    {
        let tx = tx.clone();
        window.on_pick_language(move |code| send(&tx, UiEvent::PickLanguage(code.into())));
    }
    {
        let tx = tx.clone();
        window.on_filter_changed(move |query| send(&tx, UiEvent::FilterCatalog(query.into())));
    }
    {
        let tx = tx.clone();
        window.on_input_edited(move |text| send(&tx, UiEvent::InputChanged(text.into())));
    }

    let emit = |event: UiEvent| {
        let tx = tx.clone();
        move || send(&tx, event.clone())
    };
    window.on_swap_languages(emit(UiEvent::Swap));
    window.on_close_picker(emit(UiEvent::ClosePicker));
    window.on_clear_input(emit(UiEvent::ClearInput));
    window.on_translate_requested(emit(UiEvent::Translate));
    window.on_speak_input(emit(UiEvent::SpeakInput));
    window.on_speak_output(emit(UiEvent::SpeakOutput));
    window.on_toggle_mic(emit(UiEvent::ToggleMic));
    window.on_copy_output(emit(UiEvent::CopyOutput));
    window.on_share_output(emit(UiEvent::ShareOutput));
    window.on_toggle_favorite(emit(UiEvent::ToggleFavorite));
    window.on_toggle_theme(emit(UiEvent::ToggleTheme));
}
