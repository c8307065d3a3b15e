use std::rc::Rc;

use parley_types::{AppEvent, CatalogRow, FlagPixels, MicState, OutputStatus, Slot, Theme, ViewModel};
use slint::{Image, ModelRc, Rgba8Pixel, SharedPixelBuffer, SharedString, VecModel, Weak};

use crate::state::UiState;
use crate::{LanguageRow, MainWindow};

pub fn handle_events(event: AppEvent, window_weak: &Weak<MainWindow>, state: &mut UiState) {
    let Some(w) = window_weak.upgrade() else {
        return;
    };

    match event {
        AppEvent::CatalogLoaded(rows) => {
            tracing::debug!("[SLINT] Catalog with {} languages", rows.len());
            let names: Vec<SharedString> = rows.iter().map(|r| r.name.as_str().into()).collect();
            state.codes = rows.into_iter().map(|r| r.code).collect();
            w.set_language_names(ModelRc::new(VecModel::from(names)));
        }
        AppEvent::Render(view) => {
            apply_view(&w, state, view);
        }
        AppEvent::FlagLoaded { key, pixels } => match flag_image(&pixels) {
            Some(image) => {
                tracing::debug!("[SLINT] Flag '{key}' loaded");
                state.flags.insert(key, image);
                refresh_flags(&w, state);
            }
            None => {
                tracing::warn!(
                    "[SLINT] Flag '{key}' has {} bytes for {}x{}",
                    pixels.rgba.len(),
                    pixels.width,
                    pixels.height
                );
            }
        },
        AppEvent::BackendReady => {
            tracing::debug!("[SLINT] Backend ready");
        }
        _ => {}
    }
}

/// Push a view model into the window, leaving the text fields alone when
/// the backend has nothing new for them
pub fn apply_view(w: &MainWindow, state: &mut UiState, view: ViewModel) {
    let previous = state.last.take();

    w.set_source_index(dropdown_index(view.source.index));
    w.set_target_index(dropdown_index(view.target.index));
    w.set_source_label(view.source.label.as_str().into());
    w.set_target_label(view.target.label.as_str().into());
    w.set_source_flag(state.flag(&view.source.flag_key));
    w.set_target_flag(state.flag(&view.target.flag_key));

    if previous
        .as_ref()
        .is_none_or(|p| p.input_revision != view.input_revision)
    {
        w.set_input_text(view.input_text.as_str().into());
    }
    w.set_output_text(view.output_text.as_str().into());
    w.set_output_placeholder(view.output_placeholder.as_str().into());
    w.set_output_failed(matches!(view.output_status, OutputStatus::Failed(_)));

    let was_visible = previous.as_ref().is_some_and(|p| p.picker.visible);
    if was_visible != view.picker.visible {
        w.set_picker_query(view.picker.query.as_str().into());
    }
    w.set_picker_visible(view.picker.visible);
    w.set_picker_title(picker_title(view.picker.editing).into());
    if previous
        .as_ref()
        .is_none_or(|p| p.picker.rows != view.picker.rows)
    {
        w.set_picker_rows(language_rows(&view.picker.rows, state));
    }

    w.set_mic_supported(view.mic != MicState::Unsupported);
    w.set_mic_listening(view.mic == MicState::Listening);
    w.set_favorite(view.favorite);
    w.set_copy_ack(view.copy_ack);
    w.set_share_ack(view.share_ack);
    w.set_dark(view.theme == Theme::Dark);

    state.last = Some(view);
}

fn refresh_flags(w: &MainWindow, state: &UiState) {
    if let Some(view) = &state.last {
        w.set_source_flag(state.flag(&view.source.flag_key));
        w.set_target_flag(state.flag(&view.target.flag_key));
        if view.picker.visible {
            w.set_picker_rows(language_rows(&view.picker.rows, state));
        }
    }
}

fn dropdown_index(index: Option<usize>) -> i32 {
    index.and_then(|i| i32::try_from(i).ok()).unwrap_or(-1)
}

fn picker_title(editing: Option<Slot>) -> &'static str {
    match editing {
        Some(Slot::Source) => "Translate from",
        Some(Slot::Target) => "Translate to",
        None => "",
    }
}

fn language_rows(rows: &[CatalogRow], state: &UiState) -> ModelRc<LanguageRow> {
    let rows: Vec<LanguageRow> = rows
        .iter()
        .map(|r| LanguageRow {
            code: r.code.as_str().into(),
            name: r.name.as_str().into(),
            flag: state.flag(&r.flag_key),
        })
        .collect();
    ModelRc::from(Rc::new(VecModel::from(rows)))
}

fn flag_image(pixels: &FlagPixels) -> Option<Image> {
    let expected = (pixels.width as usize)
        .checked_mul(pixels.height as usize)?
        .checked_mul(4)?;
    if expected == 0 || pixels.rgba.len() != expected {
        return None;
    }

    let buffer =
        SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(&pixels.rgba, pixels.width, pixels.height);
    Some(Image::from_rgba8(buffer))
}
