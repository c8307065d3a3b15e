use parley_types::{CatalogRow, OutputStatus, PickerView, Slot, SlotView, ViewModel};

use crate::catalog::{LanguageCatalog, LanguageEntry};
use crate::flag::{flag_key, flag_url};
use crate::session::Session;

pub const IDLE_PLACEHOLDER: &str = "Translation";
pub const TRANSLATING_PLACEHOLDER: &str = "Translating...";
pub const FAILED_PLACEHOLDER: &str = "Translation failed";

/// Label used when a slot's code has no catalog entry
pub fn fallback_label(slot: Slot) -> &'static str {
    match slot {
        Slot::Source => "English",
        Slot::Target => "Spanish",
    }
}

/// Project the session onto everything the window shows. Pure: equal inputs give equal output.
pub fn render(catalog: &LanguageCatalog, session: &Session) -> ViewModel {
    let selection = &session.selection;
    let editing = selection.active_picker();

    let output_placeholder = match session.status {
        OutputStatus::Idle => IDLE_PLACEHOLDER,
        OutputStatus::Translating => TRANSLATING_PLACEHOLDER,
        OutputStatus::Failed(_) => FAILED_PLACEHOLDER,
    };

    ViewModel {
        source: slot_view(catalog, Slot::Source, selection.source()),
        target: slot_view(catalog, Slot::Target, selection.target()),
        picker: PickerView {
            visible: editing.is_some(),
            editing,
            query: session.query.clone(),
            rows: catalog_rows(catalog.filter(&session.query)),
        },
        input_text: session.input_text.clone(),
        input_revision: session.input_revision,
        output_text: session.output_text.clone(),
        output_placeholder: output_placeholder.to_string(),
        output_status: session.status.clone(),
        mic: session.mic,
        theme: session.theme,
        favorite: session.favorite,
        copy_ack: session.copy_ack,
        share_ack: session.share_ack,
    }
}

pub fn slot_view(catalog: &LanguageCatalog, slot: Slot, code: &str) -> SlotView {
    let key = flag_key(code);

    SlotView {
        code: code.to_string(),
        index: catalog.index_of(code),
        label: catalog
            .display_name(code)
            .unwrap_or_else(|| fallback_label(slot))
            .to_string(),
        flag_url: flag_url(&key),
        flag_key: key,
    }
}

pub fn catalog_rows<'a>(entries: impl IntoIterator<Item = &'a LanguageEntry>) -> Vec<CatalogRow> {
    entries
        .into_iter()
        .map(|e| CatalogRow {
            code: e.code.clone(),
            name: e.name.clone(),
            flag_key: flag_key(&e.code),
        })
        .collect()
}
