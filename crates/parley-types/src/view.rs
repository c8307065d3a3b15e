use crate::types::{MicState, OutputStatus, Slot, Theme};

/// Everything the window needs to draw one frame of state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub source: SlotView,
    pub target: SlotView,
    pub picker: PickerView,
    pub input_text: String,
    /// Changes only when the input was rewritten by the application
    pub input_revision: u64,
    pub output_text: String,
    pub output_placeholder: String,
    pub output_status: OutputStatus,
    pub mic: MicState,
    pub theme: Theme,
    pub favorite: bool,
    pub copy_ack: bool,
    pub share_ack: bool,
}

impl ViewModel {
    pub fn slot(&self, slot: Slot) -> &SlotView {
        match slot {
            Slot::Source => &self.source,
            Slot::Target => &self.target,
        }
    }
}

/// Dropdown, caption and flag of one language slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub code: String,
    /// Position of `code` in the catalog, drives the dropdown
    pub index: Option<usize>,
    pub label: String,
    pub flag_key: String,
    pub flag_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    pub visible: bool,
    pub editing: Option<Slot>,
    pub query: String,
    pub rows: Vec<CatalogRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub code: String,
    pub name: String,
    pub flag_key: String,
}
