use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::view::{CatalogRow, ViewModel};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// User intent coming from the window
    Ui(UiEvent),
    /// Full language list for the dropdowns, sent once at startup
    CatalogLoaded(Vec<CatalogRow>),
    /// Fresh view model for the window
    Render(ViewModel),
    /// Decoded flag image for a region key
    FlagLoaded {
        key: String,
        pixels: FlagPixels,
    },
    TranslationFinished {
        request_id: Uuid,
        result: Result<String, String>,
    },
    /// Recognition session `session` ended, with or without a transcript
    TranscriptReady {
        session: u64,
        result: Result<Option<String>, String>,
    },
    /// Output reached the clipboard, light up the matching acknowledgment
    Delivered(Ack),
    AckExpired(Ack),
    /// Auto-translate quiet period elapsed for the given generation
    DebounceElapsed(u64),
    BackendReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SelectLanguage { slot: Slot, code: String },
    Swap,
    OpenPicker(Slot),
    PickLanguage(String),
    ClosePicker,
    FilterCatalog(String),
    InputChanged(String),
    ClearInput,
    Translate,
    SpeakInput,
    SpeakOutput,
    ToggleMic,
    CopyOutput,
    ShareOutput,
    ToggleFavorite,
    ToggleTheme,
}

/// Which of the two language selections an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Source,
    Target,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicState {
    /// No recognizer available on this machine
    Unsupported,
    Idle,
    Listening,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputStatus {
    #[default]
    Idle,
    Translating,
    Failed(String),
}

/// Short-lived success indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    Copy,
    Share,
}

/// RGBA8 pixels of a decoded flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagPixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}
