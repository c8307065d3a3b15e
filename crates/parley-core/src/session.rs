use parley_types::{Ack, MicState, OutputStatus, Slot, Theme};
use uuid::Uuid;

use crate::catalog::LanguageCatalog;
use crate::error::SelectionError;
use crate::selection::SelectionState;

/// Everything the widget displays. Owned by the event loop and only
/// mutated from there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub selection: SelectionState,
    /// Picker filter text
    pub query: String,
    pub input_text: String,
    /// Bumped whenever the input changes for a reason other than typing
    pub input_revision: u64,
    pub output_text: String,
    pub status: OutputStatus,
    /// In-flight translation request, results for any other id are stale
    pub pending: Option<Uuid>,
    pub mic: MicState,
    pub theme: Theme,
    pub favorite: bool,
    pub copy_ack: bool,
    pub share_ack: bool,
}

impl Session {
    pub fn new(selection: SelectionState, mic: MicState, theme: Theme) -> Self {
        Self {
            selection,
            query: String::new(),
            input_text: String::new(),
            input_revision: 0,
            output_text: String::new(),
            status: OutputStatus::Idle,
            pending: None,
            mic,
            theme,
            favorite: false,
            copy_ack: false,
            share_ack: false,
        }
    }

    /// Exchange languages and texts together
    pub fn swap(&mut self) {
        self.selection.swap();
        std::mem::swap(&mut self.input_text, &mut self.output_text);
        self.input_revision += 1;
        self.abandon_translation();
    }

    pub fn open_picker(&mut self, slot: Slot) {
        self.selection.open_picker(slot);
        self.query.clear();
    }

    pub fn close_picker(&mut self) {
        self.selection.close_picker();
        self.query.clear();
    }

    pub fn pick(
        &mut self,
        catalog: &LanguageCatalog,
        code: &str,
    ) -> Result<Option<Slot>, SelectionError> {
        let picked = self.selection.pick(catalog, code)?;
        self.query.clear();
        Ok(picked)
    }

    /// Text typed by the user
    pub fn edit_input(&mut self, text: String) {
        self.input_text = text;
    }

    /// Input rewritten by the application, e.g. from a speech transcript
    pub fn replace_input(&mut self, text: String) {
        self.input_text = text;
        self.input_revision += 1;
    }

    pub fn clear_texts(&mut self) {
        self.input_text.clear();
        self.input_revision += 1;
        self.output_text.clear();
        self.abandon_translation();
    }

    /// Mark a translation as in flight and return its request id
    pub fn begin_translation(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.pending = Some(id);
        self.status = OutputStatus::Translating;
        id
    }

    /// Apply a finished translation. Returns false when `id` is stale.
    pub fn finish_translation(&mut self, id: Uuid, result: Result<String, String>) -> bool {
        if self.pending != Some(id) {
            return false;
        }

        match result {
            Ok(text) => {
                self.pending = None;
                self.output_text = text;
                self.status = OutputStatus::Idle;
            }
            Err(reason) => self.fail_translation(reason),
        }
        true
    }

    /// The output no longer matches the input, so it is dropped and the
    /// failure placeholder shows in its place
    pub fn fail_translation(&mut self, reason: String) {
        self.pending = None;
        self.output_text.clear();
        self.status = OutputStatus::Failed(reason);
    }

    pub fn abandon_translation(&mut self) {
        self.pending = None;
        self.status = OutputStatus::Idle;
    }

    pub fn set_ack(&mut self, ack: Ack, on: bool) {
        match ack {
            Ack::Copy => self.copy_ack = on,
            Ack::Share => self.share_ack = on,
        }
    }
}
