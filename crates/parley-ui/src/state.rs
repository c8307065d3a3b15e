use std::collections::HashMap;

use parley_types::ViewModel;
use slint::Image;

/// Window-side bookkeeping that never leaves the UI thread
#[derive(Default)]
pub struct UiState {
    /// Dropdown index to language code
    pub codes: Vec<String>,
    /// Decoded flags by region key
    pub flags: HashMap<String, Image>,
    /// Last view applied to the window
    pub last: Option<ViewModel>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code_at(&self, index: i32) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.codes.get(i))
            .map(String::as_str)
    }

    pub fn flag(&self, key: &str) -> Image {
        self.flags.get(key).cloned().unwrap_or_default()
    }
}
