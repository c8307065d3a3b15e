use parley_types::Slot;

use crate::catalog::LanguageCatalog;
use crate::error::SelectionError;

/// Source/target languages plus the slot the picker is editing.
///
/// Both codes are always present in the catalog the state was built against;
/// every mutation validates before it writes, so a rejected call leaves the
/// state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    source: String,
    target: String,
    active_picker: Option<Slot>,
}

impl SelectionState {
    pub fn new(
        catalog: &LanguageCatalog,
        source: &str,
        target: &str,
    ) -> Result<Self, SelectionError> {
        for code in [source, target] {
            if !catalog.contains(code) {
                return Err(SelectionError::UnknownLanguage(code.to_string()));
            }
        }

        Ok(Self {
            source: source.to_string(),
            target: target.to_string(),
            active_picker: None,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn code(&self, slot: Slot) -> &str {
        match slot {
            Slot::Source => &self.source,
            Slot::Target => &self.target,
        }
    }

    pub fn active_picker(&self) -> Option<Slot> {
        self.active_picker
    }

    /// Returns whether the code actually changed
    pub fn set(
        &mut self,
        catalog: &LanguageCatalog,
        slot: Slot,
        code: &str,
    ) -> Result<bool, SelectionError> {
        if !catalog.contains(code) {
            return Err(SelectionError::UnknownLanguage(code.to_string()));
        }

        let current = match slot {
            Slot::Source => &mut self.source,
            Slot::Target => &mut self.target,
        };

        if current == code {
            return Ok(false);
        }

        *current = code.to_string();
        Ok(true)
    }

    pub fn set_source(
        &mut self,
        catalog: &LanguageCatalog,
        code: &str,
    ) -> Result<bool, SelectionError> {
        self.set(catalog, Slot::Source, code)
    }

    pub fn set_target(
        &mut self,
        catalog: &LanguageCatalog,
        code: &str,
    ) -> Result<bool, SelectionError> {
        self.set(catalog, Slot::Target, code)
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
    }

    pub fn open_picker(&mut self, slot: Slot) {
        self.active_picker = Some(slot);
    }

    pub fn close_picker(&mut self) {
        self.active_picker = None;
    }

    /// Apply a picker choice to the slot being edited and close the picker.
    ///
    /// Returns the slot that was written, `None` when no picker was open.
    /// An unknown code changes nothing, the picker stays open.
    pub fn pick(
        &mut self,
        catalog: &LanguageCatalog,
        code: &str,
    ) -> Result<Option<Slot>, SelectionError> {
        let Some(slot) = self.active_picker else {
            return Ok(None);
        };

        self.set(catalog, slot, code)?;
        self.active_picker = None;
        Ok(Some(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults(catalog: &LanguageCatalog) -> SelectionState {
        SelectionState::new(catalog, "en-GB", "es-ES").unwrap()
    }

    #[test]
    fn unknown_defaults_are_rejected() {
        let catalog = LanguageCatalog::builtin();
        assert_eq!(
            SelectionState::new(&catalog, "en-GB", "xx-YY"),
            Err(SelectionError::UnknownLanguage("xx-YY".to_string()))
        );
    }

    #[test]
    fn swap_is_its_own_inverse() {
        let catalog = LanguageCatalog::builtin();
        let mut state = defaults(&catalog);
        let before = state.clone();

        state.swap();
        assert_eq!(state.source(), "es-ES");
        assert_eq!(state.target(), "en-GB");

        state.swap();
        assert_eq!(state, before);
    }

    #[test]
    fn swap_never_collapses_distinct_codes() {
        let catalog = LanguageCatalog::builtin();
        for entry in catalog.entries() {
            let mut state = defaults(&catalog);
            state.set_target(&catalog, &entry.code).unwrap();
            let was_equal = state.source() == state.target();

            state.swap();
            assert_eq!(state.source() == state.target(), was_equal);
        }
    }

    #[test]
    fn unknown_code_leaves_state_untouched() {
        let catalog = LanguageCatalog::builtin();
        let mut state = defaults(&catalog);
        state.open_picker(Slot::Target);
        let before = state.clone();

        assert!(state.set_source(&catalog, "xx-yy").is_err());
        assert!(state.set_target(&catalog, "").is_err());
        assert!(state.pick(&catalog, "xx-yy").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn setting_same_code_reports_no_change() {
        let catalog = LanguageCatalog::builtin();
        let mut state = defaults(&catalog);
        assert_eq!(state.set_source(&catalog, "en-GB"), Ok(false));
        assert_eq!(state.set_source(&catalog, "fr-FR"), Ok(true));
        assert_eq!(state.source(), "fr-FR");
    }

    #[test]
    fn pick_writes_only_the_edited_slot() {
        let catalog = LanguageCatalog::builtin();

        let mut state = defaults(&catalog);
        state.open_picker(Slot::Source);
        assert_eq!(state.pick(&catalog, "ja-JP"), Ok(Some(Slot::Source)));
        assert_eq!(state.source(), "ja-JP");
        assert_eq!(state.target(), "es-ES");
        assert_eq!(state.active_picker(), None);

        let mut state = defaults(&catalog);
        state.open_picker(Slot::Target);
        assert_eq!(state.pick(&catalog, "de-DE"), Ok(Some(Slot::Target)));
        assert_eq!(state.source(), "en-GB");
        assert_eq!(state.target(), "de-DE");
        assert_eq!(state.active_picker(), None);
    }

    #[test]
    fn pick_without_open_picker_is_a_no_op() {
        let catalog = LanguageCatalog::builtin();
        let mut state = defaults(&catalog);
        assert_eq!(state.pick(&catalog, "de-DE"), Ok(None));
        assert_eq!(state, defaults(&catalog));
    }

    #[test]
    fn reopening_switches_the_edited_slot() {
        let catalog = LanguageCatalog::builtin();
        let mut state = defaults(&catalog);
        state.open_picker(Slot::Source);
        state.open_picker(Slot::Target);
        assert_eq!(state.active_picker(), Some(Slot::Target));

        state.close_picker();
        assert_eq!(state.active_picker(), None);
        assert_eq!(state.source(), "en-GB");
        assert_eq!(state.target(), "es-ES");
    }
}
