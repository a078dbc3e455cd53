//! The single UI state record owned by `Viewer`
//!
//! Fields are only writable from inside the `viewer` module. Everything else
//! reads through the accessors.

/// Load phase of the current mount cycle
///
/// Exactly one phase holds at a time by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Loading,
    Error(String),
    Ready,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub(super) active_section_id: Option<String>,
    pub(super) search_term: String,
    pub(super) load: LoadPhase,
    pub(super) is_mobile_menu_open: bool,
    pub(super) copied_code_id: Option<String>,
}

impl UiState {
    /// Section most recently navigated to
    pub fn active_section_id(&self) -> Option<&str> {
        self.active_section_id.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn load_phase(&self) -> &LoadPhase {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadPhase::Loading
    }

    pub fn loading_error(&self) -> Option<&str> {
        match &self.load {
            LoadPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Not loading and no error
    pub fn is_ready(&self) -> bool {
        self.load == LoadPhase::Ready
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.is_mobile_menu_open
    }

    /// Code block currently showing the copy acknowledgment
    pub fn copied_code_id(&self) -> Option<&str> {
        self.copied_code_id.as_deref()
    }

    pub fn is_copied(&self, code_id: &str) -> bool {
        self.copied_code_id.as_deref() == Some(code_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_loading() {
        let state = UiState::default();
        assert!(state.is_loading());
        assert!(!state.is_ready());
        assert_eq!(state.loading_error(), None);
        assert_eq!(state.active_section_id(), None);
        assert_eq!(state.search_term(), "");
        assert!(!state.is_mobile_menu_open());
        assert_eq!(state.copied_code_id(), None);
    }

    #[test]
    fn test_phase_flags_are_exclusive() {
        let mut state = UiState::default();
        state.load = LoadPhase::Error("boom".to_string());
        assert!(!state.is_loading());
        assert!(!state.is_ready());
        assert_eq!(state.loading_error(), Some("boom"));

        state.load = LoadPhase::Ready;
        assert!(!state.is_loading());
        assert!(state.is_ready());
        assert_eq!(state.loading_error(), None);
    }
}
