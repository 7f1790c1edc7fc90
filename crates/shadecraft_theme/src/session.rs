//! Editor session state
//!
//! Owned by the application root and passed to whatever needs it. Nothing here
//! is persisted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tokens::ColorMode;

/// Which mode is being edited and which panels are showing.
///
/// At most one of the export and generate panels is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSessionState {
    pub mode: ColorMode,
    pub export_panel_open: bool,
    pub ai_panel_open: bool,
    pub fullscreen: bool,
}

impl UiSessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_mode(&mut self) -> ColorMode {
        self.mode = self.mode.toggle();
        debug!(mode = %self.mode, "editing mode changed");
        self.mode
    }

    pub fn open_export_panel(&mut self) {
        self.ai_panel_open = false;
        self.export_panel_open = true;
    }

    pub fn close_export_panel(&mut self) {
        self.export_panel_open = false;
    }

    pub fn open_ai_panel(&mut self) {
        self.export_panel_open = false;
        self.ai_panel_open = true;
    }

    pub fn close_ai_panel(&mut self) {
        self.ai_panel_open = false;
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_light_mode_with_panels_closed() {
        let state = UiSessionState::new();
        assert_eq!(state.mode, ColorMode::Light);
        assert!(!state.export_panel_open && !state.ai_panel_open && !state.fullscreen);
    }

    #[test]
    fn panels_are_exclusive() {
        let mut state = UiSessionState::new();
        state.open_export_panel();
        state.open_ai_panel();
        assert!(state.ai_panel_open);
        assert!(!state.export_panel_open);

        state.open_export_panel();
        assert!(!state.ai_panel_open);
        state.close_export_panel();
        assert!(!state.export_panel_open);
    }

    #[test]
    fn toggles_flip_back() {
        let mut state = UiSessionState::new();
        assert_eq!(state.toggle_mode(), ColorMode::Dark);
        assert_eq!(state.toggle_mode(), ColorMode::Light);
        assert!(state.toggle_fullscreen());
        assert!(!state.toggle_fullscreen());
    }
}
