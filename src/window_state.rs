//! Persisted window position, size and maximized state
//!
//! GUI adapters implement [`WindowGeometry`] for their window type;
//! [`StoredWindowState`] is plain serde data that can be saved with
//! [`Configuration`](crate::config::Configuration).

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::window::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowMode {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// The minimal window surface needed to store and restore geometry
pub trait WindowGeometry {
    fn position(&self) -> (f64, f64);
    fn set_position(&mut self, x: f64, y: f64);
    fn size(&self) -> (f64, f64);
    fn set_size(&mut self, width: f64, height: f64);
    fn mode(&self) -> WindowMode;
    fn set_mode(&mut self, mode: WindowMode);
}

/// Window geometry as saved between sessions
///
/// `x`/`y` stay `None` until a normal window has been stored, so a first run
/// leaves placement to the window system. The `restored_*` bounds are the
/// last normal bounds and are applied underneath a maximized window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredWindowState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub width: f64,
    pub height: f64,
    pub restored_x: f64,
    pub restored_y: f64,
    pub restored_width: f64,
    pub restored_height: f64,
    pub maximized: bool,
}

impl Default for StoredWindowState {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl StoredWindowState {
    pub fn new(initial_width: f64, initial_height: f64) -> Self {
        Self {
            x: None,
            y: None,
            width: initial_width,
            height: initial_height,
            restored_x: 0.0,
            restored_y: 0.0,
            restored_width: initial_width,
            restored_height: initial_height,
            maximized: false,
        }
    }

    /// Capture the current geometry of `window`
    ///
    /// A minimized window keeps the previous bounds and clears the maximized
    /// flag. A maximized window only sets the flag.
    pub fn store<W: WindowGeometry + ?Sized>(&mut self, window: &W) {
        self.maximized = false;
        match window.mode() {
            WindowMode::Minimized => {
                debug!("Window minimized, keeping previous bounds");
            }
            WindowMode::Normal => {
                let (x, y) = window.position();
                let (width, height) = window.size();
                self.x = Some(x);
                self.y = Some(y);
                self.width = width;
                self.height = height;
                self.restored_x = x;
                self.restored_y = y;
                self.restored_width = width;
                self.restored_height = height;
                debug!(x, y, width, height, "Stored window bounds");
            }
            WindowMode::Maximized => {
                self.maximized = true;
                debug!("Stored maximized window");
            }
        }
    }

    /// Apply the stored geometry to `window`
    pub fn restore<W: WindowGeometry + ?Sized>(&self, window: &mut W) {
        if self.maximized {
            window.set_position(self.restored_x, self.restored_y);
            window.set_size(self.restored_width, self.restored_height);
            window.set_mode(WindowMode::Maximized);
            info!(
                x = self.restored_x,
                y = self.restored_y,
                width = self.restored_width,
                height = self.restored_height,
                "Restored maximized window"
            );
            return;
        }

        if let (Some(x), Some(y)) = (self.x, self.y) {
            window.set_position(x, y);
        }
        window.set_size(self.width, self.height);
        info!(x = ?self.x, y = ?self.y, width = self.width, height = self.height, "Restored window");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Configuration, JsonSerializer};

    #[derive(Debug, Default)]
    struct FakeWindow {
        position: (f64, f64),
        size: (f64, f64),
        mode: WindowMode,
        moves: usize,
    }

    impl WindowGeometry for FakeWindow {
        fn position(&self) -> (f64, f64) {
            self.position
        }

        fn set_position(&mut self, x: f64, y: f64) {
            self.position = (x, y);
            self.moves += 1;
        }

        fn size(&self) -> (f64, f64) {
            self.size
        }

        fn set_size(&mut self, width: f64, height: f64) {
            self.size = (width, height);
        }

        fn mode(&self) -> WindowMode {
            self.mode
        }

        fn set_mode(&mut self, mode: WindowMode) {
            self.mode = mode;
        }
    }

    fn window(x: f64, y: f64, width: f64, height: f64, mode: WindowMode) -> FakeWindow {
        FakeWindow {
            position: (x, y),
            size: (width, height),
            mode,
            moves: 0,
        }
    }

    #[test]
    fn test_store_normal_window() {
        let mut state = StoredWindowState::new(640.0, 480.0);
        state.store(&window(10.0, 20.0, 300.0, 200.0, WindowMode::Normal));

        assert_eq!((state.x, state.y), (Some(10.0), Some(20.0)));
        assert_eq!((state.width, state.height), (300.0, 200.0));
        assert_eq!((state.restored_x, state.restored_y), (10.0, 20.0));
        assert_eq!((state.restored_width, state.restored_height), (300.0, 200.0));
        assert!(!state.maximized);
    }

    #[test]
    fn test_store_ignores_minimized_bounds() {
        let mut state = StoredWindowState::new(640.0, 480.0);
        state.store(&window(10.0, 20.0, 300.0, 200.0, WindowMode::Normal));
        state.store(&window(-32000.0, -32000.0, 160.0, 28.0, WindowMode::Minimized));

        assert_eq!((state.x, state.y), (Some(10.0), Some(20.0)));
        assert_eq!((state.width, state.height), (300.0, 200.0));
        assert!(!state.maximized);
    }

    #[test]
    fn test_store_maximized_only_sets_flag() {
        let mut state = StoredWindowState::new(640.0, 480.0);
        state.store(&window(10.0, 20.0, 300.0, 200.0, WindowMode::Normal));
        state.store(&window(0.0, 0.0, 1920.0, 1080.0, WindowMode::Maximized));

        assert!(state.maximized);
        assert_eq!((state.restored_width, state.restored_height), (300.0, 200.0));
        assert_eq!((state.width, state.height), (300.0, 200.0));
    }

    #[test]
    fn test_restore_maximized_applies_restored_bounds() {
        let mut state = StoredWindowState::new(640.0, 480.0);
        state.store(&window(10.0, 20.0, 300.0, 200.0, WindowMode::Normal));
        state.store(&window(0.0, 0.0, 1920.0, 1080.0, WindowMode::Maximized));

        let mut target = FakeWindow::default();
        state.restore(&mut target);
        assert_eq!(target.position, (10.0, 20.0));
        assert_eq!(target.size, (300.0, 200.0));
        assert_eq!(target.mode, WindowMode::Maximized);
    }

    #[test]
    fn test_restore_without_position_only_sizes() {
        let state = StoredWindowState::new(640.0, 480.0);
        let mut target = window(5.0, 6.0, 1.0, 1.0, WindowMode::Normal);
        state.restore(&mut target);

        assert_eq!(target.moves, 0);
        assert_eq!(target.position, (5.0, 6.0));
        assert_eq!(target.size, (640.0, 480.0));
        assert_eq!(target.mode, WindowMode::Normal);
    }

    #[test]
    fn test_round_trip_through_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window.json");

        let mut state = StoredWindowState::default();
        state.store(&window(50.0, 60.0, 1024.0, 768.0, WindowMode::Normal));
        Configuration::new(state.clone(), &path, JsonSerializer::default())
            .save()
            .unwrap();

        let loaded: Configuration<StoredWindowState> = Configuration::load_from_file(&path, JsonSerializer::default());
        assert_eq!(*loaded, state);

        let mut target = FakeWindow::default();
        loaded.restore(&mut target);
        assert_eq!(target.position, (50.0, 60.0));
        assert_eq!(target.size, (1024.0, 768.0));
    }

    #[test]
    fn test_unset_position_is_omitted_from_json() {
        let json = serde_json::to_string(&StoredWindowState::default()).unwrap();
        assert!(!json.contains("\"x\""));
        let back: StoredWindowState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.x, None);
        assert_eq!(back.width, 800.0);
    }
}
