//! Startup settings read from settings.json in the app data directory.
//! The file is never written; edit it by hand and restart.

use crate::constants::{DEFAULT_REPAINT_MS, MAX_REPAINT_MS, MIN_REPAINT_MS};
use crate::theme;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_w: f32,
    pub window_h: f32,

    // Hourglass
    pub widget_size: f32,
    pub show_time_label: bool,

    // Wall-clock polling cadence
    pub repaint_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_w: theme::WINDOW_SIZE.0,
            window_h: theme::WINDOW_SIZE.1,
            widget_size: theme::WIDGET_SIZE,
            show_time_label: true,
            repaint_ms: DEFAULT_REPAINT_MS,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<Settings>(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings.sanitized()
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with something drawable
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.widget_size.is_finite() || self.widget_size < theme::WIDGET_MIN_SIZE {
            warn!(widget_size = self.widget_size, "Widget size out of range, using default");
            self.widget_size = defaults.widget_size;
        }
        if !self.window_w.is_finite() || self.window_w <= 0.0 {
            self.window_w = defaults.window_w;
        }
        if !self.window_h.is_finite() || self.window_h <= 0.0 {
            self.window_h = defaults.window_h;
        }
        self.repaint_ms = self.repaint_ms.clamp(MIN_REPAINT_MS, MAX_REPAINT_MS);
        self
    }

    pub fn repaint_interval(&self) -> Duration {
        Duration::from_millis(self.repaint_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"widget_size": 220.0, "show_time_label": false}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.widget_size, 220.0);
        assert!(!settings.show_time_label);
        assert_eq!(settings.repaint_ms, DEFAULT_REPAINT_MS);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"widget_size": 2.0, "window_w": -1.0, "repaint_ms": 0}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.widget_size, theme::WIDGET_SIZE);
        assert_eq!(settings.window_w, theme::WINDOW_SIZE.0);
        assert_eq!(settings.repaint_interval(), Duration::from_millis(MIN_REPAINT_MS));
    }

    #[test]
    fn loading_never_writes_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"repaint_ms": 0}"#).unwrap();
        Settings::load(dir.path());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"repaint_ms": 0}"#);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        let empty = tempdir().unwrap();
        Settings::load(empty.path());
        assert_eq!(std::fs::read_dir(empty.path()).unwrap().count(), 0);
    }
}
