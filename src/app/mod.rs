//! App module - contains the main application state and logic

mod views;

use crate::animation::FlipAnimation;
use crate::clock::{ClockSample, MinuteTracker};
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::time::{Duration, Instant};
use tracing::debug;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) settings: Settings,
    pub(crate) sample: ClockSample,
    pub(crate) minute_tracker: MinuteTracker,
    pub(crate) flip: FlipAnimation,
    pub(crate) frame_count: u64,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        Self::with_sample(settings, ClockSample::now())
    }

    pub fn with_sample(settings: Settings, sample: ClockSample) -> Self {
        Self {
            settings,
            sample,
            minute_tracker: MinuteTracker::new(sample.minute),
            flip: FlipAnimation::default(),
            frame_count: 0,
        }
    }

    /// Take a new clock reading; starts a flip when the minute rolled over.
    pub fn tick(&mut self, sample: ClockSample, now: Instant) {
        self.sample = sample;
        self.frame_count = self.frame_count.wrapping_add(1);
        if self.minute_tracker.observe(sample.minute) {
            self.flip.flip(now);
            debug!(
                minute = sample.minute,
                flips = self.flip.flips(),
                toggle = self.minute_tracker.flip(),
                target_deg = self.flip.target(),
                "Minute changed, flipping hourglass"
            );
        }
    }

    pub fn progress(&self) -> f32 {
        self.sample.progress()
    }

    pub fn rotation_degrees(&self, now: Instant) -> f32 {
        self.flip.display_degrees(now)
    }

    pub fn repaint_interval(&self) -> Duration {
        self.settings.repaint_interval()
    }
}
