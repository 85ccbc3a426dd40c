//! Application constants and configuration

pub const APP_NAME: &str = "Hourglass Clock";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const MILLIS_PER_MINUTE: u32 = 60_000;

/// Wall-clock polling cadence (~60 fps)
pub const DEFAULT_REPAINT_MS: u64 = 16;
pub const MIN_REPAINT_MS: u64 = 4;
pub const MAX_REPAINT_MS: u64 = 1000;

/// Flip animation
pub const FLIP_DEGREES: f32 = 180.0;
pub const FLIP_DURATION_MS: u64 = 700;

/// Falling grains drawn along the stream
pub const GRAIN_COUNT: usize = 7;
