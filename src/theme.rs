//! Centralized theme constants for Hourglass Clock
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x0f, 0x0f, 0x12); // near-black surface

// =============================================================================
// COLORS - Glass
// =============================================================================
pub const GLASS_FILL: Color32 = Color32::from_rgba_premultiplied(0x02, 0x03, 0x05, 38); // #0F1724 @ 15%
pub const GLASS_STROKE: Color32 = Color32::from_rgba_premultiplied(0x86, 0x91, 0xae, 179); // #BFCFF8 @ 70%

// =============================================================================
// COLORS - Sand
// =============================================================================
pub const SAND: Color32 = Color32::from_rgb(0xda, 0xa5, 0x20); // goldenrod

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_CLOCK: f32 = 18.0;

// =============================================================================
// DIMENSIONS - Layout
// =============================================================================
pub const WIDGET_SIZE: f32 = 300.0;
pub const WIDGET_MIN_SIZE: f32 = 48.0;
pub const CLOCK_LABEL_TOP: f32 = 18.0;
pub const WINDOW_SIZE: (f32, f32) = (420.0, 460.0);

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: BG_BASE,
        extreme_bg_color: BG_BASE,
        ..egui::Visuals::dark()
    });
}
