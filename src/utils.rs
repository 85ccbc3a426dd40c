//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;

// Square viewBox, used for the window/taskbar icon
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect width="64" height="64" rx="12" fill="#0f0f12"/><path d="M18 10h28M18 54h28" stroke="#bfcff8" stroke-width="3" stroke-linecap="round"/><path d="M20 12c0 10 8 16 10 20c-2 4-10 10-10 20h24c0-10-8-16-10-20c2-4 10-10 10-20z" fill="none" stroke="#bfcff8" stroke-width="2.5" stroke-linejoin="round"/><path d="M23 18h18c-2 5-6 9-9 11c-3-2-7-6-9-11z" fill="#daa520"/><path d="M32 34v10M22 50c2-4 6-6 10-6s8 2 10 6z" fill="#daa520" stroke="#daa520" stroke-width="1.5"/></svg>"##;

/// Rasterize the icon SVG to a square image (for window/taskbar icons).
/// Returns straight-alpha RGBA pixels.
pub fn rasterize_icon(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory path (settings and logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}
