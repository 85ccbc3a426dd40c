#![windows_subsystem = "windows"]
//! Hourglass Clock - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod animation;
mod app;
mod clock;
mod constants;
mod hourglass;
mod settings;
mod theme;
mod utils;

use app::App;
use clock::ClockSample;
use constants::*;
use eframe::egui;
use std::time::Instant;
use tracing::{debug, info, warn};
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, EnvFilter, prelude::*};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "hourglass-clock.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hourglass_clock=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Hourglass Clock starting");

    let settings = settings::Settings::load(&data_dir);
    debug!(
        widget_size = settings.widget_size,
        repaint_ms = settings.repaint_ms,
        "Using settings"
    );

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(settings.window_w, settings.window_h))
        .with_min_inner_size([theme::WIDGET_MIN_SIZE * 2.0, theme::WIDGET_MIN_SIZE * 2.0])
        .with_title(APP_NAME);

    // Set window/taskbar icon from the bundled SVG
    match utils::rasterize_icon(64) {
        Some((rgba, width, height)) => {
            let icon = egui::IconData { rgba, width, height };
            viewport = viewport.with_icon(std::sync::Arc::new(icon));
        }
        None => warn!("Failed to rasterize window icon"),
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, settings)))),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.tick(ClockSample::now(), now);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| {
                self.render_clock(ui, now);
            });

        // Keep polling the wall clock; run flat out while the glass turns
        if self.flip.is_running(now) {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.repaint_interval());
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(
            frames = self.frame_count,
            flips = self.flip.flips(),
            "Application shutting down"
        );
    }
}
