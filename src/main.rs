#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use sketchpad::SketchConfig;

/// Config file read when `SKETCHPAD_CONFIG` is not set
const DEFAULT_CONFIG_PATH: &str = "sketchpad.json";

fn load_config() -> SketchConfig {
    let path = std::env::var_os("SKETCHPAD_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return SketchConfig::default();
    }

    match SketchConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Ignoring {}: {err}", path.display());
            SketchConfig::default()
        }
    }
}

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sketchpad",
        native_options,
        Box::new(|cc| Ok(Box::new(sketchpad::SketchApp::new(cc, config)?))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
