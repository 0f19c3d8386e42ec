//! Light list panel - egui front end for the lister

mod app;

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::settings::Settings;

/// Run the panel with an optional scene description
pub fn run(initial_scene: Option<PathBuf>) -> Result<()> {
    // eframe and winit report through `log`
    env_logger::init();

    let trace_guard = init_tracing();
    let settings = Settings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([240.0, 200.0])
            .with_title("Light Preset Editor"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Light Preset Editor",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::LightListerApp::new(
                cc,
                settings,
                initial_scene,
                trace_guard,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run: {}", e))
}

/// Console tracing, plus a Chrome trace file when `LIGHT_LISTER_TRACE=1`
fn init_tracing() -> Option<tracing_chrome::FlushGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (chrome_layer, guard) = if std::env::var("LIGHT_LISTER_TRACE").ok().as_deref() == Some("1") {
        let (layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
            .file("trace.json")
            .build();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(chrome_layer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return None;
    }

    guard
}
