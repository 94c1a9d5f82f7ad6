use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{config::normalize_server_url, load_settings, ClientSettings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::SwipeApp;

#[derive(Parser, Debug)]
#[command(about = "Swipe through recommended events")]
struct Args {
    /// Settings file (defaults to ./swipe.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    access_token: Option<String>,
}

fn resolve_settings(args: Args) -> ClientSettings {
    let mut settings = load_settings(args.config.as_deref());
    if let Some(server_url) = args.server_url {
        settings.server_url = normalize_server_url(&server_url);
    }
    if let Some(token) = args.access_token {
        settings.access_token = Some(token);
    }
    settings
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let settings = resolve_settings(Args::parse());
    let swipe_threshold = settings.swipe_threshold;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Event Swipe")
            .with_inner_size([520.0, 760.0])
            .with_min_inner_size([440.0, 660.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Event Swipe",
        options,
        Box::new(move |_cc| Ok(Box::new(SwipeApp::bootstrap(cmd_tx, ui_rx, swipe_threshold)))),
    )
}
