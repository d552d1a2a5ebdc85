mod app;
mod enrich;
mod layout;
mod lineage;
mod util;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use log::{info, warn};

use crate::enrich::{ImageLookup, WikipediaLookup};
use crate::layout::LayoutConfig;
use crate::lineage::DatasetSource;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Lineage dataset (JSON). Defaults to the bundled dataset.
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// JSON file overriding layout constants.
    #[arg(long)]
    layout_config: Option<PathBuf>,
    /// Skip portrait lookups.
    #[arg(long)]
    offline: bool,
    #[arg(long, default_value_t = 1440.0)]
    window_width: f32,
    #[arg(long, default_value_t = 920.0)]
    window_height: f32,
}

fn layout_config(path: Option<&Path>) -> LayoutConfig {
    let Some(path) = path else {
        return LayoutConfig::default();
    };

    LayoutConfig::load(path).unwrap_or_else(|error| {
        warn!("{error:#}; using default layout constants");
        LayoutConfig::default()
    })
}

fn image_lookup(offline: bool) -> Option<Arc<dyn ImageLookup>> {
    if offline {
        info!("offline mode, portraits disabled");
        return None;
    }

    match WikipediaLookup::new() {
        Ok(lookup) => Some(Arc::new(lookup)),
        Err(error) => {
            warn!("portraits disabled: {error:#}");
            None
        }
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let source = args
        .dataset
        .clone()
        .map_or(DatasetSource::Bundled, DatasetSource::File);
    let layout_config = layout_config(args.layout_config.as_deref());
    let lookup = image_lookup(args.offline);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.window_width, args.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "Stoic lineage",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::LineageApp::new(
                cc,
                source,
                layout_config,
                lookup,
            )))
        }),
    )
}
