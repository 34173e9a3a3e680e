mod app;
mod config;
mod controller;
mod image_loader;
mod layout;
mod link;
mod models;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use app::GalleryApp;
use config::{Cli, GalleryConfig};
use models::{Catalog, MemoryPreferences, PreferenceBackend, PreferenceStore};

fn main() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "gifshelf=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            error!("{:#}", err);
            eprintln!("gifshelf: {:#}", err);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let config = GalleryConfig::from_cli(Cli::parse())?;

    let catalog = Catalog::load(&config.catalog_path, &config.base_dir)
        .with_context(|| format!("Failed to load catalog {:?}", config.catalog_path))?;
    info!(
        items = catalog.len(),
        base_dir = %catalog.base_dir().display(),
        "Loaded catalog"
    );

    let preferences = open_preferences(&config);
    let app = GalleryApp::new(config, catalog, preferences);
    Ok(app.run())
}

/// Open the preference database, falling back to a session-only store.
fn open_preferences(config: &GalleryConfig) -> Box<dyn PreferenceBackend> {
    let opened = match config.preferences_path.as_deref() {
        Some(path) => PreferenceStore::open(path),
        None => PreferenceStore::open_default(),
    };
    match opened {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(error = ?err, "Failed to open preferences, theme will not persist");
            Box::new(MemoryPreferences::default())
        }
    }
}
