use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::debug;

use crate::controller::Timings;
use crate::models::{ColumnPreset, DEFAULT_BASE_DIR, DEFAULT_PAGE_SIZE};

#[derive(Parser, Debug)]
#[command(name = "gifshelf")]
#[command(version)]
#[command(about = "Browse a shelf of animated GIFs", long_about = None)]
pub struct Cli {
    /// JSON manifest or directory of media (defaults to the current directory)
    pub catalog: Option<PathBuf>,

    /// Directory that relative manifest sources resolve against
    #[arg(long, env = "GIFSHELF_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Deep link to open at startup, e.g. `#gif-12`
    #[arg(long)]
    pub link: Option<String>,

    /// Cards revealed per "load more" step
    #[arg(long, env = "GIFSHELF_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Grid columns (snapped to 2, 3, 4 or 6)
    #[arg(long, env = "GIFSHELF_COLUMNS")]
    pub columns: Option<usize>,

    /// Preferences database (defaults to the user config directory)
    #[arg(long, env = "GIFSHELF_PREFERENCES")]
    pub preferences: Option<PathBuf>,
}

/// Resolved settings for one gallery session.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub catalog_path: PathBuf,
    pub base_dir: PathBuf,
    pub initial_link: Option<String>,
    pub page_size: usize,
    pub columns: ColumnPreset,
    pub preferences_path: Option<PathBuf>,
    pub timings: Timings,
}

impl GalleryConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if cli.page_size == 0 {
            bail!("--page-size must be at least 1");
        }

        let columns = match cli.columns {
            Some(requested) => {
                let preset = ColumnPreset::nearest(requested);
                if preset.count() != requested {
                    debug!(requested, snapped = preset.count(), "Snapped column count");
                }
                preset
            }
            None => ColumnPreset::default(),
        };

        Ok(Self {
            catalog_path: cli.catalog.unwrap_or_else(|| PathBuf::from(".")),
            base_dir: cli
                .base_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR)),
            initial_link: cli.link.filter(|link| !link.trim().is_empty()),
            page_size: cli.page_size,
            columns,
            preferences_path: cli.preferences,
            timings: Timings::default(),
        })
    }
}
