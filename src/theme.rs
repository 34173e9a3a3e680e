// Dark/light theme preference, persisted through a preference backend.

use tracing::{info, warn};

use crate::models::PreferenceBackend;

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Glyph for the theme toggle: the sun under dark, the moon under light.
    pub fn indicator_glyph(self) -> &'static str {
        match self {
            Self::Dark => "\u{2600}",
            Self::Light => "\u{263E}",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

pub struct ThemeStore<B: PreferenceBackend> {
    backend: B,
    current: Theme,
}

impl<B: PreferenceBackend> ThemeStore<B> {
    /// Read the stored preference once; missing or unreadable values mean dark.
    pub fn load(backend: B) -> Self {
        let current = match backend.get(THEME_KEY) {
            Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
                warn!(value = %value, "Ignoring unknown stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!(error = ?err, "Failed to read theme preference");
                Theme::default()
            }
        };
        Self { backend, current }
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist it. A failed write still flips the session value.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        if let Err(err) = self.backend.set(THEME_KEY, self.current.as_str()) {
            warn!(error = ?err, "Failed to persist theme preference");
        }
        info!(theme = self.current.as_str(), "Theme toggled");
        self.current
    }

    pub fn indicator_glyph(&self) -> &'static str {
        self.current.indicator_glyph()
    }
}
