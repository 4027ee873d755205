use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::background::BackgroundMode;
use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::piece::PieceKind;
use crate::render::DEFAULT_CELL_SIZE;
use crate::spawner::SpawnMode;
use crate::state::DEFAULT_GRAVITY_INTERVAL;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("settings file {path} not found")]
    Missing { path: PathBuf },
    #[error("failed to write settings to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to serialize settings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Blockfall".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoardSettings {
    pub width: usize,
    pub height: usize,
    pub cell_size: u32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingSettings {
    pub gravity_interval_ms: u64,
    pub frame_budget_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            gravity_interval_ms: DEFAULT_GRAVITY_INTERVAL.as_millis() as u64,
            frame_budget_ms: 16,
        }
    }
}

impl TimingSettings {
    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis(self.gravity_interval_ms)
    }

    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(self.frame_budget_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SpawnSettings {
    pub mode: SpawnMode,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub board: BoardSettings,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub spawn: SpawnSettings,
    #[serde(default)]
    pub background: BackgroundMode,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            window: WindowSettings::default(),
            board: BoardSettings::default(),
            timing: TimingSettings::default(),
            spawn: SpawnSettings::default(),
            background: BackgroundMode::default(),
        }
    }
}

impl GameSettings {
    /// Clamps values into ranges the game can actually run with.
    ///
    /// The board must stay at least 4x2 so every tetromino fits at the spawn point.
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.board.width = self.board.width.clamp(4, 64);
        self.board.height = self.board.height.clamp(2, 64);
        self.board.cell_size = self.board.cell_size.clamp(4, 96);
        self.timing.gravity_interval_ms = self.timing.gravity_interval_ms.max(1);
        self.timing.frame_budget_ms = self.timing.frame_budget_ms.clamp(1, 1000);
        self.window.width = self.window.width.max(1);
        self.window.height = self.window.height.max(1);
        if self.window.title.trim().is_empty() {
            self.window.title = WindowSettings::default().title;
        }
        self
    }
}

fn default_version() -> u32 {
    1
}

const SETTINGS_PATH_VAR: &str = "BLOCKFALL_SETTINGS_PATH";

/// Values given on the command line. Each one that is set wins over the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub seed: Option<u64>,
    pub piece: Option<PieceKind>,
}

impl GameSettings {
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(seed) = overrides.seed {
            self.spawn.seed = Some(seed);
        }
        if let Some(kind) = overrides.piece {
            self.spawn.mode = SpawnMode::Fixed(kind);
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$BLOCKFALL_SETTINGS_PATH`, else `blockfall/settings.json` under the user config dir.
    pub fn from_env() -> Self {
        match std::env::var_os(SETTINGS_PATH_VAR) {
            Some(path) => Self::new(path),
            None => Self::new(user_config_dir().join("blockfall").join("settings.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and sanitizes the settings file. A missing file is `Ok(None)`.
    pub fn try_load(&self) -> Result<Option<GameSettings>, SettingsError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.read_error(source)),
        };
        let settings = serde_json::from_slice::<GameSettings>(&bytes)
            .map_err(|source| self.parse_error(source))?;
        Ok(Some(settings.sanitized()))
    }

    /// Like `try_load`, but a missing file is an error too.
    pub fn load_required(&self) -> Result<GameSettings, SettingsError> {
        self.try_load()?.ok_or_else(|| SettingsError::Missing {
            path: self.path.clone(),
        })
    }

    /// Like `try_load`, but falls back to defaults and logs instead of failing.
    pub fn load(&self) -> GameSettings {
        match self.try_load() {
            Ok(Some(settings)) => settings,
            Ok(None) => GameSettings::default(),
            Err(err) => {
                warn!("{err}; using default settings");
                GameSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &GameSettings) -> Result<(), SettingsError> {
        let text = serde_json::to_string_pretty(settings).map_err(|source| {
            SettingsError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }
        fs::write(&self.path, text).map_err(|source| self.write_error(source))
    }

    fn read_error(&self, source: io::Error) -> SettingsError {
        SettingsError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn parse_error(&self, source: serde_json::Error) -> SettingsError {
        SettingsError::Parse {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> SettingsError {
        SettingsError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

fn user_config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config"),
        None => PathBuf::from("."),
    }
}

/// Settings for one run.
///
/// An explicit `path` must exist and parse. Without one, the default store is read and
/// any problem falls back to defaults. `overrides` are applied last.
pub fn resolve_settings(
    path: Option<&Path>,
    overrides: SettingsOverrides,
) -> Result<GameSettings, SettingsError> {
    let settings = match path {
        Some(path) => SettingsStore::new(path).load_required()?,
        None => {
            let store = SettingsStore::from_env();
            info!("settings from {}", store.path().display());
            store.load()
        }
    };
    Ok(settings.with_overrides(overrides))
}
