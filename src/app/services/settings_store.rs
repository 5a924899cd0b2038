use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::app::domain::{EditorSettings, ResolvedTheme, ThemePreference};
use crate::app::infrastructure::error::AppError;
use crate::app::infrastructure::platform::ColorSchemeSource;

/// Key of the durable settings entry.
pub const SETTINGS_KEY: &str = "codemate-settings";

/// A durable string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Stores each key as `<key>.json` inside one directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Per-user location (cross-platform): `<config dir>/codemate/`
    pub fn default_location() -> Self {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("codemate");
        Self::new(path)
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and persists [`EditorSettings`] under [`SETTINGS_KEY`].
pub struct SettingsStore {
    backend: Box<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Read the stored settings, falling back to defaults on any problem.
    pub fn load(&self) -> EditorSettings {
        let contents = match self.backend.get(SETTINGS_KEY) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                debug!("no stored settings, using defaults");
                return EditorSettings::default();
            }
            Err(e) => {
                warn!(error = %e, "failed to read settings, using defaults");
                return EditorSettings::default();
            }
        };

        match EditorSettings::from_json(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "discarding stored settings, using defaults");
                EditorSettings::default()
            }
        }
    }

    /// Write the full settings object.
    pub fn save(&mut self, settings: &EditorSettings) -> Result<(), AppError> {
        let json = settings.to_json()?;
        self.backend.set(SETTINGS_KEY, &json)
    }

    /// Resolve the theme preference, asking the OS when it is `Device`.
    pub fn resolve_theme(
        settings: &EditorSettings,
        color_scheme: &dyn ColorSchemeSource,
    ) -> ResolvedTheme {
        match settings.theme {
            ThemePreference::Light => ResolvedTheme::Light,
            ThemePreference::Dark => ResolvedTheme::Dark,
            ThemePreference::Device => ResolvedTheme::from_dark(color_scheme.prefers_dark()),
        }
    }
}
