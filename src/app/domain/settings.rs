use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::app::infrastructure::error::AppError;

pub const FONT_SIZE_RANGE: RangeInclusive<u8> = 8..=48;
pub const TAB_SIZE_RANGE: RangeInclusive<u8> = 1..=8;

/// The theme the user picked. `Device` follows the OS preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    Device,
}

impl ThemePreference {
    pub fn all() -> &'static [ThemePreference] {
        &[Self::Light, Self::Dark, Self::Device]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Device => "System Preference",
        }
    }
}

/// A theme after `Device` has been resolved against the OS signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Name of the widget color theme used for this mode.
    pub fn widget_theme(self) -> &'static str {
        match self {
            Self::Light => "eclipse",
            Self::Dark => "material",
        }
    }
}

/// Editor configuration, persisted as a versionless JSON object.
///
/// Every field is required on load; a blob that is missing a field or holds
/// an out-of-range value is discarded as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    pub font_size: u8,
    pub tab_size: u8,
    pub theme: ThemePreference,
    pub convert_tabs_to_spaces: bool,
    pub line_wrapping: bool,
    pub line_numbers: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_size: 16,
            tab_size: 2,
            theme: ThemePreference::Dark,
            convert_tabs_to_spaces: true,
            line_wrapping: true,
            line_numbers: true,
        }
    }
}

impl EditorSettings {
    /// Check every ranged field.
    pub fn validate(&self) -> Result<(), AppError> {
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err(AppError::Settings(format!(
                "fontSize {} outside {}..={}",
                self.font_size,
                FONT_SIZE_RANGE.start(),
                FONT_SIZE_RANGE.end()
            )));
        }
        if !TAB_SIZE_RANGE.contains(&self.tab_size) {
            return Err(AppError::Settings(format!(
                "tabSize {} outside {}..={}",
                self.tab_size,
                TAB_SIZE_RANGE.start(),
                TAB_SIZE_RANGE.end()
            )));
        }
        Ok(())
    }

    /// Parse and validate a persisted blob.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The widget inserts real tabs unless tabs are converted to spaces.
    pub fn indent_with_tabs(&self) -> bool {
        !self.convert_tabs_to_spaces
    }
}
