//! Contract between the session controller and the embedded editing widget.
//!
//! The controller owns exactly one widget for the lifetime of the session.
//! It is built lazily through a [`WidgetFactory`], re-pointed at whichever
//! document is active, and only ever mutated through idempotent option sets.

use crate::app::domain::{EditorSettings, Language, ResolvedTheme};
use crate::app::services::search::SearchCursor;

/// Called with the full buffer text after every buffer mutation.
pub type ChangeListener = Box<dyn FnMut(&str)>;

/// Options the controller pushes onto the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetOption {
    /// Highlighting mode name, `None` for plain text.
    Mode(Option<&'static str>),
    Theme(ResolvedTheme),
    LineNumbers(bool),
    LineWrapping(bool),
    TabSize(u8),
    IndentWithTabs(bool),
    FontSize(u8),
}

/// Everything the widget needs at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub initial_value: String,
    pub mode: Option<&'static str>,
    pub theme: ResolvedTheme,
    pub line_numbers: bool,
    pub line_wrapping: bool,
    pub tab_size: u8,
    pub indent_with_tabs: bool,
    pub font_size: u8,
}

impl WidgetConfig {
    pub fn new(
        initial_value: String,
        language: Language,
        settings: &EditorSettings,
        theme: ResolvedTheme,
    ) -> Self {
        Self {
            initial_value,
            mode: language.mode(),
            theme,
            line_numbers: settings.line_numbers,
            line_wrapping: settings.line_wrapping,
            tab_size: settings.tab_size,
            indent_with_tabs: settings.indent_with_tabs(),
            font_size: settings.font_size,
        }
    }

    /// The option set equivalent to this configuration.
    pub fn options(&self) -> [WidgetOption; 7] {
        [
            WidgetOption::Mode(self.mode),
            WidgetOption::Theme(self.theme),
            WidgetOption::LineNumbers(self.line_numbers),
            WidgetOption::LineWrapping(self.line_wrapping),
            WidgetOption::TabSize(self.tab_size),
            WidgetOption::IndentWithTabs(self.indent_with_tabs),
            WidgetOption::FontSize(self.font_size),
        ]
    }
}

/// A stateful text-editing widget showing one document at a time.
///
/// Positions are byte offsets into the buffer text and always fall on char
/// boundaries.
pub trait EditorWidget {
    /// Current live buffer text.
    fn value(&self) -> String;

    /// Replace the whole buffer. Fires change listeners.
    fn set_value(&mut self, text: &str);

    fn set_option(&mut self, option: WidgetOption);

    /// Register a listener fired on every buffer mutation.
    fn on_change(&mut self, listener: ChangeListener);

    /// Insertion point (the head of the selection).
    fn cursor(&self) -> usize;

    /// Current selection as `(from, to)` with `from <= to`.
    fn selection(&self) -> (usize, usize);

    fn set_selection(&mut self, from: usize, to: usize);

    /// Scroll so that `pos` is visible with `margin` pixels of context.
    fn scroll_into_view(&mut self, pos: usize, margin: u32);

    /// A search cursor over the current buffer starting at the insertion point.
    fn search_cursor(&self, query: &str) -> SearchCursor {
        SearchCursor::new(self.value(), query, self.cursor())
    }
}

/// Constructs the editing widget. Injected into the controller at startup.
pub trait WidgetFactory {
    fn create(&mut self, config: WidgetConfig) -> Box<dyn EditorWidget>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::ThemePreference;

    #[test]
    fn test_config_from_settings() {
        let settings = EditorSettings {
            font_size: 18,
            tab_size: 4,
            theme: ThemePreference::Light,
            convert_tabs_to_spaces: false,
            line_wrapping: false,
            line_numbers: true,
        };
        let config = WidgetConfig::new(
            "print(1)".into(),
            Language::Python,
            &settings,
            ResolvedTheme::Light,
        );
        assert_eq!(config.mode, Some("python"));
        assert_eq!(config.tab_size, 4);
        assert!(config.indent_with_tabs);
        assert!(!config.line_wrapping);
        assert_eq!(config.font_size, 18);
    }

    #[test]
    fn test_config_options_cover_every_setting() {
        let config = WidgetConfig::new(
            String::new(),
            Language::PlainText,
            &EditorSettings::default(),
            ResolvedTheme::Dark,
        );
        let options = config.options();
        assert!(options.contains(&WidgetOption::Mode(None)));
        assert!(options.contains(&WidgetOption::Theme(ResolvedTheme::Dark)));
        assert!(options.contains(&WidgetOption::TabSize(2)));
        assert!(options.contains(&WidgetOption::IndentWithTabs(false)));
        assert!(options.contains(&WidgetOption::FontSize(16)));
    }
}
