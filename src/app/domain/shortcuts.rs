/// A key as seen by the global shortcut table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Tab,
}

/// Session-level keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NewFile,
    OpenFile,
    SaveFile,
    NextFile,
}

impl Shortcut {
    pub const ALL: [Shortcut; 4] = [
        Shortcut::NewFile,
        Shortcut::OpenFile,
        Shortcut::SaveFile,
        Shortcut::NextFile,
    ];

    /// The key that triggers this shortcut together with Ctrl.
    pub fn key(self) -> Key {
        match self {
            Shortcut::NewFile => Key::Char('n'),
            Shortcut::OpenFile => Key::Char('o'),
            Shortcut::SaveFile => Key::Char('s'),
            Shortcut::NextFile => Key::Tab,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Shortcut::NewFile => "Ctrl+N",
            Shortcut::OpenFile => "Ctrl+O",
            Shortcut::SaveFile => "Ctrl+S",
            Shortcut::NextFile => "Ctrl+Tab",
        }
    }
}
