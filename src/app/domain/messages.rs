use super::document::DocumentId;
use super::shortcuts::Shortcut;

/// All messages that can be sent through the FLTK channel.
/// Menu callbacks, the document list and the search bar send these; the
/// dispatch loop in main hands them to the session controller.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    Shortcut(Shortcut),

    // Documents
    ActivateDocument(DocumentId),
    CloseDocument(DocumentId),
    CloseActive,

    // Search
    FocusSearch,
    Search,

    // Settings & app
    OpenSettings,
    FileQuit,
    WindowClose,
}
