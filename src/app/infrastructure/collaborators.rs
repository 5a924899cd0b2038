//! Host services the session controller talks to: file import, file export
//! and user notifications.

use std::cell::RefCell;
use std::rc::Rc;

use super::error::Result;

/// File extensions offered by the import picker.
pub const ACCEPTED_EXTENSIONS: [&str; 7] = ["txt", "js", "html", "css", "py", "php", "sql"];

/// Picker filter covering [`ACCEPTED_EXTENSIONS`].
pub fn import_filter() -> String {
    format!("*.{{{}}}", ACCEPTED_EXTENSIONS.join(","))
}

/// A file chosen by the user, read as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    pub name: String,
    pub content: String,
}

/// A document to hand to the user as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub name: String,
    pub content: String,
    pub mime: &'static str,
}

/// Lets the user choose a file and reads it.
pub trait FilePicker {
    /// `Ok(None)` when the user cancelled.
    fn pick(&self) -> Result<Option<ImportedFile>>;
}

/// Writes a document wherever the user wants it.
pub trait Exporter {
    /// `Ok(false)` when the user cancelled.
    fn export(&self, request: &ExportRequest) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient, user-visible messages.
pub trait Notifier {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Keeps every notice in memory. Clones share the log.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Rc<RefCell<Vec<(NoticeLevel, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.borrow().clone()
    }

    pub fn last(&self) -> Option<(NoticeLevel, String)> {
        self.notices.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.notices.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_filter_lists_every_extension() {
        assert_eq!(import_filter(), "*.{txt,js,html,css,py,php,sql}");
    }

    #[test]
    fn test_recording_notifier_shares_log() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();
        notifier.notify(NoticeLevel::Info, "hello");
        notifier.notify(NoticeLevel::Error, "boom");
        assert_eq!(handle.notices().len(), 2);
        assert_eq!(handle.last(), Some((NoticeLevel::Error, "boom".to_string())));
        handle.clear();
        assert!(notifier.notices().is_empty());
    }
}
