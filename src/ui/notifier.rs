use fltk::{dialog, frame::Frame, prelude::*};

use crate::app::infrastructure::collaborators::{NoticeLevel, Notifier};

/// Shows notices in the status bar. Errors also raise an alert dialog.
pub struct DialogNotifier {
    status: Frame,
}

impl DialogNotifier {
    pub fn new(status: Frame) -> Self {
        Self { status }
    }
}

impl Notifier for DialogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        let mut status = self.status.clone();
        let prefix = match level {
            NoticeLevel::Success => "\u{2713}",
            NoticeLevel::Info => "\u{2139}",
            NoticeLevel::Error => "\u{2717}",
        };
        status.set_label(&format!(" {prefix} {message}"));
        status.redraw();

        if level == NoticeLevel::Error {
            dialog::alert_default(message);
        }
    }
}
