use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::{self, MouseButton, Sender},
    browser::HoldBrowser,
    prelude::*,
};

use crate::app::domain::{Document, DocumentId, Message};

/// Sidebar listing open documents in order. Clicking a row activates it,
/// middle-clicking closes it.
pub struct DocumentList {
    browser: HoldBrowser,
    ids: Rc<RefCell<Vec<DocumentId>>>,
}

impl DocumentList {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut browser = HoldBrowser::default();
        browser.set_text_size(14);
        let ids: Rc<RefCell<Vec<DocumentId>>> = Rc::new(RefCell::new(Vec::new()));

        let row_ids = ids.clone();
        browser.set_callback(move |b| {
            // Browser rows are 1-based; 0 means nothing selected.
            let line = b.value();
            if line < 1 {
                return;
            }
            let Some(id) = row_ids.borrow().get(line as usize - 1).copied() else {
                return;
            };
            if app::event_mouse_button() == MouseButton::Middle {
                sender.send(Message::CloseDocument(id));
            } else {
                sender.send(Message::ActivateDocument(id));
            }
        });

        Self { browser, ids }
    }

    pub fn widget(&self) -> &HoldBrowser {
        &self.browser
    }

    pub fn widget_mut(&mut self) -> &mut HoldBrowser {
        &mut self.browser
    }

    /// Rebuild the rows from the store and highlight the active document.
    pub fn rebuild(&mut self, documents: &[Document], active_id: Option<DocumentId>) {
        self.browser.clear();
        let mut ids = self.ids.borrow_mut();
        ids.clear();
        for doc in documents {
            // "@." turns off FLTK's @-formatting for the rest of the line
            self.browser.add(&format!("@.{}", doc.name));
            ids.push(doc.id);
        }
        if let Some(row) = active_id.and_then(|id| ids.iter().position(|d| *d == id)) {
            self.browser.select(row as i32 + 1);
        }
        self.browser.redraw();
    }
}
