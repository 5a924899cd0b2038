use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::{self, Message};

/// FLTK accelerator for a session shortcut (always Ctrl + key).
pub fn accelerator(shortcut: domain::Shortcut) -> Shortcut {
    match shortcut.key() {
        domain::Key::Char(c) => Shortcut::Ctrl | c,
        domain::Key::Tab => Shortcut::Ctrl | Key::Tab,
    }
}

fn menu_path(shortcut: domain::Shortcut) -> &'static str {
    match shortcut {
        domain::Shortcut::NewFile => "File/New",
        domain::Shortcut::OpenFile => "File/Open...",
        domain::Shortcut::SaveFile => "File/Save",
        domain::Shortcut::NextFile => "File/Next File",
    }
}

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>) {
    let s = sender;

    // File
    for shortcut in domain::Shortcut::ALL {
        menu.add(menu_path(shortcut), accelerator(shortcut), MenuFlag::Normal, {
            let s = *s;
            move |_| s.send(Message::Shortcut(shortcut))
        });
    }
    menu.add("File/Close File", Shortcut::Ctrl | 'w', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::CloseActive) });
    menu.add("File/Settings...", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::OpenSettings) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // Edit
    menu.add("Edit/Find...", Shortcut::Ctrl | 'f', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FocusSearch) });
    menu.add("Edit/Find Next", Shortcut::from_key(Key::F3), MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Search) });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accelerators_use_ctrl() {
        assert_eq!(accelerator(domain::Shortcut::NewFile), Shortcut::Ctrl | 'n');
        assert_eq!(accelerator(domain::Shortcut::SaveFile), Shortcut::Ctrl | 's');
        assert_eq!(accelerator(domain::Shortcut::NextFile), Shortcut::Ctrl | Key::Tab);
    }
}
