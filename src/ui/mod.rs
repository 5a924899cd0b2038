pub mod dialogs;
pub mod document_list;
pub mod file_dialogs;
pub mod main_window;
pub mod menu;
pub mod notifier;
pub mod search_bar;
pub mod theme;
