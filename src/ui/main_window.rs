use fltk::{
    app::Sender,
    enums::{Align, FrameType},
    frame::Frame,
    group::{Flex, Group},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::domain::Message;

use super::document_list::DocumentList;
use super::search_bar::SearchBar;

pub const APP_NAME: &str = "CodeMate";
const DOCUMENT_LIST_WIDTH: i32 = 200;
const STATUS_BAR_HEIGHT: i32 = 24;

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub document_list: DocumentList,
    pub search_bar: SearchBar,
    /// Empty group the editing widget is built into.
    pub editor_area: Group,
    pub status: Frame,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 960, 640, APP_NAME);
    wind.set_xclass(APP_NAME);

    let mut flex = Flex::new(0, 0, 960, 640, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let mut body = Flex::default();
    body.set_type(fltk::group::FlexType::Row);

    let document_list = DocumentList::new(*sender);
    body.fixed(document_list.widget(), DOCUMENT_LIST_WIDTH);

    let mut editor_column = Flex::default();
    editor_column.set_type(fltk::group::FlexType::Column);
    let search_bar = SearchBar::new(*sender);
    editor_column.fixed(search_bar.widget(), 30);
    let editor_area = Group::default();
    editor_area.end();
    editor_column.end();

    body.end();

    let mut status = Frame::default();
    status.set_frame(FrameType::FlatBox);
    status.set_align(Align::Left | Align::Inside);
    status.set_label_size(13);
    flex.fixed(&status, STATUS_BAR_HEIGHT);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    MainWidgets {
        wind,
        menu,
        document_list,
        search_bar,
        editor_area,
        status,
    }
}
