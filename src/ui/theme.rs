use fltk::{
    browser::HoldBrowser,
    button::Button,
    enums::Color,
    frame::Frame,
    input::Input,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::domain::ResolvedTheme;

use super::main_window::MainWidgets;

/// Handles to every widget whose colors follow the resolved theme. The
/// editing widget is themed by the session controller itself.
#[derive(Clone)]
pub struct Chrome {
    window: Window,
    menu: MenuBar,
    list: HoldBrowser,
    search_input: Input,
    search_button: Button,
    status: Frame,
}

impl Chrome {
    pub fn from_widgets(widgets: &mut MainWidgets) -> Self {
        Self {
            window: widgets.wind.clone(),
            menu: widgets.menu.clone(),
            list: widgets.document_list.widget_mut().clone(),
            search_input: widgets.search_bar.input_mut().clone(),
            search_button: widgets.search_bar.button_mut().clone(),
            status: widgets.status.clone(),
        }
    }

    pub fn apply(&mut self, theme: ResolvedTheme) {
        if theme.is_dark() {
            self.window.set_color(Color::from_rgb(25, 25, 25));
            self.window.set_label_color(Color::from_rgb(220, 220, 220));
            self.menu.set_color(Color::from_rgb(35, 35, 35));
            self.menu.set_text_color(Color::from_rgb(220, 220, 220));
            self.menu.set_selection_color(Color::from_rgb(60, 60, 60));
            self.list.set_color(Color::from_rgb(30, 30, 30));
            self.list.set_text_color(Color::from_rgb(220, 220, 220));
            self.list.set_selection_color(Color::from_rgb(70, 70, 100));
            self.search_input.set_color(Color::from_rgb(40, 40, 40));
            self.search_input.set_text_color(Color::from_rgb(220, 220, 220));
            self.search_input.set_cursor_color(Color::from_rgb(255, 255, 255));
            self.search_button.set_color(Color::from_rgb(50, 50, 50));
            self.search_button.set_label_color(Color::from_rgb(220, 220, 220));
            self.status.set_color(Color::from_rgb(35, 35, 35));
            self.status.set_label_color(Color::from_rgb(200, 200, 200));
        } else {
            self.window.set_color(Color::from_rgb(240, 240, 240));
            self.window.set_label_color(Color::Black);
            self.menu.set_color(Color::from_rgb(240, 240, 240));
            self.menu.set_text_color(Color::Black);
            self.menu.set_selection_color(Color::from_rgb(200, 200, 200));
            self.list.set_color(Color::White);
            self.list.set_text_color(Color::Black);
            self.list.set_selection_color(Color::from_rgb(173, 216, 230));
            self.search_input.set_color(Color::White);
            self.search_input.set_text_color(Color::Black);
            self.search_input.set_cursor_color(Color::Black);
            self.search_button.set_color(Color::from_rgb(225, 225, 225));
            self.search_button.set_label_color(Color::Black);
            self.status.set_color(Color::from_rgb(230, 230, 230));
            self.status.set_label_color(Color::from_rgb(60, 60, 60));
        }

        self.window.redraw();
    }
}
