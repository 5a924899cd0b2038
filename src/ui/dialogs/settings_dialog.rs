use fltk::{
    button::{Button, CheckButton, RadioRoundButton},
    enums::Align,
    frame::Frame,
    group::Group,
    misc::Spinner,
    prelude::*,
    window::Window,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::domain::settings::{FONT_SIZE_RANGE, TAB_SIZE_RANGE};
use crate::app::domain::{EditorSettings, ThemePreference};

fn section_label(y: i32, label: &str) {
    Frame::default()
        .with_pos(15, y)
        .with_size(320, 25)
        .with_label(label)
        .with_align(Align::Left | Align::Inside);
}

fn spinner(y: i32, range: std::ops::RangeInclusive<u8>, value: u8) -> Spinner {
    let mut spinner = Spinner::default().with_pos(30, y).with_size(80, 25);
    spinner.set_range(f64::from(*range.start()), f64::from(*range.end()));
    spinner.set_step(1.0);
    spinner.set_value(f64::from(value));
    spinner
}

/// Show the editor settings dialog and return the new settings if the user
/// clicked Save.
pub fn show_settings_dialog(current: &EditorSettings) -> Option<EditorSettings> {
    let mut dialog = Window::default()
        .with_size(350, 420)
        .with_label("Settings")
        .center_screen();
    dialog.make_modal(true);

    section_label(15, "Theme:");
    let theme_group = Group::default().with_pos(30, 45).with_size(280, 75);
    let mut theme_buttons: Vec<(ThemePreference, RadioRoundButton)> = ThemePreference::all()
        .iter()
        .enumerate()
        .map(|(i, theme)| {
            let button = RadioRoundButton::default()
                .with_pos(30, 45 + 25 * i as i32)
                .with_size(280, 25)
                .with_label(theme.display_name());
            (*theme, button)
        })
        .collect();
    theme_group.end();
    for (theme, button) in theme_buttons.iter_mut() {
        button.set_value(*theme == current.theme);
    }

    section_label(130, "Font Size:");
    let font_size = spinner(155, FONT_SIZE_RANGE, current.font_size);

    section_label(190, "Tab Size:");
    let tab_size = spinner(215, TAB_SIZE_RANGE, current.tab_size);

    section_label(250, "Editing:");
    let mut check_spaces = CheckButton::default()
        .with_pos(30, 275)
        .with_size(280, 25)
        .with_label("Convert tabs to spaces");
    check_spaces.set_value(current.convert_tabs_to_spaces);
    let mut check_wrap = CheckButton::default()
        .with_pos(30, 300)
        .with_size(280, 25)
        .with_label("Line wrapping");
    check_wrap.set_value(current.line_wrapping);
    let mut check_numbers = CheckButton::default()
        .with_pos(30, 325)
        .with_size(280, 25)
        .with_label("Line numbers");
    check_numbers.set_value(current.line_numbers);

    let mut save_btn = Button::default().with_pos(150, 380).with_size(90, 30).with_label("Save");
    let mut cancel_btn = Button::default().with_pos(250, 380).with_size(90, 30).with_label("Cancel");

    dialog.end();
    dialog.show();

    let result = Rc::new(RefCell::new(None));

    let result_save = result.clone();
    let dialog_save = dialog.clone();
    save_btn.set_callback(move |_| {
        let theme = theme_buttons
            .iter()
            .find(|(_, button)| button.value())
            .map(|(theme, _)| *theme)
            .unwrap_or(ThemePreference::Device);
        let new_settings = EditorSettings {
            font_size: font_size.value().round() as u8,
            tab_size: tab_size.value().round() as u8,
            theme,
            convert_tabs_to_spaces: check_spaces.value(),
            line_wrapping: check_wrap.value(),
            line_numbers: check_numbers.value(),
        };
        *result_save.borrow_mut() = Some(new_settings);
        dialog_save.clone().hide();
    });

    let result_cancel = result.clone();
    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        *result_cancel.borrow_mut() = None;
        dialog_cancel.clone().hide();
    });

    let result_close = result.clone();
    dialog.set_callback(move |w| {
        *result_close.borrow_mut() = None;
        w.hide();
    });

    super::run_dialog(&dialog);

    result.borrow().clone()
}
