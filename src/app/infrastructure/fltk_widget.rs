//! The desktop editing widget: an FLTK `TextEditor` behind [`EditorWidget`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fltk::{
    app,
    enums::{Color, Event, Key},
    group::Group,
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
};
use tracing::debug;

use crate::app::domain::ResolvedTheme;

use super::buffer::buffer_text_no_leak;
use super::widget::{ChangeListener, EditorWidget, WidgetConfig, WidgetFactory, WidgetOption};

type Listeners = Rc<RefCell<Vec<ChangeListener>>>;

pub struct FltkWidget {
    editor: TextEditor,
    buffer: TextBuffer,
    listeners: Listeners,
    indent_with_tabs: Rc<Cell<bool>>,
    tab_size: Rc<Cell<u8>>,
    line_numbers: Rc<Cell<bool>>,
    font_size: u8,
    mode: Option<&'static str>,
}

impl FltkWidget {
    fn new(mut editor: TextEditor, config: WidgetConfig) -> Self {
        let mut buffer = TextBuffer::default();
        buffer.set_text(&config.initial_value);
        editor.set_buffer(buffer.clone());

        let listeners: Listeners = Rc::new(RefCell::new(Vec::new()));
        let line_numbers = Rc::new(Cell::new(config.line_numbers));
        let notify = listeners.clone();
        let source = buffer.clone();
        let mut gutter = editor.clone();
        let show_gutter = line_numbers.clone();
        buffer.add_modify_callback(move |_pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                fit_linenumber_gutter(&mut gutter, &source, show_gutter.get());
                let text = buffer_text_no_leak(&source);
                let mut running = std::mem::take(&mut *notify.borrow_mut());
                for listener in running.iter_mut() {
                    listener(&text);
                }
                let mut slots = notify.borrow_mut();
                running.append(&mut slots);
                *slots = running;
            }
        });

        let indent_with_tabs = Rc::new(Cell::new(config.indent_with_tabs));
        let tab_size = Rc::new(Cell::new(config.tab_size));
        let use_tabs = indent_with_tabs.clone();
        let width = tab_size.clone();
        editor.handle(move |ed, event| {
            if event != Event::KeyDown
                || app::event_key() != Key::Tab
                || app::is_event_ctrl()
                || use_tabs.get()
            {
                return false;
            }
            let Some(mut buf) = ed.buffer() else {
                return false;
            };
            let pos = ed.insert_position();
            let column = pos - buf.line_start(pos);
            let width = i32::from(width.get().max(1));
            let spaces = " ".repeat((width - column % width) as usize);
            buf.insert(pos, &spaces);
            ed.set_insert_position(pos + spaces.len() as i32);
            true
        });

        let mut widget = Self {
            editor,
            buffer,
            listeners,
            indent_with_tabs,
            tab_size,
            line_numbers,
            font_size: config.font_size,
            mode: config.mode,
        };
        for option in config.options() {
            widget.set_option(option);
        }
        widget
    }

    fn apply_theme(&mut self, theme: ResolvedTheme) {
        debug!(theme = theme.widget_theme(), "applying editor theme");
        let editor = &mut self.editor;
        if theme.is_dark() {
            editor.set_color(Color::from_rgb(30, 30, 30));
            editor.set_text_color(Color::from_rgb(220, 220, 220));
            editor.set_cursor_color(Color::from_rgb(255, 255, 255));
            editor.set_selection_color(Color::from_rgb(70, 70, 100));
            editor.set_linenumber_bgcolor(Color::from_rgb(40, 40, 40));
            editor.set_linenumber_fgcolor(Color::from_rgb(150, 150, 150));
        } else {
            editor.set_color(Color::White);
            editor.set_text_color(Color::Black);
            editor.set_cursor_color(Color::Black);
            editor.set_selection_color(Color::from_rgb(173, 216, 230));
            editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
            editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));
        }
    }

    fn update_linenumber_width(&mut self) {
        fit_linenumber_gutter(&mut self.editor, &self.buffer, self.line_numbers.get());
    }

    fn line_height(&self) -> u32 {
        u32::from(self.font_size) + 4
    }
}

impl EditorWidget for FltkWidget {
    fn value(&self) -> String {
        buffer_text_no_leak(&self.buffer)
    }

    fn set_value(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.buffer.unselect();
        self.editor.set_insert_position(0);
        self.update_linenumber_width();
        self.editor.redraw();
    }

    fn set_option(&mut self, option: WidgetOption) {
        match option {
            WidgetOption::Mode(mode) => {
                if self.mode != mode {
                    debug!(?mode, "editor mode changed");
                }
                self.mode = mode;
            }
            WidgetOption::Theme(theme) => self.apply_theme(theme),
            WidgetOption::LineNumbers(on) => {
                self.line_numbers.set(on);
                self.update_linenumber_width();
            }
            WidgetOption::LineWrapping(on) => {
                let mode = if on { WrapMode::AtBounds } else { WrapMode::None };
                self.editor.wrap_mode(mode, 0);
            }
            WidgetOption::TabSize(size) => {
                self.tab_size.set(size);
                self.buffer.set_tab_distance(i32::from(size));
            }
            WidgetOption::IndentWithTabs(on) => self.indent_with_tabs.set(on),
            WidgetOption::FontSize(size) => {
                self.font_size = size;
                self.editor.set_text_size(i32::from(size));
                self.editor.set_linenumber_size(i32::from(size).saturating_sub(2).max(8));
            }
        }
        self.editor.redraw();
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn cursor(&self) -> usize {
        self.editor.insert_position().max(0) as usize
    }

    fn selection(&self) -> (usize, usize) {
        match self.buffer.selection_position() {
            Some((start, end)) if start != end => {
                (start.min(end).max(0) as usize, start.max(end).max(0) as usize)
            }
            _ => {
                let cursor = self.cursor();
                (cursor, cursor)
            }
        }
    }

    fn set_selection(&mut self, from: usize, to: usize) {
        self.buffer.select(from as i32, to as i32);
        self.editor.set_insert_position(to as i32);
        self.editor.redraw();
    }

    fn scroll_into_view(&mut self, pos: usize, margin: u32) {
        // Display rows, so wrapped lines above the match are counted.
        let row = self.editor.count_lines(0, pos as i32, true) + 1;
        self.editor.scroll(top_row_for(row, margin, self.line_height()), 0);
        // Horizontal offset when wrapping is off.
        self.editor.show_insert_position();
    }
}

// Gutter grows with the number of digits in the last line number.
fn linenumber_width(line_count: i32) -> i32 {
    let digits = ((line_count + 1) as f64).log10().floor() as i32 + 1;
    (digits * 8 + 16).max(40)
}

fn fit_linenumber_gutter(editor: &mut TextEditor, buffer: &TextBuffer, show: bool) {
    let width = if show {
        linenumber_width(buffer.count_lines(0, buffer.length()))
    } else {
        0
    };
    if editor.linenumber_width() != width {
        editor.set_linenumber_width(width);
    }
}

/// First display row to show so that `row` sits `margin` pixels below the top.
fn top_row_for(row: i32, margin: u32, line_height: u32) -> i32 {
    let context = (margin / line_height.max(1)) as i32;
    (row - context).max(1)
}

/// Builds the editor inside the group reserved for it in the main window.
pub struct FltkWidgetFactory {
    container: Group,
}

impl FltkWidgetFactory {
    pub fn new(container: Group) -> Self {
        Self { container }
    }
}

impl WidgetFactory for FltkWidgetFactory {
    fn create(&mut self, config: WidgetConfig) -> Box<dyn EditorWidget> {
        let c = &mut self.container;
        c.begin();
        let editor = TextEditor::new(c.x(), c.y(), c.w(), c.h(), "");
        c.end();
        c.resizable(&editor);

        let widget = FltkWidget::new(editor, config);
        c.redraw();
        Box::new(widget)
    }
}
