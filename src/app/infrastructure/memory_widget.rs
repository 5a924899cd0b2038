//! Headless editing widget.
//!
//! Keeps the buffer, selection and options in memory. Handles are cheap
//! clones sharing one state, like FLTK widget handles, so a caller can keep a
//! handle to inspect or drive the widget after giving a box to the controller.

use std::cell::RefCell;
use std::rc::Rc;

use crate::app::domain::ResolvedTheme;
use crate::app::services::text_ops::floor_char_boundary;

use super::widget::{ChangeListener, EditorWidget, WidgetConfig, WidgetFactory, WidgetOption};

/// Options as last applied to a [`MemoryWidget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedOptions {
    pub mode: Option<&'static str>,
    pub theme: ResolvedTheme,
    pub line_numbers: bool,
    pub line_wrapping: bool,
    pub tab_size: u8,
    pub indent_with_tabs: bool,
    pub font_size: u8,
}

struct State {
    instance: u64,
    text: String,
    anchor: usize,
    head: usize,
    options: AppliedOptions,
    listeners: Vec<ChangeListener>,
    set_value_calls: usize,
    scrolled_to: Option<usize>,
}

#[derive(Clone)]
pub struct MemoryWidget {
    state: Rc<RefCell<State>>,
}

impl MemoryWidget {
    pub fn new(instance: u64, config: WidgetConfig) -> Self {
        let options = AppliedOptions {
            mode: config.mode,
            theme: config.theme,
            line_numbers: config.line_numbers,
            line_wrapping: config.line_wrapping,
            tab_size: config.tab_size,
            indent_with_tabs: config.indent_with_tabs,
            font_size: config.font_size,
        };
        Self {
            state: Rc::new(RefCell::new(State {
                instance,
                text: config.initial_value,
                anchor: 0,
                head: 0,
                options,
                listeners: Vec::new(),
                set_value_calls: 0,
                scrolled_to: None,
            })),
        }
    }

    /// Identity of the underlying widget instance.
    pub fn instance(&self) -> u64 {
        self.state.borrow().instance
    }

    pub fn options(&self) -> AppliedOptions {
        self.state.borrow().options.clone()
    }

    /// How many times the buffer was replaced wholesale.
    pub fn set_value_calls(&self) -> usize {
        self.state.borrow().set_value_calls
    }

    pub fn scrolled_to(&self) -> Option<usize> {
        self.state.borrow().scrolled_to
    }

    /// Simulate the user typing `text` over the current selection.
    pub fn type_text(&self, text: &str) {
        {
            let mut state = self.state.borrow_mut();
            let from = state.anchor.min(state.head);
            let to = state.anchor.max(state.head);
            state.text.replace_range(from..to, text);
            let caret = from + text.len();
            state.anchor = caret;
            state.head = caret;
        }
        self.notify();
    }

    /// Move the caret without selecting anything.
    pub fn set_cursor(&self, pos: usize) {
        let mut state = self.state.borrow_mut();
        let pos = floor_char_boundary(&state.text, pos);
        state.anchor = pos;
        state.head = pos;
    }

    // Listeners run without the state borrowed so they may read the widget.
    fn notify(&self) {
        let (text, mut listeners) = {
            let mut state = self.state.borrow_mut();
            (state.text.clone(), std::mem::take(&mut state.listeners))
        };
        for listener in listeners.iter_mut() {
            listener(&text);
        }
        let mut state = self.state.borrow_mut();
        listeners.append(&mut state.listeners);
        state.listeners = listeners;
    }
}

impl EditorWidget for MemoryWidget {
    fn value(&self) -> String {
        self.state.borrow().text.clone()
    }

    fn set_value(&mut self, text: &str) {
        {
            let mut state = self.state.borrow_mut();
            state.text = text.to_string();
            state.anchor = 0;
            state.head = 0;
            state.set_value_calls += 1;
        }
        self.notify();
    }

    fn set_option(&mut self, option: WidgetOption) {
        let mut state = self.state.borrow_mut();
        let options = &mut state.options;
        match option {
            WidgetOption::Mode(mode) => options.mode = mode,
            WidgetOption::Theme(theme) => options.theme = theme,
            WidgetOption::LineNumbers(on) => options.line_numbers = on,
            WidgetOption::LineWrapping(on) => options.line_wrapping = on,
            WidgetOption::TabSize(size) => options.tab_size = size,
            WidgetOption::IndentWithTabs(on) => options.indent_with_tabs = on,
            WidgetOption::FontSize(size) => options.font_size = size,
        }
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.state.borrow_mut().listeners.push(listener);
    }

    fn cursor(&self) -> usize {
        self.state.borrow().head
    }

    fn selection(&self) -> (usize, usize) {
        let state = self.state.borrow();
        (state.anchor.min(state.head), state.anchor.max(state.head))
    }

    fn set_selection(&mut self, from: usize, to: usize) {
        let mut state = self.state.borrow_mut();
        state.anchor = floor_char_boundary(&state.text, from);
        state.head = floor_char_boundary(&state.text, to);
    }

    fn scroll_into_view(&mut self, pos: usize, _margin: u32) {
        self.state.borrow_mut().scrolled_to = Some(pos);
    }
}

/// Builds [`MemoryWidget`]s and remembers every instance it handed out.
#[derive(Clone, Default)]
pub struct MemoryWidgetFactory {
    created: Rc<RefCell<Vec<MemoryWidget>>>,
}

impl MemoryWidgetFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_count(&self) -> usize {
        self.created.borrow().len()
    }

    /// Handle to the most recently created widget.
    pub fn last(&self) -> Option<MemoryWidget> {
        self.created.borrow().last().cloned()
    }
}

impl WidgetFactory for MemoryWidgetFactory {
    fn create(&mut self, config: WidgetConfig) -> Box<dyn EditorWidget> {
        let instance = self.created.borrow().len() as u64 + 1;
        let widget = MemoryWidget::new(instance, config);
        self.created.borrow_mut().push(widget.clone());
        Box::new(widget)
    }
}
