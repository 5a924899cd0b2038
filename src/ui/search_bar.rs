use fltk::{
    app::Sender,
    button::Button,
    enums::CallbackTrigger,
    group::Flex,
    input::Input,
    prelude::*,
};

use crate::app::domain::Message;

/// Query field plus a Find button. Enter in the field searches again.
pub struct SearchBar {
    row: Flex,
    input: Input,
    button: Button,
}

impl SearchBar {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut row = Flex::default();
        row.set_type(fltk::group::FlexType::Row);
        row.set_margin(2);

        let mut input = Input::default();
        input.set_tooltip("Search the current file");
        input.set_trigger(CallbackTrigger::EnterKeyAlways);
        input.set_callback(move |_| sender.send(Message::Search));

        let mut button = Button::default().with_label("Find");
        button.set_callback(move |_| sender.send(Message::Search));
        row.fixed(&button, 70);
        row.end();

        Self { row, input, button }
    }

    pub fn widget(&self) -> &Flex {
        &self.row
    }

    pub fn query(&self) -> String {
        self.input.value()
    }

    pub fn focus(&mut self) {
        let _ = self.input.take_focus();
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub fn button_mut(&mut self) -> &mut Button {
        &mut self.button
    }
}
