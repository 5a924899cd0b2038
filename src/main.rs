use std::rc::Rc;

use fltk::{app, dialog, enums::Event, prelude::*};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use codemate::app::domain::Message;
use codemate::app::infrastructure::fltk_widget::FltkWidgetFactory;
use codemate::app::infrastructure::platform::SystemColorScheme;
use codemate::app::services::settings_store::{FileStore, SettingsStore};
use codemate::app::{SessionController, SessionDeps};
use codemate::ui::dialogs::settings_dialog::show_settings_dialog;
use codemate::ui::file_dialogs::{NativeExporter, NativeFilePicker};
use codemate::ui::main_window::{APP_NAME, MainWidgets, build_main_window};
use codemate::ui::menu::build_menu;
use codemate::ui::notifier::DialogNotifier;
use codemate::ui::theme::Chrome;

/// Sync the document list and window title with the session.
fn refresh(session: &SessionController, widgets: &mut MainWidgets) {
    let store = session.store();
    widgets
        .document_list
        .rebuild(store.documents(), store.active_id());
    if let Some(doc) = store.active_document() {
        widgets.wind.set_label(&format!(
            "{} [{}] - {APP_NAME}",
            doc.name,
            doc.language.display_name()
        ));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let mut widgets = build_main_window(&sender);
    build_menu(&mut widgets.menu, &sender);
    widgets.wind.show();

    let settings_store = SettingsStore::new(Box::new(FileStore::default_location()));
    let mut session = SessionController::start(SessionDeps {
        widget_factory: Box::new(FltkWidgetFactory::new(widgets.editor_area.clone())),
        settings_store,
        color_scheme: Rc::new(SystemColorScheme::new()),
        file_picker: Box::new(NativeFilePicker),
        exporter: Box::new(NativeExporter),
        notifier: Rc::new(DialogNotifier::new(widgets.status.clone())),
    });

    let mut chrome = Chrome::from_widgets(&mut widgets);
    chrome.apply(session.resolved_theme());
    session.on_theme_change(move |theme| chrome.apply(theme));
    refresh(&session, &mut widgets);

    widgets.wind.set_callback(move |_| {
        if app::event() == Event::Close {
            sender.send(Message::WindowClose);
        }
    });

    info!("{APP_NAME} ready");
    while app.wait() {
        let Some(msg) = receiver.recv() else {
            continue;
        };
        match msg {
            Message::Shortcut(shortcut) => session.handle_shortcut(shortcut),
            Message::ActivateDocument(id) => session.set_active(id),
            Message::CloseDocument(id) => session.close_document(id),
            Message::CloseActive => session.close_active(),
            Message::FocusSearch => widgets.search_bar.focus(),
            Message::Search => {
                let query = widgets.search_bar.query();
                session.search(&query);
            }
            Message::OpenSettings => {
                if let Some(new_settings) = show_settings_dialog(&session.settings())
                    && let Err(e) = session.update_settings(new_settings)
                {
                    warn!(error = %e, "settings rejected");
                    dialog::alert_default(&e.to_string());
                }
            }
            Message::FileQuit | Message::WindowClose => {
                session.teardown();
                app.quit();
                continue;
            }
        }
        refresh(&session, &mut widgets);
    }

    session.teardown();
}
