//! Multi-document session controller.
//!
//! Owns the open documents, the single editing widget and the editor
//! settings. Every mutation entry point finishes with [`SessionController`]'s
//! reconcile pass, which points the widget at the active document and pushes
//! the current options. The widget's change listener writes edits straight
//! back into the document store and never reconciles.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::app::domain::{
    DocumentId, EditorSettings, ResolvedTheme, Shortcut, ThemePreference, UNTITLED_NAME,
};
use crate::app::infrastructure::collaborators::{
    ExportRequest, Exporter, FilePicker, NoticeLevel, Notifier,
};
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::platform::{ColorSchemeSource, Subscription};
use crate::app::infrastructure::widget::{
    ChangeListener, EditorWidget, WidgetConfig, WidgetFactory, WidgetOption,
};
use crate::app::services::search::{MatchOutcome, SearchEngine};
use crate::app::services::settings_store::SettingsStore;
use crate::app::services::text_ops::mime_type_for;

use super::documents::DocumentStore;

type WidgetSlot = Rc<RefCell<Option<Box<dyn EditorWidget>>>>;
type ThemeHooks = Rc<RefCell<Vec<Box<dyn FnMut(ResolvedTheme)>>>>;

/// Collaborators injected at startup.
pub struct SessionDeps {
    pub widget_factory: Box<dyn WidgetFactory>,
    pub settings_store: SettingsStore,
    pub color_scheme: Rc<dyn ColorSchemeSource>,
    pub file_picker: Box<dyn FilePicker>,
    pub exporter: Box<dyn Exporter>,
    pub notifier: Rc<dyn Notifier>,
}

pub struct SessionController {
    store: Rc<RefCell<DocumentStore>>,
    widget: WidgetSlot,
    factory: Box<dyn WidgetFactory>,
    settings: Rc<RefCell<EditorSettings>>,
    resolved_theme: Rc<Cell<ResolvedTheme>>,
    theme_hooks: ThemeHooks,
    settings_store: SettingsStore,
    color_scheme: Rc<dyn ColorSchemeSource>,
    file_picker: Box<dyn FilePicker>,
    exporter: Box<dyn Exporter>,
    notifier: Rc<dyn Notifier>,
    search_engine: SearchEngine,
    search_query: String,
    subscription: Option<Subscription>,
    torn_down: bool,
}

impl SessionController {
    /// Load settings, open the first blank document and build the widget.
    pub fn start(deps: SessionDeps) -> Self {
        let settings = deps.settings_store.load();
        let resolved = SettingsStore::resolve_theme(&settings, deps.color_scheme.as_ref());
        info!(theme = ?settings.theme, ?resolved, "starting session");

        let mut controller = Self {
            store: Rc::new(RefCell::new(DocumentStore::new())),
            widget: Rc::new(RefCell::new(None)),
            factory: deps.widget_factory,
            settings: Rc::new(RefCell::new(settings)),
            resolved_theme: Rc::new(Cell::new(resolved)),
            theme_hooks: Rc::new(RefCell::new(Vec::new())),
            settings_store: deps.settings_store,
            color_scheme: deps.color_scheme,
            file_picker: deps.file_picker,
            exporter: deps.exporter,
            notifier: deps.notifier,
            search_engine: SearchEngine::new(),
            search_query: String::new(),
            subscription: None,
            torn_down: false,
        };
        controller.sync_color_scheme_subscription();
        controller.store.borrow_mut().create_document();
        controller.reconcile();
        controller
    }

    // --- Document entry points ---

    pub fn create_document(&mut self) -> DocumentId {
        let id = self.store.borrow_mut().create_document();
        self.notifier.notify(
            NoticeLevel::Success,
            &format!("Created new file: {UNTITLED_NAME}"),
        );
        self.reconcile();
        id
    }

    pub fn import_document(&mut self, name: String, content: String) -> DocumentId {
        let message = format!("Opened file: {name}");
        let id = self.store.borrow_mut().import_document(name, content);
        self.notifier.notify(NoticeLevel::Success, &message);
        self.reconcile();
        id
    }

    /// Ask the user for a file and import it. Cancelling is silent.
    pub fn open_file(&mut self) {
        match self.file_picker.pick() {
            Ok(Some(file)) => {
                self.import_document(file.name, file.content);
            }
            Ok(None) => debug!("file import cancelled"),
            Err(e) => {
                error!(error = %e, "file import failed");
                self.notifier.notify(NoticeLevel::Error, "Failed to open file");
            }
        }
    }

    /// Hand the active document to the exporter. Cancelling is silent.
    pub fn export_active(&mut self) {
        let request = {
            let store = self.store.borrow();
            let Some(doc) = store.active_document() else {
                debug!("no active document to export");
                return;
            };
            ExportRequest {
                name: doc.name.clone(),
                content: doc.content.clone(),
                mime: mime_type_for(&doc.name),
            }
        };

        match self.exporter.export(&request) {
            Ok(true) => {
                info!(name = %request.name, mime = request.mime, "exported document");
                self.notifier
                    .notify(NoticeLevel::Success, &format!("Saved file: {}", request.name));
            }
            Ok(false) => debug!("file export cancelled"),
            Err(e) => {
                error!(error = %e, name = %request.name, "file export failed");
                self.notifier.notify(NoticeLevel::Error, "Failed to save file");
            }
        }
    }

    pub fn close_document(&mut self, id: DocumentId) {
        self.store.borrow_mut().close_document(id);
        self.reconcile();
    }

    pub fn close_active(&mut self) {
        let active = self.store.borrow().active_id();
        if let Some(id) = active {
            self.close_document(id);
        }
    }

    pub fn set_active(&mut self, id: DocumentId) {
        self.store.borrow_mut().set_active(id);
        self.reconcile();
    }

    pub fn update_content(&mut self, id: DocumentId, content: &str) {
        self.store.borrow_mut().update_content(id, content);
        self.reconcile();
    }

    /// Activate the next document in order, wrapping. No-op with one document.
    pub fn next_document(&mut self) {
        let next = self.store.borrow().next_document_id();
        if let Some(id) = next {
            self.set_active(id);
        }
    }

    pub fn handle_shortcut(&mut self, shortcut: Shortcut) {
        debug!(shortcut = shortcut.label(), "shortcut");
        match shortcut {
            Shortcut::NewFile => {
                self.create_document();
            }
            Shortcut::OpenFile => self.open_file(),
            Shortcut::SaveFile => self.export_active(),
            Shortcut::NextFile => self.next_document(),
        }
    }

    // --- Settings ---

    /// Validate, persist and apply new settings. Invalid settings are
    /// rejected and nothing changes.
    pub fn update_settings(&mut self, settings: EditorSettings) -> Result<()> {
        settings.validate()?;

        if let Err(e) = self.settings_store.save(&settings) {
            warn!(error = %e, "failed to persist settings");
        }
        let resolved = SettingsStore::resolve_theme(&settings, self.color_scheme.as_ref());
        *self.settings.borrow_mut() = settings;

        if self.resolved_theme.replace(resolved) != resolved {
            run_theme_hooks(&self.theme_hooks, resolved);
        }
        self.sync_color_scheme_subscription();
        self.reconcile();
        Ok(())
    }

    pub fn settings(&self) -> EditorSettings {
        self.settings.borrow().clone()
    }

    pub fn resolved_theme(&self) -> ResolvedTheme {
        self.resolved_theme.get()
    }

    /// Register a callback run whenever the resolved theme changes.
    pub fn on_theme_change(&mut self, hook: impl FnMut(ResolvedTheme) + 'static) {
        self.theme_hooks.borrow_mut().push(Box::new(hook));
    }

    // --- Search ---

    /// Search the displayed document for `query`. `None` for an empty query.
    pub fn search(&mut self, query: &str) -> Option<MatchOutcome> {
        if query.is_empty() {
            return None;
        }
        self.search_query = query.to_string();

        let outcome = {
            let mut slot = self.widget.borrow_mut();
            let widget = slot.as_mut()?;
            self.search_engine.search(&mut **widget, query)
        };
        if outcome == MatchOutcome::NotFound {
            self.notifier.notify(
                NoticeLevel::Info,
                &format!("No matches found for \"{query}\""),
            );
        }
        Some(outcome)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    // --- Queries ---

    pub fn store(&self) -> Ref<'_, DocumentStore> {
        self.store.borrow()
    }

    pub fn active_id(&self) -> Option<DocumentId> {
        self.store.borrow().active_id()
    }

    // --- Lifecycle ---

    /// Release the OS theme subscription and drop the widget. Safe to call
    /// more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.subscription = None;
        let widget = self.widget.borrow_mut().take();
        drop(widget);
        info!("session torn down");
    }

    /// Listen to the OS color scheme only while the preference is `Device`.
    fn sync_color_scheme_subscription(&mut self) {
        let follow_os = !self.torn_down && self.settings.borrow().theme == ThemePreference::Device;
        if !follow_os {
            if self.subscription.take().is_some() {
                debug!("stopped following OS color scheme");
            }
            return;
        }
        if self.subscription.is_some() {
            return;
        }

        let widget = Rc::clone(&self.widget);
        let resolved_theme = Rc::clone(&self.resolved_theme);
        let hooks = Rc::clone(&self.theme_hooks);
        let subscription = self.color_scheme.subscribe(Box::new(move |dark| {
            let theme = ResolvedTheme::from_dark(dark);
            if resolved_theme.replace(theme) == theme {
                return;
            }
            info!(?theme, "following OS color scheme");
            if let Some(widget) = widget.borrow_mut().as_mut() {
                widget.set_option(WidgetOption::Theme(theme));
            }
            run_theme_hooks(&hooks, theme);
        }));
        self.subscription = Some(subscription);
    }

    fn change_listener(&self) -> ChangeListener {
        let store = Rc::clone(&self.store);
        Box::new(move |text: &str| match store.try_borrow_mut() {
            Ok(mut store) => {
                if let Some(id) = store.active_id() {
                    store.update_content(id, text);
                }
            }
            Err(_) => warn!("document store busy, dropped widget change"),
        })
    }

    /// Bring the widget in line with the active document and settings.
    fn reconcile(&mut self) {
        if self.torn_down {
            return;
        }
        let config = {
            let store = self.store.borrow();
            let Some(doc) = store.active_document() else {
                debug!("no active document, skipping reconcile");
                return;
            };
            WidgetConfig::new(
                doc.content.clone(),
                doc.language,
                &self.settings.borrow(),
                self.resolved_theme.get(),
            )
        };

        let mut slot = self.widget.borrow_mut();
        if slot.is_none() {
            debug!("constructing editor widget");
            let mut widget = self.factory.create(config.clone());
            widget.on_change(self.change_listener());
            *slot = Some(widget);
        } else if let Some(widget) = slot.as_mut()
            && widget.value() != config.initial_value
        {
            widget.set_value(&config.initial_value);
        }

        if let Some(widget) = slot.as_mut() {
            for option in config.options() {
                widget.set_option(option);
            }
        }
    }
}

fn run_theme_hooks(hooks: &ThemeHooks, theme: ResolvedTheme) {
    for hook in hooks.borrow_mut().iter_mut() {
        hook(theme);
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::Language;
    use crate::app::infrastructure::collaborators::{ImportedFile, RecordingNotifier};
    use crate::app::infrastructure::error::AppError;
    use crate::app::infrastructure::memory_widget::{MemoryWidget, MemoryWidgetFactory};
    use crate::app::infrastructure::platform::ManualColorScheme;
    use crate::app::services::settings_store::{KeyValueStore, MemoryStore, SETTINGS_KEY};
    use std::collections::VecDeque;

    #[derive(Clone, Default)]
    struct ScriptedPicker {
        results: Rc<RefCell<VecDeque<Result<Option<ImportedFile>>>>>,
    }

    impl ScriptedPicker {
        fn push(&self, result: Result<Option<ImportedFile>>) {
            self.results.borrow_mut().push_back(result);
        }
    }

    impl FilePicker for ScriptedPicker {
        fn pick(&self) -> Result<Option<ImportedFile>> {
            self.results.borrow_mut().pop_front().unwrap_or(Ok(None))
        }
    }

    #[derive(Clone, Default)]
    struct ScriptedExporter {
        fail: Rc<Cell<bool>>,
        cancel: Rc<Cell<bool>>,
        exported: Rc<RefCell<Vec<ExportRequest>>>,
    }

    impl Exporter for ScriptedExporter {
        fn export(&self, request: &ExportRequest) -> Result<bool> {
            if self.fail.get() {
                return Err(AppError::Export("permission denied".into()));
            }
            if self.cancel.get() {
                return Ok(false);
            }
            self.exported.borrow_mut().push(request.clone());
            Ok(true)
        }
    }

    struct Harness {
        session: SessionController,
        factory: MemoryWidgetFactory,
        backend: MemoryStore,
        scheme: ManualColorScheme,
        picker: ScriptedPicker,
        exporter: ScriptedExporter,
        notifier: RecordingNotifier,
    }

    impl Harness {
        fn widget(&self) -> MemoryWidget {
            self.factory.last().unwrap()
        }

        fn active_content(&self) -> String {
            self.session.store().active_document().unwrap().content.clone()
        }
    }

    fn start_with(backend: MemoryStore, dark: bool) -> Harness {
        let factory = MemoryWidgetFactory::new();
        let scheme = ManualColorScheme::new(dark);
        let picker = ScriptedPicker::default();
        let exporter = ScriptedExporter::default();
        let notifier = RecordingNotifier::new();
        let session = SessionController::start(SessionDeps {
            widget_factory: Box::new(factory.clone()),
            settings_store: SettingsStore::new(Box::new(backend.clone())),
            color_scheme: Rc::new(scheme.clone()),
            file_picker: Box::new(picker.clone()),
            exporter: Box::new(exporter.clone()),
            notifier: Rc::new(notifier.clone()),
        });
        Harness {
            session,
            factory,
            backend,
            scheme,
            picker,
            exporter,
            notifier,
        }
    }

    fn start() -> Harness {
        start_with(MemoryStore::new(), false)
    }

    fn assert_session_invariants(session: &SessionController) {
        let store = session.store();
        assert!(store.count() >= 1);
        let active = store.active_id().expect("active id");
        assert!(store.document(active).is_some());
    }

    #[test]
    fn test_start_opens_blank_document_with_defaults() {
        let h = start();
        let store = h.session.store();
        assert_eq!(store.count(), 1);
        let doc = store.active_document().unwrap();
        assert_eq!(doc.name, "untitled.txt");
        assert_eq!(doc.language, Language::PlainText);
        drop(store);

        assert_eq!(h.factory.created_count(), 1);
        let options = h.widget().options();
        assert_eq!(options.theme, ResolvedTheme::Dark);
        assert_eq!(options.font_size, 16);
        assert_eq!(options.tab_size, 2);
        assert!(!options.indent_with_tabs);
        assert!(options.line_wrapping);
        assert!(options.line_numbers);
        assert!(h.notifier.notices().is_empty());
    }

    #[test]
    fn test_close_sequences_keep_invariants() {
        let mut h = start();
        h.session.import_document("a.txt".into(), "a".into());
        h.session.import_document("b.txt".into(), "b".into());
        h.session.create_document();

        for _ in 0..6 {
            h.session.close_active();
            assert_session_invariants(&h.session);
        }
        let ids: Vec<_> = h.session.store().documents().iter().map(|d| d.id).collect();
        for id in ids {
            h.session.close_document(id);
            assert_session_invariants(&h.session);
        }
        assert_eq!(h.session.store().count(), 1);
        assert_eq!(h.widget().value(), "");
    }

    #[test]
    fn test_switching_back_and_forth_keeps_content_and_widget() {
        let mut h = start();
        let a = h.session.import_document("a.js".into(), "let a = 1;".into());
        let b = h.session.import_document("b.py".into(), "b = 2".into());
        let instance = h.widget().instance();

        h.session.set_active(a);
        h.session.set_active(b);
        h.session.set_active(a);

        assert_eq!(h.session.store().document(a).unwrap().content, "let a = 1;");
        assert_eq!(h.widget().value(), "let a = 1;");
        assert_eq!(h.widget().options().mode, Some("javascript"));
        assert_eq!(h.factory.created_count(), 1);
        assert_eq!(h.widget().instance(), instance);
    }

    #[test]
    fn test_double_import_keeps_one_document() {
        let mut h = start();
        h.session.import_document("notes.txt".into(), "first".into());
        h.session.import_document("notes.txt".into(), "second".into());

        let store = h.session.store();
        let matches: Vec<_> = store
            .documents()
            .iter()
            .filter(|d| d.name == "notes.txt")
            .collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].content, "second");
    }

    #[test]
    fn test_reimport_of_displayed_document_updates_widget() {
        let mut h = start();
        h.session.import_document("a.css".into(), "body {}".into());
        h.session.import_document("a.css".into(), "p {}".into());
        assert_eq!(h.widget().value(), "p {}");
    }

    #[test]
    fn test_create_then_import_script_scenario() {
        let mut h = start();
        h.session.import_document("script.js".into(), "let x=1;".into());

        let store = h.session.store();
        assert_eq!(store.count(), 2);
        let active = store.active_document().unwrap();
        assert_eq!(active.name, "script.js");
        assert_eq!(active.language, Language::JavaScript);
        drop(store);
        assert_eq!(h.widget().options().mode, Some("javascript"));
        assert_eq!(h.widget().value(), "let x=1;");
        assert_eq!(
            h.notifier.last(),
            Some((NoticeLevel::Success, "Opened file: script.js".to_string()))
        );
    }

    #[test]
    fn test_next_file_cycles_and_wraps() {
        let mut h = start();
        let a = h.session.active_id().unwrap();
        let b = h.session.import_document("b.txt".into(), String::new());
        let c = h.session.import_document("c.txt".into(), String::new());
        h.session.set_active(a);

        h.session.handle_shortcut(Shortcut::NextFile);
        h.session.handle_shortcut(Shortcut::NextFile);
        assert_eq!(h.session.active_id(), Some(c));
        h.session.handle_shortcut(Shortcut::NextFile);
        assert_eq!(h.session.active_id(), Some(a));
        h.session.handle_shortcut(Shortcut::NextFile);
        assert_eq!(h.session.active_id(), Some(b));
    }

    #[test]
    fn test_next_file_with_single_document_is_noop() {
        let mut h = start();
        let only = h.session.active_id();
        h.session.next_document();
        assert_eq!(h.session.active_id(), only);
    }

    #[test]
    fn test_typing_syncs_store_without_rewriting_widget() {
        let mut h = start();
        let widget = h.widget();
        widget.type_text("hello");
        assert_eq!(widget.cursor(), 5);
        assert_eq!(h.active_content(), "hello");

        h.session.create_document();
        let first = h.session.store().documents()[0].id;
        h.session.set_active(first);
        assert_eq!(h.widget().value(), "hello");

        let before = widget.set_value_calls();
        widget.set_cursor(5);
        widget.type_text(" world");
        assert_eq!(h.active_content(), "hello world");
        assert_eq!(widget.set_value_calls(), before);
    }

    #[test]
    fn test_update_content_pushes_into_widget() {
        let mut h = start();
        let id = h.session.active_id().unwrap();
        h.session.update_content(id, "SELECT 1;");
        assert_eq!(h.widget().value(), "SELECT 1;");
    }

    #[test]
    fn test_new_file_shortcut_notifies() {
        let mut h = start();
        h.session.handle_shortcut(Shortcut::NewFile);
        assert_eq!(h.session.store().count(), 2);
        assert_eq!(
            h.notifier.last(),
            Some((NoticeLevel::Success, "Created new file: untitled.txt".to_string()))
        );
    }

    #[test]
    fn test_wrapped_search_selects_earlier_occurrence() {
        let mut h = start();
        h.session.import_document("q.sql".into(), "SELECT id FROM t;".into());
        h.widget().set_cursor(10);

        let outcome = h.session.search("SELECT");
        assert_eq!(outcome, Some(MatchOutcome::WrappedFound));
        assert_eq!(h.widget().selection(), (0, 6));
        assert_eq!(h.session.search_query(), "SELECT");
    }

    #[test]
    fn test_search_miss_notifies_and_keeps_selection() {
        let mut h = start();
        h.session.import_document("a.txt".into(), "alpha beta".into());
        h.widget().set_selection(1, 3);

        let outcome = h.session.search("gamma");
        assert_eq!(outcome, Some(MatchOutcome::NotFound));
        assert_eq!(h.widget().selection(), (1, 3));
        assert_eq!(h.active_content(), "alpha beta");
        assert_eq!(
            h.notifier.last(),
            Some((NoticeLevel::Info, "No matches found for \"gamma\"".to_string()))
        );
    }

    #[test]
    fn test_empty_search_is_rejected() {
        let mut h = start();
        h.session.set_search_query("");
        assert_eq!(h.session.search(""), None);
        assert!(h.notifier.notices().is_empty());
    }

    #[test]
    fn test_open_file_imports_picked_file() {
        let mut h = start();
        h.picker.push(Ok(Some(ImportedFile {
            name: "index.html".into(),
            content: "<p>hi</p>".into(),
        })));
        h.session.handle_shortcut(Shortcut::OpenFile);
        assert_eq!(h.widget().options().mode, Some("htmlmixed"));
        assert_eq!(h.active_content(), "<p>hi</p>");
    }

    #[test]
    fn test_open_file_cancel_is_silent() {
        let mut h = start();
        h.picker.push(Ok(None));
        h.session.open_file();
        assert_eq!(h.session.store().count(), 1);
        assert!(h.notifier.notices().is_empty());
    }

    #[test]
    fn test_open_file_failure_leaves_state() {
        let mut h = start();
        h.picker
            .push(Err(AppError::Import("permission denied".into())));
        h.session.open_file();
        assert_eq!(h.session.store().count(), 1);
        assert_eq!(
            h.notifier.last(),
            Some((NoticeLevel::Error, "Failed to open file".to_string()))
        );
    }

    #[test]
    fn test_save_exports_active_document() {
        let mut h = start();
        h.session.import_document("page.php".into(), "<?php echo 1;".into());
        h.widget().type_text("// ");
        h.session.handle_shortcut(Shortcut::SaveFile);

        let exported = h.exporter.exported.borrow();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].name, "page.php");
        assert_eq!(exported[0].content, "// <?php echo 1;");
        assert_eq!(exported[0].mime, "application/x-httpd-php");
        assert_eq!(
            h.notifier.last(),
            Some((NoticeLevel::Success, "Saved file: page.php".to_string()))
        );
    }

    #[test]
    fn test_export_cancel_and_failure() {
        let mut h = start();
        h.exporter.cancel.set(true);
        h.session.export_active();
        assert!(h.notifier.notices().is_empty());

        h.exporter.fail.set(true);
        h.session.export_active();
        assert_eq!(
            h.notifier.last(),
            Some((NoticeLevel::Error, "Failed to save file".to_string()))
        );
    }

    #[test]
    fn test_update_settings_persists_and_applies() {
        let mut h = start();
        let settings = EditorSettings {
            font_size: 20,
            tab_size: 4,
            theme: ThemePreference::Light,
            convert_tabs_to_spaces: false,
            line_wrapping: false,
            line_numbers: false,
        };
        h.session.update_settings(settings.clone()).unwrap();

        let options = h.widget().options();
        assert_eq!(options.font_size, 20);
        assert_eq!(options.tab_size, 4);
        assert!(options.indent_with_tabs);
        assert!(!options.line_wrapping);
        assert!(!options.line_numbers);
        assert_eq!(options.theme, ResolvedTheme::Light);
        assert_eq!(h.session.resolved_theme(), ResolvedTheme::Light);

        let stored = h.backend.raw(SETTINGS_KEY).unwrap();
        assert_eq!(EditorSettings::from_json(&stored).unwrap(), settings);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut h = start();
        let mut bad = EditorSettings::default();
        bad.font_size = 200;
        let result = h.session.update_settings(bad);
        assert!(matches!(result, Err(AppError::Settings(_))));
        assert_eq!(h.session.settings(), EditorSettings::default());
        assert!(h.backend.raw(SETTINGS_KEY).is_none());
    }

    #[test]
    fn test_stored_settings_applied_at_start() {
        let mut backend = MemoryStore::new();
        let mut settings = EditorSettings::default();
        settings.font_size = 12;
        settings.theme = ThemePreference::Light;
        backend.set(SETTINGS_KEY, &settings.to_json().unwrap()).unwrap();

        let h = start_with(backend, true);
        assert_eq!(h.session.settings(), settings);
        assert_eq!(h.widget().options().font_size, 12);
        assert_eq!(h.widget().options().theme, ResolvedTheme::Light);
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let mut backend = MemoryStore::new();
        backend.set(SETTINGS_KEY, "{ not json").unwrap();
        let h = start_with(backend, false);
        assert_eq!(h.session.settings(), EditorSettings::default());
        assert!(h.notifier.notices().is_empty());
    }

    #[test]
    fn test_device_theme_follows_os() {
        let mut h = start_with(MemoryStore::new(), false);
        let mut settings = EditorSettings::default();
        settings.theme = ThemePreference::Device;
        h.session.update_settings(settings).unwrap();
        assert_eq!(h.widget().options().theme, ResolvedTheme::Light);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_hook = seen.clone();
        h.session.on_theme_change(move |theme| seen_hook.borrow_mut().push(theme));

        h.scheme.set_dark(true);
        assert_eq!(h.session.resolved_theme(), ResolvedTheme::Dark);
        assert_eq!(h.widget().options().theme, ResolvedTheme::Dark);
        assert_eq!(*seen.borrow(), vec![ResolvedTheme::Dark]);
    }

    #[test]
    fn test_explicit_theme_ignores_os() {
        let h = start_with(MemoryStore::new(), false);
        h.scheme.set_dark(true);
        h.scheme.set_dark(false);
        assert_eq!(h.session.resolved_theme(), ResolvedTheme::Dark);
        assert_eq!(h.widget().options().theme, ResolvedTheme::Dark);
    }

    fn start_following_os() -> Harness {
        let mut backend = MemoryStore::new();
        let mut settings = EditorSettings::default();
        settings.theme = ThemePreference::Device;
        backend.set(SETTINGS_KEY, &settings.to_json().unwrap()).unwrap();
        start_with(backend, false)
    }

    #[test]
    fn test_os_scheme_watched_only_for_device_theme() {
        let mut h = start();
        assert_eq!(h.scheme.subscriber_count(), 0);

        let mut settings = h.session.settings();
        settings.theme = ThemePreference::Device;
        h.session.update_settings(settings.clone()).unwrap();
        assert_eq!(h.scheme.subscriber_count(), 1);
        h.session.update_settings(settings.clone()).unwrap();
        assert_eq!(h.scheme.subscriber_count(), 1);

        settings.theme = ThemePreference::Light;
        h.session.update_settings(settings).unwrap();
        assert_eq!(h.scheme.subscriber_count(), 0);
        h.scheme.set_dark(true);
        assert_eq!(h.session.resolved_theme(), ResolvedTheme::Light);
    }

    #[test]
    fn test_teardown_releases_subscription() {
        let mut h = start_following_os();
        assert_eq!(h.scheme.subscriber_count(), 1);
        h.session.teardown();
        h.session.teardown();
        assert_eq!(h.scheme.subscriber_count(), 0);

        h.session.create_document();
        assert_eq!(h.factory.created_count(), 1);
        let settings = h.session.settings();
        h.session.update_settings(settings).unwrap();
        assert_eq!(h.scheme.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let h = start_following_os();
        assert_eq!(h.scheme.subscriber_count(), 1);
        let scheme = h.scheme.clone();
        drop(h);
        assert_eq!(scheme.subscriber_count(), 0);
    }
}
