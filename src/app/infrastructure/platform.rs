//! OS color-scheme detection and change notification.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use fltk::app;
use tracing::debug;

/// How often the system color scheme is re-read, in seconds.
pub const COLOR_SCHEME_POLL_SECS: f64 = 3.0;

/// Called with `true` when the OS switched to a dark color scheme.
pub type ColorSchemeListener = Box<dyn FnMut(bool)>;

/// Source of the OS light/dark preference.
pub trait ColorSchemeSource {
    fn prefers_dark(&self) -> bool;

    /// Register a listener for preference changes. The listener stays
    /// registered until the returned [`Subscription`] is dropped.
    fn subscribe(&self, listener: ColorSchemeListener) -> Subscription;
}

/// Releases a listener registration when dropped.
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

pub fn detect_system_dark_mode() -> bool {
    // Windows: AppsUseLightTheme is 0 in dark mode
    #[cfg(target_os = "windows")]
    {
        use winreg::RegKey;
        use winreg::enums::HKEY_CURRENT_USER;

        if let Ok(personalize) = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
            && let Ok(value) = personalize.get_value::<u32, _>("AppsUseLightTheme")
        {
            return value == 0;
        }
    }

    #[cfg(target_os = "linux")]
    {
        use std::process::Command;

        let read_interface_key = |key: &str| {
            Command::new("gsettings")
                .args(["get", "org.gnome.desktop.interface", key])
                .output()
                .ok()
                .map(|output| String::from_utf8_lossy(&output.stdout).to_lowercase())
        };

        if read_interface_key("color-scheme").is_some_and(|s| s.contains("prefer-dark")) {
            return true;
        }
        if read_interface_key("gtk-theme").is_some_and(|s| s.contains("dark")) {
            return true;
        }
    }

    #[cfg(target_os = "macos")]
    {
        use std::process::Command;

        if let Ok(output) = Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            && output.status.success()
        {
            return String::from_utf8_lossy(&output.stdout)
                .to_lowercase()
                .contains("dark");
        }
    }

    false
}

#[derive(Default)]
struct Registry {
    entries: Vec<(u64, ColorSchemeListener)>,
    // Ids of the listeners taken out by an in-flight emit.
    running: Vec<u64>,
    // Running listeners unsubscribed before the emit finished.
    removed: Vec<u64>,
}

type Slots = RefCell<Registry>;

struct Listeners {
    slots: Rc<Slots>,
    next_id: Cell<u64>,
}

impl Listeners {
    fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Registry::default())),
            next_id: Cell::new(0),
        }
    }

    fn add(&self, listener: ColorSchemeListener) -> (u64, Weak<Slots>) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.slots.borrow_mut().entries.push((id, listener));
        (id, Rc::downgrade(&self.slots))
    }

    fn remove(slots: &Weak<Slots>, id: u64) {
        let Some(slots) = slots.upgrade() else {
            return;
        };
        let mut registry = slots.borrow_mut();
        if registry.running.contains(&id) {
            registry.removed.push(id);
        } else {
            registry.entries.retain(|(slot_id, _)| *slot_id != id);
        }
    }

    fn len(&self) -> usize {
        let registry = self.slots.borrow();
        let running = registry
            .running
            .iter()
            .filter(|id| !registry.removed.contains(id))
            .count();
        registry.entries.len() + running
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Listeners are taken out while they run so they may subscribe,
    // unsubscribe or query.
    fn emit(&self, dark: bool) {
        let mut running = {
            let mut registry = self.slots.borrow_mut();
            let running = std::mem::take(&mut registry.entries);
            registry.running = running.iter().map(|(id, _)| *id).collect();
            running
        };
        for (id, listener) in running.iter_mut() {
            if self.slots.borrow().removed.contains(id) {
                continue;
            }
            listener(dark);
        }

        let mut registry = self.slots.borrow_mut();
        let removed = std::mem::take(&mut registry.removed);
        registry.running.clear();
        running.retain(|(id, _)| !removed.contains(id));
        running.append(&mut registry.entries);
        registry.entries = running;
    }
}

/// Polls the OS preference on the FLTK event loop.
///
/// The poll timer runs only while at least one subscription is alive.
pub struct SystemColorScheme {
    inner: Rc<SystemInner>,
}

struct SystemInner {
    listeners: Listeners,
    last_dark: Cell<bool>,
    timer: Cell<Option<app::TimeoutHandle>>,
}

impl SystemColorScheme {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SystemInner {
                listeners: Listeners::new(),
                last_dark: Cell::new(detect_system_dark_mode()),
                timer: Cell::new(None),
            }),
        }
    }

    fn start_polling(&self) {
        if self.inner.timer.get().is_some() {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let handle = app::add_timeout3(COLOR_SCHEME_POLL_SECS, move |handle| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let dark = detect_system_dark_mode();
            if dark != inner.last_dark.get() {
                debug!(dark, "system color scheme changed");
                inner.last_dark.set(dark);
                inner.listeners.emit(dark);
            }
            // A listener may have released the last subscription.
            if inner.timer.get().is_some() {
                app::repeat_timeout3(COLOR_SCHEME_POLL_SECS, handle);
            }
        });
        self.inner.timer.set(Some(handle));
    }
}

impl Default for SystemColorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSchemeSource for SystemColorScheme {
    fn prefers_dark(&self) -> bool {
        let dark = detect_system_dark_mode();
        self.inner.last_dark.set(dark);
        dark
    }

    fn subscribe(&self, listener: ColorSchemeListener) -> Subscription {
        let (id, slots) = self.inner.listeners.add(listener);
        self.start_polling();

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            Listeners::remove(&slots, id);
            if let Some(inner) = weak.upgrade()
                && inner.listeners.is_empty()
                && let Some(handle) = inner.timer.take()
            {
                app::remove_timeout3(handle);
            }
        })
    }
}

/// Color scheme driven by hand. Clones share state.
#[derive(Clone)]
pub struct ManualColorScheme {
    dark: Rc<Cell<bool>>,
    listeners: Rc<Listeners>,
}

impl ManualColorScheme {
    pub fn new(dark: bool) -> Self {
        Self {
            dark: Rc::new(Cell::new(dark)),
            listeners: Rc::new(Listeners::new()),
        }
    }

    /// Change the preference, notifying subscribers if it differs.
    pub fn set_dark(&self, dark: bool) {
        if self.dark.replace(dark) != dark {
            self.listeners.emit(dark);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl ColorSchemeSource for ManualColorScheme {
    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }

    fn subscribe(&self, listener: ColorSchemeListener) -> Subscription {
        let (id, slots) = self.listeners.add(listener);
        Subscription::new(move || Listeners::remove(&slots, id))
    }
}
