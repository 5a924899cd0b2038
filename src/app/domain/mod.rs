//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Document, DocumentId and Language
//! - Editor settings and theme resolution results
//! - Keyboard shortcuts
//! - Message types for the event system

pub mod document;
pub mod messages;
pub mod settings;
pub mod shortcuts;

pub use document::{Document, DocumentId, Language, UNTITLED_NAME};
pub use messages::Message;
pub use settings::{EditorSettings, ResolvedTheme, ThemePreference};
pub use shortcuts::{Key, Shortcut};
