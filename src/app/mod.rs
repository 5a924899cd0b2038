//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, Settings, Shortcuts, Messages)
//! - `controllers/` - Orchestration (DocumentStore, SessionController)
//! - `services/` - Business operations (settings persistence, search, text_ops)
//! - `infrastructure/` - External integrations (editing widget, platform, error)

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-exports for convenient external access
pub use controllers::documents::DocumentStore;
pub use controllers::session::{SessionController, SessionDeps};
pub use domain::{Document, DocumentId, EditorSettings, Language, Message, ResolvedTheme, Shortcut, ThemePreference};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::platform::detect_system_dark_mode;
