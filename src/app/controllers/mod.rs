//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the editing widget:
//! - Document collection and active-document tracking
//! - Session orchestration (reconcile, shortcuts, import/export, search)

pub mod documents;
pub mod session;
