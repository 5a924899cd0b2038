//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - The editing widget contract and its FLTK and in-memory implementations
//! - FLTK buffer utilities
//! - OS color-scheme detection
//! - File import/export and notification seams
//! - Error types

pub mod buffer;
pub mod collaborators;
pub mod error;
pub mod fltk_widget;
pub mod memory_widget;
pub mod platform;
pub mod widget;
