//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Settings persistence
//! - Wrap-around search
//! - Text operations

pub mod search;
pub mod settings_store;
pub mod text_ops;
