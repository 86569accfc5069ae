//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types shared by glyph and mesh data
//! - Tint colors and their cache keys
//! - Logging utilities

pub mod color;
pub mod logging;
pub mod math;

pub use color::{Color, ColorKey};
