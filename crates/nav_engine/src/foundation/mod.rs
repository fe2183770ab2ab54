//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Quaternion orientation
//! - Colour conversion
//! - Frame timing
//! - Logging utilities

pub mod color;
pub mod logging;
pub mod math;
pub mod orientation;
pub mod time;
