//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Error types shared by the plugin and its host
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Path normalization and lexical resolution
//! - File reading for tree checks

pub mod error;
pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
