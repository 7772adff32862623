/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Per-image analysis tracking (analysis.rs)

pub mod analysis;
pub mod data;
