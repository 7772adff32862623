/// File intake module
///
/// This module handles:
/// - Validating that selected/dropped files are images
/// - Reading file bytes and decoding previews
/// - Reporting rejected files back to the UI

pub mod loader;
