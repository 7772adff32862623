/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the file intake, the analysis API and the UI layer.

use iced::widget::image::Handle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// One image the user has selected for analysis
///
/// Created when a file is picked or dropped, immutable afterwards.
/// Discarded on reset or when replaced by a new selection.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    /// Unique id for this selection (stable UI key)
    pub id: Uuid,
    /// Filename only (e.g. "IMG_0001.jpg")
    pub filename: String,
    /// Full path to the original file
    pub path: PathBuf,
    /// Raw file content, uploaded as-is to the analysis endpoint
    pub bytes: Vec<u8>,
    /// Decoded and downscaled preview for the UI
    pub preview: Handle,
}

/// A single tag returned by the analysis service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tag {
    /// The tag name (e.g. "cat", "building")
    pub name: String,
    /// Confidence level, from 0.0 to 1.0
    pub confidence: f32,
    /// The model that produced this tag
    pub source_model: String,
}

/// The full response for one analyzed image
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisResponse {
    /// Server-side id for the analyzed image, if it was persisted
    pub image_id: Option<String>,
    /// Original filename as echoed by the server
    pub filename: Option<String>,
    /// Tags identified in the image
    pub tags: Vec<Tag>,
    /// Analysis status message
    pub message: String,
}

/// One selected image paired with its analysis state
///
/// Progresses independently of its siblings:
/// not-started -> loading -> settled (response or error).
#[derive(Debug, Clone)]
pub struct AnalysisEntry {
    /// The image this entry tracks
    pub image: SelectedImage,
    /// The analysis response, once the upload has succeeded
    pub response: Option<AnalysisResponse>,
    /// Whether this entry's upload is currently in flight
    pub is_loading: bool,
    /// Error message from the last failed attempt
    pub error: Option<String>,
}

impl AnalysisEntry {
    /// Create a fresh not-started entry for an image
    pub fn not_started(image: SelectedImage) -> Self {
        Self {
            image,
            response: None,
            is_loading: false,
            error: None,
        }
    }
}
