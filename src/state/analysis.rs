/// Per-image analysis state tracking
///
/// The board owns one entry per selected image and an overall-loading
/// flag. Entries settle independently: each upload's completion updates
/// only its own slot, so one slow or failing image never blocks the rest.

use super::data::{AnalysisEntry, AnalysisResponse, SelectedImage};
use uuid::Uuid;

/// Tracks the analysis state of every selected image
#[derive(Debug, Default)]
pub struct AnalysisBoard {
    entries: Vec<AnalysisEntry>,
    is_loading_overall: bool,
}

impl AnalysisBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry list wholesale with fresh not-started entries
    ///
    /// The entry list always mirrors the current selection, in input
    /// order. Any previous results are discarded along with the old
    /// entries, and the overall-loading flag is cleared.
    pub fn ingest_selection(&mut self, images: Vec<SelectedImage>) {
        self.entries = images.into_iter().map(AnalysisEntry::not_started).collect();
        self.is_loading_overall = false;
    }

    /// Transition every entry to loading ahead of the upload fan-out
    ///
    /// Returns false (with a console warning) when there is nothing to
    /// analyze, so the caller can skip issuing requests. Otherwise sets
    /// the overall-loading flag and marks each entry loading, clearing
    /// stale errors so a retry starts clean.
    pub fn begin_analysis(&mut self) -> bool {
        if self.entries.is_empty() {
            eprintln!("⚠️  No image selected for analysis");
            return false;
        }

        self.is_loading_overall = true;
        for entry in &mut self.entries {
            entry.is_loading = true;
            entry.error = None;
        }
        true
    }

    /// Apply one upload's settlement to its own entry
    ///
    /// A success stores the response and clears any prior error; a
    /// failure stores the error message and preserves whatever response
    /// an earlier attempt produced. Either way the entry stops loading.
    /// Once every entry has settled, the overall-loading flag clears.
    pub fn settle(&mut self, id: Uuid, outcome: Result<AnalysisResponse, String>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.image.id == id) {
            match outcome {
                Ok(response) => {
                    entry.response = Some(response);
                    entry.error = None;
                }
                Err(message) => {
                    entry.error = Some(message);
                }
            }
            entry.is_loading = false;
        }

        if self.entries.iter().all(|e| !e.is_loading) {
            self.is_loading_overall = false;
        }
    }

    /// Clear all entries and the overall-loading flag unconditionally
    pub fn reset(&mut self) {
        self.entries.clear();
        self.is_loading_overall = false;
    }

    /// All entries, in selection order
    pub fn entries(&self) -> &[AnalysisEntry] {
        &self.entries
    }

    /// Look up one entry by its image id
    pub fn entry(&self, id: Uuid) -> Option<&AnalysisEntry> {
        self.entries.iter().find(|e| e.image.id == id)
    }

    /// Clones of the currently selected images, in order
    ///
    /// Used to rebuild the selection when newly dropped or picked files
    /// are appended to it.
    pub fn selected_images(&self) -> Vec<SelectedImage> {
        self.entries.iter().map(|e| e.image.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_loading_overall(&self) -> bool {
        self.is_loading_overall
    }

    /// Whether any entry has started, finished or failed analysis
    pub fn has_activity(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.response.is_some() || e.is_loading || e.error.is_some())
    }
}
