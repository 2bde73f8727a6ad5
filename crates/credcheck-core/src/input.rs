use crate::model::{AnalysisRequest, RequestState};
use crate::samples::SAMPLE_TEXTS;

/// The candidate text currently entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputStore {
    text: String,
}

impl InputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held text unconditionally.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True iff the trimmed text is non-empty and no request is in flight.
    pub fn can_submit(&self, state: &RequestState) -> bool {
        !self.text.trim().is_empty() && !state.is_pending()
    }

    /// Snapshot the trimmed text as a request. Later edits don't affect it.
    pub fn request(&self) -> Option<AnalysisRequest> {
        AnalysisRequest::new(&self.text)
    }

    /// Replace the text with a built-in sample. Out-of-range indices leave it unchanged.
    pub fn load_sample(&mut self, index: usize) -> bool {
        match SAMPLE_TEXTS.get(index) {
            Some(sample) => {
                self.text = (*sample).to_string();
                true
            }
            None => false,
        }
    }
}
