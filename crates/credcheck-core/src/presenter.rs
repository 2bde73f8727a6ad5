//! Verdict presentation.
//!
//! Maps a settled [`AnalysisResult`] to semantic display attributes. The
//! front end decides how a [`Category`] or [`Icon`] is actually drawn.

use serde::Serialize;

use crate::model::{AnalysisResult, RequestState, Verdict};

pub const LABEL_AUTHENTIC: &str = "Likely Authentic";
pub const LABEL_MISINFORMATION: &str = "Likely Misinformation";
pub const LABEL_UNCERTAIN: &str = "Uncertain";

pub const ACTION_IDLE: &str = "Check Credibility";
pub const ACTION_PENDING: &str = "Analyzing...";

/// Semantic colour family for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Success,
    Destructive,
    Warning,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Destructive => "destructive",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    CheckCircle,
    XCircle,
    AlertTriangle,
}

/// Display attributes for one result. Borrows text from the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation<'a> {
    pub label: &'static str,
    pub category: Category,
    pub icon: Icon,
    /// Percentage width of the confidence bar; equals the confidence.
    pub confidence_bar_width: u8,
    /// Bar colour: success for `real`, destructive for everything else.
    pub bar_category: Category,
    pub explanation: &'a str,
    pub red_flags: &'a [String],
}

impl Presentation<'_> {
    /// Red flags are only shown when there are some.
    pub fn show_red_flags(&self) -> bool {
        !self.red_flags.is_empty()
    }
}

pub fn present(result: &AnalysisResult) -> Presentation<'_> {
    let (label, category, icon) = match result.verdict {
        Verdict::Real => (LABEL_AUTHENTIC, Category::Success, Icon::CheckCircle),
        Verdict::Fake => (LABEL_MISINFORMATION, Category::Destructive, Icon::XCircle),
        Verdict::Uncertain | Verdict::Other(_) => {
            (LABEL_UNCERTAIN, Category::Warning, Icon::AlertTriangle)
        }
    };
    let bar_category = if result.verdict == Verdict::Real {
        Category::Success
    } else {
        Category::Destructive
    };

    Presentation {
        label,
        category,
        icon,
        confidence_bar_width: result.confidence.get(),
        bar_category,
        explanation: &result.explanation,
        red_flags: &result.red_flags,
    }
}

/// Label for the submit action in the given state.
pub fn action_label(state: &RequestState) -> &'static str {
    if state.is_pending() {
        ACTION_PENDING
    } else {
        ACTION_IDLE
    }
}
