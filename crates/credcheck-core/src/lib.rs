pub mod input;
pub mod model;
pub mod presenter;
pub mod samples;

pub use input::InputStore;
pub use model::{
    AnalysisRequest, AnalysisResult, Confidence, ConfidenceOutOfRange, ErrorKind, RequestState,
    Verdict,
};
pub use presenter::{Category, Icon, Presentation, action_label, present};
pub use samples::SAMPLE_TEXTS;
