//! Terminal rendering of verdict cards and request states.

use credcheck_core::presenter::{Category, Icon, Presentation};
use credcheck_core::samples::{SAMPLE_TEXTS, preview};
use credcheck_core::{RequestState, action_label, present};

const BAR_WIDTH: usize = 40;

// ── Public API ──

/// Render a request state for the terminal. Idle renders as nothing.
pub fn render_state(state: &RequestState) -> String {
    match state {
        RequestState::Idle => String::new(),
        RequestState::Pending => format!("{}\n", action_label(state)),
        RequestState::Succeeded(result) => render_card(&present(result)),
        RequestState::Failed { kind, message } => {
            format!("Analysis failed ({kind}): {message}\n")
        }
    }
}

/// Render a verdict card: header, confidence bar, explanation, red flags.
pub fn render_card(p: &Presentation<'_>) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} {} ===\n", icon_glyph(p.icon), p.label));
    out.push_str(&format!("Confidence: {}%\n", p.confidence_bar_width));
    out.push_str(&format!(
        "{} {}\n",
        confidence_bar(p.confidence_bar_width),
        category_tag(p.bar_category)
    ));
    out.push('\n');

    out.push_str("Analysis\n");
    out.push_str(&format!("  {}\n", p.explanation));

    if p.show_red_flags() {
        out.push('\n');
        out.push_str("Red Flags Detected\n");
        for flag in p.red_flags {
            out.push_str(&format!("  - {flag}\n"));
        }
    }
    out
}

/// Numbered list of the built-in sample headlines.
pub fn render_samples() -> String {
    SAMPLE_TEXTS
        .iter()
        .enumerate()
        .map(|(i, text)| format!("  {}. {}\n", i + 1, preview(text)))
        .collect()
}

// ── Helpers ──

fn confidence_bar(width: u8) -> String {
    let filled = usize::from(width.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::CheckCircle => "[ok]",
        Icon::XCircle => "[x]",
        Icon::AlertTriangle => "[!]",
    }
}

fn category_tag(category: Category) -> String {
    format!("({})", category.as_str())
}
