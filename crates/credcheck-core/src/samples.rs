//! Sample headlines offered by the demo.

pub const SAMPLE_TEXTS: &[&str] = &[
    "Scientists discover new planet made entirely of diamonds orbiting nearby star",
    "Local community raises funds for new children's hospital wing",
    "BREAKING: Government announces mandatory microchip implants for all citizens by 2025",
];

const PREVIEW_CHARS: usize = 40;

/// Short preview of a sample: the first 40 characters followed by `...`.
pub fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}
