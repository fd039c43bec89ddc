//! Post-processing for generated summaries.
//!
//! The model is asked to use emoji only on section headings but does not
//! always comply. Every line that is not a heading has Unicode emoji and
//! Slack `:emoji_code:` shortcodes removed before the summary is posted.

use anyhow::Result;
use regex::Regex;
use tracing::debug;

use crate::summary::HEADING_GLYPHS;

/// Inclusive code point ranges treated as decoration.
pub const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F000, 0x1F0FF), // Mahjong, domino, playing cards
    (0x1F100, 0x1F1FF), // Enclosed alphanumerics, regional indicator flags
    (0x1F200, 0x1F2FF), // Enclosed ideographic supplement
    (0x1F300, 0x1F5FF), // Misc symbols and pictographs
    (0x1F600, 0x1F64F), // Emoticons
    (0x1F680, 0x1F6FF), // Transport and map
    (0x1F780, 0x1F7FF), // Geometric shapes extended
    (0x1F900, 0x1F9FF), // Supplemental symbols and pictographs
    (0x1FA70, 0x1FAFF), // Symbols and pictographs extended-A
    (0x203C, 0x203C),   // ‼
    (0x2049, 0x2049),   // ⁉
    (0x2300, 0x23FF),   // Misc technical (watch, hourglass, media controls)
    (0x24C2, 0x24C2),   // Ⓜ
    (0x25AA, 0x25FE),   // Small squares, play/reverse triangles
    (0x2600, 0x26FF),   // Misc symbols
    (0x2700, 0x27BF),   // Dingbats
    (0x2934, 0x2935),   // ⤴ ⤵
    (0x2B00, 0x2BFF),   // Misc symbols and arrows
    (0x3030, 0x3030),   // 〰
    (0x303D, 0x303D),   // 〽
    (0x3297, 0x3297),   // ㊗
    (0x3299, 0x3299),   // ㊙
    (0x200D, 0x200D),   // Zero width joiner
    (0x20E3, 0x20E3),   // Combining keycap
    (0xFE0E, 0xFE0F),   // Variation selectors
    (0xE0020, 0xE007F), // Tag sequences (subdivision flags)
];

/// Slack shortcodes such as `:white_check_mark:` or `:thumbs-up:`. At least
/// one letter is required so clock times like `10:30:00` survive.
const EMOJI_CODE_PATTERN: &str = r":[a-z0-9_+\-]*[a-z_][a-z0-9_+\-]*:";

pub fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// A heading line starts, after leading whitespace, with a heading glyph.
/// Body lines that happen to start with one are treated as headings too.
pub fn is_heading_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    HEADING_GLYPHS.iter().any(|glyph| trimmed.starts_with(glyph))
}

pub struct SummarySanitizer {
    emoji_code_regex: Regex,
}

impl SummarySanitizer {
    pub fn new() -> Result<Self> {
        let emoji_code_regex = Regex::new(EMOJI_CODE_PATTERN)?;
        Ok(Self { emoji_code_regex })
    }

    pub fn sanitize(&self, text: &str) -> String {
        let result = text
            .split('\n')
            .map(|line| {
                if is_heading_line(line) {
                    line.to_string()
                } else {
                    self.clean_line(line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        debug!(
            "Sanitized summary from {} to {} bytes",
            text.len(),
            result.len()
        );
        result
    }

    fn clean_line(&self, line: &str) -> String {
        let mut cleaned: String = line.chars().filter(|c| !is_emoji(*c)).collect();

        // Removing one shortcode can splice two fragments into a new one.
        while self.emoji_code_regex.is_match(&cleaned) {
            cleaned = self.emoji_code_regex.replace_all(&cleaned, "").into_owned();
        }

        cleaned
    }
}
