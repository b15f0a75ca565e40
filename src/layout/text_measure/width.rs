//! Terminal cell width of characters, grapheme clusters and strings.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Pictographic blocks most terminals draw two cells wide even when the
/// East Asian Width tables say otherwise.
const WIDE_PICTOGRAPHS: &[(u32, u32)] = &[
    (0x2600, 0x27BF),   // Misc symbols, dingbats
    (0x1F300, 0x1F5FF), // Symbols and pictographs
    (0x1F600, 0x1F64F), // Emoticons
    (0x1F680, 0x1F6FF), // Transport and map
    (0x1F900, 0x1F9FF), // Supplemental symbols and pictographs
    (0x1FA70, 0x1FAFF), // Symbols and pictographs extended-A
];

/// Codepoints that, when trailing a base character, turn the cluster into a
/// two-cell emoji: ZWJ, VS16, keycap.
const EMOJI_JOINERS: &[u32] = &[0x200D, 0xFE0F, 0x20E3];

const SKIN_TONES: (u32, u32) = (0x1F3FB, 0x1F3FF);
const REGIONAL_INDICATORS: (u32, u32) = (0x1F1E6, 0x1F1FF);

#[inline]
fn in_range(cp: u32, (lo, hi): (u32, u32)) -> bool {
    (lo..=hi).contains(&cp)
}

/// Cell width of a single codepoint: 0, 1 or 2.
#[inline]
pub fn char_width(c: char) -> usize {
    let cp = c as u32;
    if WIDE_PICTOGRAPHS.iter().any(|&range| in_range(cp, range)) {
        return 2;
    }
    c.width().unwrap_or(0)
}

/// Cell width of one extended grapheme cluster.
///
/// Flags, ZWJ families, skin-tone and keycap sequences count as 2; a base
/// character followed by combining marks counts as the base alone.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(base) = chars.next() else {
        return 0;
    };

    if chars.as_str().is_empty() {
        return char_width(base);
    }

    if in_range(base as u32, REGIONAL_INDICATORS) {
        return 2;
    }

    let is_emoji_sequence = chars.any(|c| {
        let cp = c as u32;
        EMOJI_JOINERS.contains(&cp) || in_range(cp, SKIN_TONES)
    });
    if is_emoji_sequence {
        return 2;
    }

    base.width().unwrap_or(0)
}

/// Cell width of a string.
pub fn string_width(s: &str) -> usize {
    if s.is_ascii() {
        // Control bytes occupy no cells.
        return s.bytes().filter(|b| !b.is_ascii_control()).count();
    }
    s.graphemes(true).map(grapheme_width).sum()
}
