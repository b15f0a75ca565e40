//! Line breaking for the measurement container.
//!
//! One breaking routine serves both wrapping (collecting the lines) and
//! measuring (counting them), so the height the container reports always
//! matches the lines a display layer would draw.
//!
//! - **Char** mode breaks at any grapheme boundary.
//! - **Word** mode breaks at UAX #29 word boundaries and force-breaks words
//!   wider than the line. Whitespace that overflows a line hangs past its
//!   edge: it never starts a wrapped line and never adds a row.
//!
//! Explicit `\n` is always a hard break.

use unicode_segmentation::UnicodeSegmentation;

use super::width::{grapheme_width, string_width};
use crate::types::WrapMode;

/// Receives each line as it is broken off.
trait LineSink {
    fn push_line(&mut self, line: &str);
}

impl LineSink for Vec<String> {
    fn push_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

struct LineCount(usize);

impl LineSink for LineCount {
    fn push_line(&mut self, _line: &str) {
        self.0 += 1;
    }
}

fn break_lines(text: &str, max_width: usize, mode: WrapMode, sink: &mut impl LineSink) {
    if text.is_empty() {
        return;
    }

    for raw_line in text.split('\n') {
        if max_width == 0 {
            sink.push_line(raw_line);
            continue;
        }
        match mode {
            WrapMode::Char => break_graphemes(raw_line, max_width, sink),
            WrapMode::Word => break_words(raw_line, max_width, sink),
        }
    }
}

fn break_graphemes(line: &str, max_width: usize, sink: &mut impl LineSink) {
    let mut start = 0;
    let mut width = 0;

    for (at, grapheme) in line.grapheme_indices(true) {
        let gw = grapheme_width(grapheme);
        if width + gw > max_width && at > start {
            sink.push_line(&line[start..at]);
            start = at;
            width = 0;
        }
        width += gw;
    }

    sink.push_line(&line[start..]);
}

fn break_words(line: &str, max_width: usize, sink: &mut impl LineSink) {
    let mut start = 0;
    let mut width = 0;
    let mut wrapped = false;

    for (at, segment) in line.split_word_bound_indices() {
        let seg_width = string_width(segment);
        let blank = segment.chars().all(char::is_whitespace);

        // Whitespace never starts a wrapped line.
        if blank && wrapped && at == start {
            start = at + segment.len();
            continue;
        }

        if width + seg_width <= max_width {
            width += seg_width;
            continue;
        }

        // Overflowing whitespace hangs past the edge.
        if blank {
            if width > 0 {
                sink.push_line(line[start..at].trim_end());
                wrapped = true;
            }
            start = at + segment.len();
            width = 0;
            continue;
        }

        if width > 0 {
            sink.push_line(line[start..at].trim_end());
            wrapped = true;
            start = at;
            width = 0;
        }

        if seg_width > max_width {
            for (offset, grapheme) in segment.grapheme_indices(true) {
                let gw = grapheme_width(grapheme);
                let split = at + offset;
                if width + gw > max_width && split > start {
                    sink.push_line(&line[start..split]);
                    wrapped = true;
                    start = split;
                    width = 0;
                }
                width += gw;
            }
            continue;
        }

        width += seg_width;
    }

    // A soft break that consumed the rest of the line leaves nothing to emit.
    if start < line.len() || !wrapped {
        sink.push_line(&line[start..]);
    }
}

/// Wrap `text` into lines no wider than `max_width` cells.
///
/// Returns an empty `Vec` for empty input. A `max_width` of 0 disables
/// soft wrapping.
pub fn wrap_lines(text: &str, max_width: usize, mode: WrapMode) -> Vec<String> {
    let mut lines = Vec::new();
    break_lines(text, max_width, mode, &mut lines);
    lines
}

/// Number of lines `wrap_lines` would produce, without allocating them.
pub fn count_lines(text: &str, max_width: usize, mode: WrapMode) -> usize {
    let mut count = LineCount(0);
    break_lines(text, max_width, mode, &mut count);
    count.0
}

/// Grapheme-break wrapping.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    wrap_lines(text, max_width, WrapMode::Char)
}

/// Word-break wrapping.
pub fn wrap_text_word(text: &str, max_width: usize) -> Vec<String> {
    wrap_lines(text, max_width, WrapMode::Word)
}

/// Height in lines of `text` under grapheme-break wrapping. 0 for empty text.
pub fn measure_text_height(text: &str, max_width: usize) -> usize {
    count_lines(text, max_width, WrapMode::Char)
}

/// Height in lines of `text` under word-break wrapping. 0 for empty text.
pub fn measure_text_height_word(text: &str, max_width: usize) -> usize {
    count_lines(text, max_width, WrapMode::Word)
}
