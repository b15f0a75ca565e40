//! Text measurement for terminal rendering.
//!
//! Cell widths come from `unicode-width` (East Asian Width tables) with
//! pictographs forced to two cells, and never split a grapheme cluster
//! (`unicode-segmentation`, UAX #29). Wrapping and line counting share one
//! breaking routine.

mod width;
mod wrap;

pub use width::{char_width, grapheme_width, string_width};
pub use wrap::{
    count_lines, measure_text_height, measure_text_height_word, wrap_lines, wrap_text,
    wrap_text_word,
};
