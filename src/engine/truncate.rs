//! Height-bounded truncation.
//!
//! Finds where to cut `content` so that the cut text, the marker and the
//! action suffix together fit under `max_height`, asking a [`Measure`] for
//! the height of each candidate. Three searches, one per [`Position`]:
//!
//! - **End**: longest prefix, `prefix + marker`.
//! - **Start**: longest suffix, `marker + suffix`.
//! - **Middle**: a prefix and a suffix narrowed together,
//!   `prefix + marker + marker + suffix`.
//!
//! Offsets count grapheme clusters, so a cut never splits a user-perceived
//! character. A measured height equal to the budget fits. A non-positive
//! budget yields the marker(s) alone.

use unicode_segmentation::UnicodeSegmentation;

use crate::types::{Position, TruncationResult};

// =============================================================================
// Measurement seam
// =============================================================================

/// Height of `text` laid out in a fixed container, in budget units.
///
/// Implemented for any `FnMut(&str) -> f32` and for
/// [`MeasureContainer`](crate::layout::MeasureContainer).
pub trait Measure {
    fn measure(&mut self, text: &str) -> f32;
}

impl<F> Measure for F
where
    F: FnMut(&str) -> f32,
{
    fn measure(&mut self, text: &str) -> f32 {
        self(text)
    }
}

// =============================================================================
// Options and stats
// =============================================================================

/// Everything the search needs besides the content and the oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncateOptions<'a> {
    pub max_height: f32,
    /// Inserted at each cut.
    pub marker: &'a str,
    /// Appended to every measured candidate, never to the final text.
    pub action_suffix: &'a str,
    pub position: Position,
}

impl<'a> TruncateOptions<'a> {
    pub fn new(max_height: f32) -> Self {
        Self {
            max_height,
            marker: "...",
            action_suffix: "",
            position: Position::End,
        }
    }

    pub fn marker(mut self, marker: &'a str) -> Self {
        self.marker = marker;
        self
    }

    pub fn action_suffix(mut self, action_suffix: &'a str) -> Self {
        self.action_suffix = action_suffix;
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// Work done by one truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TruncationStats {
    /// Calls made to the measure, including the initial fit check.
    pub measurements: usize,
}

// =============================================================================
// Search state
// =============================================================================

/// Half-open bracket `[left, right)` of grapheme offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchRange {
    left: usize,
    right: usize,
}

impl SearchRange {
    fn new(left: usize, right: usize) -> Self {
        debug_assert!(left <= right);
        Self { left, right }
    }

    fn width(&self) -> usize {
        self.right - self.left
    }

    fn floor_mid(&self) -> usize {
        (self.left + self.right) / 2
    }

    fn ceil_mid(&self) -> usize {
        (self.left + self.right).div_ceil(2)
    }
}

/// Content split at grapheme boundaries.
struct Fragments<'a> {
    content: &'a str,
    /// Byte offset of each grapheme start, plus `content.len()`.
    bounds: Vec<usize>,
}

impl<'a> Fragments<'a> {
    fn new(content: &'a str) -> Self {
        let bounds = content
            .grapheme_indices(true)
            .map(|(at, _)| at)
            .chain(std::iter::once(content.len()))
            .collect();
        Self { content, bounds }
    }

    /// Number of graphemes.
    fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// First `k` graphemes.
    fn head(&self, k: usize) -> &'a str {
        &self.content[..self.bounds[k]]
    }

    /// Graphemes from offset `k` on.
    fn tail(&self, k: usize) -> &'a str {
        &self.content[self.bounds[k]..]
    }
}

/// Measures candidates against the budget and counts the calls.
struct Gauge<'m, M: Measure + ?Sized> {
    measure: &'m mut M,
    max_height: f32,
    measurements: usize,
    candidate: String,
}

impl<'m, M: Measure + ?Sized> Gauge<'m, M> {
    fn new(measure: &'m mut M, max_height: f32) -> Self {
        Self {
            measure,
            max_height,
            measurements: 0,
            candidate: String::new(),
        }
    }

    /// Whether the concatenation of `parts` is taller than the budget.
    fn overflows(&mut self, parts: &[&str]) -> bool {
        self.candidate.clear();
        for part in parts {
            self.candidate.push_str(part);
        }

        self.measurements += 1;
        let height = self.measure.measure(&self.candidate);
        let overflow = height > self.max_height;
        tracing::trace!(measurement = self.measurements, height, overflow, "measured candidate");
        overflow
    }
}

// =============================================================================
// Strategies
// =============================================================================

fn cut_end<M: Measure + ?Sized>(
    frags: &Fragments<'_>,
    gauge: &mut Gauge<'_, M>,
    marker: &str,
    suffix: &str,
) -> String {
    let mut range = SearchRange::new(0, frags.len());

    while range.width() > 1 {
        let middle = range.floor_mid();
        if gauge.overflows(&[frags.head(middle), marker, suffix]) {
            range.right = middle;
        } else {
            range.left = middle;
        }
    }

    format!("{}{marker}", frags.head(range.left))
}

fn cut_start<M: Measure + ?Sized>(
    frags: &Fragments<'_>,
    gauge: &mut Gauge<'_, M>,
    marker: &str,
    suffix: &str,
) -> String {
    let mut range = SearchRange::new(0, frags.len());

    while range.width() > 1 {
        let middle = range.floor_mid();
        if gauge.overflows(&[marker, frags.tail(middle), suffix]) {
            range.left = middle;
        } else {
            range.right = middle;
        }
    }

    format!("{marker}{}", frags.tail(range.right))
}

/// Narrows a head bracket and a tail bracket in lockstep.
///
/// The head bracket grows with floor midpoints, the tail bracket with ceil
/// midpoints. Each step strictly shrinks every bracket of width 2 or more,
/// so the loop ends once both are down to width 1 or 0. The final prefix
/// ends at the head bracket's upper bound and the final suffix starts at the
/// tail bracket's upper bound.
fn cut_middle<M: Measure + ?Sized>(
    frags: &Fragments<'_>,
    gauge: &mut Gauge<'_, M>,
    marker: &str,
    suffix: &str,
) -> String {
    let len = frags.len();
    let mid = len / 2;
    let mut head = SearchRange::new(0, mid);
    let mut tail = SearchRange::new(mid, len);

    while head.width() > 1 || tail.width() > 1 {
        let head_middle = head.floor_mid();
        let tail_middle = tail.ceil_mid();

        let candidate = [
            frags.head(head_middle),
            marker,
            suffix,
            marker,
            frags.tail(tail_middle),
        ];
        if gauge.overflows(&candidate) {
            head.right = head_middle;
            tail.left = tail_middle;
        } else {
            head.left = head_middle;
            tail.right = tail_middle;
        }
    }

    format!(
        "{}{marker}{marker}{}",
        frags.head(head.right),
        frags.tail(tail.right)
    )
}

// =============================================================================
// Entry points
// =============================================================================

/// Truncate `content` to fit `options.max_height`.
///
/// Returns the content unchanged (`truncated == false`) when it is empty or
/// already fits.
pub fn truncate_to_height<M: Measure + ?Sized>(
    content: &str,
    options: &TruncateOptions<'_>,
    measure: &mut M,
) -> TruncationResult {
    truncate_with_stats(content, options, measure).0
}

/// [`truncate_to_height`], also reporting how many measurements it took.
pub fn truncate_with_stats<M: Measure + ?Sized>(
    content: &str,
    options: &TruncateOptions<'_>,
    measure: &mut M,
) -> (TruncationResult, TruncationStats) {
    if content.is_empty() {
        return (TruncationResult::unchanged(content), TruncationStats::default());
    }

    let mut gauge = Gauge::new(measure, options.max_height);

    if !gauge.overflows(&[content]) {
        tracing::debug!(max_height = options.max_height, "content fits, no truncation");
        let stats = TruncationStats { measurements: gauge.measurements };
        return (TruncationResult::unchanged(content), stats);
    }

    let frags = Fragments::new(content);
    let marker = options.marker;
    let suffix = options.action_suffix;

    let text = if options.max_height <= 0.0 {
        // Nothing can fit a non-positive budget.
        marker.repeat(options.position.marker_count())
    } else {
        match options.position {
            Position::End => cut_end(&frags, &mut gauge, marker, suffix),
            Position::Start => cut_start(&frags, &mut gauge, marker, suffix),
            Position::Middle => cut_middle(&frags, &mut gauge, marker, suffix),
        }
    };

    tracing::debug!(
        position = %options.position,
        graphemes = frags.len(),
        measurements = gauge.measurements,
        max_height = options.max_height,
        "content truncated"
    );

    let stats = TruncationStats { measurements: gauge.measurements };
    (TruncationResult::truncated(text), stats)
}

// =============================================================================
// Tests
// =============================================================================
