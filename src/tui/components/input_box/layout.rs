//! Row layout for the composer buffer.
//!
//! Each logical line is wrapped with `textwrap` and the wrapped lines are
//! mapped back to byte ranges of the buffer. Rendering and cursor placement
//! both read the same rows, so what is drawn is exactly where the cursor
//! lands.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible rows before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 6;
/// Offset from area edge to the first text column (border + padding)
pub(super) const TEXT_OFFSET_X: u16 = 2;
/// Offset from area edge to the first text row (border)
pub(super) const TEXT_OFFSET_Y: u16 = 1;

/// One display row: `buffer[start..end]`, never containing `'\n'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row {
    pub start: usize,
    pub end: usize,
}

/// Width available for text inside a box of `outer_width` columns.
pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrapping options shared by height calculation, rendering and cursor
/// placement.
pub(super) fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(usize::from(width.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Split `text` into rows at most `width` columns wide.
///
/// Hard breaks on `'\n'`. A row keeps the spaces `textwrap` trimmed from it,
/// so the rows tile the buffer with no gaps. Always returns at least one row.
pub(super) fn wrap_rows(text: &str, width: u16) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        let starts = line_starts(line, width);
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(line.len());
            rows.push(Row {
                start: offset + start,
                end: offset + end,
            });
        }
        offset += line.len() + 1;
    }
    rows
}

/// Byte offset within `line` where each wrapped line begins.
fn line_starts(line: &str, width: u16) -> Vec<usize> {
    let mut starts = vec![0];
    let mut from = 0;
    for (i, segment) in textwrap::wrap(line, wrap_options(width)).iter().enumerate() {
        let start = segment_start(line, segment, from);
        if i > 0 {
            starts.push(start);
        }
        from = (start + segment.len()).min(line.len());
    }
    starts
}

/// Where `segment` sits in `line`, searching no earlier than `from`.
fn segment_start(line: &str, segment: &Cow<'_, str>, from: usize) -> usize {
    match segment {
        Cow::Borrowed(s) => {
            let start = (s.as_ptr() as usize).wrapping_sub(line.as_ptr() as usize);
            if (from..=line.len()).contains(&start) {
                start
            } else {
                from
            }
        }
        Cow::Owned(s) => line[from..].find(s.as_str()).map_or(from, |i| from + i),
    }
}

/// Row index and display column of byte offset `pos`.
pub(super) fn locate(text: &str, rows: &[Row], pos: usize) -> (usize, u16) {
    let row = rows
        .iter()
        .rposition(|r| r.start <= pos)
        .unwrap_or(0);
    let start = rows.get(row).map_or(0, |r| r.start);
    let col = text[start..pos.max(start)].width();
    (row, u16::try_from(col).unwrap_or(u16::MAX))
}

/// Byte offset in `row` closest to display column `col` without passing it.
pub(super) fn offset_at_column(text: &str, row: Row, col: u16) -> usize {
    let mut used = 0;
    for (i, c) in text[row.start..row.end].char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > usize::from(col) {
            return row.start + i;
        }
        used += w;
    }
    row.end
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}
