//! Text rendering of the visible viewport.
//!
//! Each slot is drawn as a fixed-width `[label]` box; the track offset is
//! converted from px to columns so partially scrolled cards are cut exactly
//! where the viewport edge falls. Labels are measured by display width, so
//! wide (CJK, emoji) characters never straddle a cut.

use crate::geometry::Pitch;
use crate::track::PaddedSequence;
use std::fmt::Display;
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// Padded indices at least partially inside the viewport.
#[must_use]
pub fn visible_slots(len: usize, offset: f32, pitch: Pitch, viewport_width: f32) -> Range<usize> {
    if len == 0 || pitch.px() <= 0.0 || viewport_width <= 0.0 {
        return 0..0;
    }
    let left = -offset;
    let first = (left / pitch.px()).floor().max(0.0) as usize;
    let last = ((left + viewport_width) / pitch.px()).ceil().max(0.0) as usize;
    first.min(len)..last.min(len)
}

/// Lay out `label` in exactly `columns` cells as `[label   ]`.
fn fit_cells(label: &str, columns: usize) -> Vec<Option<char>> {
    let mut cells = Vec::with_capacity(columns);
    if columns < 2 {
        cells.resize(columns, Some(' '));
        return cells;
    }
    let inner = columns - 2;
    cells.push(Some('['));
    let mut used = 0;
    for ch in label.chars() {
        let width = ch.width().unwrap_or(0);
        if width == 0 {
            continue;
        }
        if used + width > inner {
            break;
        }
        cells.push(Some(ch));
        // `None` marks the continuation cells of a wide character.
        for _ in 1..width {
            cells.push(None);
        }
        used += width;
    }
    cells.resize(inner + 1, Some(' '));
    cells.push(Some(']'));
    cells
}

/// Render the viewport as one line of `viewport_width / pitch * columns_per_item`
/// cells.
#[must_use]
pub fn render_viewport<T: Display>(
    sequence: &PaddedSequence<T>,
    offset: f32,
    pitch: Pitch,
    viewport_width: f32,
    columns_per_item: usize,
) -> String {
    if pitch.px() <= 0.0 || columns_per_item == 0 || viewport_width <= 0.0 {
        return String::new();
    }
    let px_per_column = pitch.px() / columns_per_item as f32;
    let total = (viewport_width / px_per_column).round() as usize;
    // Whole columns; sub-column drag offsets round to the nearest cell.
    let start = (-offset / px_per_column).round() as i64;

    let mut boxes: Vec<Option<Vec<Option<char>>>> = vec![None; sequence.len()];
    let mut line = String::with_capacity(total);
    let mut column = 0;
    while column < total {
        let world = start + column as i64;
        let cell = if world < 0 {
            Some(' ')
        } else {
            let slot = world as usize / columns_per_item;
            let within = world as usize % columns_per_item;
            match sequence.get(slot) {
                None => Some(' '),
                Some(entry) => {
                    let cells = boxes[slot].get_or_insert_with(|| {
                        fit_cells(&entry.item().to_string(), columns_per_item)
                    });
                    match cells[within] {
                        // Cut through a wide character: blank its visible half.
                        None => Some(' '),
                        Some(ch) => {
                            let width = ch.width().unwrap_or(1).max(1);
                            if width > 1 && column + width > total {
                                Some(' ')
                            } else {
                                line.push(ch);
                                column += width;
                                continue;
                            }
                        }
                    }
                }
            }
        };
        if let Some(ch) = cell {
            line.push(ch);
        }
        column += 1;
    }
    line
}
