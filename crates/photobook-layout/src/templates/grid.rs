//! Grid slot generation
//!
//! Every grid template is produced by the same row/column formula so that
//! cells are evenly sized and evenly spaced for any arity.

use super::TemplateSlot;

/// Generate `cols × rows` slots in row-major order.
///
/// # Arguments
/// * `cols` - Number of columns
/// * `rows` - Number of rows
/// * `margin` - Outer margin on every side, normalized
/// * `gutter` - Gap between neighbouring cells, normalized
///
/// Cell size is whatever remains after margins and gutters, split evenly.
/// A margin/gutter combination that leaves no room yields zero-sized cells
/// rather than negative ones.
pub fn grid_slots(cols: usize, rows: usize, margin: f64, gutter: f64) -> Vec<TemplateSlot> {
    if cols == 0 || rows == 0 {
        return Vec::new();
    }

    let cell_width = cell_extent(cols, margin, gutter);
    let cell_height = cell_extent(rows, margin, gutter);
    let stride_x = cell_width + gutter;
    let stride_y = cell_height + gutter;

    let mut slots = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            slots.push(TemplateSlot::new(
                margin + col as f64 * stride_x,
                margin + row as f64 * stride_y,
                cell_width,
                cell_height,
            ));
        }
    }
    slots
}

fn cell_extent(count: usize, margin: f64, gutter: f64) -> f64 {
    let available = 1.0 - 2.0 * margin - (count - 1) as f64 * gutter;
    (available / count as f64).max(0.0)
}

// =============================================================================
// Tests
// =============================================================================
