//! Physical card dimensions and the mapping from grid cells to inches.
//!
//! All coordinates are in inches in document space: the origin is the card's
//! top-left corner and y grows downward.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoding::PunchRow;

// EIA RS-292 standard card size.
pub const CARD_WIDTH_IN: f64 = 7.0 + (3.0 / 8.0);
pub const CARD_LENGTH_IN: f64 = 3.0 + (1.0 / 4.0);
pub const CARD_THICKNESS_IN: f64 = 0.007;

/// Line printer pitch. Punch rows sit on every other printed line.
pub const LINES_PER_INCH: f64 = 8.0;
pub const INCHES_PER_LINE: f64 = 1.0 / LINES_PER_INCH;
pub const INCHES_PER_COLUMN: f64 = 0.087;
pub const COLUMNS_PER_INCH: f64 = 1.0 / INCHES_PER_COLUMN;

pub const COLUMNS: usize = 80;
pub const PRINT_LINES: usize = 25;

pub const CARD_LEFT_MARGIN_IN: f64 = (CARD_WIDTH_IN - (INCHES_PER_COLUMN * COLUMNS as f64)) / 2.0;
pub const CARD_TOP_MARGIN_IN: f64 = 0.0;

pub const PUNCH_HOLE_WIDTH_IN: f64 = 0.04;
pub const PUNCH_HOLE_HEIGHT_IN: f64 = 0.07;

pub const DOCUMENT_MARGIN_IN: f64 = 0.5;

/// One printer's point at a guessed 300 DPI, in user units (inches).
pub const STROKE_WEIGHT_IN: f64 = 1.0 / 300.0;

/// Scale used when flattening printed material and when exporting PNG.
pub const RASTER_SCALE: f32 = 5.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("unknown punch row label '{0}' (expected 12, 11 or 0..9)")]
    UnknownRow(String),
    #[error("unknown column label '{0}' (expected 1..80)")]
    UnknownColumn(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// Blank space around the card in the output document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn uniform(inches: f64) -> Self {
        Self {
            left: inches,
            right: inches,
            top: inches,
            bottom: inches,
        }
    }

    pub fn none() -> Self {
        Self::uniform(0.0)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(DOCUMENT_MARGIN_IN)
    }
}

/// Width and height of the whole document: card plus margins.
pub fn document_size(margins: &Margins) -> (f64, f64) {
    (
        margins.left + CARD_WIDTH_IN + margins.right,
        margins.top + CARD_LENGTH_IN + margins.bottom,
    )
}

pub fn cell_size() -> (f64, f64) {
    (1.0 / COLUMNS_PER_INCH, 1.0 / LINES_PER_INCH)
}

/// Bottom-left corner of the character cell at zero-based grid `column`/`row`.
pub fn cell_origin(column: usize, row: usize) -> Point {
    Point {
        x: CARD_LEFT_MARGIN_IN + (column as f64 * INCHES_PER_COLUMN),
        y: CARD_TOP_MARGIN_IN + ((row + 1) as f64 * INCHES_PER_LINE),
    }
}

pub fn cell_center(column: usize, row: usize) -> Point {
    let origin = cell_origin(column, row);
    Point {
        x: origin.x + INCHES_PER_COLUMN / 2.0,
        y: origin.y - INCHES_PER_LINE / 2.0,
    }
}

/// Grid cell of a punch position. `column` is 1-based; punch rows sit on odd
/// printer lines, interleaved with the printed character line at row 0.
///
/// Columns beyond 80 continue past the drawn grid.
///
/// # Panics
///
/// Panics on column 0, which is never a valid card column.
pub fn punch_cell_indices(column: usize, row: PunchRow) -> (usize, usize) {
    assert!(column >= 1, "card columns are 1-based, got column 0");
    (column - 1, row.index() * 2 + 1)
}

/// Same as [`punch_cell_indices`] but from the printed labels, e.g. `("17", "11")`.
pub fn punch_cell_indices_for_labels(
    column: &str,
    row: &str,
) -> Result<(usize, usize), LayoutError> {
    let col = column
        .parse::<usize>()
        .ok()
        .filter(|c| (1..=COLUMNS).contains(c))
        .ok_or_else(|| LayoutError::UnknownColumn(column.to_string()))?;
    let row = PunchRow::from_label(row).ok_or_else(|| LayoutError::UnknownRow(row.to_string()))?;
    Ok(punch_cell_indices(col, row))
}

/// Punch hole rectangle centered in its punch cell.
pub fn punch_rect(column: usize, row: PunchRow) -> Rect {
    let (grid_col, grid_row) = punch_cell_indices(column, row);
    let center = cell_center(grid_col, grid_row);
    Rect {
        x: center.x - PUNCH_HOLE_WIDTH_IN / 2.0,
        y: center.y - PUNCH_HOLE_HEIGHT_IN / 2.0,
        width: PUNCH_HOLE_WIDTH_IN,
        height: PUNCH_HOLE_HEIGHT_IN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-12;

    #[test]
    fn left_margin_centers_eighty_columns() {
        assert!((CARD_LEFT_MARGIN_IN - 0.2075).abs() < EPS);
        let last = cell_origin(COLUMNS, 0);
        assert!((CARD_WIDTH_IN - last.x - CARD_LEFT_MARGIN_IN).abs() < EPS);
    }

    #[test]
    fn cell_size_matches_pitches() {
        let (w, h) = cell_size();
        assert!((w - INCHES_PER_COLUMN).abs() < EPS);
        assert!((h - 0.125).abs() < EPS);
    }

    #[test]
    fn cell_origin_is_monotonic() {
        for col in 0..COLUMNS {
            for row in 0..PRINT_LINES {
                let here = cell_origin(col, row);
                if row + 1 < PRINT_LINES {
                    let below = cell_origin(col, row + 1);
                    assert!(below.y > here.y);
                    // elevation above the card's bottom edge
                    assert!(CARD_LENGTH_IN - below.y < CARD_LENGTH_IN - here.y);
                    assert_eq!(below.x, here.x);
                }
                if col + 1 < COLUMNS {
                    let right = cell_origin(col + 1, row);
                    assert!(right.x > here.x);
                    assert_eq!(right.y, here.y);
                }
            }
        }
    }

    #[test]
    fn first_cell_origin_is_bottom_of_first_line() {
        let p = cell_origin(0, 0);
        assert!((p.x - CARD_LEFT_MARGIN_IN).abs() < EPS);
        assert!((p.y - 0.125).abs() < EPS);
        let c = cell_center(0, 0);
        assert!((c.x - (CARD_LEFT_MARGIN_IN + 0.0435)).abs() < EPS);
        assert!((c.y - 0.0625).abs() < EPS);
    }

    #[test]
    fn punch_cell_indices_formula() {
        for column in 1..=COLUMNS {
            for row in PunchRow::ALL {
                let (grid_col, grid_row) = punch_cell_indices(column, row);
                assert_eq!(grid_col, column - 1);
                assert_eq!(grid_row, 2 * row.index() + 1);
                let by_label =
                    punch_cell_indices_for_labels(&column.to_string(), row.label()).unwrap();
                assert_eq!(by_label, (grid_col, grid_row));
            }
        }
        // row 9 sits one line above the bottom print line
        assert_eq!(punch_cell_indices(80, PunchRow::Nine), (79, 23));
    }

    #[test]
    fn labels_outside_vocabulary_are_rejected() {
        assert_eq!(
            punch_cell_indices_for_labels("0", "1"),
            Err(LayoutError::UnknownColumn("0".into()))
        );
        assert_eq!(
            punch_cell_indices_for_labels("81", "1"),
            Err(LayoutError::UnknownColumn("81".into()))
        );
        assert_eq!(
            punch_cell_indices_for_labels("x", "1"),
            Err(LayoutError::UnknownColumn("x".into()))
        );
        assert_eq!(
            punch_cell_indices_for_labels("1", "10"),
            Err(LayoutError::UnknownRow("10".into()))
        );
    }

    #[test]
    #[should_panic(expected = "1-based")]
    fn column_zero_is_a_defect() {
        punch_cell_indices(0, PunchRow::One);
    }

    #[test]
    fn punch_rect_is_centered_in_cell() {
        let rect = punch_rect(1, PunchRow::Twelve);
        let center = cell_center(0, 1);
        let got = rect.center();
        assert!((got.x - center.x).abs() < EPS);
        assert!((got.y - center.y).abs() < EPS);
        assert_eq!(rect.width, PUNCH_HOLE_WIDTH_IN);
        assert_eq!(rect.height, PUNCH_HOLE_HEIGHT_IN);
    }

    #[test]
    fn default_document_size() {
        let (w, h) = document_size(&Margins::default());
        assert!((w - (CARD_WIDTH_IN + 1.0)).abs() < EPS);
        assert!((h - (CARD_LENGTH_IN + 1.0)).abs() < EPS);
        assert_eq!(document_size(&Margins::none()), (CARD_WIDTH_IN, CARD_LENGTH_IN));
    }
}
