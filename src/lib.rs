//! Core library for drawing IBM 80-column punch cards as SVG and PNG.
//!
//! A [`CardModel`] is built once from the card text and then rendered any
//! number of times with different [`RenderOptions`].

mod document;
mod encoding;
mod geometry;
mod punchcard;
mod raster;
mod vector;

pub use document::{
    Document, Element, Group, ImageShape, PolygonShape, RectShape, TextAnchor, TextShape,
};
pub use encoding::{CODE_TABLE, PunchRow, TEST_PATTERN, is_encodable, lookup};
pub use geometry::{
    CARD_LENGTH_IN, CARD_THICKNESS_IN, CARD_WIDTH_IN, COLUMNS, LayoutError, Margins,
    PRINT_LINES, Point, RASTER_SCALE, Rect, cell_center, cell_origin, cell_size, document_size,
    punch_cell_indices, punch_cell_indices_for_labels, punch_rect,
};
pub use punchcard::{CardModel, CardReport, DEFAULT_MANUFACTURER, Punch, RenderOptions};
pub use raster::{Rasterize, RenderError, ResvgRasterizer, WHITE};

/// Builds the card for `content` and renders it in one step.
pub fn render_card(
    content: &str,
    options: &RenderOptions,
    rasterizer: &dyn Rasterize,
) -> Result<Document, RenderError> {
    CardModel::build(content).render(options, rasterizer)
}
