use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::{
    Document, Element, Group, ImageShape, PolygonShape, RectShape, TextAnchor, TextShape,
};
use crate::encoding::{PunchRow, lookup};
use crate::geometry::{
    CARD_LEFT_MARGIN_IN, CARD_LENGTH_IN, CARD_WIDTH_IN, COLUMNS, INCHES_PER_COLUMN,
    INCHES_PER_LINE, Margins, PRINT_LINES, Point, RASTER_SCALE, Rect, STROKE_WEIGHT_IN,
    cell_center, cell_origin, cell_size, document_size, punch_cell_indices, punch_rect,
};
use crate::raster::{RenderError, Rasterize, WHITE};
use crate::vector::is_xml_char;

pub const DEFAULT_MANUFACTURER: &str =
    "IBM UNITED STATES LIMITED                  3081 IBM UBM JABMS WE ALL BM FOR IBM";

const STROKE_COLOR_CUTLINES: &str = "red";
const STROKE_COLOR_HOLE_BOUNDARIES: &str = "grey";

/// Print lines carrying the small column numbers.
const COLUMN_LABEL_LINES: [usize; 2] = [6, 24];

/// Per-render switches. Each one is independent of the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Rasterize printed material and structure into one embedded image.
    pub flatten: bool,
    /// Draw the 80×25 character cell grid.
    pub show_cell_boundaries: bool,
    /// Draw the outline of all 960 punch positions.
    pub show_punch_boundaries: bool,
    /// Print a filled box at every punched position.
    pub show_punch_boxes: bool,
    #[serde(default)]
    pub margins: Margins,
}

/// One punched hole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Punch {
    /// 1-based card column.
    pub column: usize,
    pub row: PunchRow,
    pub character: char,
    pub bounds: Rect,
}

/// Machine-readable summary of a card.
#[derive(Debug, Clone, Serialize)]
pub struct CardReport<'a> {
    pub content: &'a str,
    pub manufacturer: &'a str,
    pub columns: usize,
    pub overflow: bool,
    pub punches: &'a [Punch],
}

/// Immutable geometry of one card. Every group is built once at construction
/// and shared by all subsequent renders.
#[derive(Debug, Clone)]
pub struct CardModel {
    content: String,
    manufacturer: String,
    punches: Vec<Punch>,
    style: String,
    // cut-lines
    boundary: Group,
    punched_holes: Group,
    // structure, hidden by default
    cell_grid: Group,
    punch_boundaries: Group,
    // printed material
    row_labels: Group,
    column_labels: Group,
    content_labels: Group,
    manufacturer_label: Group,
    punch_boxes: Group,
}

impl CardModel {
    pub fn build(content: &str) -> Self {
        Self::with_manufacturer(content, DEFAULT_MANUFACTURER)
    }

    /// An empty `manufacturer` falls back to [`DEFAULT_MANUFACTURER`].
    pub fn with_manufacturer(content: &str, manufacturer: &str) -> Self {
        let manufacturer = if manufacturer.is_empty() {
            DEFAULT_MANUFACTURER
        } else {
            manufacturer
        };
        let punches = content_punches(content);
        let model = Self {
            content: content.to_string(),
            manufacturer: manufacturer.to_string(),
            style: card_style(),
            boundary: card_boundary(),
            punched_holes: punched_holes(&punches),
            cell_grid: cell_grid(),
            punch_boundaries: punch_boundaries(),
            row_labels: row_number_labels(),
            column_labels: column_number_labels(),
            content_labels: content_labels(content),
            manufacturer_label: manufacturer_label(manufacturer),
            punch_boxes: punch_boxes(&punches),
            punches,
        };
        debug!(
            "built card model: {} columns, {} punches, {} grid cells",
            model.columns(),
            model.punches.len(),
            model.cell_grid.len()
        );
        model
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Number of columns the content occupies, one per character.
    pub fn columns(&self) -> usize {
        self.content.chars().count()
    }

    pub fn punches(&self) -> &[Punch] {
        &self.punches
    }

    pub fn report(&self) -> CardReport<'_> {
        CardReport {
            content: &self.content,
            manufacturer: &self.manufacturer,
            columns: self.columns(),
            overflow: self.columns() > COLUMNS,
            punches: &self.punches,
        }
    }

    /// Assemble a document from the pre-built layers.
    ///
    /// Layer order, bottom to top: printed material, structure, cut-lines.
    /// When flattening, printed material and structure are replaced by a
    /// single raster image produced through `rasterizer`.
    pub fn render(
        &self,
        options: &RenderOptions,
        rasterizer: &dyn Rasterize,
    ) -> Result<Document, RenderError> {
        debug!("rendering card {:?} with {:?}", self.content, options);

        let margins = &options.margins;
        let offset = Point {
            x: margins.left,
            y: margins.top,
        };

        let mut structure: Vec<Element> = Vec::new();
        if options.show_cell_boundaries {
            debug!("including {} cell boundaries", self.cell_grid.len());
            structure.push(self.cell_grid.clone().into());
        }
        if options.show_punch_boundaries {
            structure.push(self.punch_boundaries.clone().into());
        }

        let mut printed: Vec<Element> = vec![
            self.row_labels.clone().into(),
            self.column_labels.clone().into(),
            self.content_labels.clone().into(),
            self.manufacturer_label.clone().into(),
        ];
        if options.show_punch_boxes {
            printed.push(self.punch_boxes.clone().into());
        }

        let printed_g = Group::new("card_printed", printed);
        let structure_g = Group::new("punchcard_structure", structure);

        let mut layers = vec![Element::Style(self.style.clone())];
        if options.flatten {
            let flat = self.flattened(printed_g, structure_g, rasterizer)?;
            layers.push(flat.translated(offset).into());
        } else {
            layers.push(printed_g.translated(offset).into());
            layers.push(structure_g.translated(offset).into());
        }
        layers.push(
            Group::new(
                "card_cutlines",
                vec![self.boundary.clone().into(), self.punched_holes.clone().into()],
            )
            .translated(offset)
            .into(),
        );

        let (width, height) = document_size(margins);
        Ok(Document {
            width,
            height,
            elements: layers,
        })
    }

    /// Printed material and structure rasterized at exact card size, then
    /// embedded as one image the size of the card.
    fn flattened(
        &self,
        printed: Group,
        structure: Group,
        rasterizer: &dyn Rasterize,
    ) -> Result<Group, RenderError> {
        let print_doc = Document {
            width: CARD_WIDTH_IN,
            height: CARD_LENGTH_IN,
            elements: vec![
                Element::Style(self.style.clone()),
                printed.into(),
                structure.into(),
            ],
        };
        let png = rasterizer.rasterize(&print_doc.to_svg_string(), RASTER_SCALE, WHITE)?;
        debug!("flattened printed material into {} byte PNG", png.len());
        let image = ImageShape {
            id: "flattened_print",
            width: CARD_WIDTH_IN,
            height: CARD_LENGTH_IN,
            href: format!("data:image/png;base64,{}", STANDARD.encode(&png)),
        };
        Ok(Group::new("card_printed_flattened", vec![Element::Image(image)]))
    }
}

fn card_style() -> String {
    // #996633 is IBM punchcard printed brown
    format!(
        r#"
svg {{ background-color: #ffffff; }}
.collabel {{ font-size: 0.004em; font-family: monospace; fill: #996633; }}
.numlabel {{ font-size: 0.007em; font-family: monospace; fill: #996633; }}
.cardchar {{ font-size: 0.007em; font-family: monospace; fill: black; }}
.card_manufacturer_label {{ font-size: 0.004em; font-family: sans-serif; fill: green; }}
.cardnotes {{ font-size: 0.004em; font-family: sans-serif; fill: green; }}
.cardpunch_boundary {{ stroke: {cut}; fill: transparent; stroke-width: {w}; }}
.cardpunch_hole_boundary {{ stroke: {hole}; fill: transparent; stroke-width: {w}; }}
"#,
        cut = STROKE_COLOR_CUTLINES,
        hole = STROKE_COLOR_HOLE_BOUNDARIES,
        w = STROKE_WEIGHT_IN,
    )
}

/// Card outline with the clipped top-left corner.
fn card_boundary() -> Group {
    let points = vec![
        Point {
            x: 0.0,
            y: INCHES_PER_LINE,
        },
        Point {
            x: INCHES_PER_COLUMN,
            y: 0.0,
        },
        Point {
            x: CARD_WIDTH_IN,
            y: 0.0,
        },
        Point {
            x: CARD_WIDTH_IN,
            y: CARD_LENGTH_IN,
        },
        Point {
            x: 0.0,
            y: CARD_LENGTH_IN,
        },
    ];
    Group::new(
        "cardpunch_boundary",
        vec![Element::Polygon(PolygonShape {
            points,
            class: "cardpunch_boundary",
            stroke: STROKE_COLOR_CUTLINES,
            stroke_width: STROKE_WEIGHT_IN,
        })],
    )
}

fn content_punches(content: &str) -> Vec<Punch> {
    content
        .chars()
        .enumerate()
        .flat_map(|(idx, character)| {
            let column = idx + 1;
            lookup(character).iter().map(move |&row| Punch {
                column,
                row,
                character,
                bounds: punch_rect(column, row),
            })
        })
        .collect()
}

fn punch_shape(
    bounds: Rect,
    class: Option<&'static str>,
    fill: &'static str,
    stroke: Option<&'static str>,
) -> Element {
    Element::Rect(RectShape {
        id: None,
        bounds,
        class,
        fill: Some(fill),
        stroke,
        stroke_dasharray: None,
        stroke_width: STROKE_WEIGHT_IN,
    })
}

fn punched_holes(punches: &[Punch]) -> Group {
    let holes = punches
        .iter()
        .map(|p| punch_shape(p.bounds, Some("cardpunch_boundary"), "transparent", Some("blue")))
        .collect();
    Group::new("cardpunches", holes)
}

fn punch_boxes(punches: &[Punch]) -> Group {
    let boxes = punches
        .iter()
        .map(|p| punch_shape(p.bounds, None, "blue", Some("blue")))
        .collect();
    Group::new("cardpunch_printblocks", boxes)
}

fn punch_boundaries() -> Group {
    let mut holes = Vec::with_capacity(PunchRow::ALL.len() * COLUMNS);
    for row in PunchRow::ALL {
        for column in 1..=COLUMNS {
            holes.push(punch_shape(
                punch_rect(column, row),
                Some("cardpunch_hole_boundary"),
                "transparent",
                None,
            ));
        }
    }
    Group::new("cardpunch_hole_boundary", holes)
}

fn cell_grid() -> Group {
    let (width, height) = cell_size();
    let mut cells = Vec::with_capacity(PRINT_LINES * COLUMNS);
    for row in 0..PRINT_LINES {
        for col in 0..COLUMNS {
            let origin = cell_origin(col, row);
            cells.push(Element::Rect(RectShape {
                id: Some(format!("cell_box_{}_{}", col, row)),
                bounds: Rect {
                    x: origin.x,
                    y: origin.y - height,
                    width,
                    height,
                },
                class: None,
                fill: Some("transparent"),
                stroke: Some(STROKE_COLOR_HOLE_BOUNDARIES),
                stroke_dasharray: Some("3 1"),
                stroke_width: STROKE_WEIGHT_IN,
            }));
        }
    }
    debug!("character grid has {} elements", cells.len());
    Group::new("character_grid", cells)
}

fn centered_text(position: Point, text: impl Into<String>, class: &'static str) -> Element {
    Element::Text(TextShape {
        position,
        text: text.into(),
        class,
        anchor: TextAnchor::Centered,
    })
}

/// Digits 0..9 printed in every column, each inside its own punch position.
fn row_number_labels() -> Group {
    let mut labels = Vec::with_capacity(PunchRow::DIGITS.len() * COLUMNS);
    for row in PunchRow::DIGITS {
        for column in 1..=COLUMNS {
            let (grid_col, grid_row) = punch_cell_indices(column, row);
            labels.push(centered_text(cell_center(grid_col, grid_row), row.label(), "numlabel"));
        }
    }
    Group::new("row_number_labels", labels)
}

fn column_number_labels() -> Group {
    let mut labels = Vec::with_capacity(COLUMN_LABEL_LINES.len() * COLUMNS);
    for line in COLUMN_LABEL_LINES {
        for col in 0..COLUMNS {
            labels.push(centered_text(cell_center(col, line), (col + 1).to_string(), "collabel"));
        }
    }
    Group::new("column_number_labels", labels)
}

/// The content itself, printed along the top line above each column.
/// Control characters keep their column but print nothing.
fn content_labels(content: &str) -> Group {
    let labels = content
        .chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_control() && is_xml_char(*ch))
        .map(|(col, ch)| centered_text(cell_center(col, 0), ch, "cardchar"))
        .collect();
    Group::new("cardpunchlabels", labels)
}

fn manufacturer_label(text: &str) -> Group {
    Group::new(
        "card_manufacturer_label",
        vec![Element::Text(TextShape {
            position: Point {
                x: CARD_LEFT_MARGIN_IN,
                y: CARD_LENGTH_IN - 0.03,
            },
            text: text.to_string(),
            class: "card_manufacturer_label",
            anchor: TextAnchor::Baseline,
        })],
    )
}
