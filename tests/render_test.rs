//! End-to-end rendering through the public API.

use puncher::{
    CARD_LENGTH_IN, CARD_WIDTH_IN, CODE_TABLE, CardModel, Element, Rasterize, RenderError,
    RenderOptions, ResvgRasterizer, TEST_PATTERN, WHITE, render_card,
};

/// Rasterizer that must never be reached.
struct NoRaster;

impl Rasterize for NoRaster {
    fn rasterize(
        &self,
        _svg: &str,
        _scale: f32,
        _background: image::Rgba<u8>,
    ) -> Result<Vec<u8>, RenderError> {
        panic!("vector render should not rasterize");
    }
}

fn punch_rects(content: &str) -> usize {
    let doc = render_card(content, &RenderOptions::default(), &NoRaster).unwrap();
    doc.find_group("cardpunches").unwrap().len()
}

fn model_punches(content: &str) -> usize {
    CardModel::build(content).punches().len()
}

#[test]
fn test_punch_counts() {
    assert_eq!(punch_rects("0"), 1);
    assert_eq!(punch_rects("A"), 2);
    assert_eq!(punch_rects(" "), 0);
    assert_eq!(punch_rects(&"1".repeat(80)), 80);
    assert_eq!(punch_rects("[.<"), 9);
}

#[test]
fn test_test_pattern_punches_every_column() {
    let model = CardModel::build(TEST_PATTERN);
    let expected: usize = CODE_TABLE.iter().map(|(_, rows)| rows.len()).sum();
    assert_eq!(model.punches().len(), expected);
    let mut columns: Vec<usize> = model.punches().iter().map(|p| p.column).collect();
    columns.dedup();
    assert_eq!(columns, (1..=63).collect::<Vec<_>>());
}

#[test]
fn test_vector_output_is_byte_identical() {
    let options = RenderOptions {
        show_cell_boundaries: true,
        show_punch_boundaries: true,
        show_punch_boxes: true,
        ..Default::default()
    };
    let a = render_card("HELLO, WORLD", &options, &NoRaster).unwrap().to_svg_string();
    let b = render_card("HELLO, WORLD", &options, &NoRaster).unwrap().to_svg_string();
    assert_eq!(a, b);
    assert!(a.starts_with("<svg"));
    assert!(a.contains(r#"width="8.375in""#));
    assert!(a.contains(r#"height="4.25in""#));
}

#[test]
fn test_cutlines_are_topmost() {
    let doc = render_card("Q", &RenderOptions::default(), &NoRaster).unwrap();
    assert!(matches!(doc.elements.first(), Some(Element::Style(_))));
    assert_eq!(doc.layer_ids().last(), Some(&"card_cutlines"));
}

#[test]
fn test_flatten_with_resvg() {
    let model = CardModel::build("FLAT");
    let options = RenderOptions {
        flatten: true,
        ..Default::default()
    };
    let doc = model.render(&options, &ResvgRasterizer::without_fonts()).unwrap();
    assert_eq!(doc.images().count(), 1);
    assert_eq!(doc.texts().count(), 0);

    let image = doc.images().next().unwrap();
    assert_eq!((image.width, image.height), (CARD_WIDTH_IN, CARD_LENGTH_IN));
    let encoded = image.href.strip_prefix("data:image/png;base64,").unwrap();
    use base64::Engine as _;
    let png = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    // 7.375 x 3.25 in at 96 px/in, 5x
    assert_eq!((decoded.width(), decoded.height()), (3540, 1560));
}

#[test]
fn test_every_code_table_character_parses_as_svg() {
    let options = RenderOptions {
        show_punch_boxes: true,
        ..Default::default()
    };
    for (ch, _) in CODE_TABLE {
        let markup = render_card(&ch.to_string(), &options, &NoRaster)
            .unwrap()
            .to_svg_string();
        if let Err(err) = usvg::Tree::from_str(&markup, &usvg::Options::default()) {
            panic!("{:?} produced unparseable SVG: {}", ch, err);
        }
    }
}

#[test]
fn test_test_pattern_flattens_with_resvg() {
    let options = RenderOptions {
        flatten: true,
        ..Default::default()
    };
    let doc = render_card(TEST_PATTERN, &options, &ResvgRasterizer::without_fonts()).unwrap();
    assert_eq!(doc.images().count(), 1);
    assert_eq!(doc.find_group("cardpunches").unwrap().len(), model_punches(TEST_PATTERN));
}

#[test]
fn test_control_characters_still_rasterize() {
    let raster = ResvgRasterizer::without_fonts();
    let options = RenderOptions {
        flatten: true,
        ..Default::default()
    };
    let doc = render_card("A\u{1}B", &options, &raster).unwrap();
    assert_eq!(doc.images().count(), 1);
    let png = raster.rasterize(&doc.to_svg_string(), 1.0, WHITE).unwrap();
    assert_eq!(&png[..4], b"\x89PNG");
}

#[test]
fn test_report_serializes_punches() {
    let model = CardModel::build("/");
    let json = serde_json::to_value(model.report()).unwrap();
    assert_eq!(json["columns"], 1);
    assert_eq!(json["overflow"], false);
    assert_eq!(json["punches"][0]["row"], "0");
    assert_eq!(json["punches"][1]["row"], "1");
    assert_eq!(json["punches"][1]["column"], 1);
    assert_eq!(json["punches"][1]["character"], "/");
}
