//! SVG serialization of a [`Document`] through the `svg` crate.

use svg::Node;
use svg::node::Text as TextNode;
use svg::node::element::{Group as SvgGroup, Image, Polygon, Rectangle, Style, Text};

use crate::document::{
    Document, Element, Group, ImageShape, PolygonShape, RectShape, TextAnchor, TextShape,
};

impl Document {
    pub fn to_svg(&self) -> svg::Document {
        let mut doc = svg::Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
            .set("width", format!("{}in", self.width))
            .set("height", format!("{}in", self.height))
            .set("viewBox", format!("0 0 {} {}", self.width, self.height));
        for el in &self.elements {
            doc.append(node(el));
        }
        doc
    }

    /// Serialized SVG markup. Attribute order is stable, so equal documents
    /// always produce identical bytes.
    pub fn to_svg_string(&self) -> String {
        self.to_svg().to_string()
    }
}

fn node(el: &Element) -> Box<dyn Node> {
    match el {
        Element::Style(css) => Box::new(Style::new(css.as_str())),
        Element::Group(g) => Box::new(group(g)),
        Element::Rect(r) => Box::new(rect(r)),
        Element::Polygon(p) => Box::new(polygon(p)),
        Element::Text(t) => Box::new(text(t)),
        Element::Image(i) => Box::new(image(i)),
    }
}

fn group(g: &Group) -> SvgGroup {
    let mut out = SvgGroup::new().set("id", g.id.as_str());
    if let Some(offset) = g.translate {
        out = out.set("transform", format!("translate({}, {})", offset.x, offset.y));
    }
    for child in &g.children {
        out.append(node(child));
    }
    out
}

fn rect(r: &RectShape) -> Rectangle {
    let mut out = Rectangle::new()
        .set("x", num(r.bounds.x))
        .set("y", num(r.bounds.y))
        .set("width", num(r.bounds.width))
        .set("height", num(r.bounds.height))
        .set("rx", "0")
        .set("ry", "0")
        .set("stroke-width", num(r.stroke_width));
    if let Some(id) = &r.id {
        out = out.set("id", id.as_str());
    }
    if let Some(class) = r.class {
        out = out.set("class", class);
    }
    if let Some(fill) = r.fill {
        out = out.set("fill", fill);
    }
    if let Some(stroke) = r.stroke {
        out = out.set("stroke", stroke);
    }
    if let Some(dash) = r.stroke_dasharray {
        out = out.set("stroke-dasharray", dash);
    }
    out
}

fn polygon(p: &PolygonShape) -> Polygon {
    let points = p
        .points
        .iter()
        .map(|pt| format!("{},{}", pt.x, pt.y))
        .collect::<Vec<_>>()
        .join(" ");
    Polygon::new()
        .set("points", points)
        .set("class", p.class)
        .set("stroke", p.stroke)
        .set("stroke-width", num(p.stroke_width))
}

fn text(t: &TextShape) -> Text {
    let mut out = Text::new()
        .add(TextNode::new(escape(&t.text)))
        .set("x", num(t.position.x))
        .set("y", num(t.position.y))
        .set("class", t.class);
    if t.anchor == TextAnchor::Centered {
        out = out
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central");
    }
    out
}

fn image(i: &ImageShape) -> Image {
    Image::new()
        .set("id", i.id)
        .set("width", num(i.width))
        .set("height", num(i.height))
        .set("href", i.href.as_str())
}

fn num(v: f64) -> String {
    v.to_string()
}

/// Whether `ch` may appear in an XML 1.0 document at all.
pub(crate) fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t'
            | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Text nodes are written verbatim, so markup characters are escaped here and
/// characters XML cannot carry are dropped.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars().filter(|&ch| is_xml_char(ch)) {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
