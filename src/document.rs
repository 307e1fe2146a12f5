//! Drawing tree produced by the card composer.
//!
//! Only the primitives a card needs. Serialization
//! to SVG markup lives in [`crate::vector`].

use crate::geometry::{Point, Rect};

/// Root of a rendered card. Width and height are in inches and double as the
/// view box, so one user unit is one inch.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Style(String),
    Group(Group),
    Rect(RectShape),
    Polygon(PolygonShape),
    Text(TextShape),
    Image(ImageShape),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    /// Translation applied to every child.
    pub translate: Option<Point>,
    pub children: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub id: Option<String>,
    pub bounds: Rect,
    pub class: Option<&'static str>,
    pub fill: Option<&'static str>,
    pub stroke: Option<&'static str>,
    pub stroke_dasharray: Option<&'static str>,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub points: Vec<Point>,
    pub class: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Default SVG placement: `(x, y)` is the start of the baseline.
    Baseline,
    /// `(x, y)` is the middle of the glyph box.
    Centered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub position: Point,
    pub text: String,
    pub class: &'static str,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageShape {
    pub id: &'static str,
    pub width: f64,
    pub height: f64,
    pub href: String,
}

impl Group {
    pub fn new(id: impl Into<String>, children: Vec<Element>) -> Self {
        Self {
            id: id.into(),
            translate: None,
            children,
        }
    }

    pub fn translated(mut self, offset: Point) -> Self {
        self.translate = Some(offset);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl From<Group> for Element {
    fn from(group: Group) -> Self {
        Element::Group(group)
    }
}

impl Document {
    /// Depth-first walk over every element, groups included.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.elements.iter().rev().collect(),
        }
    }

    pub fn find_group(&self, id: &str) -> Option<&Group> {
        self.descendants().find_map(|el| match el {
            Element::Group(g) if g.id == id => Some(g),
            _ => None,
        })
    }

    /// Ids of the top-level groups, bottom layer first.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|el| match el {
                Element::Group(g) => Some(g.id.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextShape> {
        self.descendants().filter_map(|el| match el {
            Element::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageShape> {
        self.descendants().filter_map(|el| match el {
            Element::Image(i) => Some(i),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectShape> {
        self.descendants().filter_map(|el| match el {
            Element::Rect(r) => Some(r),
            _ => None,
        })
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        if let Element::Group(g) = el {
            self.stack.extend(g.children.iter().rev());
        }
        Some(el)
    }
}
