//! Core types for arc layout

use glam::DVec2;

use crate::types::{Rgb, WordId};

/// A dependency arc between two words.
///
/// The span always runs left to right; `origin` remembers which end is the
/// syntactic head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// The dependent token. Every non-root token yields exactly one relation,
    /// so this also identifies the relation.
    pub dependent: WordId,
    pub word_start: WordId,
    pub word_end: WordId,
    /// The head token.
    pub origin: WordId,
    pub annotation: String,
}

impl Relation {
    pub fn new(dependent: WordId, head: WordId, annotation: impl Into<String>) -> Self {
        Self {
            dependent,
            word_start: dependent.min(head),
            word_end: dependent.max(head),
            origin: head,
            annotation: annotation.into(),
        }
    }

    /// Raw span width in words.
    pub fn span(&self) -> usize {
        self.word_end.0 - self.word_start.0
    }

    /// Whether `other` lies inside this span (bounds included).
    pub fn contains(&self, other: &Relation) -> bool {
        other.word_start >= self.word_start && other.word_end <= self.word_end
    }

    /// Whether this relation touches `word` at either end.
    pub fn touches(&self, word: WordId) -> bool {
        self.word_start == word || self.word_end == word
    }

    pub fn endpoints(&self) -> (WordId, WordId) {
        (self.word_start, self.word_end)
    }
}

/// Horizontal slot of an arc at each of its two anchor words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slots {
    /// Slot index at `word_start`.
    pub start: usize,
    /// Number of arcs touching `word_start`.
    pub start_count: usize,
    /// Slot index at `word_end`.
    pub end: usize,
    /// Number of arcs touching `word_end`.
    pub end_count: usize,
}

/// A relation with its nesting height and anchor slots resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedArc {
    pub relation: Relation,
    pub height: u32,
    pub slots: Slots,
}

/// Font weight for text primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// One drawing instruction.
///
/// The list is replayed in order against a stateful
/// [`Renderer`](crate::render::Renderer): path building primitives accumulate
/// a current path which `Stroke` or `Fill` then consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    SetColor(Rgb),
    SetLineWidth(f64),
    SelectFont { family: String, weight: FontWeight },
    SetFontSize(f64),
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Circular arc, angles in radians, swept in increasing angle direction
    /// (clockwise on a y-down canvas).
    Arc {
        center: DVec2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Stroke,
    Fill,
    /// Text anchored at the current point.
    ShowText(String),
}

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Everything needed to draw one sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub canvas: Canvas,
    /// Arcs in draw order.
    pub arcs: Vec<PlacedArc>,
    pub primitives: Vec<Primitive>,
}

impl Diagram {
    /// Highest nesting level, 0 without arcs.
    pub fn max_height(&self) -> u32 {
        self.arcs.iter().map(|a| a.height).max().unwrap_or(0)
    }
}
