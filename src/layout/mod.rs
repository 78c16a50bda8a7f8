//! Arc layout for dependency diagrams
//!
//! This module is organized into submodules:
//! - `relations`: token heads -> left-to-right arc spans
//! - `heights`: nesting level per arc
//! - `slots`: anchor position per arc at each of its words
//! - `geometry`: canvas size and drawing primitives
//! - `defaults`: fixed geometric constants
//! - `types`: Relation, PlacedArc, Primitive, Diagram

pub mod defaults;
pub mod geometry;
pub mod heights;
pub mod relations;
pub mod slots;
pub mod types;

pub use geometry::Geometry;
pub use types::*;

use crate::errors::StructuralError;
use crate::log::debug;
use crate::sentence::{Sentence, Token};

/// Token column drawn in a tag row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Lemma,
    Cpostag,
    Postag,
    Feats,
}

impl TagField {
    /// Rows of the tagged image, bottom row first.
    pub const DEFAULT_ROWS: [TagField; 3] = [TagField::Feats, TagField::Lemma, TagField::Cpostag];

    pub fn value(self, token: &Token) -> &str {
        match self {
            TagField::Lemma => &token.lemma,
            TagField::Cpostag => &token.cpostag,
            TagField::Postag => &token.postag,
            TagField::Feats => &token.feats,
        }
    }
}

/// Which end of an arc carries the arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowPlacement {
    /// At the head word (the relation's origin).
    #[default]
    Head,
    /// At the dependent word.
    Dependent,
}

/// Everything that shapes a diagram besides the sentence itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Options {
    pub geometry: Geometry,
    /// Tag rows under the sentence, bottom row first. Empty draws none.
    pub tags: Vec<TagField>,
    /// Prepend a `-Root-` pseudo token so the root relation is drawn.
    pub draw_root: bool,
    pub arrow: ArrowPlacement,
}

impl Options {
    /// These options with the default tag rows switched on.
    pub fn tagged(&self) -> Options {
        Options {
            tags: TagField::DEFAULT_ROWS.to_vec(),
            ..self.clone()
        }
    }
}

/// Lay out a sentence: relations, heights, slots, then primitives.
pub fn layout_sentence(sentence: &Sentence, options: &Options) -> Result<Diagram, StructuralError> {
    relations::validate(sentence)?;
    if options.draw_root {
        layout_validated(&sentence.with_root_token(), options)
    } else {
        layout_validated(sentence, options)
    }
}

fn layout_validated(sentence: &Sentence, options: &Options) -> Result<Diagram, StructuralError> {
    let relations = relations::extract_relations(sentence)?;
    let heights = heights::assign_heights(&relations);
    let slots = slots::assign_slots(&relations);

    // Height pass order, then grouped by left word for drawing.
    let mut arcs: Vec<PlacedArc> = heights::by_span(&relations)
        .into_iter()
        .map(|relation| PlacedArc {
            height: heights[&relation.dependent],
            slots: slots[&relation.dependent],
            relation: relation.clone(),
        })
        .collect();
    arcs.sort_by_key(|arc| arc.relation.word_start);

    let (canvas, primitives) = geometry::compile(sentence, &arcs, options);
    debug!(
        "laid out {:?}: {} arcs, {}x{} px, {} primitives",
        sentence.id,
        arcs.len(),
        canvas.width,
        canvas.height,
        primitives.len()
    );

    Ok(Diagram {
        canvas,
        arcs,
        primitives,
    })
}
