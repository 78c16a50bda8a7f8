//! Geometry compiler: placed arcs -> canvas size and drawing primitives
//!
//! Coordinates are canvas pixels, y pointing down. Words are laid out on a
//! fixed character grid (`char_width` per character, `word_spacing` empty
//! cells between words), which is what the monospace sentence line looks like
//! when drawn.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DVec2, dvec2};

use crate::sentence::{Sentence, Token};
use crate::types::{Rgb, WordId};

use super::defaults;
use super::types::{Canvas, FontWeight, PlacedArc, Primitive};
use super::{ArrowPlacement, Options, TagField};

/// Fixed geometric constants.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub char_width: u32,
    /// Empty character cells between two words.
    pub word_spacing: u32,
    pub arc_radius: u32,
    /// Vertical distance per nesting level.
    pub height_unit: u32,
    pub arc_base_height: u32,
    pub baseline_gap: u32,
    pub padding_left: f64,
    /// Distance from the bottom of the text area to the sentence baseline.
    pub text_baseline: f64,
    pub font_family: String,
    pub font_size: f64,
    pub annotation_font_size: f64,
    pub annotation_char_width: f64,
    /// Gap between the arc's apex level and the label baseline.
    pub label_gap: f64,
    pub arrow_length: f64,
    pub line_width: f64,
    pub tag_row_height: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            char_width: defaults::CHAR_WIDTH,
            word_spacing: defaults::WORD_SPACING,
            arc_radius: defaults::ARC_RADIUS,
            height_unit: defaults::HEIGHT_UNIT,
            arc_base_height: defaults::ARC_BASE_HEIGHT,
            baseline_gap: defaults::BASELINE_GAP,
            padding_left: defaults::PADDING_LEFT,
            text_baseline: defaults::TEXT_BASELINE,
            font_family: defaults::FONT_FAMILY.to_string(),
            font_size: defaults::FONT_SIZE,
            annotation_font_size: defaults::ANNOTATION_FONT_SIZE,
            annotation_char_width: defaults::ANNOTATION_CHAR_WIDTH,
            label_gap: defaults::LABEL_GAP,
            arrow_length: defaults::ARROW_LENGTH,
            line_width: defaults::LINE_WIDTH,
            tag_row_height: defaults::TAG_ROW_HEIGHT,
        }
    }
}

impl Geometry {
    /// Height of the band reserved for `rows` tag rows.
    pub fn tag_band(&self, rows: usize) -> u32 {
        rows as u32 * self.tag_row_height
    }

    /// Canvas size for a sentence whose highest arc sits at `max_height`.
    pub fn canvas(&self, sentence: &Sentence, max_height: u32, tag_rows: usize) -> Canvas {
        let cells = sentence.len() as u32 * self.word_spacing + sentence.char_count() as u32;
        Canvas {
            width: cells * self.char_width,
            height: self.arc_base_height
                + self.baseline_gap
                + self.arc_radius
                + max_height * self.height_unit
                + self.tag_band(tag_rows),
        }
    }

    /// Left edge of every word, relative to the left padding.
    pub fn word_offsets(&self, sentence: &Sentence) -> Vec<u32> {
        let mut offsets = Vec::with_capacity(sentence.len());
        let mut cells = 0;
        for token in &sentence.tokens {
            offsets.push(cells * self.char_width);
            cells += token.char_len() as u32 + self.word_spacing;
        }
        offsets
    }

    /// Absolute x of an anchor in `slot` out of `count` arcs at `token`.
    fn anchor_x(&self, offset: u32, token: &Token, slot: usize, count: usize) -> f64 {
        let word_width = token.char_len() as u32 * self.char_width;
        let sub = word_width / (count as u32 + 1);
        self.padding_left + f64::from(offset + sub * (slot as u32 + 1))
    }
}

/// Resolved coordinates of one arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPoints {
    pub left: f64,
    pub right: f64,
    /// Lower end of both legs.
    pub foot: f64,
    /// Level of the quarter-arc centres; the legs stop here.
    pub apex: f64,
}

/// Build the primitive list for a laid-out sentence.
///
/// `arcs` must already be in draw order.
pub fn compile(
    sentence: &Sentence,
    arcs: &[PlacedArc],
    options: &Options,
) -> (Canvas, Vec<Primitive>) {
    let g = &options.geometry;
    let max_height = arcs.iter().map(|a| a.height).max().unwrap_or(0);
    let canvas = g.canvas(sentence, max_height, options.tags.len());
    let band = f64::from(g.tag_band(options.tags.len()));
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));

    let mut out = Vec::new();

    // background
    out.push(Primitive::SetColor(Rgb::WHITE));
    out.push(Primitive::MoveTo(dvec2(0.0, 0.0)));
    out.push(Primitive::LineTo(dvec2(w, 0.0)));
    out.push(Primitive::LineTo(dvec2(w, h)));
    out.push(Primitive::LineTo(dvec2(0.0, h)));
    out.push(Primitive::Fill);

    // sentence line
    let spacing = " ".repeat(g.word_spacing as usize);
    let line = sentence.forms().collect::<Vec<_>>().join(&spacing);
    out.push(Primitive::SelectFont {
        family: g.font_family.clone(),
        weight: FontWeight::Normal,
    });
    out.push(Primitive::SetFontSize(g.font_size));
    out.push(Primitive::SetColor(Rgb::BLACK));
    out.push(Primitive::MoveTo(dvec2(g.padding_left, h - band - g.text_baseline)));
    out.push(Primitive::ShowText(line));

    let offsets = g.word_offsets(sentence);
    let base_y = h - f64::from(g.arc_base_height) - band;
    for arc in arcs {
        let points = arc_points(sentence, &offsets, arc, g, base_y);
        push_arc(&mut out, arc, points, options);
    }

    if !options.tags.is_empty() {
        push_tags(&mut out, sentence, &options.tags, g, h);
    }

    (canvas, out)
}

/// Anchor coordinates of `arc`.
pub fn arc_points(
    sentence: &Sentence,
    offsets: &[u32],
    arc: &PlacedArc,
    g: &Geometry,
    base_y: f64,
) -> ArcPoints {
    let anchor = |word: WordId, slot: usize, count: usize| {
        let token = &sentence.tokens[word.index()];
        g.anchor_x(offsets[word.index()], token, slot, count)
    };
    let r = &arc.relation;
    ArcPoints {
        left: anchor(r.word_start, arc.slots.start, arc.slots.start_count),
        right: anchor(r.word_end, arc.slots.end, arc.slots.end_count),
        foot: base_y - f64::from(g.baseline_gap),
        apex: base_y - f64::from(g.height_unit * arc.height),
    }
}

fn push_arc(out: &mut Vec<Primitive>, arc: &PlacedArc, p: ArcPoints, options: &Options) {
    let g = &options.geometry;
    let radius = f64::from(g.arc_radius);
    let r = &arc.relation;

    let arrow_at_start = match options.arrow {
        ArrowPlacement::Head => r.origin == r.word_start,
        ArrowPlacement::Dependent => r.origin != r.word_start,
    };

    out.push(Primitive::SetLineWidth(g.line_width));

    if arrow_at_start {
        push_arrow(out, dvec2(p.left, p.foot), g.arrow_length);
    }

    out.push(Primitive::MoveTo(dvec2(p.left, p.foot)));
    out.push(Primitive::LineTo(dvec2(p.left, p.apex)));
    out.push(Primitive::Stroke);

    // Both quarter arcs go into one path so the flat top is drawn by the
    // implicit line between them.
    out.push(Primitive::Arc {
        center: dvec2(p.left + radius, p.apex),
        radius,
        start_angle: PI,
        end_angle: PI + FRAC_PI_2,
    });
    out.push(Primitive::Arc {
        center: dvec2(p.right - radius, p.apex),
        radius,
        start_angle: -FRAC_PI_2,
        end_angle: 0.0,
    });
    out.push(Primitive::Stroke);

    out.push(Primitive::MoveTo(dvec2(p.right, p.foot)));
    out.push(Primitive::LineTo(dvec2(p.right, p.apex)));
    out.push(Primitive::Stroke);

    if !arrow_at_start {
        push_arrow(out, dvec2(p.right, p.foot), g.arrow_length);
    }

    let label = r.annotation.to_uppercase();
    let label_width = label.chars().count() as f64 * g.annotation_char_width;
    let x = (p.left + p.right) / 2.0 - label_width / 2.0;
    out.push(Primitive::SetFontSize(g.annotation_font_size));
    out.push(Primitive::MoveTo(dvec2(x, p.apex - g.label_gap)));
    out.push(Primitive::ShowText(label));
}

/// Downward chevron whose tip touches `tip`.
fn push_arrow(out: &mut Vec<Primitive>, tip: DVec2, len: f64) {
    out.push(Primitive::MoveTo(tip + dvec2(-len, -len)));
    out.push(Primitive::LineTo(tip));
    out.push(Primitive::LineTo(tip + dvec2(len, -len)));
    out.push(Primitive::Stroke);
}

/// Tag rows under each word, first field on the bottom row.
fn push_tags(out: &mut Vec<Primitive>, sentence: &Sentence, tags: &[TagField], g: &Geometry, h: f64) {
    out.push(Primitive::SelectFont {
        family: g.font_family.clone(),
        weight: FontWeight::Normal,
    });
    out.push(Primitive::SetFontSize(g.font_size));
    out.push(Primitive::SetColor(Rgb::GREY));

    let mut x = g.padding_left;
    for token in &sentence.tokens {
        let mut y = h - g.text_baseline;
        for field in tags {
            out.push(Primitive::MoveTo(dvec2(x, y)));
            out.push(Primitive::ShowText(field.value(token).to_string()));
            y -= f64::from(g.tag_row_height);
        }
        x += f64::from((token.char_len() as u32 + g.word_spacing) * g.char_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{Relation, Slots};
    use crate::sentence::Head;

    fn two_words() -> Sentence {
        Sentence::new(
            "pair",
            vec![
                Token::new(1, "Olá", Head::Root, Some("ROOT")),
                Token::new(2, "mundo", Head::Token(WordId(1)), Some("obj")),
            ],
        )
    }

    fn pair_arc() -> PlacedArc {
        PlacedArc {
            relation: Relation::new(WordId(2), WordId(1), "obj"),
            height: 1,
            slots: Slots {
                start: 0,
                start_count: 1,
                end: 0,
                end_count: 1,
            },
        }
    }

    #[test]
    fn canvas_size() {
        let g = Geometry::default();
        let s = two_words();
        // (2 words * 6 + 8 chars) * 7
        assert_eq!(g.canvas(&s, 1, 0), Canvas { width: 140, height: 60 });
        assert_eq!(g.canvas(&s, 0, 0).height, 40);
        assert_eq!(g.canvas(&s, 1, 3).height, 120);
    }

    #[test]
    fn word_offsets_follow_the_character_grid() {
        let g = Geometry::default();
        // "Olá" is 3 characters even though it is 4 bytes
        assert_eq!(g.word_offsets(&two_words()), vec![0, 63]);
    }

    #[test]
    fn anchors_split_the_word() {
        let g = Geometry::default();
        let s = two_words();
        let p = arc_points(&s, &g.word_offsets(&s), &pair_arc(), &g, 45.0);
        // "Olá": 21px / 2 = 10; "mundo": 35px / 2 = 17
        assert_eq!(p.left, 10.0 + 10.0);
        assert_eq!(p.right, 10.0 + 63.0 + 17.0);
        assert_eq!(p.foot, 35.0);
        assert_eq!(p.apex, 25.0);
    }

    #[test]
    fn arrow_goes_to_the_requested_end() {
        let s = two_words();
        let arcs = [pair_arc()];
        let chevron_tips = |options: &Options| {
            let (_, prims) = compile(&s, &arcs, options);
            prims
                .windows(3)
                .filter_map(|w| match w {
                    [Primitive::MoveTo(a), Primitive::LineTo(tip), Primitive::LineTo(b)]
                        if a.y == b.y && a.y < tip.y =>
                    {
                        Some(tip.x)
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
        };

        // origin (head) is word 1, the left end
        assert_eq!(chevron_tips(&Options::default()), vec![20.0]);
        let classic = Options {
            arrow: ArrowPlacement::Dependent,
            ..Options::default()
        };
        assert_eq!(chevron_tips(&classic), vec![90.0]);
    }

    #[test]
    fn label_is_uppercased_and_centred() {
        let s = two_words();
        let (_, prims) = compile(&s, &[pair_arc()], &Options::default());
        let label_at = prims
            .windows(2)
            .find_map(|w| match w {
                [Primitive::MoveTo(at), Primitive::ShowText(t)] if t == "OBJ" => Some(*at),
                _ => None,
            })
            .unwrap();
        // midpoint 55, three characters of 6px
        assert_eq!(label_at, dvec2(55.0 - 9.0, 25.0 - 5.0));
    }

    #[test]
    fn tag_rows_stack_upwards() {
        let mut s = two_words();
        s.tokens[0].lemma = "OLÁ".into();
        s.tokens[0].cpostag = "ITJ".into();
        let options = Options {
            tags: vec![TagField::Feats, TagField::Lemma, TagField::Cpostag],
            ..Options::default()
        };
        let (canvas, prims) = compile(&s, &[pair_arc()], &options);
        let h = f64::from(canvas.height);
        let texts: Vec<(DVec2, String)> = prims
            .windows(2)
            .filter_map(|w| match w {
                [Primitive::MoveTo(at), Primitive::ShowText(t)] => Some((*at, t.clone())),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&(dvec2(10.0, h - 10.0), "_".to_string())));
        assert!(texts.contains(&(dvec2(10.0, h - 30.0), "OLÁ".to_string())));
        assert!(texts.contains(&(dvec2(10.0, h - 50.0), "ITJ".to_string())));
        // second word starts after 3 chars + 6 spacing
        assert!(texts.contains(&(dvec2(10.0 + 63.0, h - 10.0), "_".to_string())));
        // sentence line sits above the band
        assert!(texts.contains(&(dvec2(10.0, h - 60.0 - 10.0), "Olá      mundo".to_string())));
    }
}
