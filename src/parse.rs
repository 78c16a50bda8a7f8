//! Parse one sentence block into a [`Sentence`]
//!
//! The grammar in `conll.pest` only splits the block into header,
//! restatement, token lines and tab-separated fields. Field counts and field
//! values are checked here so every failure can point at its line.

use pest::Parser;
use pest::iterators::Pair;

use crate::errors::{ParseError, SourceContext};
use crate::log::debug;
use crate::sentence::{Head, Sentence, Token};
use crate::types::WordId;
use crate::{ConllParser, Rule};

/// Number of tab-separated fields on a token line.
pub const FIELD_COUNT: usize = 10;

/// Text used for "no value" in the head and deprel columns.
pub const EMPTY_FIELD: &str = "_";

/// Parse a sentence block.
///
/// `name` only labels diagnostics. Returns `Ok(None)` for a block without any
/// token line; such blocks are skipped rather than rendered.
pub fn parse_sentence(name: &str, block: &str) -> Result<Option<Sentence>, ParseError> {
    let ctx = SourceContext::new(name, block);

    let mut pairs = ConllParser::parse(Rule::block, block).map_err(|e| {
        let span = match e.location {
            pest::error::InputLocation::Pos(p) => (p, 0),
            pest::error::InputLocation::Span((s, end)) => (s, end - s),
        };
        ParseError::Syntax {
            message: e.variant.message().into_owned(),
            src: ctx.named_source(),
            span: span.into(),
        }
    })?;

    let mut id = String::new();
    let mut text = String::new();
    let mut tokens = Vec::new();

    if let Some(block) = pairs.next() {
        for inner in block.into_inner() {
            match inner.as_rule() {
                Rule::header => id = parse_header(inner.as_str()),
                Rule::restatement => text = parse_restatement(inner.as_str()),
                Rule::token_line => tokens.push(parse_token_line(&ctx, inner)?),
                _ => {}
            }
        }
    }

    if tokens.is_empty() {
        debug!("skipping block {:?} without token lines", id);
        return Ok(None);
    }

    Ok(Some(Sentence { id, text, tokens }))
}

/// `#sentence_id` -> `sentence_id`
fn parse_header(raw: &str) -> String {
    raw.trim().trim_start_matches('#').trim().to_string()
}

fn parse_restatement(raw: &str) -> String {
    let raw = raw.trim();
    raw.strip_prefix("Sentence:").unwrap_or(raw).trim().to_string()
}

fn parse_token_line(ctx: &SourceContext, pair: Pair<Rule>) -> Result<Token, ParseError> {
    let line_span = pair.as_span();
    let fields: Vec<Pair<Rule>> = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::field)
        .collect();

    if fields.len() != FIELD_COUNT {
        return Err(ParseError::FieldCount {
            found: fields.len(),
            expected: FIELD_COUNT,
            src: ctx.named_source(),
            span: (line_span.start(), line_span.end() - line_span.start()).into(),
        });
    }

    let text = |i: usize| fields[i].as_str().to_string();

    Ok(Token {
        id: parse_id(ctx, &fields[0])?,
        form: text(1),
        lemma: text(2),
        cpostag: text(3),
        postag: text(4),
        feats: text(5),
        head: parse_head(ctx, &fields[6])?,
        deprel: match fields[7].as_str() {
            EMPTY_FIELD => None,
            label => Some(label.to_string()),
        },
        phead: text(8),
        pdeprel: text(9),
    })
}

fn field_span(pair: &Pair<Rule>) -> (usize, usize) {
    let span = pair.as_span();
    (span.start(), span.end() - span.start())
}

fn parse_id(ctx: &SourceContext, pair: &Pair<Rule>) -> Result<WordId, ParseError> {
    match pair.as_str().trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(WordId(n)),
        _ => Err(ParseError::InvalidId {
            value: pair.as_str().to_string(),
            src: ctx.named_source(),
            span: field_span(pair).into(),
        }),
    }
}

fn parse_head(ctx: &SourceContext, pair: &Pair<Rule>) -> Result<Head, ParseError> {
    let raw = pair.as_str().trim();
    if raw == EMPTY_FIELD {
        return Ok(Head::Root);
    }
    match raw.parse::<usize>() {
        Ok(0) => Ok(Head::Root),
        Ok(n) => Ok(Head::Token(WordId(n))),
        Err(_) => Err(ParseError::InvalidHead {
            value: pair.as_str().to_string(),
            src: ctx.named_source(),
            span: field_span(pair).into(),
        }),
    }
}
