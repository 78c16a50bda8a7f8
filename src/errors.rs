//! Error types with rich diagnostics using miette
//!
//! Parse errors carry source spans into the sentence block they came from.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::WordId;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (input name plus starting line)
    pub name: String,
    /// The full block text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while decoding a sentence block
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("malformed sentence block: {message}")]
    #[diagnostic(code(deparc::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("token line has {found} fields, expected {expected}")]
    #[diagnostic(
        code(deparc::parse::field_count),
        help("token lines are: id form lemma cpostag postag feats head deprel phead pdeprel, separated by tabs")
    )]
    FieldCount {
        found: usize,
        expected: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("this line")]
        span: SourceSpan,
    },

    #[error("invalid token id: {value:?}")]
    #[diagnostic(
        code(deparc::parse::invalid_id),
        help("token ids are positive integers")
    )]
    InvalidId {
        value: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a token id")]
        span: SourceSpan,
    },

    #[error("invalid head: {value:?}")]
    #[diagnostic(
        code(deparc::parse::invalid_head),
        help("a head is a token id, or `0` / `_` for the root")
    )]
    InvalidHead {
        value: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a head")]
        span: SourceSpan,
    },
}

// ============================================================================
// Structural Errors
// ============================================================================

/// Errors in the head graph of an otherwise well-formed sentence
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("sentence has no tokens")]
    #[diagnostic(code(deparc::structure::empty))]
    Empty,

    #[error("token at position {position} has id {id}")]
    #[diagnostic(
        code(deparc::structure::non_contiguous_id),
        help("ids must run 1, 2, 3, ... in reading order")
    )]
    NonContiguousId { position: usize, id: WordId },

    #[error("token {id} is its own head")]
    #[diagnostic(code(deparc::structure::self_loop))]
    SelfLoop { id: WordId },

    #[error("token {id} has head {head}, which does not exist")]
    #[diagnostic(code(deparc::structure::dangling_head))]
    DanglingHead { id: WordId, head: WordId },

    #[error("no token is attached to the root")]
    #[diagnostic(
        code(deparc::structure::missing_root),
        help("exactly one token needs head `0` (or `_`)")
    )]
    MissingRoot,

    #[error("tokens {ids:?} are all attached to the root")]
    #[diagnostic(code(deparc::structure::multiple_roots))]
    MultipleRoots { ids: Vec<WordId> },

    #[error("following heads from token {id} never reaches the root")]
    #[diagnostic(code(deparc::structure::cycle))]
    Cycle { id: WordId },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while rasterizing or writing a diagram
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} surface")]
    #[diagnostic(code(deparc::render::empty_canvas))]
    EmptyCanvas { width: u32, height: u32 },

    #[error("generated SVG was rejected: {message}")]
    #[diagnostic(code(deparc::render::svg))]
    Svg { message: String },

    #[error("PNG encoding failed: {message}")]
    #[diagnostic(code(deparc::render::encode))]
    Encode { message: String },

    #[error("cannot write {path}")]
    #[diagnostic(code(deparc::render::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Umbrella
// ============================================================================

/// Any failure while turning one sentence into an image
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Structure(#[from] StructuralError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}
