//! Sentence data model: tokens with their head/label annotations.

use crate::types::WordId;

/// Form given to the pseudo token prepended by [`Sentence::with_root_token`].
pub const ROOT_FORM: &str = "-Root-";

/// Where a token attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Head {
    /// The root sentinel: no incoming arc.
    Root,
    /// Governed by another token of the same sentence.
    Token(WordId),
}

impl Head {
    pub fn token(self) -> Option<WordId> {
        match self {
            Head::Root => None,
            Head::Token(id) => Some(id),
        }
    }

    pub fn is_root(self) -> bool {
        matches!(self, Head::Root)
    }
}

/// One annotated token line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: WordId,
    pub form: String,
    pub lemma: String,
    pub cpostag: String,
    pub postag: String,
    pub feats: String,
    pub head: Head,
    /// Relation label; `None` when the line carries the `_` sentinel.
    pub deprel: Option<String>,
    pub phead: String,
    pub pdeprel: String,
}

impl Token {
    /// A token with only the fields layout cares about; tags are `_`.
    pub fn new(id: usize, form: impl Into<String>, head: Head, deprel: Option<&str>) -> Self {
        Self {
            id: WordId(id),
            form: form.into(),
            lemma: "_".to_string(),
            cpostag: "_".to_string(),
            postag: "_".to_string(),
            feats: "_".to_string(),
            head,
            deprel: deprel.map(str::to_string),
            phead: "_".to_string(),
            pdeprel: "_".to_string(),
        }
    }

    /// Width of the form in character cells.
    pub fn char_len(&self) -> usize {
        self.form.chars().count()
    }
}

/// An ordered sequence of tokens; order is reading order and layout order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// Identifier, used as the output file stem.
    pub id: String,
    /// Free-text restatement of the sentence. Never used for layout.
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(id: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            tokens,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, id: WordId) -> Option<&Token> {
        id.0.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    pub fn forms(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.form.as_str())
    }

    /// Total character cells over all forms.
    pub fn char_count(&self) -> usize {
        self.tokens.iter().map(Token::char_len).sum()
    }

    /// Copy of this sentence with a `-Root-` pseudo token in front.
    ///
    /// Every id and head moves one position right, and the token that was
    /// attached to the root sentinel now hangs off the pseudo token, so the
    /// root relation gets drawn as an ordinary arc.
    pub fn with_root_token(&self) -> Sentence {
        let mut tokens = Vec::with_capacity(self.tokens.len() + 1);
        tokens.push(Token {
            lemma: String::new(),
            cpostag: String::new(),
            postag: String::new(),
            feats: String::new(),
            ..Token::new(1, ROOT_FORM, Head::Root, None)
        });
        tokens.extend(self.tokens.iter().map(|t| Token {
            id: t.id.shifted(),
            head: match t.head {
                Head::Root => Head::Token(WordId(1)),
                Head::Token(h) => Head::Token(h.shifted()),
            },
            ..t.clone()
        }));

        Sentence {
            id: self.id.clone(),
            text: self.text.clone(),
            tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maria() -> Sentence {
        Sentence::new(
            "maria",
            vec![
                Token::new(1, "Maria", Head::Token(WordId(3)), Some("SJ-ARG1")),
                Token::new(2, "Vitória", Head::Token(WordId(1)), Some("N")),
                Token::new(3, "tem", Head::Root, Some("ROOT")),
                Token::new(4, "razão", Head::Token(WordId(3)), Some("DO-ARG2")),
                Token::new(5, ".", Head::Token(WordId(3)), Some("PUNCT")),
            ],
        )
    }

    #[test]
    fn counts_characters_not_bytes() {
        let s = maria();
        assert_eq!(s.tokens[1].char_len(), 7);
        assert_eq!(s.char_count(), 5 + 7 + 3 + 5 + 1);
    }

    #[test]
    fn token_lookup_is_one_based() {
        let s = maria();
        assert_eq!(s.token(WordId(3)).map(|t| t.form.as_str()), Some("tem"));
        assert!(s.token(WordId(0)).is_none());
        assert!(s.token(WordId(6)).is_none());
    }

    #[test]
    fn root_token_shifts_everything() {
        let s = maria().with_root_token();
        assert_eq!(s.len(), 6);
        assert_eq!(s.tokens[0].form, ROOT_FORM);
        assert!(s.tokens[0].head.is_root());
        // "tem" was the root; it now hangs off the pseudo token.
        assert_eq!(s.tokens[3].id, WordId(4));
        assert_eq!(s.tokens[3].head, Head::Token(WordId(1)));
        assert_eq!(s.tokens[1].head, Head::Token(WordId(4)));
        assert_eq!(s.tokens[3].deprel.as_deref(), Some("ROOT"));
    }
}
