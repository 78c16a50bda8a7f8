//! Relation extraction: tokens -> left-to-right arc spans

use crate::errors::StructuralError;
use crate::log::{trace, warn};
use crate::sentence::{Head, Sentence};
use crate::types::WordId;

use super::types::Relation;

/// Build one relation per non-root token, in token order.
///
/// The head graph is validated first: ids must be contiguous, every head must
/// exist and differ from its token, exactly one token may sit on the root
/// sentinel, and every token must reach that root.
pub fn extract_relations(sentence: &Sentence) -> Result<Vec<Relation>, StructuralError> {
    validate(sentence)?;

    let relations: Vec<Relation> = sentence
        .tokens
        .iter()
        .filter_map(|token| {
            let head = token.head.token()?;
            if token.deprel.is_none() {
                warn!("token {} of {:?} has no relation label", token.id, sentence.id);
            }
            Some(Relation::new(
                token.id,
                head,
                token.deprel.as_deref().unwrap_or_default(),
            ))
        })
        .collect();

    trace!("extracted {} relations from {:?}", relations.len(), sentence.id);
    Ok(relations)
}

/// Check the head graph of a sentence.
pub fn validate(sentence: &Sentence) -> Result<(), StructuralError> {
    if sentence.is_empty() {
        return Err(StructuralError::Empty);
    }

    for (i, token) in sentence.tokens.iter().enumerate() {
        if token.id.raw() != i + 1 {
            return Err(StructuralError::NonContiguousId {
                position: i + 1,
                id: token.id,
            });
        }
    }

    let n = sentence.len();
    for token in &sentence.tokens {
        if let Head::Token(head) = token.head {
            if head == token.id {
                return Err(StructuralError::SelfLoop { id: token.id });
            }
            if head.raw() == 0 || head.raw() > n {
                return Err(StructuralError::DanglingHead { id: token.id, head });
            }
        }
    }

    let roots: Vec<WordId> = sentence
        .tokens
        .iter()
        .filter(|t| t.head.is_root())
        .map(|t| t.id)
        .collect();
    match roots.len() {
        0 => return Err(StructuralError::MissingRoot),
        1 => {}
        _ => return Err(StructuralError::MultipleRoots { ids: roots }),
    }

    // With a single root, a token fails to reach it within n steps only when
    // its chain of heads loops.
    for token in &sentence.tokens {
        let mut current = token.head;
        let mut steps = 0;
        while let Head::Token(head) = current {
            steps += 1;
            if steps > n {
                return Err(StructuralError::Cycle { id: token.id });
            }
            current = sentence.tokens[head.index()].head;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::Token;

    fn tok(id: usize, head: usize, label: &str) -> Token {
        let head = if head == 0 {
            Head::Root
        } else {
            Head::Token(WordId(head))
        };
        Token::new(id, format!("w{id}"), head, Some(label))
    }

    fn maria() -> Sentence {
        Sentence::new(
            "maria",
            vec![
                tok(1, 3, "SJ-ARG1"),
                tok(2, 1, "N"),
                tok(3, 0, "ROOT"),
                tok(4, 3, "DO-ARG2"),
                tok(5, 3, "PUNCT"),
            ],
        )
    }

    #[test]
    fn spans_run_left_to_right() {
        let relations = extract_relations(&maria()).unwrap();
        let spans: Vec<_> = relations
            .iter()
            .map(|r| (r.word_start.raw(), r.word_end.raw(), r.origin.raw()))
            .collect();
        assert_eq!(spans, vec![(1, 3, 3), (1, 2, 1), (3, 4, 3), (3, 5, 3)]);
        assert_eq!(relations[0].annotation, "SJ-ARG1");
        assert_eq!(relations[0].span(), 2);
    }

    #[test]
    fn single_root_token_has_no_relations() {
        let s = Sentence::new("one", vec![tok(1, 0, "ROOT")]);
        assert!(extract_relations(&s).unwrap().is_empty());
    }

    #[test]
    fn missing_label_becomes_empty_annotation() {
        let s = Sentence::new(
            "x",
            vec![Token::new(1, "a", Head::Token(WordId(2)), None), tok(2, 0, "ROOT")],
        );
        assert_eq!(extract_relations(&s).unwrap()[0].annotation, "");
    }

    #[test]
    fn self_loop_is_rejected() {
        let s = Sentence::new("x", vec![tok(1, 0, "ROOT"), tok(2, 2, "X")]);
        assert_eq!(
            extract_relations(&s),
            Err(StructuralError::SelfLoop { id: WordId(2) })
        );
    }

    #[test]
    fn dangling_head_is_rejected() {
        let s = Sentence::new("x", vec![tok(1, 0, "ROOT"), tok(2, 7, "X")]);
        assert_eq!(
            extract_relations(&s),
            Err(StructuralError::DanglingHead {
                id: WordId(2),
                head: WordId(7)
            })
        );
    }

    #[test]
    fn ids_must_be_contiguous() {
        let s = Sentence::new("x", vec![tok(1, 0, "ROOT"), tok(3, 1, "X")]);
        assert_eq!(
            extract_relations(&s),
            Err(StructuralError::NonContiguousId {
                position: 2,
                id: WordId(3)
            })
        );
    }

    #[test]
    fn root_count_is_checked() {
        let none = Sentence::new("x", vec![tok(1, 2, "A"), tok(2, 1, "B")]);
        assert_eq!(extract_relations(&none), Err(StructuralError::MissingRoot));

        let two = Sentence::new("x", vec![tok(1, 0, "ROOT"), tok(2, 0, "ROOT")]);
        assert_eq!(
            extract_relations(&two),
            Err(StructuralError::MultipleRoots {
                ids: vec![WordId(1), WordId(2)]
            })
        );
    }

    #[test]
    fn cycle_beside_the_root_is_rejected() {
        let s = Sentence::new(
            "x",
            vec![tok(1, 0, "ROOT"), tok(2, 3, "A"), tok(3, 2, "B")],
        );
        assert_eq!(
            extract_relations(&s),
            Err(StructuralError::Cycle { id: WordId(2) })
        );
    }

    #[test]
    fn empty_sentence_is_rejected() {
        let s = Sentence::new("x", vec![]);
        assert_eq!(extract_relations(&s), Err(StructuralError::Empty));
    }
}
