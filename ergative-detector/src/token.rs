use rustc_hash::FxHashMap;

use crate::error::MalformedTreeError;

/// One syntactic word of a parsed sentence, as produced by the upstream
/// dependency parser (one CoNLL-U word line).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, Hash, Eq, PartialEq)]
pub struct Token {
    /// 1-based position within the sentence
    pub id: usize,
    pub text: String,
    /// Universal part-of-speech tag. Compared by substring, since some
    /// pipelines emit composite tags.
    pub upos: String,
    /// Raw `Key=Value|Key=Value` feature string, empty when the parser gave none
    #[serde(default)]
    pub feats: String,
    /// Id of the governing token, 0 for the root
    pub head: usize,
    pub deprel: String,
}

impl Token {
    pub fn new(
        id: usize,
        text: impl Into<String>,
        upos: impl Into<String>,
        feats: impl Into<String>,
        head: usize,
        deprel: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            upos: upos.into(),
            feats: feats.into(),
            head,
            deprel: deprel.into(),
        }
    }

    pub fn has_feats(&self) -> bool {
        !self.feats.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.head == 0
    }
}

/// A parsed sentence: its raw text and its words in surface order.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize, Eq, PartialEq)]
pub struct Sentence {
    #[serde(default)]
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }

    /// The words of the sentence in surface order. Each call starts a fresh pass.
    pub fn iter_words(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, id: usize) -> Option<&Token> {
        self.tokens.iter().find(|token| token.id == id)
    }

    /// Check that the `head` column forms a single tree rooted at id 0.
    ///
    /// An empty sentence has no tree and is accepted.
    pub fn validate_tree(&self) -> Result<(), MalformedTreeError> {
        if self.tokens.is_empty() {
            return Ok(());
        }

        let mut by_id: FxHashMap<usize, &Token> = FxHashMap::default();
        for token in &self.tokens {
            if by_id.insert(token.id, token).is_some() {
                return Err(MalformedTreeError::DuplicateId { id: token.id });
            }
        }

        let mut roots = 0;
        for token in &self.tokens {
            if token.head == token.id {
                return Err(MalformedTreeError::SelfHead { id: token.id });
            }
            if token.is_root() {
                roots += 1;
            } else if !by_id.contains_key(&token.head) {
                return Err(MalformedTreeError::DanglingHead {
                    id: token.id,
                    head: token.head,
                });
            }
        }
        if roots != 1 {
            return Err(MalformedTreeError::RootCount { count: roots });
        }

        // Every head chain has to reach the root within `len` steps.
        for token in &self.tokens {
            let mut current = token;
            let mut steps = 0;
            while !current.is_root() {
                steps += 1;
                if steps > self.tokens.len() {
                    return Err(MalformedTreeError::Cycle { id: token.id });
                }
                match by_id.get(&current.head) {
                    Some(&parent) => current = parent,
                    None => {
                        return Err(MalformedTreeError::DanglingHead {
                            id: current.id,
                            head: current.head,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(heads: &[usize]) -> Sentence {
        let tokens = heads
            .iter()
            .enumerate()
            .map(|(i, &head)| Token::new(i + 1, format!("w{}", i + 1), "NOUN", "", head, "dep"))
            .collect();
        Sentence::new("", tokens)
    }

    #[test]
    fn test_iter_words_is_restartable() {
        let sentence = chain(&[0, 1, 1]);
        let first: Vec<_> = sentence.iter_words().map(|t| t.id).collect();
        let second: Vec<_> = sentence.iter_words().map(|t| t.id).collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_valid_tree() {
        assert_eq!(chain(&[2, 0, 2, 3]).validate_tree(), Ok(()));
    }

    #[test]
    fn test_empty_sentence_is_valid() {
        assert_eq!(Sentence::default().validate_tree(), Ok(()));
    }

    #[test]
    fn test_self_head_rejected() {
        assert_eq!(
            chain(&[0, 2]).validate_tree(),
            Err(MalformedTreeError::SelfHead { id: 2 })
        );
    }

    #[test]
    fn test_missing_root_rejected() {
        assert_eq!(
            chain(&[2, 1]).validate_tree(),
            Err(MalformedTreeError::RootCount { count: 0 })
        );
    }

    #[test]
    fn test_two_roots_rejected() {
        assert_eq!(
            chain(&[0, 0]).validate_tree(),
            Err(MalformedTreeError::RootCount { count: 2 })
        );
    }

    #[test]
    fn test_dangling_head_rejected() {
        assert_eq!(
            chain(&[0, 7]).validate_tree(),
            Err(MalformedTreeError::DanglingHead { id: 2, head: 7 })
        );
    }

    #[test]
    fn test_cycle_rejected() {
        // 2 -> 3 -> 2, with 1 as the only root
        assert_eq!(
            chain(&[0, 3, 2]).validate_tree(),
            Err(MalformedTreeError::Cycle { id: 2 })
        );
    }

    #[test]
    fn test_long_chain_is_valid() {
        // 1 <- 2 <- 3 ... each word headed by the one before it
        let heads: Vec<usize> = (0..2000).collect();
        assert_eq!(chain(&heads).validate_tree(), Ok(()));

        let mut looped = heads.clone();
        looped[0] = 2000;
        looped.push(0);
        assert_eq!(
            chain(&looped).validate_tree(),
            Err(MalformedTreeError::Cycle { id: 1 })
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let sentence = Sentence::new(
            "",
            vec![
                Token::new(1, "a", "NOUN", "", 0, "root"),
                Token::new(1, "b", "NOUN", "", 1, "dep"),
            ],
        );
        assert_eq!(
            sentence.validate_tree(),
            Err(MalformedTreeError::DuplicateId { id: 1 })
        );
    }

    #[test]
    fn test_token_deserializes_without_feats() {
        let token: Token = serde_json::from_str(
            r#"{"id":1,"text":"نے","upos":"ADP","head":2,"deprel":"case"}"#,
        )
        .unwrap();
        assert_eq!(token.feats, "");
        assert!(!token.has_feats());
    }
}
