use rustc_hash::FxHashMap;

use crate::error::MalformedTreeError;
use crate::token::{Sentence, Token};

/// Head id to direct dependents, in surface order. Built once per
/// classification and dropped with it.
#[derive(Debug, Default)]
pub struct ChildIndex<'s> {
    children: FxHashMap<usize, Vec<&'s Token>>,
}

impl<'s> ChildIndex<'s> {
    /// Index a sentence after checking that its heads form a tree.
    pub fn build(sentence: &'s Sentence) -> Result<Self, MalformedTreeError> {
        sentence.validate_tree()?;

        let mut children: FxHashMap<usize, Vec<&'s Token>> = FxHashMap::default();
        for token in sentence.iter_words() {
            children.entry(token.head).or_default().push(token);
        }

        Ok(Self { children })
    }

    pub fn children_of(&self, id: usize) -> &[&'s Token] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_children(&self, id: usize) -> bool {
        !self.children_of(id).is_empty()
    }
}
