use thiserror::Error;

/// A token's feature string could not be split into `Key=Value` pairs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeatureFormatError {
    #[error("feature entry `{entry}` of token {token_id} has no `=` separator")]
    MissingSeparator { token_id: usize, entry: String },
}

/// The `head` column of a sentence does not form a tree rooted at 0.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedTreeError {
    #[error("token {id} is its own head")]
    SelfHead { id: usize },
    #[error("token {id} points at head {head}, which is not in the sentence")]
    DanglingHead { id: usize, head: usize },
    #[error("token id {id} appears more than once")]
    DuplicateId { id: usize },
    #[error("expected exactly one root token, found {count}")]
    RootCount { count: usize },
    #[error("head chain starting at token {id} never reaches the root")]
    Cycle { id: usize },
}

/// Anything that stops a sentence from being classified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DetectError {
    #[error(transparent)]
    Feature(#[from] FeatureFormatError),
    #[error(transparent)]
    Tree(#[from] MalformedTreeError),
}
