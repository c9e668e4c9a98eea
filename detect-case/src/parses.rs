//! Readers for the dependency parses the detector consumes.
//!
//! Sentences come from an external Urdu parser, either as CoNLL-U or as a
//! JSONL cache with one `{"sentence": ..., "tokens": [...]}` object per line.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use ergative_detector::{Sentence, Token};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected 10 tab-separated columns, found {found}")]
    Columns { line: usize, found: usize },
    #[error("line {line}: invalid token id '{value}'")]
    Id { line: usize, value: String },
    #[error("line {line}: invalid head '{value}'")]
    Head { line: usize, value: String },
    #[error("line {line}: invalid JSON")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFormat {
    Conllu,
    Jsonl,
}

impl ParseFormat {
    /// `.jsonl` and `.json` files are JSONL; anything else is read as CoNLL-U.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("jsonl" | "json") => ParseFormat::Jsonl,
            _ => ParseFormat::Conllu,
        }
    }
}

/// A parsed sentence and whether its text came with the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSentence {
    pub sentence: Sentence,
    /// False when the text was rebuilt by joining the word forms
    pub text_given: bool,
}

/// Read CoNLL-U text. Multi-word token ranges (`3-4`) and empty nodes (`5.1`)
/// are skipped, and `_` in the FEATS column means no features. The sentence
/// text comes from the `# text = ...` comment, or from the word forms joined by
/// spaces when there is none.
pub fn parse_conllu(content: &str) -> Result<Vec<ParsedSentence>, ParseError> {
    let mut sentences = Vec::new();
    let mut text: Option<String> = None;
    let mut tokens = Vec::new();

    for (i, raw) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim().is_empty() {
            flush_sentence(&mut sentences, &mut text, &mut tokens);
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some(value) = comment
                .trim_start()
                .strip_prefix("text")
                .and_then(|rest| rest.trim_start().strip_prefix('='))
            {
                text = Some(value.trim().to_string());
            }
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() != 10 {
            return Err(ParseError::Columns {
                line: line_no,
                found: columns.len(),
            });
        }

        let id = columns[0];
        if id.contains('-') || id.contains('.') {
            continue;
        }
        let id = id.parse::<usize>().map_err(|_| ParseError::Id {
            line: line_no,
            value: id.to_string(),
        })?;
        let head = columns[6].parse::<usize>().map_err(|_| ParseError::Head {
            line: line_no,
            value: columns[6].to_string(),
        })?;
        let feats = match columns[5] {
            "_" => "",
            feats => feats,
        };

        tokens.push(Token::new(
            id,
            columns[1],
            columns[3],
            feats,
            head,
            columns[7],
        ));
    }
    flush_sentence(&mut sentences, &mut text, &mut tokens);

    Ok(sentences)
}

fn flush_sentence(
    sentences: &mut Vec<ParsedSentence>,
    text: &mut Option<String>,
    tokens: &mut Vec<Token>,
) {
    let text = text.take();
    if tokens.is_empty() {
        return;
    }
    let tokens = std::mem::take(tokens);
    let text_given = text.is_some();
    let text = text.unwrap_or_else(|| {
        tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    });
    sentences.push(ParsedSentence {
        sentence: Sentence::new(text, tokens),
        text_given,
    });
}

#[derive(serde::Deserialize)]
struct ParsedLine {
    sentence: String,
    tokens: Vec<Token>,
}

/// Read a JSONL parse cache. Blank lines are ignored.
pub fn parse_jsonl(content: &str) -> Result<Vec<ParsedSentence>, ParseError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<ParsedLine>(line)
                .map(|parsed| ParsedSentence {
                    text_given: !parsed.sentence.trim().is_empty(),
                    sentence: Sentence::new(parsed.sentence, parsed.tokens),
                })
                .map_err(|source| ParseError::Json { line: i + 1, source })
        })
        .collect()
}

/// Parsed sentences, addressable by their text, and by position for parses
/// that carry no text of their own.
#[derive(Debug, Clone, Default)]
pub struct ParsedCorpus {
    sentences: Vec<Sentence>,
    text_given: Vec<bool>,
    by_text: HashMap<String, usize>,
}

impl ParsedCorpus {
    pub fn new(parsed: Vec<ParsedSentence>) -> Self {
        let mut sentences = Vec::with_capacity(parsed.len());
        let mut text_given = Vec::with_capacity(parsed.len());
        let mut by_text = HashMap::new();
        for (i, ParsedSentence { sentence, text_given: given }) in parsed.into_iter().enumerate() {
            let key = sentence.text.trim();
            if !key.is_empty() {
                by_text.entry(key.to_string()).or_insert(i);
            }
            sentences.push(sentence);
            text_given.push(given);
        }
        Self {
            sentences,
            text_given,
            by_text,
        }
    }

    /// Build from sentences whose non-empty texts all came with the parse.
    pub fn from_sentences(sentences: Vec<Sentence>) -> Self {
        Self::new(
            sentences
                .into_iter()
                .map(|sentence| ParsedSentence {
                    text_given: !sentence.text.trim().is_empty(),
                    sentence,
                })
                .collect(),
        )
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read parses {}", path.display()))?;
        let sentences = match ParseFormat::from_path(path) {
            ParseFormat::Conllu => parse_conllu(&content),
            ParseFormat::Jsonl => parse_jsonl(&content),
        }
        .with_context(|| format!("Failed to parse {}", path.display()))?;
        log::info!(
            "loaded {} parsed sentences from {}",
            sentences.len(),
            path.display()
        );
        Ok(Self::new(sentences))
    }

    /// The parse of `text`. When no parse has that exact text, the `index`-th
    /// parse is used, but only if its own text was rebuilt from word forms; a
    /// parse that came with a different text belongs to some other row. When
    /// several parses share a text the first one wins.
    pub fn lookup(&self, index: usize, text: &str) -> Option<&Sentence> {
        if let Some(&i) = self.by_text.get(text.trim()) {
            return self.sentences.get(i);
        }
        if self.text_given.get(index) != Some(&false) {
            return None;
        }
        let sentence = self.sentences.get(index)?;
        log::warn!(
            "no parse with text '{}', using sentence {index} ('{}')",
            text.trim(),
            sentence.text
        );
        Some(sentence)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
