//! Universal Dependencies morphological feature bundles.
//!
//! A parser writes a word's features as `Key=Value|Key=Value`. The rules only
//! ever ask a handful of questions of that bundle, so it is split on demand into
//! a [`FeatureMap`] that borrows from the token and is dropped after use.

use std::collections::BTreeMap;

use crate::error::FeatureFormatError;
use crate::token::Token;

/// Feature keys the case rules read.
pub mod keys {
    pub const ADP_TYPE: &str = "AdpType";
    pub const ASPECT: &str = "Aspect";
    pub const CASE: &str = "Case";
    pub const GENDER: &str = "Gender";
    pub const NUMBER: &str = "Number";
    pub const VERB_FORM: &str = "VerbForm";
}

/// Key to value view of one token's features.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureMap<'a> {
    entries: BTreeMap<&'a str, &'a str>,
}

impl<'a> FeatureMap<'a> {
    /// Split a raw feature string. Each entry is split on its first `=`; a
    /// repeated key keeps the last value.
    pub fn parse(token_id: usize, feats: &'a str) -> Result<Self, FeatureFormatError> {
        let mut entries = BTreeMap::new();
        if feats.is_empty() {
            return Ok(Self { entries });
        }

        for entry in feats.split('|') {
            let (key, value) =
                entry
                    .split_once('=')
                    .ok_or_else(|| FeatureFormatError::MissingSeparator {
                        token_id,
                        entry: entry.to_string(),
                    })?;
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries.get(key).copied()
    }

    /// The value for `key`, or `""` when it is absent.
    pub fn value_or_empty(&self, key: &str) -> &'a str {
        self.get(key).unwrap_or("")
    }

    /// Whether `key` is present with exactly `value`.
    pub fn has(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

impl std::fmt::Display for FeatureMap<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Build the feature map of a token.
pub fn get_features(token: &Token) -> Result<FeatureMap<'_>, FeatureFormatError> {
    FeatureMap::parse(token.id, &token.feats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(feats: &str) -> Token {
        Token::new(3, "لڑکے", "NOUN", feats, 0, "root")
    }

    #[test]
    fn test_empty_feats() {
        let token = token_with("");
        let map = get_features(&token).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.value_or_empty(keys::CASE), "");
    }

    #[test]
    fn test_parse_bundle() {
        let token = token_with("Case=Nom|Gender=Masc|Number=Sing");
        let map = get_features(&token).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("Case"), Some("Nom"));
        assert_eq!(map.get("Gender"), Some("Masc"));
        assert_eq!(map.get("Number"), Some("Sing"));
        assert!(map.has("Case", "Nom"));
        assert!(!map.has("Case", "Acc"));
    }

    #[test]
    fn test_round_trip_through_display() {
        let token = token_with("Number=Sing|Case=Nom|Gender=Masc");
        let map = get_features(&token).unwrap();
        let serialized = map.to_string();
        assert_eq!(serialized, "Case=Nom|Gender=Masc|Number=Sing");

        let reparsed = FeatureMap::parse(token.id, &serialized).unwrap();
        assert_eq!(reparsed, map);
    }

    #[test]
    fn test_idempotent() {
        let token = token_with("Aspect=Perf|VerbForm=Part");
        assert_eq!(get_features(&token).unwrap(), get_features(&token).unwrap());
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let token = token_with("Case=Acc|Case=Nom");
        let map = get_features(&token).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Case"), Some("Nom"));
    }

    #[test]
    fn test_split_on_first_separator() {
        let token = token_with("Foo=a=b");
        assert_eq!(get_features(&token).unwrap().get("Foo"), Some("a=b"));
    }

    #[test]
    fn test_missing_separator_is_an_error() {
        let token = token_with("Case=Nom|Masc");
        assert_eq!(
            get_features(&token),
            Err(FeatureFormatError::MissingSeparator {
                token_id: 3,
                entry: "Masc".to_string(),
            })
        );
    }
}
