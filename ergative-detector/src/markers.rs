use crate::classifier::CaseLabel;
use crate::error::FeatureFormatError;
use crate::features::{get_features, keys};
use crate::token::{Sentence, Token};

/// Ergative postposition, read as volitional.
pub const VOL_MARKER: &str = "نے";
/// Instrumental postposition, read as non-volitional.
pub const NVOL_MARKER: &str = "سے";

/// A case marker found in the first pass. Only the two marker labels can occur.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Marker {
    Volitional,
    NonVolitional,
}

impl From<Marker> for CaseLabel {
    fn from(marker: Marker) -> Self {
        match marker {
            Marker::Volitional => CaseLabel::Vol,
            Marker::NonVolitional => CaseLabel::Nvol,
        }
    }
}

/// Surface forms of the two postpositions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerForms {
    pub volitional: String,
    pub non_volitional: String,
}

impl Default for MarkerForms {
    fn default() -> Self {
        Self {
            volitional: VOL_MARKER.to_string(),
            non_volitional: NVOL_MARKER.to_string(),
        }
    }
}

impl MarkerForms {
    /// Classify a single word as a marker, if it is one.
    ///
    /// A candidate is a postposition (`AdpType=Post`) whose UPOS contains `ADP`;
    /// the marker is then decided by how the word ends.
    pub fn check_marker(&self, token: &Token) -> Result<Option<Marker>, FeatureFormatError> {
        if !token.upos.contains("ADP") {
            return Ok(None);
        }
        if !get_features(token)?.has(keys::ADP_TYPE, "Post") {
            return Ok(None);
        }

        let marker = if token.text.ends_with(self.volitional.as_str()) {
            Some(Marker::Volitional)
        } else if token.text.ends_with(self.non_volitional.as_str()) {
            Some(Marker::NonVolitional)
        } else {
            None
        };

        if let Some(marker) = marker {
            log::trace!("token {} '{}' is a {marker:?} marker", token.id, token.text);
        }
        Ok(marker)
    }

    /// One pass over the sentence, collecting every marker in surface order.
    pub fn scan_markers(&self, sentence: &Sentence) -> Result<Vec<Marker>, FeatureFormatError> {
        let mut markers = Vec::new();
        for token in sentence.iter_words() {
            if let Some(marker) = self.check_marker(token)? {
                markers.push(marker);
            }
        }
        Ok(markers)
    }
}

/// [`MarkerForms::scan_markers`] with the standard Urdu postpositions.
pub fn scan_markers(sentence: &Sentence) -> Result<Vec<Marker>, FeatureFormatError> {
    MarkerForms::default().scan_markers(sentence)
}
