use crate::error::DetectError;
use crate::markers::MarkerForms;
use crate::patterns::check_pattern;
use crate::token::Sentence;

/// Case-marking pattern of a sentence.
#[derive(
    Copy,
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
pub enum CaseLabel {
    /// Volitional: ergative subject of a perfective transitive verb
    #[serde(rename = "VOL")]
    Vol,
    /// Non-volitional (accidental)
    #[serde(rename = "NVOL")]
    Nvol,
    /// Neither pattern was confirmed
    #[serde(rename = "OTHER")]
    Other,
}

impl CaseLabel {
    pub const ALL: [CaseLabel; 3] = [CaseLabel::Vol, CaseLabel::Nvol, CaseLabel::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseLabel::Vol => "VOL",
            CaseLabel::Nvol => "NVOL",
            CaseLabel::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for CaseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown case label '{0}', expected VOL, NVOL or OTHER")]
pub struct ParseCaseLabelError(pub String);

impl std::str::FromStr for CaseLabel {
    type Err = ParseCaseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VOL" => Ok(CaseLabel::Vol),
            "NVOL" => Ok(CaseLabel::Nvol),
            "OTHER" => Ok(CaseLabel::Other),
            _ => Err(ParseCaseLabelError(s.to_string())),
        }
    }
}

/// Anything that can assign a case label to a parsed sentence.
pub trait CaseClassifier {
    fn classify(&self, sentence: &Sentence) -> Result<CaseLabel, DetectError>;
}

/// Rule-based Urdu ergative detector: marker scan, then structural check.
#[derive(Clone, Debug, Default)]
pub struct ErgativeDetector {
    forms: MarkerForms,
}

impl ErgativeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use different surface forms for the volitional and non-volitional postpositions.
    pub fn with_markers(volitional: impl Into<String>, non_volitional: impl Into<String>) -> Self {
        Self {
            forms: MarkerForms {
                volitional: volitional.into(),
                non_volitional: non_volitional.into(),
            },
        }
    }

    /// Label a sentence. A sentence without any marker is `OTHER` straight away.
    pub fn detect_case(&self, sentence: &Sentence) -> Result<CaseLabel, DetectError> {
        let markers = self.forms.scan_markers(sentence)?;
        if markers.is_empty() {
            log::trace!("no case marker in '{}'", sentence.text);
            return Ok(CaseLabel::Other);
        }

        log::debug!("markers {markers:?} in '{}'", sentence.text);
        let case = check_pattern(sentence, &markers)?;
        assert!(
            CaseLabel::ALL.contains(&case),
            "classifier produced {case:?}"
        );
        Ok(case)
    }
}

impl CaseClassifier for ErgativeDetector {
    fn classify(&self, sentence: &Sentence) -> Result<CaseLabel, DetectError> {
        self.detect_case(sentence)
    }
}
